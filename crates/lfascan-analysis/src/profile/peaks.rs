// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Peak detection and valley-bounded area integration over a line profile.

use std::ops::RangeInclusive;

use lfascan_core::{AnalysisResult, PeakConfig};
use tracing::{debug, info, warn};

/// Find the strongest peaks of `samples`, their areas, and the two-peak
/// ratio.
///
/// A sample `i` in `1..len-1` is a candidate when it is strictly greater than
/// its left neighbour, at least its right neighbour, and at least
/// `min_amplitude`. On a plateau this marks only the leftmost sample.
///
/// Candidates are ranked by value (ties keep the leftmost), the top
/// `max_peaks` are kept and returned in ascending position. Each peak's area
/// is the sum of the samples in its [`valley_region`].
pub fn find_peaks_and_areas(samples: &[f64], config: &PeakConfig) -> AnalysisResult {
    let candidates = peak_candidates(samples, config.min_amplitude);
    if candidates.is_empty() {
        warn!(
            min_amplitude = config.min_amplitude,
            "No peaks above the minimum amplitude"
        );
        return AnalysisResult::empty();
    }
    debug!(count = candidates.len(), "Peak candidates found");

    let mut ranked = candidates;
    ranked.sort_by(|&a, &b| samples[b].total_cmp(&samples[a]));
    ranked.truncate(config.max_peaks);
    ranked.sort_unstable();

    let areas: Vec<f64> = ranked
        .iter()
        .map(|&p| samples[valley_region(samples, p)].iter().sum())
        .collect();

    let result = AnalysisResult::from_peaks(ranked, areas);
    info!(
        peaks = ?result.peaks(),
        areas = ?result.areas(),
        ratio = ?result.ratio(),
        "Peak analysis complete"
    );
    result
}

/// Indices of local maxima at or above `min_amplitude`, ascending.
pub fn peak_candidates(samples: &[f64], min_amplitude: f64) -> Vec<usize> {
    if samples.len() < 3 {
        return Vec::new();
    }
    (1..samples.len() - 1)
        .filter(|&i| {
            let y = samples[i];
            y > samples[i - 1] && y >= samples[i + 1] && y >= min_amplitude
        })
        .collect()
}

/// Inclusive region around `peak` reached by walking outwards while the
/// profile does not rise.
///
/// The walk stops at the first sample whose outer neighbour is higher, or at
/// the profile ends. This is a local watershed bound, not a search for the
/// global minimum between peaks.
pub fn valley_region(samples: &[f64], peak: usize) -> RangeInclusive<usize> {
    let mut left = peak;
    while left > 0 && samples[left - 1] <= samples[left] {
        left -= 1;
    }
    let mut right = peak;
    while right + 1 < samples.len() && samples[right + 1] <= samples[right] {
        right += 1;
    }
    left..=right
}
