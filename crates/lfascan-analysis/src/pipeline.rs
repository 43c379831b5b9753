// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot analysis pipeline: photo → cassette outline → rectified cassette →
// profile → peaks, areas and ratio → annotated image.
//
// Single pass, synchronous, no state kept between calls.

use image::{DynamicImage, RgbaImage};
use lfascan_core::{AnalysisConfig, AnalysisResult, Profile, Quadrilateral, Result};
use tracing::{info, instrument, warn};

use crate::locator::{locate, rectify};
use crate::profile::{annotate, extract_profile, find_peaks_and_areas};

/// Outcome of analysing one photo.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// No four-vertex contour was found; nothing was rectified.
    CassetteNotFound,
    Analyzed(Box<CassetteAnalysis>),
}

impl PipelineOutcome {
    pub fn analysis(&self) -> Option<&CassetteAnalysis> {
        match self {
            Self::Analyzed(analysis) => Some(analysis),
            Self::CassetteNotFound => None,
        }
    }
}

/// Everything produced for a located cassette.
#[derive(Debug, Clone)]
pub struct CassetteAnalysis {
    /// Outline in source photo coordinates.
    pub quadrilateral: Quadrilateral,
    /// Perspective-corrected cassette at the configured size.
    pub rectified: DynamicImage,
    pub strip: StripAnalysis,
}

/// Profile-level results for a rectified cassette.
#[derive(Debug, Clone)]
pub struct StripAnalysis {
    pub profile: Profile,
    /// Empty peak list means no line was detected.
    pub result: AnalysisResult,
    /// Rectified cassette with peak markers.
    pub annotated: RgbaImage,
}

/// Run the full pipeline on a photo.
///
/// "Cassette not found" and "no peaks" are ordinary outcomes; only invalid
/// configuration, degenerate geometry and undersized images are errors.
#[instrument(skip_all, fields(width = photo.width(), height = photo.height()))]
pub fn analyze_photo(photo: &DynamicImage, config: &AnalysisConfig) -> Result<PipelineOutcome> {
    config.validate()?;

    let Some(quadrilateral) = locate(photo, &config.locator) else {
        return Ok(PipelineOutcome::CassetteNotFound);
    };

    let rectified = rectify(
        photo,
        &quadrilateral,
        config.locator.rectified_size,
        config.locator.corner_order,
    )?;
    let strip = analyze_strip(&rectified, config)?;

    Ok(PipelineOutcome::Analyzed(Box::new(CassetteAnalysis {
        quadrilateral,
        rectified,
        strip,
    })))
}

/// Run the profile half of the pipeline on an already-rectified cassette.
#[instrument(skip_all, fields(width = rectified.width(), height = rectified.height()))]
pub fn analyze_strip(rectified: &DynamicImage, config: &AnalysisConfig) -> Result<StripAnalysis> {
    let profile = extract_profile(rectified, &config.profile)?;
    let result = find_peaks_and_areas(profile.samples(), &config.peaks);
    let annotated = annotate(rectified, result.peaks(), profile.x_offset(), &config.annotation);

    if result.has_peaks() {
        info!(summary = %result, "Strip analysed");
    } else {
        warn!("Strip analysed but no lines detected");
    }

    Ok(StripAnalysis {
        profile,
        result,
        annotated,
    })
}
