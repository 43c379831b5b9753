// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analysis configuration. Every tunable constant of the locate → rectify →
// profile → peaks pipeline lives here; defaults reproduce the reference
// reader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LfaError, Result};
use crate::types::{Channel, CornerOrder, RectSize, SampleSpan};

/// Widest background structuring element the opening supports.
pub const MAX_BACKGROUND_KERNEL: u32 = 511;

/// Complete pipeline configuration.
///
/// Sections are `#[serde(default)]`, so a JSON file only needs the fields it
/// wants to override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub locator: LocatorConfig,
    pub profile: ProfileConfig,
    pub peaks: PeakConfig,
    pub annotation: AnnotationConfig,
}

/// Cassette localisation and rectification parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Gaussian kernel size (odd).
    pub blur_kernel: u32,
    /// Gaussian sigma; `0.0` derives it from `blur_kernel`.
    pub blur_sigma: f32,
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Polygon approximation tolerance as a fraction of contour perimeter.
    pub poly_approx_tolerance: f64,
    /// Output size of the rectified cassette.
    pub rectified_size: RectSize,
    pub corner_order: CornerOrder,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            blur_sigma: 0.0,
            canny_low: 50.0,
            canny_high: 150.0,
            poly_approx_tolerance: 0.02,
            rectified_size: RectSize::default(),
            corner_order: CornerOrder::default(),
        }
    }
}

impl LocatorConfig {
    /// Sigma actually used for smoothing.
    ///
    /// When `blur_sigma` is not positive it follows the usual kernel-size
    /// rule `0.3 * ((k - 1) * 0.5 - 1) + 0.8`, which is 1.1 for a 5x5 kernel.
    pub fn effective_sigma(&self) -> f32 {
        if self.blur_sigma > 0.0 {
            self.blur_sigma
        } else {
            let k = self.blur_kernel.max(1) as f32;
            (0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8).max(0.1)
        }
    }
}

/// Signal extraction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub channel: Channel,
    /// Width of the horizontal structuring element used for the background
    /// opening (odd, at most [`MAX_BACKGROUND_KERNEL`]).
    pub background_kernel: u32,
    /// Median filter window (odd).
    pub median_window: u32,
    /// Rows averaged on each side of the vertical centre.
    pub band_half_height: u32,
    pub span: SampleSpan,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            channel: Channel::Red,
            background_kernel: 31,
            median_window: 5,
            band_half_height: 2,
            span: SampleSpan::default(),
        }
    }
}

impl ProfileConfig {
    /// Check that `background_kernel` is odd and within
    /// [`MAX_BACKGROUND_KERNEL`].
    pub fn check_background_kernel(&self) -> Result<()> {
        require_odd("profile.background_kernel", self.background_kernel)?;
        if self.background_kernel > MAX_BACKGROUND_KERNEL {
            return Err(LfaError::InvalidConfig(format!(
                "profile.background_kernel must be at most {MAX_BACKGROUND_KERNEL} (got {})",
                self.background_kernel
            )));
        }
        Ok(())
    }

    /// Check that the sampling band and span lie inside a `width` x `height`
    /// image. The band is centred on row `height / 2`.
    pub fn check_fits(&self, width: u32, height: u32) -> Result<()> {
        let centre = (height / 2) as i64;
        let half = self.band_half_height as i64;
        let (row_start, row_end) = (centre - half, centre + half);
        let span = self.span;
        if span.is_empty() || span.end > width || row_start < 0 || row_end >= height as i64 {
            return Err(LfaError::SampleOutOfBounds {
                span_start: span.start,
                span_end: span.end,
                row_start,
                row_end,
                width,
                height,
            });
        }
        Ok(())
    }
}

/// Peak selection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakConfig {
    /// Minimum sample value for a local maximum to count as a peak.
    pub min_amplitude: f64,
    /// Number of highest peaks kept.
    pub max_peaks: usize,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            min_amplitude: 2.0,
            max_peaks: 2,
        }
    }
}

/// Peak marker style for the annotated image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// RGBA marker colour.
    pub color: [u8; 4],
    /// Marker width in pixels.
    pub thickness: u32,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            color: [255, 0, 0, 255],
            thickness: 2,
        }
    }
}

impl AnalysisConfig {
    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let loc = &self.locator;
        require_odd("locator.blur_kernel", loc.blur_kernel)?;
        if !(loc.canny_low.is_finite() && loc.canny_high.is_finite()) || loc.canny_low > loc.canny_high
        {
            return Err(LfaError::InvalidConfig(format!(
                "canny thresholds must satisfy low <= high (got {} / {})",
                loc.canny_low, loc.canny_high
            )));
        }
        if !(loc.poly_approx_tolerance.is_finite() && loc.poly_approx_tolerance > 0.0) {
            return Err(LfaError::InvalidConfig(format!(
                "locator.poly_approx_tolerance must be positive (got {})",
                loc.poly_approx_tolerance
            )));
        }
        if loc.rectified_size.width == 0 || loc.rectified_size.height == 0 {
            return Err(LfaError::InvalidConfig(
                "locator.rectified_size must be non-zero".into(),
            ));
        }

        let prof = &self.profile;
        prof.check_background_kernel()?;
        require_odd("profile.median_window", prof.median_window)?;
        prof.check_fits(loc.rectified_size.width, loc.rectified_size.height)
            .map_err(|err| LfaError::InvalidConfig(err.to_string()))?;

        if self.peaks.max_peaks == 0 {
            return Err(LfaError::InvalidConfig("peaks.max_peaks must be at least 1".into()));
        }
        if !self.peaks.min_amplitude.is_finite() {
            return Err(LfaError::InvalidConfig(
                "peaks.min_amplitude must be finite".into(),
            ));
        }
        if self.annotation.thickness == 0 {
            return Err(LfaError::InvalidConfig(
                "annotation.thickness must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

fn require_odd(name: &str, value: u32) -> Result<()> {
    if value == 0 || value % 2 == 0 {
        return Err(LfaError::InvalidConfig(format!(
            "{name} must be a positive odd number (got {value})"
        )));
    }
    Ok(())
}
