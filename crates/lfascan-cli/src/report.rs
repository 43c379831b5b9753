// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON report written after each analysis.

use std::path::Path;

use chrono::{DateTime, Utc};
use lfascan_analysis::PipelineOutcome;
use lfascan_core::human_errors::{cassette_not_found, no_peaks_detected};
use lfascan_core::{AnalysisResult, Point2};
use serde::Serialize;

use crate::integrity::hash_bytes;

/// Machine-readable summary of one photo.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    /// SHA-256 of the input file bytes.
    pub source_sha256: String,
    pub analyzed_at: DateTime<Utc>,
    pub cassette_found: bool,
    /// Detected outline in photo coordinates, as produced by the locator.
    pub corners: Option<[Point2; 4]>,
    pub profile_x_offset: Option<u32>,
    pub profile: Vec<f64>,
    pub result: Option<AnalysisResult>,
    /// The line printed to the terminal.
    pub summary: String,
}

impl AnalysisReport {
    pub fn new(source: &Path, source_bytes: &[u8], outcome: &PipelineOutcome) -> Self {
        let mut report = Self {
            source: source.display().to_string(),
            source_sha256: hash_bytes(source_bytes),
            analyzed_at: Utc::now(),
            cassette_found: false,
            corners: None,
            profile_x_offset: None,
            profile: Vec::new(),
            result: None,
            summary: cassette_not_found().message,
        };

        if let Some(analysis) = outcome.analysis() {
            let strip = &analysis.strip;
            report.cassette_found = true;
            report.corners = Some(analysis.quadrilateral.corners);
            report.profile_x_offset = Some(strip.profile.x_offset());
            report.profile = strip.profile.samples().to_vec();
            report.summary = if strip.result.has_peaks() {
                strip.result.to_string()
            } else {
                no_peaks_detected().message
            };
            report.result = Some(strip.result.clone());
        }
        report
    }
}
