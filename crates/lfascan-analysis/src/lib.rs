// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lfascan-analysis — Image analysis for lateral-flow assay cassettes.
//
// Locates the cassette in a photo and rectifies it (`locator`), turns the
// rectified cassette into a background-corrected line profile and measures
// its peaks (`profile`), and ties both together in a single-pass `pipeline`
// with an async `background` boundary.

pub mod background;
pub mod locator;
pub mod pipeline;
pub mod profile;
pub mod source;

// Re-export the primary entry points so callers can use
// `lfascan_analysis::analyze_photo` etc.
pub use background::analyze_in_background;
pub use locator::{locate, rectify};
pub use pipeline::{CassetteAnalysis, PipelineOutcome, StripAnalysis, analyze_photo, analyze_strip};
pub use profile::{annotate, extract_profile, find_peaks_and_areas};
pub use source::{decode_photo, encode_png, load_photo, save_image};
