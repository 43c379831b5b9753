// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lfascan — Core types, configuration and error definitions shared across all
// crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::{
    AnalysisConfig, AnnotationConfig, LocatorConfig, MAX_BACKGROUND_KERNEL, PeakConfig, ProfileConfig,
};
pub use error::{LfaError, Result};
pub use types::*;
