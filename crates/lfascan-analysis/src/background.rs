// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async boundary for callers that must not block (UI threads, request
// handlers). The pipeline itself stays synchronous; this only moves it onto
// tokio's blocking pool.

use image::DynamicImage;
use lfascan_core::{AnalysisConfig, LfaError, Result};
use tracing::{debug, instrument};

use crate::pipeline::{PipelineOutcome, analyze_photo};

/// Run [`analyze_photo`] on the blocking thread pool.
///
/// Dropping the returned future abandons the result; the computation itself
/// runs to completion. Must be called from within a tokio runtime.
#[instrument(skip_all, fields(width = photo.width(), height = photo.height()))]
pub async fn analyze_in_background(
    photo: DynamicImage,
    config: AnalysisConfig,
) -> Result<PipelineOutcome> {
    debug!("Submitting analysis to blocking pool");
    tokio::task::spawn_blocking(move || analyze_photo(&photo, &config))
        .await
        .map_err(|err| LfaError::Background(err.to_string()))?
}
