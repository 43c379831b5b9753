// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for lfascan.
//
// "Cassette not found" and "no peaks detected" are expected outcomes and are
// reported through return values, never through this enum.

use thiserror::Error;

/// Top-level error type for all lfascan operations.
#[derive(Debug, Error)]
pub enum LfaError {
    // -- Image errors --
    #[error("image decoding failed: {0}")]
    ImageDecode(String),

    #[error("image encoding failed: {0}")]
    ImageEncode(String),

    // -- Precondition violations --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "sampling window (columns {span_start}..{span_end}, rows {row_start}..={row_end}) \
         does not fit a {width}x{height} image"
    )]
    SampleOutOfBounds {
        span_start: u32,
        span_end: u32,
        row_start: i64,
        row_end: i64,
        width: u32,
        height: u32,
    },

    #[error("cannot rectify quadrilateral: {0}")]
    DegenerateQuadrilateral(String),

    // -- Execution --
    #[error("background analysis task failed: {0}")]
    Background(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LfaError>;
