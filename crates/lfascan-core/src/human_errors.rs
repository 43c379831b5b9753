// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable messages for people reading a test at home.
//
// Every error and every expected "nothing found" outcome is mapped to plain
// English with a clear suggestion. The severity drives UI presentation.

use crate::error::LfaError;

/// Severity of an outcome from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Lighting, framing or focus; another photo usually helps.
    RetakePhoto,
    /// Something outside the photo must change (settings, file choice).
    ActionRequired,
    /// Retrying will not help: a bug or an unusable input.
    Permanent,
}

/// A human-readable message with plain English text and an actionable
/// suggestion.
#[derive(Debug, Clone)]
pub struct HumanMessage {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    pub severity: Severity,
}

/// Message for a photo in which no cassette outline was found.
pub fn cassette_not_found() -> HumanMessage {
    HumanMessage {
        message: "We couldn't find the test cassette in this photo.".into(),
        suggestion: "Place the cassette on a plain, contrasting surface, fill most of the frame with it, and take the photo again.".into(),
        severity: Severity::RetakePhoto,
    }
}

/// Message for a cassette in which no line rose above the noise floor.
pub fn no_peaks_detected() -> HumanMessage {
    HumanMessage {
        message: "No lines were visible on the test strip.".into(),
        suggestion: "Check that the test has finished developing, then retake the photo in even light without shadows across the window.".into(),
        severity: Severity::RetakePhoto,
    }
}

/// Convert an `LfaError` into a `HumanMessage`.
pub fn humanize_error(err: &LfaError) -> HumanMessage {
    match err {
        LfaError::ImageDecode(_) => HumanMessage {
            message: "This photo couldn't be opened.".into(),
            suggestion: "The file may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            severity: Severity::ActionRequired,
        },

        LfaError::ImageEncode(_) => HumanMessage {
            message: "The result image couldn't be saved.".into(),
            suggestion: "Try a different output location with enough free space.".into(),
            severity: Severity::ActionRequired,
        },

        LfaError::InvalidConfig(detail) => HumanMessage {
            message: "The analysis settings are not valid.".into(),
            suggestion: format!("Fix the settings file or go back to the defaults. ({detail})"),
            severity: Severity::ActionRequired,
        },

        LfaError::SampleOutOfBounds { .. } => HumanMessage {
            message: "The reading window doesn't fit on the cassette image.".into(),
            suggestion: "The sampling span or band is larger than the rectified cassette. Adjust the settings or restore the defaults.".into(),
            severity: Severity::ActionRequired,
        },

        LfaError::DegenerateQuadrilateral(_) => HumanMessage {
            message: "The cassette outline looked distorted.".into(),
            suggestion: "Hold the camera straight above the cassette and take the photo again.".into(),
            severity: Severity::RetakePhoto,
        },

        LfaError::Background(_) => HumanMessage {
            message: "The analysis stopped unexpectedly.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            severity: Severity::Permanent,
        },

        LfaError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanMessage {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanMessage {
                    message: "The app doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or copy the file to a different location first.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanMessage {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                    severity: Severity::ActionRequired,
                }
            }
        }

        LfaError::Serialization(_) => HumanMessage {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Check that the file is valid JSON, or generate a fresh one with the defaults.".into(),
            severity: Severity::ActionRequired,
        },
    }
}
