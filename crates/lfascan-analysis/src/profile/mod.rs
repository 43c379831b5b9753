// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Profile analyzer — background-corrected line profile, peak/area analysis,
// and peak annotation.

pub mod annotate;
pub mod extract;
pub mod peaks;

pub use annotate::annotate;
pub use extract::extract_profile;
pub use peaks::find_peaks_and_areas;
