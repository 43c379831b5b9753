// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cassette locator — find the cassette outline in a photo and produce a
// fixed-size, perspective-corrected image of it.

pub mod detect;
pub mod geometry;
pub mod rectify;

pub use detect::{best_quadrilateral, edge_map, locate};
pub use geometry::order_corners;
pub use rectify::rectify;
