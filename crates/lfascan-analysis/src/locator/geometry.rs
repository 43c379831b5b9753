// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral helpers: enclosed area and corner ordering for the warp.

use imageproc::geometry::contour_area;
use imageproc::point::Point;
use lfascan_core::{CornerOrder, Point2, Quadrilateral};

/// Enclosed area of `quad`, independent of winding.
pub fn quad_area(quad: &Quadrilateral) -> f64 {
    contour_area(&quad.corners.map(|p| Point::new(p.x, p.y)))
}

/// Order quadrilateral corners for the destination rectangle
/// `[(0,0), (w,0), (w,h), (0,h)]`.
pub fn order_corners(quad: &Quadrilateral, order: CornerOrder) -> [Point2; 4] {
    let mut corners = quad.corners;
    match order {
        CornerOrder::CoordinateSum => {
            corners.sort_by(|a, b| a.coordinate_sum().total_cmp(&b.coordinate_sum()));
        }
        CornerOrder::Clockwise => {
            let c = quad.centroid();
            // Image y grows downwards, so ascending atan2 walks clockwise on
            // screen starting from the left.
            corners.sort_by(|a, b| {
                let ta = (a.y - c.y).atan2(a.x - c.x);
                let tb = (b.y - c.y).atan2(b.x - c.x);
                ta.total_cmp(&tb)
            });
            let start = corners
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.coordinate_sum().total_cmp(&b.coordinate_sum()))
                .map(|(i, _)| i)
                .unwrap_or(0);
            corners.rotate_left(start);
        }
    }
    corners
}
