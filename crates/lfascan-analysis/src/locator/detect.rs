// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cassette outline detection — grayscale, Gaussian smoothing, Canny edges,
// contour tracing, and selection of the largest four-vertex polygon.

use image::{DynamicImage, GrayImage};
use imageproc::contours::find_contours;
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;
use imageproc::geometry::{approximate_polygon_dp, arc_length, contour_area};
use lfascan_core::{LocatorConfig, Point2, Quadrilateral};
use tracing::{debug, info, instrument, warn};

use super::geometry::quad_area;

/// Find the cassette outline in a photograph.
///
/// ## Pipeline
///
/// 1. Convert to grayscale
/// 2. Gaussian blur with a `blur_kernel`-tap separable kernel
/// 3. Canny edge detection with the configured low/high thresholds
/// 4. Trace every contour of the edge map (flat list, no hierarchy)
/// 5. Approximate each contour as a polygon, tolerance proportional to its
///    perimeter, and keep the four-vertex ones
/// 6. Return the candidate with the largest enclosed area
///
/// Returns `None` when no contour simplifies to a quadrilateral of nonzero
/// area. Callers must treat that as "no cassette detected" and skip
/// rectification.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn locate(image: &DynamicImage, config: &LocatorConfig) -> Option<Quadrilateral> {
    let edges = edge_map(image, config);
    let quad = best_quadrilateral(&edges, config.poly_approx_tolerance);
    match &quad {
        Some(q) => info!(area = quad_area(q), corners = ?q.corners, "Cassette outline located"),
        None => warn!("No four-vertex contour found; cassette not detected"),
    }
    quad
}

/// Binary edge map of `image` (255 = edge).
pub fn edge_map(image: &DynamicImage, config: &LocatorConfig) -> GrayImage {
    let blurred = smooth(&image.to_luma8(), config);

    let edges = canny(&blurred, config.canny_low, config.canny_high);
    debug!(
        low = config.canny_low,
        high = config.canny_high,
        "Canny edge detection complete"
    );
    edges
}

/// Gaussian blur with exactly `blur_kernel` taps per axis. Borders are
/// padded by continuity.
pub fn smooth(gray: &GrayImage, config: &LocatorConfig) -> GrayImage {
    let sigma = config.effective_sigma();
    let kernel = gaussian_kernel(config.blur_kernel, sigma);
    debug!(taps = kernel.len(), sigma, "Applied Gaussian blur");
    separable_filter_equal(gray, &kernel)
}

/// Normalised 1-D Gaussian weights, `size` taps centred on the middle one.
fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let radius = (size.max(1) / 2) as i32;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let weights: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / two_sigma_sq).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Select the largest-area quadrilateral among all contours of `edges`.
///
/// `tolerance` is the polygon approximation epsilon as a fraction of each
/// contour's closed arc length. Ties in area keep the first contour found.
pub fn best_quadrilateral(edges: &GrayImage, tolerance: f64) -> Option<Quadrilateral> {
    let contours = find_contours::<u32>(edges);
    debug!(contour_count = contours.len(), "Contours traced");

    let mut best: Option<Quadrilateral> = None;
    let mut best_area = 0.0f64;
    let mut candidates = 0usize;

    for contour in &contours {
        if contour.points.len() < 4 {
            continue;
        }
        let epsilon = tolerance * arc_length(&contour.points, true);
        if epsilon <= 0.0 {
            continue;
        }

        let polygon = approximate_polygon_dp(&contour.points, epsilon, true);
        if polygon.len() != 4 {
            continue;
        }
        candidates += 1;

        let area = contour_area(&polygon);
        if area > best_area {
            best_area = area;
            best = Some(Quadrilateral::new([0, 1, 2, 3].map(|i| {
                Point2::new(polygon[i].x as f32, polygon[i].y as f32)
            })));
        }
    }

    debug!(candidates, best_area, "Quadrilateral candidates evaluated");
    best
}
