// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — warp the cassette quadrilateral of the original
// colour photo onto a fixed-size rectangle.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use lfascan_core::{CornerOrder, LfaError, Quadrilateral, RectSize, Result};
use tracing::{debug, info, instrument, warn};

use super::geometry::order_corners;

/// Warp the region of `image` bounded by `quad` onto a `size` rectangle.
///
/// Corners are assigned to the destination `(0,0)`, `(w,0)`, `(w,h)`, `(0,h)`
/// in the sequence produced by [`order_corners`]. The output always has
/// exactly `size` dimensions. Images with an alpha channel come back as RGBA,
/// all others as RGB; pixels mapped from outside the photo are black.
#[instrument(skip(image, quad), fields(width = image.width(), height = image.height()))]
pub fn rectify(
    image: &DynamicImage,
    quad: &Quadrilateral,
    size: RectSize,
    order: CornerOrder,
) -> Result<DynamicImage> {
    if size.width == 0 || size.height == 0 {
        return Err(LfaError::InvalidConfig(
            "rectified size must be non-zero".into(),
        ));
    }

    let corners = order_corners(quad, order);
    debug!(?corners, ?order, "Corners ordered");

    let (w, h) = (size.width as f32, size.height as f32);
    let src: [(f32, f32); 4] = corners.map(Into::into);
    let dest: [(f32, f32); 4] = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];

    let Some(projection) = Projection::from_control_points(src, dest) else {
        warn!(?corners, "Failed to compute projective transform");
        return Err(LfaError::DegenerateQuadrilateral(format!(
            "no projective transform maps {corners:?} onto a {}x{} rectangle",
            size.width, size.height
        )));
    };

    let rectified = if image.color().has_alpha() {
        let input = image.to_rgba8();
        let mut output = RgbaImage::new(size.width, size.height);
        warp_into(&input, &projection, Interpolation::Bilinear, Rgba([0, 0, 0, 0]), &mut output);
        DynamicImage::ImageRgba8(output)
    } else {
        let input = image.to_rgb8();
        let mut output = RgbImage::new(size.width, size.height);
        warp_into(&input, &projection, Interpolation::Bilinear, Rgb([0, 0, 0]), &mut output);
        DynamicImage::ImageRgb8(output)
    };

    info!(
        out_w = size.width,
        out_h = size.height,
        "Perspective rectification applied"
    );
    Ok(rectified)
}
