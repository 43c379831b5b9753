// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Peak markers drawn over the rectified cassette for visual inspection.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use lfascan_core::AnnotationConfig;
use tracing::debug;

/// Copy `rectified` to RGBA and draw a full-height vertical marker at column
/// `x_offset + peak` for every peak.
///
/// Markers are `style.thickness` pixels wide starting at the peak column;
/// anything falling outside the image is clipped.
pub fn annotate(
    rectified: &DynamicImage,
    peaks: &[usize],
    x_offset: u32,
    style: &AnnotationConfig,
) -> RgbaImage {
    let mut display = rectified.to_rgba8();
    let bottom = display.height().saturating_sub(1) as f32;
    let color = Rgba(style.color);

    for &peak in peaks {
        let x = x_offset as usize + peak;
        for dx in 0..style.thickness as usize {
            let column = (x + dx) as f32;
            draw_line_segment_mut(&mut display, (column, 0.0), (column, bottom), color);
        }
    }
    debug!(markers = peaks.len(), "Peak markers drawn");
    display
}
