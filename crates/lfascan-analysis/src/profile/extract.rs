// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signal extraction — turn the rectified cassette into a background-corrected
// 1-D intensity profile.
//
// Each stage is a pure function producing a new buffer so the pipeline can be
// inspected stage by stage.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::median_filter;
use imageproc::morphology::{Mask, grayscale_open};
use lfascan_core::{Channel, Profile, ProfileConfig, Result};
use tracing::{debug, info, instrument};

/// Extract the line profile from a rectified cassette image.
///
/// ## Pipeline
///
/// 1. Isolate the signal channel
/// 2. Invert, so coloured lines become bright peaks
/// 3. Estimate the background with a horizontal morphological opening
/// 4. Subtract it (top-hat)
/// 5. Median filter to suppress speckle
/// 6. Average the rows of a band centred vertically, column by column,
///    across the sampled span
///
/// Fails with `SampleOutOfBounds` if the band or span does not fit the
/// image, or `InvalidConfig` for an unusable background kernel; both checks
/// run before any pixel is read.
#[instrument(skip_all, fields(width = rectified.width(), height = rectified.height()))]
pub fn extract_profile(rectified: &DynamicImage, config: &ProfileConfig) -> Result<Profile> {
    config.check_background_kernel()?;
    config.check_fits(rectified.width(), rectified.height())?;

    let channel = signal_channel(rectified, config.channel);
    let inverted = invert(&channel);
    let background = horizontal_opening(&inverted, config.background_kernel);
    let signal = top_hat(&inverted, &background);
    debug!(kernel = config.background_kernel, "Background removed");

    let clean = median_smooth(&signal, config.median_window);
    let profile = band_profile(&clean, config)?;
    info!(
        samples = profile.len(),
        x_offset = profile.x_offset(),
        "Profile extracted"
    );
    Ok(profile)
}

/// Single colour channel of `image` as a grayscale buffer.
pub fn signal_channel(image: &DynamicImage, channel: Channel) -> GrayImage {
    let rgb = image.to_rgb8();
    let idx = channel.index();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        Luma([rgb.get_pixel(x, y).0[idx]])
    })
}

/// `255 - v` for every pixel.
pub fn invert(gray: &GrayImage) -> GrayImage {
    let mut out = gray.clone();
    image::imageops::invert(&mut out);
    out
}

/// Morphological opening with a `width` x 1 rectangular element.
///
/// Pixels outside the image are ignored, so edge pixels only see the
/// in-bounds part of the element. Narrow bright features (vertical lines) are
/// removed; broad trends survive. `width` must be odd and at most 511.
pub fn horizontal_opening(gray: &GrayImage, width: u32) -> GrayImage {
    let row = GrayImage::from_pixel(width.max(1), 1, Luma([255]));
    let centre = u8::try_from(width / 2).unwrap_or(u8::MAX);
    grayscale_open(gray, &Mask::from_image(&row, centre, 0))
}

/// Saturating `signal - background`.
pub fn top_hat(signal: &GrayImage, background: &GrayImage) -> GrayImage {
    GrayImage::from_fn(signal.width(), signal.height(), |x, y| {
        let s = signal.get_pixel(x, y).0[0];
        let b = background.get_pixel(x, y).0[0];
        Luma([s.saturating_sub(b)])
    })
}

/// Square `window` x `window` median filter with replicated borders.
pub fn median_smooth(gray: &GrayImage, window: u32) -> GrayImage {
    let radius = window / 2;
    if radius == 0 {
        return gray.clone();
    }
    median_filter(gray, radius, radius)
}

/// Column-wise mean over the configured row band and span.
pub fn band_profile(clean: &GrayImage, config: &ProfileConfig) -> Result<Profile> {
    config.check_fits(clean.width(), clean.height())?;

    let centre = clean.height() / 2;
    let half = config.band_half_height;
    let rows = (centre - half)..=(centre + half);
    let row_count = (2 * half + 1) as f64;
    let span = config.span;

    let samples = (span.start..span.end)
        .map(|x| {
            let sum: f64 = rows
                .clone()
                .map(|y| clean.get_pixel(x, y).0[0] as f64)
                .sum();
            sum / row_count
        })
        .collect();
    Ok(Profile::new(samples, span.start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;
    use lfascan_core::{LfaError, SampleSpan};

    /// White cassette with two vertical lines that absorb red light.
    fn strip_with_lines() -> DynamicImage {
        let mut img = RgbImage::from_pixel(600, 200, Rgb([255, 255, 255]));
        // Strong line: red drops by 100 at columns 250..=252.
        draw_filled_rect_mut(&mut img, Rect::at(250, 0).of_size(3, 200), Rgb([155, 255, 255]));
        // Weak line: red drops by 50 at columns 290..=292.
        draw_filled_rect_mut(&mut img, Rect::at(290, 0).of_size(3, 200), Rgb([205, 255, 255]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn channel_and_invert() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([10, 20, 30])));
        let red = signal_channel(&img, Channel::Red);
        assert_eq!(red.get_pixel(0, 0).0[0], 10);
        let blue = signal_channel(&img, Channel::Blue);
        assert_eq!(blue.get_pixel(3, 3).0[0], 30);
        assert_eq!(invert(&red).get_pixel(1, 1).0[0], 245);
    }

    #[test]
    fn opening_removes_narrow_spike_keeps_plateau() {
        let mut row = GrayImage::new(60, 1);
        // Narrow spike, width 3.
        for x in 10..13 {
            row.put_pixel(x, 0, Luma([200]));
        }
        // Broad plateau, width 20.
        for x in 30..50 {
            row.put_pixel(x, 0, Luma([80]));
        }
        let opened = horizontal_opening(&row, 7);
        assert_eq!(opened.get_pixel(11, 0).0[0], 0);
        assert_eq!(opened.get_pixel(40, 0).0[0], 80);
        assert_eq!(opened.get_pixel(30, 0).0[0], 80);
    }

    #[test]
    fn top_hat_saturates_at_zero() {
        let a = GrayImage::from_pixel(2, 1, Luma([10]));
        let b = GrayImage::from_pixel(2, 1, Luma([30]));
        assert_eq!(top_hat(&a, &b).get_pixel(0, 0).0[0], 0);
        assert_eq!(top_hat(&b, &a).get_pixel(1, 0).0[0], 20);
    }

    #[test]
    fn profile_has_fixed_length_and_offset() {
        let profile = extract_profile(&strip_with_lines(), &ProfileConfig::default()).unwrap();
        assert_eq!(profile.len(), 100);
        assert_eq!(profile.x_offset(), 225);
    }

    #[test]
    fn lines_become_peaks_on_flat_background() {
        let profile = extract_profile(&strip_with_lines(), &ProfileConfig::default()).unwrap();
        let s = profile.samples();
        for i in 25..=27 {
            assert!((s[i] - 100.0).abs() < 1e-9, "sample {i} = {}", s[i]);
        }
        for i in 65..=67 {
            assert!((s[i] - 50.0).abs() < 1e-9, "sample {i} = {}", s[i]);
        }
        assert_eq!(s[10], 0.0);
        assert_eq!(s[45], 0.0);
        assert!(s.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn uniform_background_drift_is_removed() {
        // Red channel darkens smoothly left to right; no lines.
        let img = RgbImage::from_fn(600, 200, |x, _| Rgb([(250 - x / 6) as u8, 255, 255]));
        let profile = extract_profile(&DynamicImage::ImageRgb8(img), &ProfileConfig::default()).unwrap();
        assert!(profile.samples().iter().all(|&v| v < 2.0), "{:?}", profile.samples());
    }

    #[test]
    fn image_too_small_is_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 100, Rgb([255, 255, 255])));
        let err = extract_profile(&img, &ProfileConfig::default()).unwrap_err();
        assert!(matches!(err, LfaError::SampleOutOfBounds { width: 300, .. }));
    }

    #[test]
    fn oversized_background_kernel_is_rejected() {
        let cfg = ProfileConfig {
            background_kernel: 601,
            ..ProfileConfig::default()
        };
        let err = extract_profile(&strip_with_lines(), &cfg).unwrap_err();
        assert!(matches!(err, LfaError::InvalidConfig(_)));
    }

    #[test]
    fn opening_ignores_pixels_outside_the_image() {
        // Bright run touching the left border, wider than half the element.
        let mut row = GrayImage::new(20, 1);
        for x in 0..6 {
            row.put_pixel(x, 0, Luma([90]));
        }
        let opened = horizontal_opening(&row, 7);
        assert_eq!(opened.get_pixel(0, 0).0[0], 90);
        assert_eq!(opened.get_pixel(5, 0).0[0], 90);
        assert_eq!(opened.get_pixel(6, 0).0[0], 0);
    }

    #[test]
    fn band_average_uses_centre_rows_only() {
        let mut clean = GrayImage::new(10, 11);
        // Rows 3..=7 are the band around centre 5 with half height 2.
        for x in 0..10 {
            clean.put_pixel(x, 3, Luma([10]));
            clean.put_pixel(x, 7, Luma([40]));
            clean.put_pixel(x, 0, Luma([255]));
        }
        let cfg = ProfileConfig {
            span: SampleSpan::new(2, 6),
            ..ProfileConfig::default()
        };
        let profile = band_profile(&clean, &cfg).unwrap();
        assert_eq!(profile.samples(), &[10.0, 10.0, 10.0, 10.0]);
        assert_eq!(profile.x_offset(), 2);
    }
}
