// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the lfascan-analysis crate: cassette localisation,
// profile extraction, and peak analysis on synthetic inputs.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use lfascan_analysis::{extract_profile, find_peaks_and_areas, locate};
use lfascan_core::AnalysisConfig;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark cassette localisation on a 640x480 synthetic photo: a light card
/// on a dark table.
fn bench_locate(c: &mut Criterion) {
    let mut img = RgbImage::from_pixel(640, 480, Rgb([25, 25, 30]));
    draw_filled_rect_mut(&mut img, Rect::at(80, 160).of_size(480, 160), Rgb([235, 235, 230]));
    let photo = DynamicImage::ImageRgb8(img);
    let config = AnalysisConfig::default();

    c.bench_function("locate (640x480)", |b| {
        b.iter(|| black_box(locate(black_box(&photo), &config.locator)));
    });
}

/// Benchmark profile extraction on a rectified 600x200 cassette with a
/// control and a test line inside the sampled span.
fn bench_extract_profile(c: &mut Criterion) {
    let mut img = RgbImage::from_pixel(600, 200, Rgb([250, 250, 250]));
    draw_filled_rect_mut(&mut img, Rect::at(250, 0).of_size(3, 200), Rgb([150, 250, 250]));
    draw_filled_rect_mut(&mut img, Rect::at(290, 0).of_size(3, 200), Rgb([200, 250, 250]));
    let rectified = DynamicImage::ImageRgb8(img);
    let config = AnalysisConfig::default();

    c.bench_function("extract_profile (600x200)", |b| {
        b.iter(|| black_box(extract_profile(black_box(&rectified), &config.profile)));
    });
}

/// Benchmark peak/area analysis on a 100-sample profile with two peaks.
fn bench_find_peaks(c: &mut Criterion) {
    let samples: Vec<f64> = (0..100)
        .map(|i| {
            let x = i as f64;
            100.0 * (-(x - 25.0).powi(2) / 8.0).exp() + 50.0 * (-(x - 65.0).powi(2) / 8.0).exp()
        })
        .collect();
    let config = AnalysisConfig::default();

    c.bench_function("find_peaks_and_areas (100 samples)", |b| {
        b.iter(|| black_box(find_peaks_and_areas(black_box(&samples), &config.peaks)));
    });
}

criterion_group!(benches, bench_locate, bench_extract_profile, bench_find_peaks);
criterion_main!(benches);
