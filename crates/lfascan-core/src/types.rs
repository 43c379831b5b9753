// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the lfascan assay reader.

use serde::{Deserialize, Serialize};

/// A point in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Sum of both coordinates, used by the cheap corner-ordering heuristic.
    pub fn coordinate_sum(&self) -> f32 {
        self.x + self.y
    }
}

impl From<(f32, f32)> for Point2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for (f32, f32) {
    fn from(p: Point2) -> Self {
        (p.x, p.y)
    }
}

/// Best-guess cassette outline: exactly four vertices of a polygon
/// approximation, in the order they were produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub corners: [Point2; 4],
}

impl Quadrilateral {
    pub fn new(corners: [Point2; 4]) -> Self {
        Self { corners }
    }

    /// Arithmetic mean of the four corners.
    pub fn centroid(&self) -> Point2 {
        let (sx, sy) = self
            .corners
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point2::new(sx / 4.0, sy / 4.0)
    }
}

/// Fixed pixel dimensions of the rectified cassette image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectSize {
    pub width: u32,
    pub height: u32,
}

impl RectSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for RectSize {
    fn default() -> Self {
        Self::new(600, 200)
    }
}

/// Horizontal column range `[start, end)` sampled into the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSpan {
    pub start: u32,
    pub end: u32,
}

impl SampleSpan {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of profile samples this span produces.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl Default for SampleSpan {
    fn default() -> Self {
        Self::new(225, 325)
    }
}

/// Colour channel carrying the assay signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Most sensitive to the usual gold/red line chemistry.
    #[default]
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Index of this channel in an RGB or RGBA pixel.
    pub fn index(&self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// How the four detected corners are assigned to the destination rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerOrder {
    /// Sort by angle around the centroid, starting at the corner with the
    /// smallest coordinate sum: top-left, top-right, bottom-right,
    /// bottom-left.
    #[default]
    Clockwise,
    /// Sort by ascending `x + y`. Cheap, but mis-assigns the two middle
    /// corners for most cassettes.
    CoordinateSum,
}

/// Background-corrected 1-D intensity profile, one sample per column of the
/// sampled span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    samples: Vec<f64>,
    x_offset: u32,
}

impl Profile {
    pub fn new(samples: Vec<f64>, x_offset: u32) -> Self {
        Self { samples, x_offset }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Column of the rectified image that sample 0 was taken from.
    pub fn x_offset(&self) -> u32 {
        self.x_offset
    }
}

/// Peaks found in a profile, their valley-bounded areas, and the two-peak
/// ratio.
///
/// Peaks are strictly ascending by position and `areas[i]` belongs to
/// `peaks[i]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalysisResult {
    peaks: Vec<usize>,
    areas: Vec<f64>,
    ratio: Option<f64>,
}

impl AnalysisResult {
    /// Result for a profile with no qualifying peaks.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from ascending peak indices and their aligned areas.
    ///
    /// The ratio `areas[1] / areas[0]` is only present when exactly two peaks
    /// were kept and the first area is nonzero.
    pub fn from_peaks(peaks: Vec<usize>, areas: Vec<f64>) -> Self {
        debug_assert_eq!(peaks.len(), areas.len());
        debug_assert!(peaks.windows(2).all(|w| w[0] < w[1]));
        let ratio = match areas.as_slice() {
            [first, second] if *first != 0.0 => Some(second / first),
            _ => None,
        };
        Self {
            peaks,
            areas,
            ratio,
        }
    }

    pub fn peaks(&self) -> &[usize] {
        &self.peaks
    }

    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    pub fn has_peaks(&self) -> bool {
        !self.peaks.is_empty()
    }
}

impl std::fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Peaks: {:?}  Ratio: ", self.peaks)?;
        match self.ratio {
            Some(r) => write!(f, "{r:.2}"),
            None => write!(f, "n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_quad(x0: f32, y0: f32, x1: f32, y1: f32) -> Quadrilateral {
        Quadrilateral::new([
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    #[test]
    fn quad_centroid() {
        let c = rect_quad(0.0, 0.0, 10.0, 4.0).centroid();
        assert_eq!(c, Point2::new(5.0, 2.0));
    }

    #[test]
    fn default_span_yields_hundred_samples() {
        assert_eq!(SampleSpan::default().len(), 100);
        assert!(SampleSpan::new(5, 5).is_empty());
        assert_eq!(SampleSpan::new(9, 3).len(), 0);
    }

    #[test]
    fn ratio_present_for_two_peaks() {
        let result = AnalysisResult::from_peaks(vec![1, 4], vec![3.0, 6.0]);
        assert_eq!(result.ratio(), Some(2.0));
    }

    #[test]
    fn ratio_absent_for_single_peak() {
        let result = AnalysisResult::from_peaks(vec![2], vec![5.0]);
        assert_eq!(result.ratio(), None);
    }

    #[test]
    fn ratio_absent_when_first_area_zero() {
        let result = AnalysisResult::from_peaks(vec![1, 4], vec![0.0, 6.0]);
        assert_eq!(result.ratio(), None);
    }

    #[test]
    fn summary_formatting() {
        let two = AnalysisResult::from_peaks(vec![25, 65], vec![300.0, 150.0]);
        assert_eq!(two.to_string(), "Peaks: [25, 65]  Ratio: 0.50");
        assert_eq!(AnalysisResult::empty().to_string(), "Peaks: []  Ratio: n/a");
    }

    #[test]
    fn channel_serde_names() {
        let json = serde_json::to_string(&Channel::Red).unwrap();
        assert_eq!(json, "\"red\"");
        let order: CornerOrder = serde_json::from_str("\"coordinate_sum\"").unwrap();
        assert_eq!(order, CornerOrder::CoordinateSum);
    }
}
