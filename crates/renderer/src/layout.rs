//! Polar layout of the wind rose: bar geometry, colors and axis ticks.
//!
//! Angles follow the meteorological convention used throughout the crate:
//! zero at north, increasing clockwise.

use std::f64::consts::{PI, TAU};

use tracing::debug;
use windrose_common::{WindInput, WindRoseResult};

use crate::gradient::{Color, ColorScale, Normalize};
use crate::options::{BarWidthMode, RenderOptions};
use crate::style::resolve_color_scale;
use crate::summary::Summary;

/// Radial axis upper limit as a multiple of the highest frequency.
pub const RADIAL_HEADROOM: f64 = 1.1;

/// Angles closer than this (radians) count as the same direction.
const SAME_ANGLE: f64 = 1e-9;

/// One bar of the rose.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub direction_deg: f64,
    /// Center angle in radians, clockwise from north
    pub angle_rad: f64,
    /// Angular width in radians
    pub width_rad: f64,
    pub frequency: f64,
    pub color: Color,
}

/// Everything the scene needs to draw, computed without touching pixels.
#[derive(Debug, Clone)]
pub struct RoseLayout {
    pub bars: Vec<Bar>,
    /// Upper radial limit; the lower limit is always zero
    pub radial_limit: f64,
    pub radial_ticks: Vec<f64>,
    /// Spoke (degrees) along which the radial tick labels are drawn
    pub label_angle_deg: f64,
    pub norm: Normalize,
    pub scale: ColorScale,
    pub summary: Summary,
}

impl RoseLayout {
    /// Validate the input, resolve the configured color scale and lay out
    /// the rose.
    pub fn compute(input: &WindInput, options: &RenderOptions) -> WindRoseResult<Self> {
        let scale = resolve_color_scale(options)?;
        Self::with_scale(input, options, scale)
    }

    /// Lay out the rose with an explicit color scale.
    pub fn with_scale(
        input: &WindInput,
        options: &RenderOptions,
        scale: ColorScale,
    ) -> WindRoseResult<Self> {
        input.validate()?;
        let summary = Summary::from_input(input)?;

        let (min_freq, max_freq) = input
            .freq_range()
            .ok_or(windrose_common::WindRoseError::EmptyInput)?;
        let norm = Normalize::new(min_freq, max_freq);

        let angles: Vec<f64> = input.bins.iter().map(|d| d.to_radians()).collect();
        let widths = match options.bar_width {
            BarWidthMode::Uniform => vec![uniform_width(angles.len()); angles.len()],
            BarWidthMode::Neighbors => neighbor_widths(&angles),
        };

        let bars: Vec<Bar> = input
            .bins
            .iter()
            .zip(&input.freq)
            .zip(angles.iter().zip(&widths))
            .map(|((&direction_deg, &frequency), (&angle_rad, &width_rad))| Bar {
                direction_deg,
                angle_rad,
                width_rad,
                frequency,
                color: scale.map(frequency, &norm),
            })
            .collect();

        let radial_limit = RADIAL_HEADROOM * max_freq;
        let radial_ticks = radial_ticks(radial_limit, options.radial_tick_count);
        let label_angle_deg = label_angle(&input.bins, &input.freq);

        debug!(
            bars = bars.len(),
            radial_limit,
            label_angle_deg,
            degenerate_colors = norm.is_degenerate(),
            colormap = scale.name(),
            "Computed rose layout"
        );

        Ok(Self {
            bars,
            radial_limit,
            radial_ticks,
            label_angle_deg,
            norm,
            scale,
            summary,
        })
    }

    /// The bar with the highest frequency (first on ties).
    pub fn dominant_bar(&self) -> Option<&Bar> {
        let mut best: Option<&Bar> = None;
        for bar in &self.bars {
            match best {
                Some(b) if bar.frequency <= b.frequency => {}
                _ => best = Some(bar),
            }
        }
        best
    }
}

/// Angular width of each of `n` evenly spread bars.
pub fn uniform_width(n: usize) -> f64 {
    TAU / n as f64
}

/// Per-bar widths from the angular gaps to the nearest distinct neighbor on
/// either side, wrapping around north. A single distinct direction gets the
/// full circle.
pub fn neighbor_widths(angles_rad: &[f64]) -> Vec<f64> {
    let mut distinct: Vec<f64> = angles_rad.iter().map(|a| a.rem_euclid(TAU)).collect();
    distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    distinct.dedup_by(|a, b| (*a - *b).abs() < SAME_ANGLE);
    if distinct.len() > 1 && (distinct[0] + TAU - distinct[distinct.len() - 1]) < SAME_ANGLE {
        distinct.pop();
    }

    let n = distinct.len();
    let width_for = |angle: f64| -> f64 {
        if n < 2 {
            return TAU;
        }
        let a = angle.rem_euclid(TAU);
        let idx = distinct
            .iter()
            .position(|d| circular_gap(*d, a) < SAME_ANGLE || circular_gap(a, *d) < SAME_ANGLE)
            .unwrap_or(0);
        let prev = distinct[(idx + n - 1) % n];
        let next = distinct[(idx + 1) % n];
        circular_gap(prev, distinct[idx]).min(circular_gap(distinct[idx], next))
    };

    angles_rad.iter().map(|&a| width_for(a)).collect()
}

/// Clockwise angular distance from `from` to `to`, in [0, 2pi).
fn circular_gap(from: f64, to: f64) -> f64 {
    (to - from).rem_euclid(TAU)
}

/// `count` evenly spaced radial gridline values up to and including `limit`.
pub fn radial_ticks(limit: f64, count: usize) -> Vec<f64> {
    if limit <= 0.0 || count == 0 {
        return Vec::new();
    }
    (1..=count).map(|k| limit * k as f64 / count as f64).collect()
}

/// Spoke for the radial tick labels: the middle of the gap between the two
/// adjacent directions whose taller bar is shortest. With one direction the
/// labels go on the opposite side.
pub fn label_angle(bins_deg: &[f64], freq: &[f64]) -> f64 {
    let mut points: Vec<(f64, f64)> = bins_deg
        .iter()
        .zip(freq)
        .map(|(&d, &f)| (d.rem_euclid(360.0), f))
        .collect();
    points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    // merge duplicates, keeping the taller bar
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for (deg, f) in points {
        match merged.last_mut() {
            Some(last) if (deg - last.0).abs() < SAME_ANGLE * 180.0 / PI => {
                last.1 = last.1.max(f);
            }
            _ => merged.push((deg, f)),
        }
    }

    match merged.len() {
        0 => 0.0,
        1 => (merged[0].0 + 180.0).rem_euclid(360.0),
        n => {
            let mut best = (f64::INFINITY, 0.0);
            for i in 0..n {
                let (a, fa) = merged[i];
                let (b, fb) = merged[(i + 1) % n];
                let gap = (b - a).rem_euclid(360.0);
                let cost = fa.max(fb);
                if cost < best.0 {
                    best = (cost, (a + gap / 2.0).rem_euclid(360.0));
                }
            }
            best.1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_width_sixteen() {
        let w = uniform_width(16);
        assert!((w.to_degrees() - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_neighbor_widths_match_uniform_on_even_bins() {
        let angles: Vec<f64> = (0..8).map(|i| (i as f64 * 45.0).to_radians()).collect();
        for w in neighbor_widths(&angles) {
            assert!((w - uniform_width(8)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_neighbor_widths_irregular() {
        let angles: Vec<f64> = [0.0, 30.0, 180.0, 270.0_f64]
            .iter()
            .map(|d| d.to_radians())
            .collect();
        let widths: Vec<f64> = neighbor_widths(&angles)
            .into_iter()
            .map(f64::to_degrees)
            .collect();
        let expected = [30.0, 30.0, 90.0, 90.0];
        for (w, e) in widths.iter().zip(expected) {
            assert!((w - e).abs() < 1e-9, "width {} expected {}", w, e);
        }
    }

    #[test]
    fn test_neighbor_widths_single_direction() {
        assert_eq!(neighbor_widths(&[1.0]), vec![TAU]);
        assert_eq!(neighbor_widths(&[1.0, 1.0]), vec![TAU, TAU]);
    }

    #[test]
    fn test_radial_ticks() {
        let ticks = radial_ticks(0.5, 5);
        assert_eq!(ticks.len(), 5);
        assert!((ticks[0] - 0.1).abs() < 1e-12);
        assert!((ticks[4] - 0.5).abs() < 1e-12);
        assert!(radial_ticks(0.0, 5).is_empty());
    }

    #[test]
    fn test_label_angle_avoids_tall_bars() {
        let angle = label_angle(&[0.0, 90.0, 180.0, 270.0], &[0.4, 0.3, 0.2, 0.1]);
        assert!((angle - 225.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_angle_wraps_past_north() {
        // quietest gap is between 270 and 0
        let angle = label_angle(&[0.0, 90.0, 180.0, 270.0], &[0.1, 0.4, 0.4, 0.1]);
        assert!((angle - 315.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_angle_single_direction() {
        assert!((label_angle(&[45.0], &[1.0]) - 225.0).abs() < 1e-9);
    }
}
