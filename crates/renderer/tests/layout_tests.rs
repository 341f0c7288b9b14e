//! Tests for the polar layout: bar geometry, colors and radial axis.

use renderer::style::builtin_scale;
use renderer::{BarWidthMode, RenderOptions, RoseLayout};
use test_utils::{assert_approx_eq, equal_freq, four_bins, irregular};
use test_utils::{pseudo_random_frequencies, uniform_bins};
use windrose_common::{WindInput, WindRoseError};

fn four_bin_input() -> WindInput {
    WindInput::new(
        four_bins::BINS.to_vec(),
        four_bins::FREQ.to_vec(),
        four_bins::SPEED,
        four_bins::TI,
    )
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_uniform_widths_span_full_circle() {
    for n in [1usize, 4, 16, 36] {
        let input = WindInput::new(uniform_bins(n), pseudo_random_frequencies(n, 7), 5.0, 0.1);
        let layout = RoseLayout::compute(&input, &RenderOptions::default()).unwrap();

        let expected = 360.0 / n as f64;
        for bar in &layout.bars {
            assert_approx_eq!(bar.width_rad.to_degrees(), expected, 1e-9);
        }
        let total: f64 = layout.bars.iter().map(|b| b.width_rad).sum();
        assert_approx_eq!(total, std::f64::consts::TAU, 1e-9);
    }
}

#[test]
fn test_angles_follow_input_order() {
    let layout = RoseLayout::compute(&four_bin_input(), &RenderOptions::default()).unwrap();
    let degrees: Vec<f64> = layout.bars.iter().map(|b| b.angle_rad.to_degrees()).collect();
    for (got, want) in degrees.iter().zip(four_bins::BINS) {
        assert_approx_eq!(*got, want, 1e-9);
    }
}

#[test]
fn test_neighbor_widths_for_irregular_bins() {
    let input = WindInput::new(
        irregular::BINS.to_vec(),
        irregular::FREQ.to_vec(),
        irregular::SPEED,
        irregular::TI,
    );
    let options = RenderOptions {
        bar_width: BarWidthMode::Neighbors,
        ..Default::default()
    };
    let layout = RoseLayout::compute(&input, &options).unwrap();
    let widths: Vec<f64> = layout.bars.iter().map(|b| b.width_rad.to_degrees()).collect();

    assert_approx_eq!(widths[0], 30.0, 1e-9);
    assert_approx_eq!(widths[1], 30.0, 1e-9);
    assert_approx_eq!(widths[2], 90.0, 1e-9);
    assert_approx_eq!(widths[3], 90.0, 1e-9);
}

// ============================================================================
// Radial axis
// ============================================================================

#[test]
fn test_radial_limit_has_headroom() {
    let layout = RoseLayout::compute(&four_bin_input(), &RenderOptions::default()).unwrap();
    assert_approx_eq!(layout.radial_limit, 0.44, 1e-12);
    assert_eq!(layout.radial_ticks.len(), 5);
    assert_approx_eq!(*layout.radial_ticks.last().unwrap(), 0.44, 1e-12);
    assert!(layout.radial_ticks.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_radial_labels_sit_in_quietest_gap() {
    let layout = RoseLayout::compute(&four_bin_input(), &RenderOptions::default()).unwrap();
    assert_approx_eq!(layout.label_angle_deg, 225.0, 1e-9);
}

// ============================================================================
// Colors
// ============================================================================

#[test]
fn test_extremes_take_scale_endpoints() {
    let layout = RoseLayout::compute(&four_bin_input(), &RenderOptions::default()).unwrap();
    let scale = builtin_scale("RdYlBu_r").unwrap();

    // 0.4 is the maximum, 0.1 the minimum
    assert_eq!(layout.bars[0].color, scale.high());
    assert_eq!(layout.bars[3].color, scale.low());
    assert_ne!(layout.bars[1].color, layout.bars[2].color);
}

#[test]
fn test_default_scale_runs_blue_to_red() {
    let scale = builtin_scale("RdYlBu_r").unwrap();
    let low = scale.low();
    let high = scale.high();
    assert!(low.b > low.r, "low end should be blue, got {:?}", low);
    assert!(high.r > high.b, "high end should be red, got {:?}", high);
}

#[test]
fn test_equal_frequencies_share_one_color() {
    let input = WindInput::new(
        equal_freq::BINS.to_vec(),
        equal_freq::FREQ.to_vec(),
        equal_freq::SPEED,
        equal_freq::TI,
    );
    let layout = RoseLayout::compute(&input, &RenderOptions::default()).unwrap();

    assert!(layout.norm.is_degenerate());
    let first = layout.bars[0].color;
    assert!(layout.bars.iter().all(|b| b.color == first));
    assert_eq!(first, layout.scale.sample(0.5));
}

#[test]
fn test_colors_are_monotonic_in_frequency() {
    let bins = uniform_bins(16);
    let freq = pseudo_random_frequencies(16, 42);
    let input = WindInput::new(bins, freq, 7.0, 0.1);
    let layout = RoseLayout::compute(&input, &RenderOptions::default()).unwrap();

    let mut bars = layout.bars.clone();
    bars.sort_by(|a, b| a.frequency.partial_cmp(&b.frequency).unwrap());
    let t: Vec<f64> = bars.iter().map(|b| layout.norm.apply(b.frequency)).collect();
    assert!(t.windows(2).all(|w| w[0] <= w[1]));
    assert_approx_eq!(t[0], 0.0, 1e-12);
    assert_approx_eq!(*t.last().unwrap(), 1.0, 1e-12);
}

// ============================================================================
// Summary and errors
// ============================================================================

#[test]
fn test_dominant_bar_matches_summary() {
    let layout = RoseLayout::compute(&four_bin_input(), &RenderOptions::default()).unwrap();
    let dominant = layout.dominant_bar().unwrap();

    assert_eq!(dominant.direction_deg, four_bins::DOMINANT_DIRECTION);
    assert_eq!(layout.summary.dominant_direction, four_bins::DOMINANT_DIRECTION);
    assert_approx_eq!(layout.summary.max_frequency_pct, four_bins::MAX_FREQUENCY_PCT, 1e-9);
}

#[test]
fn test_mismatched_input_is_rejected() {
    let input = WindInput::new(vec![0.0, 90.0, 180.0], vec![0.5, 0.5], 5.0, 0.1);
    let err = RoseLayout::compute(&input, &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, WindRoseError::LengthMismatch { bins: 3, freq: 2 }));
}

#[test]
fn test_unknown_colormap_is_rejected() {
    let options = RenderOptions {
        colormap: "jet".into(),
        ..Default::default()
    };
    let err = RoseLayout::compute(&four_bin_input(), &options).unwrap_err();
    assert!(matches!(err, WindRoseError::Style(_)));
}

#[test]
fn test_tiny_frequency_range_still_spans_scale() {
    let input = WindInput::new(vec![0.0, 180.0], vec![5e-13, 1e-13], 2.0, 0.05);
    let layout = RoseLayout::compute(&input, &RenderOptions::default()).unwrap();
    let scale = builtin_scale("RdYlBu_r").unwrap();

    assert!(!layout.norm.is_degenerate());
    assert_eq!(layout.bars[0].color, scale.high());
    assert_eq!(layout.bars[1].color, scale.low());
}
