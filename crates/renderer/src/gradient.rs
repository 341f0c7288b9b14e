//! Continuous color scales and linear value normalization.

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` form, as used in SVG fill attributes.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)).round() as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)).round() as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)).round() as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)).round() as u8,
    )
}

/// Linear mapping of a data range onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// True when the range holds a single value and everything maps to the
    /// midpoint. Any positive width, however small, is a real range.
    pub fn is_degenerate(&self) -> bool {
        !(self.vmax > self.vmin)
    }

    /// Position of `value` in the range, clamped to [0, 1]. A degenerate
    /// range maps everything to 0.5.
    pub fn apply(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.5;
        }
        ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0)
    }

    /// `count` evenly spaced values from vmin to vmax inclusive. A
    /// degenerate range yields the single value.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if self.is_degenerate() || count < 2 {
            return vec![self.vmin];
        }
        let step = (self.vmax - self.vmin) / (count - 1) as f64;
        (0..count).map(|i| self.vmin + step * i as f64).collect()
    }
}

/// A color scale sampled linearly between stops positioned in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    name: String,
    stops: Vec<(f32, Color)>,
}

impl ColorScale {
    /// Build from explicit (position, color) stops. Positions are sorted and
    /// must lie in [0, 1]; at least one stop is required.
    pub fn from_stops(name: impl Into<String>, mut stops: Vec<(f32, Color)>) -> Option<Self> {
        if stops.is_empty() || stops.iter().any(|(p, _)| !(0.0..=1.0).contains(p)) {
            return None;
        }
        stops.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        Some(Self {
            name: name.into(),
            stops,
        })
    }

    /// Build from colors spread evenly over [0, 1].
    pub fn evenly_spaced(name: impl Into<String>, colors: &[Color]) -> Option<Self> {
        let n = colors.len();
        if n == 0 {
            return None;
        }
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let pos = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
                (pos, c)
            })
            .collect();
        Self::from_stops(name, stops)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stops(&self) -> &[(f32, Color)] {
        &self.stops
    }

    /// Color at the low end of the scale.
    pub fn low(&self) -> Color {
        self.stops[0].1
    }

    /// Color at the high end of the scale.
    pub fn high(&self) -> Color {
        self.stops[self.stops.len() - 1].1
    }

    /// Sample the scale at `t` in [0, 1] (clamped).
    pub fn sample(&self, t: f64) -> Color {
        let t = (t as f32).clamp(0.0, 1.0);

        let first = self.stops[0];
        if t <= first.0 {
            return first.1;
        }
        let last = self.stops[self.stops.len() - 1];
        if t >= last.0 {
            return last.1;
        }

        for pair in self.stops.windows(2) {
            let (p1, c1) = pair[0];
            let (p2, c2) = pair[1];
            if t >= p1 && t <= p2 {
                let span = p2 - p1;
                let local = if span.abs() < f32::EPSILON {
                    0.0
                } else {
                    (t - p1) / span
                };
                return interpolate_color(c1, c2, local);
            }
        }

        last.1
    }

    /// Map a data value through `norm` and sample.
    pub fn map(&self, value: f64, norm: &Normalize) -> Color {
        self.sample(norm.apply(value))
    }

    /// The same scale with its direction flipped.
    pub fn reversed(&self) -> Self {
        let stops = self
            .stops
            .iter()
            .rev()
            .map(|&(p, c)| (1.0 - p, c))
            .collect();
        Self {
            name: format!("{}_r", self.name),
            stops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blue_red() -> ColorScale {
        ColorScale::evenly_spaced(
            "blue_red",
            &[
                Color::rgb(0, 0, 255),
                Color::rgb(255, 255, 255),
                Color::rgb(255, 0, 0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_interpolate_midpoint() {
        let c = interpolate_color(Color::rgb(0, 0, 0), Color::rgb(255, 255, 255), 0.5);
        assert_eq!(c, Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_interpolate_clamps() {
        let c = interpolate_color(Color::rgb(10, 20, 30), Color::rgb(200, 200, 200), 2.0);
        assert_eq!(c, Color::rgb(200, 200, 200));
    }

    #[test]
    fn test_sample_endpoints() {
        let scale = blue_red();
        assert_eq!(scale.sample(0.0), Color::rgb(0, 0, 255));
        assert_eq!(scale.sample(1.0), Color::rgb(255, 0, 0));
        assert_eq!(scale.sample(0.5), Color::rgb(255, 255, 255));
        assert_eq!(scale.sample(-3.0), scale.low());
        assert_eq!(scale.sample(7.0), scale.high());
    }

    #[test]
    fn test_normalize_linear() {
        let norm = Normalize::new(0.1, 0.4);
        assert!((norm.apply(0.1) - 0.0).abs() < 1e-12);
        assert!((norm.apply(0.4) - 1.0).abs() < 1e-12);
        assert!((norm.apply(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_degenerate_range() {
        let norm = Normalize::new(0.125, 0.125);
        assert!(norm.is_degenerate());
        assert_eq!(norm.apply(0.125), 0.5);
        assert_eq!(norm.ticks(5), vec![0.125]);
    }

    #[test]
    fn test_normalize_tiny_range_is_not_degenerate() {
        let norm = Normalize::new(1e-13, 5e-13);
        assert!(!norm.is_degenerate());
        assert_eq!(norm.apply(1e-13), 0.0);
        assert_eq!(norm.apply(5e-13), 1.0);
    }

    #[test]
    fn test_normalize_ticks() {
        let ticks = Normalize::new(0.0, 1.0).ticks(5);
        assert_eq!(ticks, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_reversed_swaps_ends() {
        let scale = blue_red();
        let rev = scale.reversed();
        assert_eq!(rev.low(), scale.high());
        assert_eq!(rev.high(), scale.low());
        assert_eq!(rev.name(), "blue_red_r");
    }

    #[test]
    fn test_from_stops_rejects_out_of_range() {
        assert!(ColorScale::from_stops("bad", vec![(1.5, Color::rgb(0, 0, 0))]).is_none());
        assert!(ColorScale::from_stops("empty", vec![]).is_none());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::rgb(165, 0, 38).to_hex(), "#a50026");
    }
}
