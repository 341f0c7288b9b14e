//! Statistics annotation printed below the rose.

use std::fmt;

use windrose_common::{compass_label, WindInput, WindRoseError, WindRoseResult};

/// Summary statistics shown beneath the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub direction_count: usize,
    /// Average wind speed in m/s
    pub mean_speed: f64,
    /// Turbulence intensity as a percentage
    pub turbulence_intensity_pct: f64,
    /// Direction of the highest frequency bin in degrees
    pub dominant_direction: f64,
    /// Highest frequency as a percentage
    pub max_frequency_pct: f64,
}

impl Summary {
    pub fn from_input(input: &WindInput) -> WindRoseResult<Self> {
        let dominant_direction = input.dominant_direction().ok_or(WindRoseError::EmptyInput)?;
        let max_frequency = input.max_frequency().ok_or(WindRoseError::EmptyInput)?;

        Ok(Self {
            direction_count: input.len(),
            mean_speed: input.speed,
            turbulence_intensity_pct: input.ti * 100.0,
            dominant_direction,
            max_frequency_pct: max_frequency * 100.0,
        })
    }

    /// The annotation split into the two lines drawn on the figure.
    pub fn lines(&self) -> [String; 2] {
        [
            format!(
                "Total directions: {}   Average speed: {:.2} m/s   Turbulence intensity: {:.1}%",
                self.direction_count, self.mean_speed, self.turbulence_intensity_pct
            ),
            format!(
                "Max frequency direction: {}\u{b0} ({})   Max frequency: {:.1}%",
                format_degrees(self.dominant_direction),
                compass_label(self.dominant_direction),
                self.max_frequency_pct
            ),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = self.lines();
        write!(f, "{}\n{}", first, second)
    }
}

/// Degrees without a trailing ".0" for whole values: 0 -> "0", 22.5 -> "22.5".
pub fn format_degrees(deg: f64) -> String {
    if deg == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    let rounded = (deg * 100.0).round() / 100.0;
    format!("{}", rounded)
}
