//! Wind observation record and its JSON loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::compass::compass_label;
use crate::error::{WindRoseError, WindRoseResult};

/// A set of wind direction frequencies plus the scalar statistics shown in
/// the plot annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindInput {
    /// Direction of each bin in degrees, clockwise from north.
    #[serde(alias = "directions")]
    pub bins: Vec<f64>,
    /// Relative frequency of each bin (fractional).
    #[serde(alias = "frequencies")]
    pub freq: Vec<f64>,
    /// Wind speed in m/s.
    #[serde(alias = "wind_speed")]
    pub speed: f64,
    /// Turbulence intensity (fractional).
    #[serde(alias = "turbulence_intensity")]
    pub ti: f64,
}

impl WindInput {
    pub fn new(bins: Vec<f64>, freq: Vec<f64>, speed: f64, ti: f64) -> Self {
        Self {
            bins,
            freq,
            speed,
            ti,
        }
    }

    /// Parse a record from a JSON string and validate it.
    pub fn from_json(json_str: &str) -> WindRoseResult<Self> {
        let input: WindInput = serde_json::from_str(json_str).map_err(|e| {
            WindRoseError::InputParse {
                path: "<inline>".into(),
                source: e,
            }
        })?;
        input.validate()?;
        Ok(input)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Check the record invariants: non-empty, equal lengths, finite
    /// directions and non-negative finite frequencies.
    pub fn validate(&self) -> WindRoseResult<()> {
        if self.bins.len() != self.freq.len() {
            return Err(WindRoseError::LengthMismatch {
                bins: self.bins.len(),
                freq: self.freq.len(),
            });
        }
        if self.bins.is_empty() {
            return Err(WindRoseError::EmptyInput);
        }

        if let Some((index, &value)) = self.bins.iter().enumerate().find(|(_, b)| !b.is_finite()) {
            return Err(WindRoseError::InvalidValue {
                field: "bins",
                index,
                value,
            });
        }
        if let Some((index, &value)) = self
            .freq
            .iter()
            .enumerate()
            .find(|(_, f)| !f.is_finite() || **f < 0.0)
        {
            return Err(WindRoseError::InvalidValue {
                field: "freq",
                index,
                value,
            });
        }
        if !self.speed.is_finite() {
            return Err(WindRoseError::InvalidValue {
                field: "speed",
                index: 0,
                value: self.speed,
            });
        }
        if !self.ti.is_finite() {
            return Err(WindRoseError::InvalidValue {
                field: "ti",
                index: 0,
                value: self.ti,
            });
        }

        Ok(())
    }

    /// Minimum and maximum frequency. `None` for an empty record.
    pub fn freq_range(&self) -> Option<(f64, f64)> {
        if self.freq.is_empty() {
            return None;
        }
        Some(self.freq.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), &val| (min.min(val), max.max(val)),
        ))
    }

    /// Index of the highest frequency; ties resolve to the first occurrence.
    pub fn dominant_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &f) in self.freq.iter().enumerate() {
            match best {
                Some((_, current)) if f <= current => {}
                _ => best = Some((i, f)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Direction (degrees) of the bin with the highest frequency.
    pub fn dominant_direction(&self) -> Option<f64> {
        self.dominant_index().and_then(|i| self.bins.get(i).copied())
    }

    pub fn max_frequency(&self) -> Option<f64> {
        self.freq_range().map(|(_, max)| max)
    }

    /// Sum of all frequencies; close to 1.0 for a complete observation set.
    pub fn total_frequency(&self) -> f64 {
        self.freq.iter().sum()
    }

    /// Compass label of the dominant direction, e.g. "NNE".
    pub fn dominant_compass(&self) -> Option<&'static str> {
        self.dominant_direction().map(compass_label)
    }
}

/// Load a wind record from a JSON file.
pub fn load<P: AsRef<Path>>(path: P) -> WindRoseResult<WindInput> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading wind input");

    let content = std::fs::read_to_string(path).map_err(|e| WindRoseError::InputRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let input: WindInput =
        serde_json::from_str(&content).map_err(|e| WindRoseError::InputParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    input.validate()?;

    debug!(
        bins = input.len(),
        total_frequency = input.total_frequency(),
        speed = input.speed,
        ti = input.ti,
        "Wind input loaded"
    );

    Ok(input)
}
