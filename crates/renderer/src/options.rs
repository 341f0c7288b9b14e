//! Rendering options for the wind rose figure.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use windrose_common::{WindRoseError, WindRoseResult};

/// How bar angular widths are derived from the direction bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarWidthMode {
    /// Every bar spans `360 / n` degrees.
    #[default]
    Uniform,
    /// Each bar spans the smaller of the gaps to its circular neighbors.
    Neighbors,
}

impl std::str::FromStr for BarWidthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "neighbors" | "neighbours" => Ok(Self::Neighbors),
            other => Err(format!("unknown bar width mode '{}'", other)),
        }
    }
}

/// Figure geometry, styling and output resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Figure width in inches
    pub width_in: f32,
    /// Figure height in inches
    pub height_in: f32,
    /// Raster resolution
    pub dpi: u32,
    /// Padding kept around content when trimming the bounding box
    pub pad_inches: f32,
    /// Built-in colormap name, ignored when `style_file` is set
    pub colormap: String,
    /// JSON style file with custom color stops
    pub style_file: Option<PathBuf>,
    /// Style to use from `style_file`; optional when the file has one style
    pub style_name: Option<String>,
    pub bar_width: BarWidthMode,
    /// Number of labelled radial gridlines
    pub radial_tick_count: usize,
    pub title: String,
    pub colorbar_label: String,
    /// Bar outline color (hex)
    pub edge_color: String,
    /// Bar outline width in points
    pub edge_width: f32,
    /// Extra font file loaded alongside system fonts
    pub font_file: Option<PathBuf>,
    pub font_family: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 10.0,
            dpi: 300,
            pad_inches: 0.1,
            colormap: "RdYlBu_r".to_string(),
            style_file: None,
            style_name: None,
            bar_width: BarWidthMode::Uniform,
            radial_tick_count: 5,
            title: "Wind Rose".to_string(),
            colorbar_label: "Relative Frequency (%)".to_string(),
            edge_color: "#333333".to_string(),
            edge_width: 0.8,
            font_file: None,
            font_family: "DejaVu Sans, Arial, Helvetica, sans-serif".to_string(),
        }
    }
}

impl RenderOptions {
    pub const MIN_DPI: u32 = 10;
    pub const MAX_DPI: u32 = 1200;

    /// Scale from scene points (1/72 inch) to raster pixels.
    pub fn pixels_per_point(&self) -> f32 {
        self.dpi as f32 / 72.0
    }

    /// Figure size in points.
    pub fn size_points(&self) -> (f32, f32) {
        (self.width_in * 72.0, self.height_in * 72.0)
    }

    pub fn validate(&self) -> WindRoseResult<()> {
        let invalid = |msg: String| Err(WindRoseError::Render(msg));

        if !(Self::MIN_DPI..=Self::MAX_DPI).contains(&self.dpi) {
            return invalid(format!(
                "dpi {} outside {}..={}",
                self.dpi,
                Self::MIN_DPI,
                Self::MAX_DPI
            ));
        }
        if !(self.width_in > 0.0
            && self.height_in > 0.0
            && self.width_in.is_finite()
            && self.height_in.is_finite())
        {
            return invalid(format!(
                "figure size must be positive, got {}x{} in",
                self.width_in, self.height_in
            ));
        }
        if !(self.pad_inches >= 0.0 && self.pad_inches.is_finite()) {
            return invalid(format!("pad_inches must be >= 0, got {}", self.pad_inches));
        }
        if self.radial_tick_count == 0 {
            return invalid("radial_tick_count must be at least 1".to_string());
        }
        if !(self.edge_width >= 0.0 && self.edge_width.is_finite()) {
            return invalid(format!("edge_width must be >= 0, got {}", self.edge_width));
        }
        if crate::style::hex_to_rgb(&self.edge_color).is_none() {
            return Err(WindRoseError::Style(format!(
                "invalid edge color '{}'",
                self.edge_color
            )));
        }
        Ok(())
    }
}
