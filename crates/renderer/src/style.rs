//! Color scale selection: built-in diverging colormaps and JSON style files.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use windrose_common::{WindRoseError, WindRoseResult};

use crate::gradient::{Color, ColorScale};
use crate::options::RenderOptions;

/// Style configuration loaded from JSON
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleConfig {
    pub version: String,
    pub styles: HashMap<String, StyleDefinition>,
}

/// A single named color scale
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleDefinition {
    pub name: String,
    pub description: Option<String>,
    pub stops: Vec<ColorStop>,
}

/// Color stop for gradient
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorStop {
    pub value: f32,
    pub color: String,
    pub label: Option<String>,
}

impl StyleConfig {
    /// Load style configuration from JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Load style configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> WindRoseResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            WindRoseError::Style(format!("cannot read style file {:?}: {}", path, e))
        })?;
        Self::from_json(&content).map_err(|e| {
            WindRoseError::Style(format!("invalid style file {:?}: {}", path, e))
        })
    }

    /// Get a specific style definition
    pub fn get_style(&self, name: &str) -> Option<&StyleDefinition> {
        self.styles.get(name)
    }

    /// The only style in the file, when the file holds exactly one.
    pub fn sole_style(&self) -> Option<&StyleDefinition> {
        if self.styles.len() == 1 {
            self.styles.values().next()
        } else {
            None
        }
    }
}

impl StyleDefinition {
    /// Convert the stops into a scale, rescaling stop values onto [0, 1].
    pub fn to_color_scale(&self) -> WindRoseResult<ColorScale> {
        let mut stops = self.stops.clone();
        stops.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));

        let (first, last) = match (stops.first(), stops.last()) {
            (Some(f), Some(l)) => (f.value, l.value),
            _ => {
                return Err(WindRoseError::Style(format!(
                    "style '{}' has no color stops",
                    self.name
                )))
            }
        };
        let span = last - first;

        let mut positioned = Vec::with_capacity(stops.len());
        for stop in &stops {
            let (r, g, b) = hex_to_rgb(&stop.color).ok_or_else(|| {
                WindRoseError::Style(format!(
                    "invalid color '{}' in style '{}'",
                    stop.color, self.name
                ))
            })?;
            let pos = if span.abs() < f32::EPSILON {
                0.0
            } else {
                (stop.value - first) / span
            };
            positioned.push((pos, Color::rgb(r, g, b)));
        }

        ColorScale::from_stops(self.name.clone(), positioned)
            .ok_or_else(|| WindRoseError::Style(format!("style '{}' is invalid", self.name)))
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Built-in diverging colormaps, listed low to high in their natural
/// orientation. A `_r` suffix reverses them.
const BUILTIN_COLORMAPS: &[(&str, &[&str])] = &[
    (
        "RdYlBu",
        &[
            "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8",
            "#abd9e9", "#74add1", "#4575b4", "#313695",
        ],
    ),
    (
        "RdBu",
        &[
            "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0",
            "#92c5de", "#4393c3", "#2166ac", "#053061",
        ],
    ),
    (
        "Spectral",
        &[
            "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598",
            "#abdda4", "#66c2a5", "#3288bd", "#5e4fa2",
        ],
    ),
    (
        "coolwarm",
        &["#3b4cc0", "#7396f5", "#b0cbfc", "#dddddd", "#f6b69b", "#e7745b", "#b40426"],
    ),
];

/// Names accepted by [`builtin_scale`].
pub fn builtin_names() -> Vec<String> {
    BUILTIN_COLORMAPS
        .iter()
        .flat_map(|(name, _)| [name.to_string(), format!("{}_r", name)])
        .collect()
}

/// Look up a built-in colormap by name, e.g. `RdYlBu_r`.
pub fn builtin_scale(name: &str) -> Option<ColorScale> {
    let (base, reversed) = match name.strip_suffix("_r") {
        Some(base) => (base, true),
        None => (name, false),
    };

    let (_, hexes) = BUILTIN_COLORMAPS.iter().find(|(n, _)| *n == base)?;
    let colors: Vec<Color> = hexes
        .iter()
        .filter_map(|h| hex_to_rgb(h))
        .map(|(r, g, b)| Color::rgb(r, g, b))
        .collect();

    let scale = ColorScale::evenly_spaced(base, &colors)?;
    Some(if reversed { scale.reversed() } else { scale })
}

/// Pick the color scale requested by the render options: a style file
/// when one is configured, otherwise a built-in colormap.
pub fn resolve_color_scale(options: &RenderOptions) -> WindRoseResult<ColorScale> {
    if let Some(ref path) = options.style_file {
        let config = StyleConfig::from_file(path)?;
        let style = match options.style_name.as_deref() {
            Some(name) => config.get_style(name),
            None => config.sole_style(),
        }
        .ok_or_else(|| {
            WindRoseError::Style(format!(
                "style {:?} not found in {:?}",
                options.style_name, path
            ))
        })?;
        debug!(style = %style.name, file = %path.display(), "Using style file color scale");
        return style.to_color_scale();
    }

    builtin_scale(&options.colormap).ok_or_else(|| {
        WindRoseError::Style(format!(
            "unknown colormap '{}', expected one of {:?}",
            options.colormap,
            builtin_names()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("#00FF00"), Some((0, 255, 0)));
        assert_eq!(hex_to_rgb("#0000FF"), Some((0, 0, 255)));
        assert_eq!(hex_to_rgb("FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
    }

    #[test]
    fn test_hex_to_rgb_non_ascii() {
        // six bytes, but not six hex digits
        assert_eq!(hex_to_rgb("a\u{20ac}cd"), None);
        assert_eq!(hex_to_rgb("#\u{e9}\u{e9}\u{e9}"), None);
    }

    #[test]
    fn test_style_file_with_bad_json() {
        let dir = test_utils::temp_test_dir();
        let path = test_utils::write_test_file(dir.path(), "broken.json", "{ \"version\": ");

        let err = StyleConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, WindRoseError::Style(ref msg) if msg.contains("invalid style file")));
    }

    #[test]
    fn test_builtin_reversed_orientation() {
        let scale = builtin_scale("RdYlBu_r").unwrap();
        assert_eq!(scale.low(), Color::rgb(0x31, 0x36, 0x95));
        assert_eq!(scale.high(), Color::rgb(0xa5, 0x00, 0x26));
    }

    #[test]
    fn test_builtin_unknown() {
        assert!(builtin_scale("viridis").is_none());
        assert_eq!(builtin_names().len(), 8);
    }

    #[test]
    fn test_style_definition_rescales_values() {
        let json = r##"{
            "version": "1.0",
            "styles": {
                "freq": {
                    "name": "freq",
                    "description": null,
                    "stops": [
                        { "value": 20.0, "color": "#ff0000", "label": null },
                        { "value": 0.0, "color": "#0000ff", "label": null },
                        { "value": 10.0, "color": "#ffffff", "label": null }
                    ]
                }
            }
        }"##;
        let config = StyleConfig::from_json(json).unwrap();
        let scale = config.sole_style().unwrap().to_color_scale().unwrap();
        assert_eq!(scale.low(), Color::rgb(0, 0, 255));
        assert_eq!(scale.high(), Color::rgb(255, 0, 0));
        assert_eq!(scale.stops()[1].0, 0.5);
    }

    #[test]
    fn test_style_definition_bad_color() {
        let style = StyleDefinition {
            name: "broken".into(),
            description: None,
            stops: vec![ColorStop {
                value: 0.0,
                color: "not-a-color".into(),
                label: None,
            }],
        };
        assert!(matches!(style.to_color_scale(), Err(WindRoseError::Style(_))));
    }
}
