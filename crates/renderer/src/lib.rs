//! Wind rose rendering.
//!
//! The pipeline runs in three stages:
//! - [`layout`]: bar angles, widths, colors and axis ticks from the input
//! - [`scene`]: an SVG figure in points (polar axes, color bar, annotations)
//! - [`figure`]: rasterization with resvg, tight cropping and PNG encoding

pub mod figure;
pub mod gradient;
pub mod layout;
pub mod options;
pub mod png;
pub mod scene;
pub mod style;
pub mod summary;

pub use figure::Figure;
pub use gradient::{Color, ColorScale, Normalize};
pub use layout::{Bar, RoseLayout};
pub use options::{BarWidthMode, RenderOptions};
pub use summary::Summary;

use windrose_common::{WindInput, WindRoseResult};

/// Render a wind rose figure from validated input.
pub fn render(input: &WindInput, options: &RenderOptions) -> WindRoseResult<Figure> {
    Figure::render(input, options)
}
