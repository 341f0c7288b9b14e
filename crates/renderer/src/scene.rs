//! SVG scene for the wind rose figure.
//!
//! The scene is authored in points (1/72 inch) on a canvas the size of the
//! figure. Rasterization scales it by `dpi / 72`.

use std::f64::consts::TAU;
use std::fmt::Write as _;

use windrose_common::compass::compass_ticks;

use crate::gradient::Color;
use crate::layout::{Bar, RoseLayout};
use crate::options::RenderOptions;
use crate::style::hex_to_rgb;

const GRID_COLOR: &str = "#b0b0b0";
const FRAME_COLOR: &str = "#444444";
const TEXT_COLOR: &str = "#222222";

const TITLE_SIZE: f64 = 18.0;
const COMPASS_SIZE: f64 = 12.0;
const TICK_SIZE: f64 = 9.5;
const SUMMARY_SIZE: f64 = 11.0;

/// Placement of the polar axes inside the figure, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarFrame {
    pub cx: f64,
    pub cy: f64,
    /// Outer radius of the axes
    pub radius: f64,
    /// Data value drawn at the outer radius
    pub radial_limit: f64,
}

impl PolarFrame {
    pub fn for_figure(width_pt: f64, height_pt: f64, radial_limit: f64) -> Self {
        Self {
            cx: 0.44 * width_pt,
            cy: 0.47 * height_pt,
            radius: 0.34 * width_pt.min(height_pt),
            radial_limit,
        }
    }

    /// Distance from the center for a data value.
    pub fn radius_of(&self, value: f64) -> f64 {
        if self.radial_limit > 0.0 {
            self.radius * value / self.radial_limit
        } else {
            0.0
        }
    }

    /// Point at `theta` (radians clockwise from north) and distance `r`.
    pub fn point(&self, theta: f64, r: f64) -> (f64, f64) {
        (self.cx + r * theta.sin(), self.cy - r * theta.cos())
    }

    /// Point for a data value along a direction.
    pub fn data_point(&self, theta: f64, value: f64) -> (f64, f64) {
        self.point(theta, self.radius_of(value))
    }
}

/// Vertical color bar placement, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorbarFrame {
    pub x: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ColorbarFrame {
    fn for_figure(width_pt: f64, polar: &PolarFrame) -> Self {
        let height = 1.6 * polar.radius;
        Self {
            x: 0.86 * width_pt,
            top: polar.cy - height / 2.0,
            width: 0.025 * width_pt,
            height,
        }
    }

    /// Vertical position of a normalized value (0 at the bottom).
    pub fn y_of(&self, t: f64) -> f64 {
        self.top + self.height * (1.0 - t)
    }
}

/// A composed figure: SVG source plus the frames needed to map data onto it.
#[derive(Debug, Clone)]
pub struct Scene {
    pub svg: String,
    pub width_pt: f64,
    pub height_pt: f64,
    pub polar: PolarFrame,
    pub colorbar: ColorbarFrame,
}

/// Compose the SVG document for a laid-out rose.
pub fn compose(layout: &RoseLayout, options: &RenderOptions) -> Scene {
    let (w, h) = options.size_points();
    let (w, h) = (w as f64, h as f64);
    let polar = PolarFrame::for_figure(w, h, layout.radial_limit);
    let colorbar = ColorbarFrame::for_figure(w, &polar);
    let font = xml_escape(&options.font_family);

    let mut svg = String::with_capacity(16 * 1024);
    let _ = writeln!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.3}" height="{h:.3}" viewBox="0 0 {w:.3} {h:.3}" font-family="{font}">"##
    );
    write_colorbar_gradient(&mut svg, layout);
    let _ = writeln!(svg, r##"<rect x="0" y="0" width="{w:.3}" height="{h:.3}" fill="#ffffff"/>"##);

    write_grid(&mut svg, layout, &polar);
    for bar in &layout.bars {
        write_bar(&mut svg, bar, &polar, options);
    }
    let _ = writeln!(
        svg,
        r##"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="none" stroke="{FRAME_COLOR}" stroke-width="1"/>"##,
        polar.cx, polar.cy, polar.radius
    );
    write_compass_labels(&mut svg, &polar);
    write_radial_labels(&mut svg, layout, &polar);
    write_colorbar(&mut svg, layout, &colorbar, options);

    let _ = writeln!(
        svg,
        r##"<text x="{:.3}" y="{:.3}" font-size="{TITLE_SIZE}" font-weight="bold" text-anchor="middle" fill="{TEXT_COLOR}">{}</text>"##,
        w / 2.0,
        0.06 * h,
        xml_escape(&options.title)
    );

    let summary_top = polar.cy + polar.radius + 0.09 * h;
    for (i, line) in layout.summary.lines().iter().enumerate() {
        let _ = writeln!(
            svg,
            r##"<text x="{:.3}" y="{:.3}" font-size="{SUMMARY_SIZE}" text-anchor="middle" fill="{TEXT_COLOR}">{}</text>"##,
            w / 2.0,
            summary_top + i as f64 * (SUMMARY_SIZE + 6.0),
            xml_escape(line)
        );
    }

    svg.push_str("</svg>\n");

    Scene {
        svg,
        width_pt: w,
        height_pt: h,
        polar,
        colorbar,
    }
}

fn write_grid(svg: &mut String, layout: &RoseLayout, polar: &PolarFrame) {
    let _ = writeln!(
        svg,
        r##"<g fill="none" stroke="{GRID_COLOR}" stroke-width="0.6">"##
    );
    for &tick in &layout.radial_ticks {
        let _ = writeln!(
            svg,
            r##"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" stroke-dasharray="3 3"/>"##,
            polar.cx,
            polar.cy,
            polar.radius_of(tick)
        );
    }
    for (deg, _) in compass_ticks() {
        let (x, y) = polar.point(deg.to_radians(), polar.radius);
        let _ = writeln!(
            svg,
            r##"<line x1="{:.3}" y1="{:.3}" x2="{x:.3}" y2="{y:.3}"/>"##,
            polar.cx, polar.cy
        );
    }
    svg.push_str("</g>\n");
}

fn write_bar(svg: &mut String, bar: &Bar, polar: &PolarFrame, options: &RenderOptions) {
    let r = polar.radius_of(bar.frequency);
    if r <= 0.0 || bar.width_rad <= 0.0 {
        return;
    }
    let fill = bar.color.to_hex();
    let stroke = edge_stroke(options);
    let sw = options.edge_width;

    if bar.width_rad >= TAU - 1e-9 {
        let _ = writeln!(
            svg,
            r##"<circle cx="{:.3}" cy="{:.3}" r="{r:.3}" fill="{fill}" stroke="{stroke}" stroke-width="{sw}"/>"##,
            polar.cx, polar.cy
        );
        return;
    }

    let half = bar.width_rad / 2.0;
    let (x1, y1) = polar.point(bar.angle_rad - half, r);
    let (x2, y2) = polar.point(bar.angle_rad + half, r);
    let large_arc = u8::from(bar.width_rad > std::f64::consts::PI);
    let _ = writeln!(
        svg,
        r##"<path d="M {:.3} {:.3} L {x1:.3} {y1:.3} A {r:.3} {r:.3} 0 {large_arc} 1 {x2:.3} {y2:.3} Z" fill="{fill}" stroke="{stroke}" stroke-width="{sw}" stroke-linejoin="round"/>"##,
        polar.cx, polar.cy
    );
}

/// Edge color as `#rrggbb`, whether or not the configured value has a `#`.
fn edge_stroke(options: &RenderOptions) -> String {
    match hex_to_rgb(&options.edge_color) {
        Some((r, g, b)) => Color::rgb(r, g, b).to_hex(),
        None => options.edge_color.clone(),
    }
}

fn write_compass_labels(svg: &mut String, polar: &PolarFrame) {
    let offset = polar.radius + COMPASS_SIZE + 4.0;
    for (deg, name) in compass_ticks() {
        let (x, y) = polar.point(deg.to_radians(), offset);
        let weight = if name.len() == 1 { "bold" } else { "normal" };
        let _ = writeln!(
            svg,
            r##"<text x="{x:.3}" y="{:.3}" font-size="{COMPASS_SIZE}" font-weight="{weight}" text-anchor="middle" fill="{TEXT_COLOR}">{name}</text>"##,
            y + COMPASS_SIZE * 0.35
        );
    }
}

fn write_radial_labels(svg: &mut String, layout: &RoseLayout, polar: &PolarFrame) {
    let theta = layout.label_angle_deg.to_radians();
    for &tick in &layout.radial_ticks {
        let (x, y) = polar.data_point(theta, tick);
        let _ = writeln!(
            svg,
            r##"<text x="{x:.3}" y="{:.3}" font-size="{TICK_SIZE}" text-anchor="middle" fill="{TEXT_COLOR}" stroke="#ffffff" stroke-width="2.5" paint-order="stroke">{}</text>"##,
            y + TICK_SIZE * 0.35,
            format_percent(tick)
        );
    }
}

fn write_colorbar_gradient(svg: &mut String, layout: &RoseLayout) {
    svg.push_str("<defs>\n");
    svg.push_str(r##"<linearGradient id="colorbar" x1="0" y1="1" x2="0" y2="0">"##);
    svg.push('\n');
    for &(pos, color) in layout.scale.stops() {
        let _ = writeln!(
            svg,
            r##"<stop offset="{pos:.4}" stop-color="{}"/>"##,
            color.to_hex()
        );
    }
    svg.push_str("</linearGradient>\n</defs>\n");
}

fn write_colorbar(
    svg: &mut String,
    layout: &RoseLayout,
    frame: &ColorbarFrame,
    options: &RenderOptions,
) {
    // a single value has no gradient to show
    let fill = if layout.norm.is_degenerate() {
        layout.scale.sample(0.5).to_hex()
    } else {
        "url(#colorbar)".to_string()
    };
    let _ = writeln!(
        svg,
        r##"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{fill}" stroke="{FRAME_COLOR}" stroke-width="0.8"/>"##,
        frame.x, frame.top, frame.width, frame.height
    );

    let right = frame.x + frame.width;
    for value in layout.norm.ticks(5) {
        let y = frame.y_of(layout.norm.apply(value));
        let _ = writeln!(
            svg,
            r##"<line x1="{right:.3}" y1="{y:.3}" x2="{:.3}" y2="{y:.3}" stroke="{FRAME_COLOR}" stroke-width="0.8"/>"##,
            right + 4.0
        );
        let _ = writeln!(
            svg,
            r##"<text x="{:.3}" y="{:.3}" font-size="{TICK_SIZE}" fill="{TEXT_COLOR}">{}</text>"##,
            right + 6.0,
            y + TICK_SIZE * 0.35,
            format_percent(value)
        );
    }

    let label_x = right + 48.0;
    let label_y = frame.top + frame.height / 2.0;
    let _ = writeln!(
        svg,
        r##"<text x="{label_x:.3}" y="{label_y:.3}" font-size="{SUMMARY_SIZE}" text-anchor="middle" fill="{TEXT_COLOR}" transform="rotate(-90 {label_x:.3} {label_y:.3})">{}</text>"##,
        xml_escape(&options.colorbar_label)
    );
}

/// Fractional value as a percentage label, e.g. 0.125 -> "12.5%".
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
