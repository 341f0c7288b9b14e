//! Rasterized wind rose figure.
//!
//! The scene is drawn in points and rasterized with resvg at the configured
//! DPI, then trimmed to the bounding box of its content plus padding.

use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use tracing::{debug, info, warn};
use windrose_common::{WindInput, WindRoseError, WindRoseResult};

use crate::layout::RoseLayout;
use crate::options::RenderOptions;
use crate::png::encode_png;
use crate::scene::{compose, Scene};

/// Pixels whose channels are all at or above this count as background.
const BACKGROUND_THRESHOLD: u8 = 250;

/// A rendered wind rose, ready to be encoded or inspected.
#[derive(Debug, Clone)]
pub struct Figure {
    layout: RoseLayout,
    scene: Scene,
    image: RgbaImage,
    /// Offset of the cropped image inside the full canvas, in pixels
    crop_origin: (u32, u32),
    pixels_per_point: f32,
    dpi: u32,
}

impl Figure {
    /// Lay out, compose and rasterize a wind rose.
    pub fn render(input: &WindInput, options: &RenderOptions) -> WindRoseResult<Self> {
        options.validate()?;
        let layout = RoseLayout::compute(input, options)?;
        Self::from_layout(layout, options)
    }

    /// Rasterize an already computed layout.
    pub fn from_layout(layout: RoseLayout, options: &RenderOptions) -> WindRoseResult<Self> {
        options.validate()?;

        let scene = compose(&layout, options);
        debug!(svg_bytes = scene.svg.len(), "Composed scene");

        let pixels_per_point = options.pixels_per_point();
        let canvas = rasterize(&scene, options)?;
        info!(
            width = canvas.width(),
            height = canvas.height(),
            dpi = options.dpi,
            "Rasterized figure"
        );

        let pad = (options.pad_inches * options.dpi as f32).round() as u32;
        let (image, crop_origin) = crop_to_content(&canvas, pad);
        info!(
            width = image.width(),
            height = image.height(),
            offset_x = crop_origin.0,
            offset_y = crop_origin.1,
            "Cropped figure to content"
        );

        Ok(Self {
            layout,
            scene,
            image,
            crop_origin,
            pixels_per_point,
            dpi: options.dpi,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn layout(&self) -> &RoseLayout {
        &self.layout
    }

    /// SVG source of the figure, in points.
    pub fn svg(&self) -> &str {
        &self.scene.svg
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pixel in the cropped image for a polar data coordinate
    /// (`theta` in radians clockwise from north, `value` on the radial axis).
    /// Returns `None` when the point falls outside the image.
    pub fn point_to_pixel(&self, theta: f64, value: f64) -> Option<(u32, u32)> {
        let (x_pt, y_pt) = self.scene.polar.data_point(theta, value);
        let x = x_pt * self.pixels_per_point as f64 - self.crop_origin.0 as f64;
        let y = y_pt * self.pixels_per_point as f64 - self.crop_origin.1 as f64;
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x.floor() as u32, y.floor() as u32);
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    /// Encode the figure as PNG bytes.
    pub fn to_png(&self) -> WindRoseResult<Vec<u8>> {
        encode_png(
            self.image.as_raw(),
            self.width() as usize,
            self.height() as usize,
            self.dpi,
        )
    }

    /// Encode and write the figure, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> WindRoseResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let png = self.to_png()?;
        std::fs::write(path, &png)?;
        info!(path = %path.display(), bytes = png.len(), "Saved wind rose");
        Ok(())
    }
}

/// Render the scene onto a white canvas at the configured resolution.
fn rasterize(scene: &Scene, options: &RenderOptions) -> WindRoseResult<RgbaImage> {
    let mut opt = usvg::Options::default();
    {
        let db = Arc::make_mut(&mut opt.fontdb);
        db.load_system_fonts();
        if let Some(font_file) = &options.font_file {
            db.load_font_file(font_file).map_err(|e| {
                WindRoseError::Render(format!(
                    "failed to load font {}: {}",
                    font_file.display(),
                    e
                ))
            })?;
        }
        if db.len() == 0 {
            warn!("No fonts available, figure text will not be drawn");
        }
    }

    let tree = usvg::Tree::from_str(&scene.svg, &opt)
        .map_err(|e| WindRoseError::Render(format!("failed to parse scene: {}", e)))?;

    let scale = options.pixels_per_point();
    let width = (scene.width_pt as f32 * scale).round() as u32;
    let height = (scene.height_pt as f32 * scale).round() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        WindRoseError::Render(format!("cannot allocate {}x{} canvas", width, height))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut image = RgbaImage::new(width, height);
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(image)
}

fn is_background(pixel: &Rgba<u8>) -> bool {
    pixel.0[..3].iter().all(|&c| c >= BACKGROUND_THRESHOLD)
}

/// Crop to the bounding box of non-background pixels grown by `pad`,
/// clamped to the canvas. A blank canvas is returned whole.
fn crop_to_content(canvas: &RgbaImage, pad: u32) -> (RgbaImage, (u32, u32)) {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in canvas.enumerate_pixels() {
        if is_background(pixel) {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    let Some((x0, y0, x1, y1)) = bounds else {
        return (canvas.clone(), (0, 0));
    };

    let left = x0.saturating_sub(pad);
    let top = y0.saturating_sub(pad);
    let right = x1.saturating_add(1).saturating_add(pad).min(canvas.width());
    let bottom = y1.saturating_add(1).saturating_add(pad).min(canvas.height());

    let cropped =
        image::imageops::crop_imm(canvas, left, top, right - left, bottom - top).to_image();
    (cropped, (left, top))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_to_content_with_padding() {
        let mut canvas = RgbaImage::from_pixel(100, 80, Rgba([255, 255, 255, 255]));
        for x in 40..50 {
            for y in 30..35 {
                canvas.put_pixel(x, y, Rgba([10, 20, 30, 255]));
            }
        }

        let (cropped, origin) = crop_to_content(&canvas, 5);
        assert_eq!(origin, (35, 25));
        assert_eq!(cropped.dimensions(), (20, 15));
        assert_eq!(cropped.get_pixel(5, 5), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_crop_clamps_to_canvas() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        canvas.put_pixel(0, 19, Rgba([0, 0, 0, 255]));

        let (cropped, origin) = crop_to_content(&canvas, 4);
        assert_eq!(origin, (0, 15));
        assert_eq!(cropped.dimensions(), (5, 5));
    }

    #[test]
    fn test_crop_with_huge_padding_keeps_canvas() {
        let mut canvas = RgbaImage::from_pixel(30, 20, Rgba([255, 255, 255, 255]));
        canvas.put_pixel(29, 19, Rgba([0, 0, 0, 255]));

        let (cropped, origin) = crop_to_content(&canvas, u32::MAX);
        assert_eq!(origin, (0, 0));
        assert_eq!(cropped.dimensions(), (30, 20));
    }

    #[test]
    fn test_crop_blank_canvas_is_untouched() {
        let canvas = RgbaImage::from_pixel(8, 6, Rgba([255, 255, 255, 255]));
        let (cropped, origin) = crop_to_content(&canvas, 2);
        assert_eq!(origin, (0, 0));
        assert_eq!(cropped.dimensions(), (8, 6));
    }

    #[test]
    fn test_near_white_is_background() {
        assert!(is_background(&Rgba([252, 255, 251, 255])));
        assert!(!is_background(&Rgba([200, 255, 255, 255])));
    }
}
