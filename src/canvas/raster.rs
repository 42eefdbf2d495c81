//! # Raster Surface
//!
//! A CPU pixel surface that strokes paths the way a 2D canvas does, backed by
//! a `tiny_skia::Pixmap`. Used for overlay previews and for checking what an
//! overlay actually paints.
//!
//! ## Path model
//!
//! ```text
//! begin_path → [move_to | line_to | rect | close_path]* → stroke
//! ```
//!
//! - `move_to` starts a new subpath
//! - `line_to` without a current point behaves like `move_to`
//! - `close_path` closes the subpath and starts a new one at its first point
//! - `rect` adds a closed four-corner subpath
//!
//! Strokes are aliased, so every painted pixel carries the exact stroke colour.

use image::{ImageEncoder, RgbaImage};
use tiny_skia::{BlendMode, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::ops::Color;
use super::{ContextOptions, DrawContext, Surface};
use crate::error::PitbossError;

/// Context state that a resize resets.
#[derive(Debug, Clone)]
struct StrokeState {
    color: Color,
    line_width: f32,
}

impl Default for StrokeState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 1.0,
        }
    }
}

/// A surface backed by an in-memory RGBA pixmap.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    /// `None` while either dimension is zero.
    pixmap: Option<Pixmap>,
    size: (u32, u32),
    displayed: Option<(u32, u32)>,
    state: StrokeState,
    path: PathBuilder,
    has_current_point: bool,
}

impl RasterSurface {
    /// Create a transparent surface with the given backing size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: Pixmap::new(width, height),
            size: (width, height),
            displayed: None,
            state: StrokeState::default(),
            path: PathBuilder::new(),
            has_current_point: false,
        }
    }

    /// Report a displayed size, as a laid-out element would.
    pub fn with_displayed_size(mut self, width: u32, height: u32) -> Self {
        self.displayed = Some((width, height));
        self
    }

    /// Colour at (`x`, `y`), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Color {
            r: c.red(),
            g: c.green(),
            b: c.blue(),
            a: c.alpha(),
        })
    }

    /// Number of pixels with any opacity.
    pub fn painted_pixels(&self) -> usize {
        self.pixmap
            .as_ref()
            .map_or(0, |p| p.pixels().iter().filter(|c| c.alpha() != 0).count())
    }

    /// Copy the buffer out as straight-alpha RGBA.
    pub fn to_image(&self) -> RgbaImage {
        let (width, height) = self.size;
        let mut img = RgbaImage::new(width, height);
        if let Some(pixmap) = &self.pixmap {
            for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
                let c = src.demultiply();
                dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
            }
        }
        img
    }

    /// Encode the buffer as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, PitbossError> {
        let img = self.to_image();
        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e: image::ImageError| PitbossError::Image(e.to_string()))?;

        Ok(png_bytes)
    }
}

/// A canvas rect as a tiny-skia rect, normalising negative extents.
fn to_rect(x: f32, y: f32, width: f32, height: f32) -> Option<Rect> {
    Rect::from_ltrb(
        x.min(x + width),
        y.min(y + height),
        x.max(x + width),
        y.max(y + height),
    )
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn displayed_size(&self) -> Option<(u32, u32)> {
        self.displayed
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.pixmap = Pixmap::new(width, height);
        self.size = (width, height);
        self.state = StrokeState::default();
        self.begin_path();
    }

    fn context_2d(&mut self, _options: ContextOptions) -> Option<&mut dyn DrawContext> {
        Some(self)
    }
}

impl DrawContext for RasterSurface {
    fn set_stroke_style(&mut self, color: Color) {
        self.state.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        // Canvas ignores non-positive and non-finite widths.
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (Some(pixmap), Some(rect)) = (self.pixmap.as_mut(), to_rect(x, y, width, height))
        else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        paint.anti_alias = false;
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn begin_path(&mut self) {
        self.path = PathBuilder::new();
        self.has_current_point = false;
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
        self.has_current_point = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        if self.has_current_point {
            self.path.line_to(x, y);
        } else {
            self.move_to(x, y);
        }
    }

    fn close_path(&mut self) {
        if self.has_current_point {
            self.path.close();
        }
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if let Some(rect) = to_rect(x, y, width, height) {
            self.path.push_rect(rect);
        }
        self.move_to(x, y);
    }

    fn stroke(&mut self) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        // Stroking does not consume the path.
        let Some(path) = self.path.clone().finish() else {
            return;
        };

        let Color { r, g, b, a } = self.state.color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = false;

        let stroke = Stroke {
            width: self.state.line_width,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}
