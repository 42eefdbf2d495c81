//! A surface that records every drawing call instead of painting pixels.

use super::ops::{Color, DrawOp};
use super::{ContextOptions, DrawContext, Surface};

/// Records calls as [`DrawOp`]s.
///
/// ## Example
///
/// ```
/// use pitboss::canvas::{DrawContext, DrawOp, RecordingSurface, Surface, ContextOptions};
///
/// let mut surface = RecordingSurface::new();
/// surface.resize(10, 10);
/// let ctx = surface.context_2d(ContextOptions::default()).unwrap();
/// ctx.begin_path();
/// ctx.stroke();
/// assert_eq!(surface.ops().last(), Some(&DrawOp::Stroke));
/// ```
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    displayed: Option<(u32, u32)>,
    supports_2d: bool,
    context_options: Option<ContextOptions>,
    ops: Vec<DrawOp>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// A surface that is not laid out (no displayed size).
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            displayed: None,
            supports_2d: true,
            context_options: None,
            ops: Vec::new(),
        }
    }

    /// A surface occupying `width`×`height` on screen.
    pub fn displayed(width: u32, height: u32) -> Self {
        Self {
            displayed: Some((width, height)),
            ..Self::new()
        }
    }

    /// A surface that refuses to hand out a 2D context.
    pub fn without_context() -> Self {
        Self {
            supports_2d: false,
            ..Self::new()
        }
    }

    /// All calls made so far, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Calls made since the most recent resize.
    pub fn ops_since_resize(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Resize { .. }))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }

    /// Options passed with the last `context_2d` request.
    pub fn last_context_options(&self) -> Option<ContextOptions> {
        self.context_options
    }

    pub fn stroke_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Stroke).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn displayed_size(&self) -> Option<(u32, u32)> {
        self.displayed
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ops.push(DrawOp::Resize { width, height });
    }

    fn context_2d(&mut self, options: ContextOptions) -> Option<&mut dyn DrawContext> {
        if !self.supports_2d {
            return None;
        }
        self.context_options = Some(options);
        Some(self)
    }
}

impl DrawContext for RecordingSurface {
    fn set_stroke_style(&mut self, color: Color) {
        self.ops.push(DrawOp::SetStrokeStyle(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(DrawOp::SetLineWidth(width));
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ops.push(DrawOp::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ops.push(DrawOp::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }
}
