//! # Scan Overlays
//!
//! Paints the latest barcode detection (box outline) or scanner sweep (scan
//! line) on top of a camera preview surface.
//!
//! Every draw is:
//!
//! ```text
//! resolve surface (resize = blank buffer) → clear → set stroke → path → stroke
//! ```
//!
//! Overlays are never additive; each call replaces whatever the previous one
//! drew. An unavailable surface turns the call into a no-op.
//!
//! ## Example
//!
//! ```
//! use pitboss::canvas::{DrawOp, RecordingSurface, SurfaceRegistry};
//! use pitboss::overlay::{DetectionBox, OverlayRenderer};
//!
//! let mut registry = SurfaceRegistry::new();
//! registry.insert("scanner-overlay", RecordingSurface::new());
//!
//! let renderer = OverlayRenderer::default();
//! renderer.draw_detection_box(
//!     &mut registry,
//!     "scanner-overlay",
//!     Some(&DetectionBox::rect(10.0, 10.0, 120.0, 40.0)),
//! );
//!
//! let surface = registry.get("scanner-overlay").unwrap();
//! assert_eq!(surface.ops().last(), Some(&DrawOp::Stroke));
//! ```

mod shapes;

pub use shapes::{DetectionBox, Point, ScanLine};

use tracing::debug;

use crate::canvas::{CanvasAccessor, Color, DrawContext, SurfaceProvider};

/// Default stroke for detection boxes.
pub const DETECTION_COLOR: &str = "#00FF00";

/// Default stroke for scan lines.
pub const SCAN_LINE_COLOR: &str = "#FF3B58";

/// Stroke width for every overlay.
pub const LINE_WIDTH: f32 = 3.0;

/// Draws detection boxes and scan lines onto resolved surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayRenderer {
    accessor: CanvasAccessor,
}

impl OverlayRenderer {
    pub fn new(accessor: CanvasAccessor) -> Self {
        Self { accessor }
    }

    /// Outline `detection` in the default green.
    pub fn draw_detection_box<P>(
        &self,
        provider: &mut P,
        surface_id: &str,
        detection: Option<&DetectionBox>,
    ) where
        P: SurfaceProvider + ?Sized,
    {
        self.draw_detection_box_with_color(provider, surface_id, detection, DETECTION_COLOR);
    }

    /// Outline `detection` in `color`.
    ///
    /// The surface is resolved (and therefore reset) first. An absent box or
    /// an empty polygon stops there, without clearing or stroking.
    pub fn draw_detection_box_with_color<P>(
        &self,
        provider: &mut P,
        surface_id: &str,
        detection: Option<&DetectionBox>,
        color: &str,
    ) where
        P: SurfaceProvider + ?Sized,
    {
        let Ok(target) = self.accessor.resolve(provider, surface_id, None, None) else {
            return;
        };
        let Some(detection) = detection.filter(|d| !d.is_empty()) else {
            return;
        };

        let ctx = target.ctx;
        ctx.clear_rect(0.0, 0.0, target.width as f32, target.height as f32);
        apply_stroke(ctx, color);

        match detection {
            DetectionBox::Polygon { points } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for p in rest {
                    ctx.line_to(p.x, p.y);
                }
                ctx.close_path();
                ctx.stroke();
            }
            DetectionBox::Rect {
                x,
                y,
                width,
                height,
            } => {
                ctx.begin_path();
                ctx.rect(*x, *y, *width, *height);
                ctx.stroke();
            }
        }
    }

    /// Draw `line` in the default red.
    pub fn draw_scan_line<P>(&self, provider: &mut P, surface_id: &str, line: Option<&ScanLine>)
    where
        P: SurfaceProvider + ?Sized,
    {
        self.draw_scan_line_with_color(provider, surface_id, line, SCAN_LINE_COLOR);
    }

    /// Draw `line` in `color`.
    ///
    /// With a line present the surface is always cleared; the segment is only
    /// stroked when both endpoints exist.
    pub fn draw_scan_line_with_color<P>(
        &self,
        provider: &mut P,
        surface_id: &str,
        line: Option<&ScanLine>,
        color: &str,
    ) where
        P: SurfaceProvider + ?Sized,
    {
        let Ok(target) = self.accessor.resolve(provider, surface_id, None, None) else {
            return;
        };
        let Some(line) = line else {
            return;
        };

        let ctx = target.ctx;
        ctx.clear_rect(0.0, 0.0, target.width as f32, target.height as f32);

        if let Some((start, end)) = line.endpoints() {
            apply_stroke(ctx, color);
            ctx.begin_path();
            ctx.move_to(start.x, start.y);
            ctx.line_to(end.x, end.y);
            ctx.stroke();
        }
    }
}

/// Set stroke colour and width. An unparsable colour keeps the context's
/// current stroke style, as a canvas does.
fn apply_stroke(ctx: &mut dyn DrawContext, color: &str) {
    match color.parse::<Color>() {
        Ok(c) => ctx.set_stroke_style(c),
        Err(e) => debug!(error = %e, "ignoring stroke colour"),
    }
    ctx.set_line_width(LINE_WIDTH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RasterSurface, RecordingSurface, SurfaceRegistry};
    use pretty_assertions::assert_eq;

    const ID: &str = "overlay";

    fn recording() -> SurfaceRegistry<RecordingSurface> {
        let mut registry = SurfaceRegistry::new();
        registry.insert(ID, RecordingSurface::displayed(640, 480));
        registry
    }

    fn ops(registry: &SurfaceRegistry<RecordingSurface>) -> Vec<DrawOp> {
        registry.get(ID).unwrap().ops_since_resize().to_vec()
    }

    #[test]
    fn test_polygon_is_closed_outline() {
        let mut registry = recording();
        let detection = DetectionBox::polygon([
            Point::new(1.0, 1.0),
            Point::new(9.0, 1.0),
            Point::new(9.0, 9.0),
        ]);
        OverlayRenderer::default().draw_detection_box(&mut registry, ID, Some(&detection));

        assert_eq!(
            ops(&registry),
            vec![
                DrawOp::ClearRect {
                    x: 0.0,
                    y: 0.0,
                    width: 640.0,
                    height: 480.0
                },
                DrawOp::SetStrokeStyle(Color::rgb(0, 255, 0)),
                DrawOp::SetLineWidth(3.0),
                DrawOp::BeginPath,
                DrawOp::MoveTo { x: 1.0, y: 1.0 },
                DrawOp::LineTo { x: 9.0, y: 1.0 },
                DrawOp::LineTo { x: 9.0, y: 9.0 },
                DrawOp::ClosePath,
                DrawOp::Stroke,
            ]
        );
    }

    #[test]
    fn test_rect_box() {
        let mut registry = recording();
        OverlayRenderer::default().draw_detection_box_with_color(
            &mut registry,
            ID,
            Some(&DetectionBox::rect(5.0, 6.0, 70.0, 20.0)),
            "#0000FF",
        );

        assert_eq!(
            ops(&registry)[1..].to_vec(),
            vec![
                DrawOp::SetStrokeStyle(Color::rgb(0, 0, 255)),
                DrawOp::SetLineWidth(3.0),
                DrawOp::BeginPath,
                DrawOp::Rect {
                    x: 5.0,
                    y: 6.0,
                    width: 70.0,
                    height: 20.0
                },
                DrawOp::Stroke,
            ]
        );
    }

    #[test]
    fn test_empty_box_draws_nothing() {
        let mut registry = recording();
        OverlayRenderer::default().draw_detection_box(
            &mut registry,
            ID,
            Some(&DetectionBox::polygon([])),
        );
        assert!(ops(&registry).is_empty());

        OverlayRenderer::default().draw_detection_box(&mut registry, ID, None);
        assert!(ops(&registry).is_empty());
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let mut registry = recording();
        OverlayRenderer::default().draw_detection_box(
            &mut registry,
            "elsewhere",
            Some(&DetectionBox::rect(0.0, 0.0, 1.0, 1.0)),
        );
        OverlayRenderer::default().draw_scan_line(
            &mut registry,
            "elsewhere",
            Some(&ScanLine::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0))),
        );
        assert!(registry.get(ID).unwrap().ops().is_empty());
    }

    #[test]
    fn test_no_context_is_noop() {
        let mut registry = SurfaceRegistry::new();
        registry.insert(ID, RecordingSurface::without_context());
        OverlayRenderer::default().draw_detection_box(
            &mut registry,
            ID,
            Some(&DetectionBox::rect(0.0, 0.0, 1.0, 1.0)),
        );
        assert_eq!(registry.get(ID).unwrap().stroke_count(), 0);
    }

    #[test]
    fn test_scan_line_full() {
        let mut registry = recording();
        let line = ScanLine::new(Point::new(0.0, 240.0), Point::new(640.0, 240.0));
        OverlayRenderer::default().draw_scan_line(&mut registry, ID, Some(&line));

        assert_eq!(
            ops(&registry)[1..].to_vec(),
            vec![
                DrawOp::SetStrokeStyle(Color::rgb(0xFF, 0x3B, 0x58)),
                DrawOp::SetLineWidth(3.0),
                DrawOp::BeginPath,
                DrawOp::MoveTo { x: 0.0, y: 240.0 },
                DrawOp::LineTo { x: 640.0, y: 240.0 },
                DrawOp::Stroke,
            ]
        );
    }

    #[test]
    fn test_scan_line_one_endpoint_clears_only() {
        let mut registry = recording();
        let line = ScanLine {
            start: Some(Point::new(0.0, 10.0)),
            end: None,
        };
        OverlayRenderer::default().draw_scan_line(&mut registry, ID, Some(&line));

        let ops = ops(&registry);
        assert!(matches!(ops.as_slice(), [DrawOp::ClearRect { .. }]));
        assert_eq!(registry.get(ID).unwrap().stroke_count(), 0);
    }

    #[test]
    fn test_scan_line_absent_does_not_clear() {
        let mut registry = recording();
        OverlayRenderer::default().draw_scan_line(&mut registry, ID, None);
        assert!(ops(&registry).is_empty());
    }

    #[test]
    fn test_bad_colour_keeps_context_style() {
        let mut registry = recording();
        OverlayRenderer::default().draw_detection_box_with_color(
            &mut registry,
            ID,
            Some(&DetectionBox::rect(0.0, 0.0, 2.0, 2.0)),
            "not-a-colour",
        );
        let ops = ops(&registry);
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::SetStrokeStyle(_))));
        assert!(ops.contains(&DrawOp::Stroke));
    }

    #[test]
    fn test_redraw_replaces_previous_pixels() {
        let mut registry = SurfaceRegistry::new();
        registry.insert(ID, RasterSurface::new(100, 100).with_displayed_size(100, 100));
        let renderer = OverlayRenderer::default();

        let first_box = DetectionBox::rect(10.0, 10.0, 20.0, 20.0);
        renderer.draw_detection_box(&mut registry, ID, Some(&first_box));
        let first = registry.get(ID).unwrap();
        assert_eq!(first.pixel(10, 20), Some(Color::rgb(0, 255, 0)));

        let second_box = DetectionBox::rect(60.0, 60.0, 20.0, 20.0);
        renderer.draw_detection_box(&mut registry, ID, Some(&second_box));
        let second = registry.get(ID).unwrap();
        assert_eq!(second.pixel(10, 20), Some(Color::TRANSPARENT));
        assert_eq!(second.pixel(60, 70), Some(Color::rgb(0, 255, 0)));
    }
}
