//! # Canvas Access
//!
//! Resolves a drawable surface by id and hands back a freshly sized 2D
//! drawing context.
//!
//! ## Architecture
//!
//! ```text
//! SurfaceProvider ──id──▶ Surface ──resize──▶ DrawContext
//!   (registry, DOM)        (owned by provider)   (borrowed for one draw)
//! ```
//!
//! The accessor never caches a surface or its dimensions: every call resizes
//! the backing store, which also wipes its content.
//!
//! ## Example
//!
//! ```
//! use pitboss::canvas::{CanvasAccessor, RecordingSurface, SurfaceRegistry};
//!
//! let mut registry = SurfaceRegistry::new();
//! registry.insert("scanner", RecordingSurface::new());
//!
//! let accessor = CanvasAccessor::default();
//! let target = accessor.resolve(&mut registry, "scanner", Some(640), None).unwrap();
//! assert_eq!((target.width, target.height), (640, 300));
//! ```

pub mod ops;
pub mod raster;
pub mod recording;
pub mod registry;

pub use ops::{Color, DrawOp, ParseColorError};
pub use raster::RasterSurface;
pub use recording::RecordingSurface;
pub use registry::SurfaceRegistry;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Backing width used when neither the caller nor the surface provides one.
pub const FALLBACK_WIDTH: u32 = 400;

/// Backing height used when neither the caller nor the surface provides one.
pub const FALLBACK_HEIGHT: u32 = 300;

/// The subset of a 2D canvas context the overlays need.
pub trait DrawContext {
    fn set_stroke_style(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn close_path(&mut self);
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn stroke(&mut self);
}

/// Options passed when requesting a 2D context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContextOptions {
    /// Hint that pixels will be read back often (per-frame scanning).
    pub will_read_frequently: bool,
}

/// A drawable element with a resizable pixel backing store.
pub trait Surface {
    /// Current backing store size in pixels.
    fn size(&self) -> (u32, u32);

    /// Size the element currently occupies on screen, if laid out.
    fn displayed_size(&self) -> Option<(u32, u32)>;

    /// Resize the backing store. Content and context state are reset.
    fn resize(&mut self, width: u32, height: u32);

    /// Obtain a 2D drawing context, or `None` if the surface can't provide one.
    fn context_2d(&mut self, options: ContextOptions) -> Option<&mut dyn DrawContext>;
}

/// Looks surfaces up by identifier.
pub trait SurfaceProvider {
    fn surface_mut(&mut self, id: &str) -> Option<&mut dyn Surface>;
}

/// Why a surface could not be drawn on.
///
/// Never propagated past the overlay layer: drawing degrades to a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("surface '{0}' not found")]
    MissingSurface(String),

    #[error("surface '{0}' has no 2D context")]
    ContextUnsupported(String),
}

/// A resolved surface: its 2D context plus the size it was just given.
pub struct DrawTarget<'a> {
    pub ctx: &'a mut dyn DrawContext,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for DrawTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawTarget")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Resolves surfaces and sizes them for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasAccessor {
    fallback_width: u32,
    fallback_height: u32,
}

impl Default for CanvasAccessor {
    fn default() -> Self {
        Self::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)
    }
}

impl CanvasAccessor {
    /// Create an accessor with custom fallback dimensions.
    ///
    /// Zero fallbacks are bumped to 1 so a surface is never sized to nothing.
    pub fn new(fallback_width: u32, fallback_height: u32) -> Self {
        Self {
            fallback_width: fallback_width.max(1),
            fallback_height: fallback_height.max(1),
        }
    }

    /// Fallback (width, height) used when nothing else is known.
    pub fn fallback_size(&self) -> (u32, u32) {
        (self.fallback_width, self.fallback_height)
    }

    /// Resolve `surface_id` to a freshly sized 2D context.
    ///
    /// Each dimension is taken from the explicit argument, else from the
    /// surface's displayed size, else from the fallback. The surface is
    /// resized on every call, so callers always start from a blank buffer.
    pub fn resolve<'a, P>(
        &self,
        provider: &'a mut P,
        surface_id: &str,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<DrawTarget<'a>, Unavailable>
    where
        P: SurfaceProvider + ?Sized,
    {
        let Some(surface) = provider.surface_mut(surface_id) else {
            warn!(surface = surface_id, "canvas surface not found");
            return Err(Unavailable::MissingSurface(surface_id.to_string()));
        };

        let displayed = surface.displayed_size();
        let width = pick_dimension(width, displayed.map(|(w, _)| w), self.fallback_width);
        let height = pick_dimension(height, displayed.map(|(_, h)| h), self.fallback_height);
        surface.resize(width, height);

        let options = ContextOptions {
            will_read_frequently: true,
        };
        match surface.context_2d(options) {
            Some(ctx) => Ok(DrawTarget { ctx, width, height }),
            None => {
                warn!(surface = surface_id, "2D context unavailable");
                Err(Unavailable::ContextUnsupported(surface_id.to_string()))
            }
        }
    }
}

/// First non-zero of explicit, displayed, fallback.
fn pick_dimension(explicit: Option<u32>, displayed: Option<u32>, fallback: u32) -> u32 {
    explicit
        .filter(|&v| v > 0)
        .or(displayed.filter(|&v| v > 0))
        .unwrap_or(fallback)
}
