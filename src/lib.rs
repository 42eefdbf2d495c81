//! # Pitboss - Casino Back-Office Client Core
//!
//! Pitboss holds the client-side logic of a casino back-office console:
//!
//! - **Scan overlays**: detection boxes and scan lines drawn onto 2D surfaces
//! - **Barcode info**: display fragments for confirmed scans
//! - **Role routing**: which dashboard a user lands on after login
//! - **Auth sessions**: login/verify/register against the back-office API
//!
//! ## Quick Start
//!
//! ```
//! use pitboss::{
//!     canvas::{CanvasAccessor, RecordingSurface, Surface, SurfaceRegistry},
//!     overlay::{DetectionBox, OverlayRenderer},
//! };
//!
//! let mut surfaces = SurfaceRegistry::new();
//! surfaces.insert("overlay", RecordingSurface::displayed(640, 480));
//!
//! let renderer = OverlayRenderer::new(CanvasAccessor::default());
//! let rect = DetectionBox::rect(10.0, 20.0, 100.0, 50.0);
//! renderer.draw_detection_box(&mut surfaces, "overlay", Some(&rect));
//!
//! let surface = surfaces.get("overlay").unwrap();
//! assert_eq!(surface.size(), (640, 480));
//! assert_eq!(surface.stroke_count(), 1);
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`canvas`] | Surface traits, accessor, recording and raster surfaces |
//! | [`overlay`] | Detection box and scan line rendering |
//! | [`barcode`] | Format names and scan display fragments |
//! | [`auth`] | Role table, API client, sessions |
//! | [`zones`] | Zone selection validation |
//! | [`config`] | JSON configuration |
//! | [`server`] | HTTP preview server |
//! | [`error`] | Error types |

pub mod auth;
pub mod barcode;
pub mod canvas;
pub mod config;
pub mod error;
pub mod overlay;
pub mod server;
pub mod zones;

// Re-exports for convenience
pub use config::AppConfig;
pub use error::{PitbossError, ValidationError};
