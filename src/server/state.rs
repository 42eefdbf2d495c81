//! Server state and configuration.

use crate::auth::RoleTable;
use crate::barcode::BarcodeInfoFormatter;
use crate::config::AppConfig;
use crate::overlay::OverlayRenderer;

/// Largest preview surface edge, in pixels.
pub const MAX_PREVIEW_EDGE: u32 = 4096;

/// Application state shared across handlers.
///
/// Everything here is immutable after startup; handlers never share a
/// drawing surface.
pub struct AppState {
    pub config: AppConfig,
    pub formatter: BarcodeInfoFormatter,
    pub roles: RoleTable,
    pub renderer: OverlayRenderer,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            formatter: BarcodeInfoFormatter::new(config.format_names()),
            roles: config.role_table(),
            renderer: OverlayRenderer::new(config.canvas_accessor()),
            config,
        }
    }
}
