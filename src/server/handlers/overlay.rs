//! Overlay preview handler.
//!
//! Renders a detection box or scan line onto a fresh raster surface and
//! returns it as a transparent PNG, so scanner integrations can check what
//! operators will see.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::canvas::{RasterSurface, SurfaceRegistry};
use crate::overlay::{DETECTION_COLOR, DetectionBox, SCAN_LINE_COLOR, ScanLine};

use super::super::state::{AppState, MAX_PREVIEW_EDGE};

const SURFACE_ID: &str = "preview";

/// Request body for an overlay preview.
///
/// `box` and `scan_line` take the raw scanner shapes; at most one may be set.
#[derive(Debug, Deserialize)]
pub struct OverlayPreviewRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default, rename = "box")]
    pub detection: Value,
    #[serde(default)]
    pub scan_line: Value,
    pub color: Option<String>,
}

/// POST /api/overlay/preview - Render an overlay to PNG.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OverlayPreviewRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let too_big = |v: Option<u32>| v.is_some_and(|v| v > MAX_PREVIEW_EDGE);
    if too_big(req.width) || too_big(req.height) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("width and height must be at most {}", MAX_PREVIEW_EDGE),
        ));
    }
    if !req.detection.is_null() && !req.scan_line.is_null() {
        return Err((
            StatusCode::BAD_REQUEST,
            "send either box or scan_line, not both".to_string(),
        ));
    }

    // Missing dimensions fall back to the configured canvas size.
    let surface = RasterSurface::new(0, 0)
        .with_displayed_size(req.width.unwrap_or(0), req.height.unwrap_or(0));
    let mut registry = SurfaceRegistry::new();
    registry.insert(SURFACE_ID, surface);

    if req.scan_line.is_null() {
        let detection = DetectionBox::from_json(&req.detection);
        state.renderer.draw_detection_box_with_color(
            &mut registry,
            SURFACE_ID,
            detection.as_ref(),
            req.color.as_deref().unwrap_or(DETECTION_COLOR),
        );
    } else {
        let line = ScanLine::from_json(&req.scan_line);
        state.renderer.draw_scan_line_with_color(
            &mut registry,
            SURFACE_ID,
            line.as_ref(),
            req.color.as_deref().unwrap_or(SCAN_LINE_COLOR),
        );
    }

    let png_bytes = registry
        .get(SURFACE_ID)
        .ok_or_else(|| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "preview surface vanished".to_string(),
            )
        })?
        .to_png()
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Preview render failed: {}", e),
            )
        })?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}
