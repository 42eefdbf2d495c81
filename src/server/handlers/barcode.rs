//! Barcode info handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::barcode::{DisplayFragment, FormatNames};

use super::super::state::AppState;

fn default_reader() -> String {
    "Cámara".to_string()
}

/// Request body for a confirmed scan.
#[derive(Debug, Deserialize)]
pub struct InfoRequest {
    pub code: String,
    pub format: String,
    #[serde(default = "default_reader")]
    pub reader: String,
}

/// Fragment fields plus the rendered HTML.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    #[serde(flatten)]
    pub fragment: DisplayFragment,
    pub html: String,
}

/// GET /api/formats - List format key → display name.
pub async fn formats(State(state): State<Arc<AppState>>) -> Json<FormatNames> {
    Json(state.formatter.names().clone())
}

/// POST /api/barcode/info - Format a confirmed scan.
pub async fn info(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InfoRequest>,
) -> Result<Json<InfoResponse>, (StatusCode, String)> {
    if req.code.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "code cannot be empty".to_string()));
    }

    let fragment = state
        .formatter
        .format_info(&req.code, &req.format, &req.reader);
    let html = fragment.to_html();
    Ok(Json(InfoResponse { fragment, html }))
}
