//! Landing route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::super::state::AppState;

/// Request body: the user's role tags. Missing or `null` means none.
#[derive(Debug, Deserialize)]
pub struct LandingRequest {
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct LandingResponse {
    pub route: String,
}

/// POST /api/dashboard/landing - Resolve the landing route for a role set.
pub async fn landing(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LandingRequest>,
) -> Json<LandingResponse> {
    let route = state.roles.default_dashboard(req.roles.as_deref());
    Json(LandingResponse {
        route: route.to_string(),
    })
}
