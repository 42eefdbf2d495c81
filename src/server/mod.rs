//! # HTTP Preview Server
//!
//! Exposes the client core over HTTP so kiosk pages and scanner integrations
//! can use it without linking the library.
//!
//! ## Usage
//!
//! ```bash
//! pitboss serve --listen 0.0.0.0:8080 --config pitboss.json
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/api/formats` | format key → display name |
//! | POST | `/api/barcode/info` | display fragment for a scan |
//! | POST | `/api/dashboard/landing` | landing route for a role set |
//! | POST | `/api/overlay/preview` | overlay rendered to PNG |

mod handlers;
mod state;

pub use state::{AppState, MAX_PREVIEW_EDGE};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::error::PitbossError;

/// Build the router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/formats", get(handlers::barcode::formats))
        .route("/api/barcode/info", post(handlers::barcode::info))
        .route("/api/dashboard/landing", post(handlers::dashboard::landing))
        .route("/api/overlay/preview", post(handlers::overlay::preview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use pitboss::config::AppConfig;
/// use pitboss::server::serve;
///
/// # async fn example() -> Result<(), pitboss::PitbossError> {
/// serve(AppConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: AppConfig) -> Result<(), PitbossError> {
    let listen_addr = config.listen_addr.clone();
    let app = router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| PitbossError::Network(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    info!(addr = %listen_addr, "pitboss server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| PitbossError::Network(format!("Server error: {}", e)))?;

    Ok(())
}
