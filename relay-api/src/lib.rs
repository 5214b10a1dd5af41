//! Symbol relay HTTP/WebSocket server
//!
//! Router construction and shared state, split out of the binary so the
//! integration tests can run the same app on an ephemeral port.

pub mod config;
pub mod lifecycle;
pub mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use relay_services::WebSocketState;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Symbol source status captured at startup
#[derive(Debug, Clone)]
pub struct SourceStatus {
    /// Source name, as reported by the source
    pub name: String,
    /// Whether initialization succeeded
    pub connected: bool,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ws_state: Arc<WebSocketState>,
    pub source_status: SourceStatus,
}

/// Build the full router: WebSocket endpoint, health API and static assets
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::api_routes())
        .merge(routes::ws_routes())
        .merge(routes::asset_routes(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
