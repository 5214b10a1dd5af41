//! Route definitions

mod assets;
mod health;
pub mod ws;

use axum::Router;
use std::path::Path;

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::routes())
}

/// Create WebSocket routes (separate from API)
pub fn ws_routes() -> Router<AppState> {
    ws::routes()
}

/// Create routes for the frontend bundle
pub fn asset_routes(static_dir: &Path) -> Router<AppState> {
    assets::routes(static_dir)
}
