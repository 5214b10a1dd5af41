//! Static frontend assets
//!
//! `/` serves the bundle's `index.html`; everything else in the bundle is
//! under `/static`.

use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use crate::AppState;

/// Create asset routes rooted at `static_dir`
pub fn routes(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
}
