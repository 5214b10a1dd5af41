//! Symbol source lifecycle
//!
//! The source is opened once before the server accepts connections and
//! closed once after serving ends.

use relay_core::SymbolSource;
use tracing::{error, info};

/// Open the source, logging the outcome
///
/// Returns whether the source is connected. A failure is logged at error
/// level but is not fatal here; the caller decides whether to keep serving.
pub async fn initialize_source(source: &dyn SymbolSource) -> bool {
    match source.initialize().await {
        Ok(()) => {
            info!("{} connection established", source.name());
            true
        }
        Err(e) => {
            error!("Failed to connect to {}: {}", source.name(), e);
            false
        }
    }
}

/// Close the source, whether or not it was opened successfully
pub async fn shutdown_source(source: &dyn SymbolSource) {
    source.shutdown().await;
    info!("{} connection closed", source.name());
}
