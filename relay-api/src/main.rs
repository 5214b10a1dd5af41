//! Symbol Relay API Server
//!
//! HTTP/WebSocket server that relays trading terminal symbol data to
//! browser clients.

use axum::Router;
use relay_api::{build_router, config::ServerConfig, lifecycle, AppState, SourceStatus};
use relay_core::SymbolSource;
use relay_services::{SerializedSource, SymbolResolver, WebSocketState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,relay_api=debug")),
        )
        .init();

    info!("Starting symbol relay");

    let config = ServerConfig::from_env()?;

    let mut source = config.source.build()?;
    if config.serialize_source_calls {
        info!("Serializing calls into {}", source.name());
        source = Arc::new(SerializedSource::new(source));
    }

    // Open the terminal connection before accepting clients
    let connected = lifecycle::initialize_source(source.as_ref()).await;
    if !connected && config.require_source {
        lifecycle::shutdown_source(source.as_ref()).await;
        anyhow::bail!(
            "{} unavailable and REQUIRE_SOURCE is set, refusing to start",
            source.name()
        );
    }

    let state = AppState {
        ws_state: WebSocketState::shared(SymbolResolver::new(Arc::clone(&source))),
        source_status: SourceStatus {
            name: source.name().to_string(),
            connected,
        },
    };

    let app = build_router(state, &config.static_dir);
    let served = serve(app, config.bind_addr()).await;

    // Close the terminal connection whatever happened while serving
    lifecycle::shutdown_source(source.as_ref()).await;

    served
}

async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
