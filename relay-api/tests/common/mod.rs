//! Shared helpers for relay-api integration tests
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use relay_api::{build_router, AppState, SourceStatus};
use relay_bridge::StaticSymbolSource;
use relay_core::{SymbolInfo, SymbolSource, SymbolTick};
use relay_services::{SymbolResolver, WebSocketState};

pub const INDEX_HTML: &str = "<!doctype html><title>Symbol Relay</title>";
pub const APP_JS: &str = "console.log('relay');";

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A relay running on an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
}

impl TestServer {
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.static_dir);
    }
}

/// Write a throwaway static bundle
fn static_bundle() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "relay-api-test-{}-{}",
        std::process::id(),
        NEXT_DIR.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(dir.join("app.js"), APP_JS).unwrap();
    dir
}

/// Start the full router over `source`
pub async fn spawn_server(source: Arc<dyn SymbolSource>, connected: bool) -> TestServer {
    let static_dir = static_bundle();

    let state = AppState {
        ws_state: WebSocketState::shared(SymbolResolver::new(Arc::clone(&source))),
        source_status: SourceStatus {
            name: source.name().to_string(),
            connected,
        },
    };
    let app = build_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer { addr, static_dir }
}

/// Source with EURUSD fully populated and GBPUSD without metadata
pub fn market_source() -> Arc<dyn SymbolSource> {
    let source = StaticSymbolSource::new()
        .with_info(
            "EURUSD",
            SymbolInfo {
                point: Some(0.00001),
                trade_tick_value: Some(1.0),
                volume_min: Some(0.01),
                ..SymbolInfo::default()
            },
        )
        .with_tick(
            "EURUSD",
            SymbolTick {
                ask: Some(1.084567),
                ..SymbolTick::default()
            },
        )
        .with_tick(
            "GBPUSD",
            SymbolTick {
                ask: Some(1.271234),
                ..SymbolTick::default()
            },
        );

    Arc::new(source)
}
