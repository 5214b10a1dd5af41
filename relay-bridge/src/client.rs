//! Terminal bridge client
//!
//! Talks to a bridge gateway running next to the trading terminal. The
//! gateway exposes the terminal's symbol lookups over plain HTTP/JSON.

use crate::types::{BridgeSymbolInfo, BridgeTick, InitializeResponse};
use async_trait::async_trait;
use relay_core::{RelayError, RelayResult, SymbolInfo, SymbolSource, SymbolTick};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Default request timeout for gateway calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const SOURCE_NAME: &str = "terminal bridge";

/// Bridge gateway client
#[derive(Clone)]
pub struct BridgeClient {
    client: Client,
    base_url: Url,
}

impl BridgeClient {
    /// Create a new bridge client
    pub fn new(base_url: &str, timeout: Duration) -> RelayResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RelayError::config(format!("Invalid bridge URL {}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(RelayError::config(format!(
                "Bridge URL cannot be used as a base: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build an endpoint URL; each segment is percent-encoded on its own
    fn endpoint(&self, segments: &[&str]) -> RelayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RelayError::config(format!("Bridge URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a resource that may legitimately be missing
    async fn get_optional<T: DeserializeOwned>(&self, url: Url, what: &str) -> RelayResult<Option<T>> {
        debug!("Fetching {} from: {}", what, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RelayError::network(format!("Failed to fetch {}: {}", what, e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::api(format!(
                "Bridge API error ({}): {}",
                status, body
            )));
        }

        let parsed = response
            .json()
            .await
            .map_err(|e| RelayError::parse(format!("Failed to parse {}: {}", what, e)))?;

        Ok(Some(parsed))
    }
}

#[async_trait]
impl SymbolSource for BridgeClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    #[instrument(skip(self))]
    async fn initialize(&self) -> RelayResult<()> {
        let url = self.endpoint(&["initialize"])?;

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| RelayError::network(format!("Failed to reach bridge: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::api(format!(
                "Bridge API error ({}): {}",
                status, body
            )));
        }

        let status: InitializeResponse = response
            .json()
            .await
            .map_err(|e| RelayError::parse(format!("Failed to parse initialize response: {}", e)))?;

        if !status.connected {
            return Err(RelayError::source(
                SOURCE_NAME,
                status
                    .error
                    .unwrap_or_else(|| "terminal not connected".to_string()),
            ));
        }

        if let Some(version) = status.terminal_version {
            info!("Bridge connected to terminal {}", version);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn shutdown(&self) {
        let url = match self.endpoint(&["shutdown"]) {
            Ok(url) => url,
            Err(e) => {
                warn!("Failed to build bridge shutdown URL: {}", e);
                return;
            }
        };

        match self.client.post(url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Bridge shutdown acknowledged");
            }
            Ok(response) => {
                warn!("Bridge shutdown returned {}", response.status());
            }
            Err(e) => {
                warn!("Failed to shut down bridge: {}", e);
            }
        }
    }

    #[instrument(skip(self))]
    async fn symbol_info(&self, symbol: &str) -> RelayResult<Option<SymbolInfo>> {
        let url = self.endpoint(&["symbols", symbol])?;
        let info: Option<BridgeSymbolInfo> = self.get_optional(url, "symbol info").await?;
        Ok(info.map(BridgeSymbolInfo::to_symbol_info))
    }

    #[instrument(skip(self))]
    async fn symbol_info_tick(&self, symbol: &str) -> RelayResult<Option<SymbolTick>> {
        let url = self.endpoint(&["symbols", symbol, "tick"])?;
        let tick: Option<BridgeTick> = self.get_optional(url, "symbol tick").await?;
        Ok(tick.map(BridgeTick::to_symbol_tick))
    }
}

impl std::fmt::Debug for BridgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::StatusCode as HttpStatus,
        response::{IntoResponse, Json, Response},
        routing::{get, post},
        Router,
    };
    use serde_json::json;

    async fn fake_symbol_info(Path(symbol): Path<String>) -> Response {
        match symbol.as_str() {
            "EURUSD" | "#AAPL" => Json(json!({
                "name": symbol.clone(),
                "digits": 5,
                "point": 0.00001,
                "trade_tick_value": 1.0,
                "volume_min": 0.01
            }))
            .into_response(),
            "BROKEN" => (HttpStatus::INTERNAL_SERVER_ERROR, "terminal offline").into_response(),
            "GARBLED" => "not json".into_response(),
            _ => HttpStatus::NOT_FOUND.into_response(),
        }
    }

    async fn fake_symbol_tick(Path(symbol): Path<String>) -> Response {
        match symbol.as_str() {
            "EURUSD" => Json(json!({"time": 1700000000, "bid": 1.08452, "ask": 1.084567}))
                .into_response(),
            _ => HttpStatus::NOT_FOUND.into_response(),
        }
    }

    /// Start a fake gateway on an ephemeral port and return its base URL
    async fn spawn_gateway(connected: bool) -> String {
        let app = Router::new()
            .route(
                "/initialize",
                post(move || async move {
                    if connected {
                        Json(json!({"connected": true, "terminal_version": "5.00 build 4200"}))
                    } else {
                        Json(json!({"connected": false, "error": "IPC initialize failed"}))
                    }
                }),
            )
            .route("/shutdown", post(|| async { HttpStatus::NO_CONTENT }))
            .route("/symbols/{symbol}", get(fake_symbol_info))
            .route("/symbols/{symbol}/tick", get(fake_symbol_tick));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = BridgeClient::new("not a url", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));

        let err = BridgeClient::new("mailto:desk@example.com", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    fn test_endpoint_encodes_symbol_segment() {
        let client = BridgeClient::new("http://127.0.0.1:8228/mt/", DEFAULT_TIMEOUT).unwrap();
        let url = client.endpoint(&["symbols", "EUR/USD#1", "tick"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8228/mt/symbols/EUR%2FUSD%231/tick");
    }

    #[tokio::test]
    async fn test_initialize_connected() {
        let base = spawn_gateway(true).await;
        let client = BridgeClient::new(&base, DEFAULT_TIMEOUT).unwrap();
        client.initialize().await.unwrap();
        client.shutdown().await;
    }

    #[tokio::test]
    async fn test_initialize_not_connected() {
        let base = spawn_gateway(false).await;
        let client = BridgeClient::new(&base, DEFAULT_TIMEOUT).unwrap();
        let err = client.initialize().await.unwrap_err();
        assert!(err.to_string().contains("IPC initialize failed"));
    }

    #[tokio::test]
    async fn test_symbol_lookups() {
        let base = spawn_gateway(true).await;
        let client = BridgeClient::new(&base, DEFAULT_TIMEOUT).unwrap();

        let info = client.symbol_info("EURUSD").await.unwrap().unwrap();
        assert_eq!(info.point, Some(0.00001));
        assert_eq!(info.trade_tick_value, Some(1.0));
        assert_eq!(info.volume_min, Some(0.01));

        let tick = client.symbol_info_tick("EURUSD").await.unwrap().unwrap();
        assert_eq!(tick.ask, Some(1.084567));
    }

    #[tokio::test]
    async fn test_symbol_with_reserved_characters() {
        let base = spawn_gateway(true).await;
        let client = BridgeClient::new(&base, DEFAULT_TIMEOUT).unwrap();

        let info = client.symbol_info("#AAPL").await.unwrap().unwrap();
        assert_eq!(info.name.as_deref(), Some("#AAPL"));
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_none() {
        let base = spawn_gateway(true).await;
        let client = BridgeClient::new(&base, DEFAULT_TIMEOUT).unwrap();

        assert!(client.symbol_info("NOPE").await.unwrap().is_none());
        assert!(client.symbol_info_tick("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_gateway_errors_propagate() {
        let base = spawn_gateway(true).await;
        let client = BridgeClient::new(&base, DEFAULT_TIMEOUT).unwrap();

        let err = client.symbol_info("BROKEN").await.unwrap_err();
        assert!(matches!(err, RelayError::Api(_)));

        let err = client.symbol_info("GARBLED").await.unwrap_err();
        assert!(matches!(err, RelayError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = BridgeClient::new(&format!("http://{}", addr), DEFAULT_TIMEOUT).unwrap();
        let err = client.symbol_info("EURUSD").await.unwrap_err();
        assert!(matches!(err, RelayError::Network(_)));
    }
}
