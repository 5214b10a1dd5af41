//! WebSocket connection handler
//!
//! Handles individual WebSocket connections: decode each text frame as a
//! symbol request, resolve it, send the records back. One request is
//! processed at a time per connection.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::{pin_mut, Sink, SinkExt, Stream, StreamExt};
use relay_core::{ClientRequest, ServerMessage};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use crate::SymbolResolver;

/// Connection identifier, used for log correlation only
pub type ConnectionId = u64;

/// Why a connection loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The client sent a close frame
    ClientClosed,
    /// The inbound stream ended without a close frame
    StreamEnded,
    /// Reading from or writing to the socket failed
    TransportError,
    /// The symbol source failed while resolving a request
    SourceFailure,
}

/// Shared state for WebSocket handlers
#[derive(Debug)]
pub struct WebSocketState {
    /// Resolver for symbol requests
    pub resolver: SymbolResolver,
    next_connection_id: AtomicU64,
}

impl WebSocketState {
    /// Create new WebSocket state
    pub fn new(resolver: SymbolResolver) -> Self {
        Self {
            resolver,
            next_connection_id: AtomicU64::new(1),
        }
    }

    /// Wrap in an `Arc` for sharing across connections
    pub fn shared(resolver: SymbolResolver) -> Arc<Self> {
        Arc::new(Self::new(resolver))
    }

    /// Handle a new WebSocket connection
    ///
    /// Runs until the client disconnects, the transport fails, or the symbol
    /// source fails. Nothing escapes past this call; the reason the loop ended
    /// is returned.
    pub async fn handle_connection<Tx, Rx, E>(&self, sender: Tx, receiver: Rx) -> CloseReason
    where
        Tx: Sink<Message>,
        Tx::Error: Display,
        Rx: Stream<Item = Result<Message, E>>,
        E: Display,
    {
        let connection_id: ConnectionId = self.next_connection_id.fetch_add(1, Ordering::Relaxed);
        info!("New WebSocket connection: {}", connection_id);

        pin_mut!(sender, receiver);

        let reason = loop {
            let message = match receiver.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    debug!("WebSocket error for {}: {}", connection_id, e);
                    break CloseReason::TransportError;
                }
                None => break CloseReason::StreamEnded,
            };

            let request = match message {
                Message::Text(text) => ClientRequest::parse(text.as_str()),
                // Requests are JSON text; binary frames get the error reply
                Message::Binary(_) => ClientRequest::Invalid,
                Message::Close(_) => {
                    debug!("Received close from {}", connection_id);
                    break CloseReason::ClientClosed;
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            };

            let reply = match request {
                ClientRequest::Symbols(symbols) => {
                    match self.resolver.resolve(&symbols).await {
                        Ok(records) => ServerMessage::Symbols(records),
                        Err(e) => {
                            error!(
                                "Symbol source failed for connection {}: {}",
                                connection_id, e
                            );
                            let close = Message::Close(Some(CloseFrame {
                                code: CloseCode::Error,
                                reason: "symbol source failure".to_string().into(),
                            }));
                            if let Err(e) = sender.send(close).await {
                                debug!("Failed to send close to {}: {}", connection_id, e);
                            }
                            break CloseReason::SourceFailure;
                        }
                    }
                }
                ClientRequest::Invalid => {
                    warn!("Invalid request from {}", connection_id);
                    ServerMessage::error()
                }
            };

            let json = match serde_json::to_string(&reply) {
                Ok(j) => j,
                Err(e) => {
                    error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = sender.send(Message::Text(json.into())).await {
                debug!("Failed to send to {}: {}", connection_id, e);
                break CloseReason::TransportError;
            }
        };

        info!("WebSocket connection closed: {} ({:?})", connection_id, reason);
        reason
    }
}
