//! Business logic services for the trading terminal symbol relay
//!
//! This crate provides the service layer between the WebSocket endpoint
//! and the symbol source: request resolution, serialized source access and
//! the per-connection streaming loop.

pub mod resolver;
pub mod serialized;
pub mod websocket;

pub use resolver::SymbolResolver;
pub use serialized::SerializedSource;
pub use websocket::{CloseReason, ConnectionId, WebSocketState};
