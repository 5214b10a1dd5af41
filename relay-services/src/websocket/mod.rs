//! WebSocket infrastructure for symbol streaming
//!
//! This module provides the per-connection request/response loop that
//! serves symbol records to connected clients.

mod handler;

pub use handler::{CloseReason, ConnectionId, WebSocketState};
