//! WebSocket message types for the symbol relay
//!
//! Clients send a bare JSON array of symbol names; the server answers with a
//! JSON array of [`SymbolRecord`]s, or with `{"message": "error"}` when the
//! request is not an array of strings.

use serde::{Deserialize, Serialize};

use crate::SymbolRecord;

/// Literal carried by the error reply
pub const ERROR_MESSAGE: &str = "error";

// ============================================================================
// Client -> Server Messages
// ============================================================================

/// Decoded client request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    /// A list of symbol names to look up
    Symbols(Vec<String>),
    /// Anything else: objects, scalars, null, malformed JSON, mixed arrays
    Invalid,
}

impl ClientRequest {
    /// Decode a text frame
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Vec<String>>(text) {
            Ok(symbols) => Self::Symbols(symbols),
            Err(_) => Self::Invalid,
        }
    }
}

// ============================================================================
// Server -> Client Messages
// ============================================================================

/// Messages sent from server to client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    /// One record per requested symbol, in request order
    Symbols(Vec<SymbolRecord>),
    /// Rejected request
    Error { message: String },
}

impl ServerMessage {
    /// The fixed reply to a request that is not a list of symbols
    pub fn error() -> Self {
        Self::Error {
            message: ERROR_MESSAGE.to_string(),
        }
    }
}
