//! Core types for the trading terminal symbol relay
//!
//! This crate defines the shared data structures used across the relay,
//! including symbol metadata, live ticks, the records streamed to clients
//! and the symbol source abstraction.

pub mod error;
pub mod precision;
pub mod source;
pub mod symbol;
pub mod websocket;

pub use error::{RelayError, RelayResult};
pub use source::SymbolSource;
pub use symbol::{SymbolInfo, SymbolRecord, SymbolTick};
pub use websocket::{ClientRequest, ServerMessage, ERROR_MESSAGE};
