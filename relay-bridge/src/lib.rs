//! Trading terminal integration for the symbol relay
//!
//! This crate provides the symbol sources the relay can serve from: an HTTP
//! client for a terminal bridge gateway, and a static in-memory source
//! loaded from a fixture file.

pub mod client;
pub mod fixture;
pub mod types;

pub use client::{BridgeClient, DEFAULT_TIMEOUT};
pub use fixture::StaticSymbolSource;
