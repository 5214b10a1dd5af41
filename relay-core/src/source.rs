//! Symbol source abstraction
//!
//! A symbol source is the process-wide handle to the trading terminal. It is
//! initialized once before the server accepts connections and shut down once
//! after serving ends.

use async_trait::async_trait;

use crate::{RelayResult, SymbolInfo, SymbolTick};

/// Read-only access to a trading terminal's symbol data
///
/// Lookups return `Ok(None)` when the terminal does not know the symbol and
/// `Err` when the terminal itself could not be queried.
#[async_trait]
pub trait SymbolSource: Send + Sync {
    /// Short name used in logs and health reports
    fn name(&self) -> &str;

    /// Open the connection to the terminal
    async fn initialize(&self) -> RelayResult<()>;

    /// Close the connection to the terminal
    ///
    /// Called unconditionally on shutdown, even if `initialize` failed.
    async fn shutdown(&self);

    /// Static metadata for a symbol
    async fn symbol_info(&self, symbol: &str) -> RelayResult<Option<SymbolInfo>>;

    /// Latest tick for a symbol
    async fn symbol_info_tick(&self, symbol: &str) -> RelayResult<Option<SymbolTick>>;
}
