//! Static symbol source
//!
//! Serves symbol data from memory. Built programmatically or loaded from a
//! JSON fixture file shaped like:
//!
//! ```json
//! {
//!   "symbols": {
//!     "EURUSD": {
//!       "info": { "point": 0.00001, "trade_tick_value": 1.0, "volume_min": 0.01 },
//!       "tick": { "bid": 1.08452, "ask": 1.084567 }
//!     }
//!   }
//! }
//! ```

use async_trait::async_trait;
use relay_core::{RelayError, RelayResult, SymbolInfo, SymbolSource, SymbolTick};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

const SOURCE_NAME: &str = "fixture";

/// One symbol in a fixture file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FixtureEntry {
    #[serde(default)]
    pub info: Option<SymbolInfo>,
    #[serde(default)]
    pub tick: Option<SymbolTick>,
}

/// Fixture file layout
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FixtureFile {
    #[serde(default)]
    pub symbols: HashMap<String, FixtureEntry>,
}

/// In-memory symbol source
#[derive(Debug, Default)]
pub struct StaticSymbolSource {
    symbols: HashMap<String, FixtureEntry>,
    initialized: AtomicBool,
}

impl StaticSymbolSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a fixture document
    pub fn from_json_str(json: &str) -> RelayResult<Self> {
        let fixture: FixtureFile = serde_json::from_str(json)
            .map_err(|e| RelayError::parse(format!("Invalid fixture: {}", e)))?;

        Ok(Self {
            symbols: fixture.symbols,
            initialized: AtomicBool::new(false),
        })
    }

    /// Load a fixture file from disk
    pub fn from_file(path: impl AsRef<Path>) -> RelayResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RelayError::config(format!("Failed to read fixture {}: {}", path.display(), e))
        })?;

        let source = Self::from_json_str(&json)?;
        info!("Loaded {} fixture symbols from {}", source.len(), path.display());
        Ok(source)
    }

    /// Add or replace a symbol's static metadata
    pub fn with_info(mut self, symbol: impl Into<String>, info: SymbolInfo) -> Self {
        self.symbols.entry(symbol.into()).or_default().info = Some(info);
        self
    }

    /// Add or replace a symbol's tick
    pub fn with_tick(mut self, symbol: impl Into<String>, tick: SymbolTick) -> Self {
        self.symbols.entry(symbol.into()).or_default().tick = Some(tick);
        self
    }

    /// Number of symbols with any data
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether `initialize` has been called without a later `shutdown`
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SymbolSource for StaticSymbolSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn initialize(&self) -> RelayResult<()> {
        self.initialized.store(true, Ordering::SeqCst);
        debug!("Fixture source initialized with {} symbols", self.symbols.len());
        Ok(())
    }

    async fn shutdown(&self) {
        self.initialized.store(false, Ordering::SeqCst);
    }

    async fn symbol_info(&self, symbol: &str) -> RelayResult<Option<SymbolInfo>> {
        Ok(self.symbols.get(symbol).and_then(|entry| entry.info.clone()))
    }

    async fn symbol_info_tick(&self, symbol: &str) -> RelayResult<Option<SymbolTick>> {
        Ok(self.symbols.get(symbol).and_then(|entry| entry.tick.clone()))
    }
}
