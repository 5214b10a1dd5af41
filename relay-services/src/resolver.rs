//! Symbol info resolver
//!
//! Turns a list of symbol names into the records streamed to clients: one
//! record per requested symbol, in request order, with the ask price cut to
//! the precision implied by the symbol's point.

use std::sync::Arc;

use relay_core::{precision, RelayResult, SymbolRecord, SymbolSource};
use tracing::{debug, instrument};

/// Resolves symbol names against a symbol source
#[derive(Clone)]
pub struct SymbolResolver {
    source: Arc<dyn SymbolSource>,
}

impl SymbolResolver {
    /// Create a resolver over a source handle
    pub fn new(source: Arc<dyn SymbolSource>) -> Self {
        Self { source }
    }

    /// The underlying source
    pub fn source(&self) -> &Arc<dyn SymbolSource> {
        &self.source
    }

    /// Resolve every symbol, in order
    ///
    /// Duplicates are looked up again and get their own record. The first
    /// source failure aborts the whole batch.
    #[instrument(skip(self, symbols), fields(count = symbols.len()))]
    pub async fn resolve(&self, symbols: &[String]) -> RelayResult<Vec<SymbolRecord>> {
        let mut records = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            records.push(self.resolve_symbol(symbol).await?);
        }

        debug!("Resolved {} symbols", records.len());
        Ok(records)
    }

    /// Resolve a single symbol
    ///
    /// Unknown symbols are not an error: the matching fields stay null.
    pub async fn resolve_symbol(&self, symbol: &str) -> RelayResult<SymbolRecord> {
        let mut record = SymbolRecord::unresolved(symbol);

        let point = match self.source.symbol_info(symbol).await? {
            Some(info) => {
                record.trade_tick_value = info.trade_tick_value;
                record.volume_min = info.volume_min;
                info.point
            }
            None => {
                debug!("No symbol info for {}", symbol);
                None
            }
        };

        match self.source.symbol_info_tick(symbol).await? {
            Some(tick) => match (tick.ask, point) {
                (Some(ask), Some(point)) if ask.is_finite() => {
                    let digits = precision::decimal_places(point);
                    record.ask = Some(precision::truncate(ask, digits));
                    record.decimal_points = Some(digits);
                }
                (ask, _) => record.ask = ask,
            },
            None => debug!("No tick for {}", symbol),
        }

        Ok(record)
    }
}

impl std::fmt::Debug for SymbolResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolResolver")
            .field("source", &self.source.name())
            .finish()
    }
}
