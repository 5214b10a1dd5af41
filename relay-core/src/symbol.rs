//! Symbol data as reported by the trading terminal, and the normalized
//! record streamed back to clients.

use serde::{Deserialize, Serialize};

/// Static metadata for a tradeable symbol
///
/// Every field is optional: terminals omit fields they do not track, and
/// the relay treats a missing field the same as an explicit null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    /// Symbol name as known to the terminal
    #[serde(default)]
    pub name: Option<String>,

    /// Human readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Number of digits after the decimal point in quotes
    #[serde(default)]
    pub digits: Option<u32>,

    /// Minimal price increment (e.g. 0.00001)
    #[serde(default)]
    pub point: Option<f64>,

    /// Value of one tick in the deposit currency
    #[serde(default)]
    pub trade_tick_value: Option<f64>,

    /// Minimal price change
    #[serde(default)]
    pub trade_tick_size: Option<f64>,

    /// Minimal volume for a deal
    #[serde(default)]
    pub volume_min: Option<f64>,

    /// Maximal volume for a deal
    #[serde(default)]
    pub volume_max: Option<f64>,

    /// Minimal volume change step
    #[serde(default)]
    pub volume_step: Option<f64>,

    #[serde(default)]
    pub currency_base: Option<String>,

    #[serde(default)]
    pub currency_profit: Option<String>,
}

/// Latest price snapshot for a symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolTick {
    /// Time of the last update (unix seconds)
    #[serde(default)]
    pub time: Option<i64>,

    #[serde(default)]
    pub bid: Option<f64>,

    #[serde(default)]
    pub ask: Option<f64>,

    /// Price of the last deal
    #[serde(default)]
    pub last: Option<f64>,

    /// Volume of the last deal
    #[serde(default)]
    pub volume: Option<f64>,
}

/// Per-symbol record sent to clients
///
/// All fields are always serialized, in declaration order; missing values
/// are written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Echo of the requested symbol
    pub symbol: String,
    /// Display precision derived from the symbol's point
    pub decimal_points: Option<u32>,
    pub trade_tick_value: Option<f64>,
    pub volume_min: Option<f64>,
    /// Ask price, truncated to `decimal_points` when known
    pub ask: Option<f64>,
}

impl SymbolRecord {
    /// Create a record with every numeric field unset
    pub fn unresolved(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            decimal_points: None,
            trade_tick_value: None,
            volume_min: None,
            ask: None,
        }
    }
}
