//! Bridge gateway response types
//!
//! These types mirror the bridge gateway responses and are converted
//! to relay-core types for use in the resolver.

use relay_core::{SymbolInfo, SymbolTick};
use serde::{Deserialize, Serialize};

/// Response from POST /initialize
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InitializeResponse {
    /// Whether the gateway reached its terminal
    pub connected: bool,

    /// Terminal build reported by the gateway
    #[serde(default)]
    pub terminal_version: Option<String>,

    /// Reason for a failed connection
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from GET /symbols/{symbol}
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeSymbolInfo {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub digits: Option<u32>,

    #[serde(default)]
    pub point: Option<f64>,

    #[serde(default)]
    pub trade_tick_value: Option<f64>,

    #[serde(default)]
    pub trade_tick_size: Option<f64>,

    #[serde(default)]
    pub volume_min: Option<f64>,

    #[serde(default)]
    pub volume_max: Option<f64>,

    #[serde(default)]
    pub volume_step: Option<f64>,

    #[serde(default)]
    pub currency_base: Option<String>,

    #[serde(default)]
    pub currency_profit: Option<String>,

    /// Current spread in points
    #[serde(default)]
    pub spread: Option<i64>,

    /// Whether the symbol is shown in Market Watch
    #[serde(default)]
    pub visible: Option<bool>,
}

impl BridgeSymbolInfo {
    /// Convert to the relay's symbol metadata
    pub fn to_symbol_info(self) -> SymbolInfo {
        SymbolInfo {
            name: Some(self.name),
            description: self.description,
            digits: self.digits,
            point: self.point,
            trade_tick_value: self.trade_tick_value,
            trade_tick_size: self.trade_tick_size,
            volume_min: self.volume_min,
            volume_max: self.volume_max,
            volume_step: self.volume_step,
            currency_base: self.currency_base,
            currency_profit: self.currency_profit,
        }
    }
}

/// Response from GET /symbols/{symbol}/tick
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeTick {
    /// Time of the last update (unix seconds)
    #[serde(default)]
    pub time: Option<i64>,

    #[serde(default)]
    pub bid: Option<f64>,

    #[serde(default)]
    pub ask: Option<f64>,

    #[serde(default)]
    pub last: Option<f64>,

    #[serde(default)]
    pub volume: Option<f64>,

    /// Time of the last update in milliseconds
    #[serde(default)]
    pub time_msc: Option<i64>,

    #[serde(default)]
    pub flags: Option<u32>,
}

impl BridgeTick {
    /// Convert to the relay's tick snapshot
    pub fn to_symbol_tick(self) -> SymbolTick {
        SymbolTick {
            time: self.time,
            bid: self.bid,
            ask: self.ask,
            last: self.last,
            volume: self.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_info() {
        let json = r#"
        {
            "name": "EURUSD",
            "description": "Euro vs US Dollar",
            "digits": 5,
            "point": 0.00001,
            "trade_tick_value": 1.0,
            "trade_tick_size": 0.00001,
            "volume_min": 0.01,
            "volume_max": 500.0,
            "volume_step": 0.01,
            "spread": 12,
            "visible": true
        }
        "#;

        let info: BridgeSymbolInfo = serde_json::from_str(json).unwrap();
        let info = info.to_symbol_info();
        assert_eq!(info.name.as_deref(), Some("EURUSD"));
        assert_eq!(info.digits, Some(5));
        assert_eq!(info.point, Some(0.00001));
        assert_eq!(info.trade_tick_value, Some(1.0));
        assert_eq!(info.volume_min, Some(0.01));
        assert_eq!(info.currency_base, None);
    }

    #[test]
    fn test_parse_tick() {
        let json = r#"
        {
            "time": 1700000000,
            "bid": 1.08452,
            "ask": 1.084567,
            "last": 0.0,
            "volume": 0,
            "time_msc": 1700000000123,
            "flags": 6
        }
        "#;

        let tick: BridgeTick = serde_json::from_str(json).unwrap();
        let tick = tick.to_symbol_tick();
        assert_eq!(tick.ask, Some(1.084567));
        assert_eq!(tick.bid, Some(1.08452));
        assert_eq!(tick.volume, Some(0.0));
    }

    #[test]
    fn test_parse_failed_initialize() {
        let json = r#"{"connected": false, "error": "IPC timeout"}"#;
        let response: InitializeResponse = serde_json::from_str(json).unwrap();
        assert!(!response.connected);
        assert_eq!(response.error.as_deref(), Some("IPC timeout"));
    }
}
