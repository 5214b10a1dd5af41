//! Server configuration
//!
//! Loaded from environment variables (optionally seeded from `.env.local`).
//! Every setting has a default, so an empty environment yields a server on
//! port 8000 reading from a bridge gateway on localhost.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use relay_bridge::{BridgeClient, StaticSymbolSource};
use relay_core::{RelayError, RelayResult, SymbolSource};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_STATIC_DIR: &str = "frontend/dist";
const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:8228";
const DEFAULT_BRIDGE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FIXTURE_PATH: &str = "fixtures/symbols.json";

/// Where symbol data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// HTTP bridge gateway next to the trading terminal
    Bridge { url: String, timeout: Duration },
    /// Static fixture file
    Fixture { path: PathBuf },
}

impl SourceConfig {
    /// Construct the configured source
    pub fn build(&self) -> RelayResult<Arc<dyn SymbolSource>> {
        match self {
            Self::Bridge { url, timeout } => Ok(Arc::new(BridgeClient::new(url, *timeout)?)),
            Self::Fixture { path } => Ok(Arc::new(StaticSymbolSource::from_file(path)?)),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Root of the static asset bundle; `index.html` is served at `/`
    pub static_dir: PathBuf,
    pub source: SourceConfig,
    /// Abort startup when the source fails to initialize
    pub require_source: bool,
    /// Allow only one call into the source at a time
    pub serialize_source_calls: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            source: SourceConfig::Bridge {
                url: DEFAULT_BRIDGE_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_BRIDGE_TIMEOUT_SECS),
            },
            require_source: false,
            serialize_source_calls: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> RelayResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("SERVER_HOST") {
            Some(host) => host
                .parse()
                .map_err(|_| RelayError::config(format!("SERVER_HOST is not an IP address: {}", host)))?,
            None => defaults.host,
        };

        let port = parse_or("SERVER_PORT", &lookup, defaults.port)?;

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let source_kind = lookup("SYMBOL_SOURCE").unwrap_or_else(|| "bridge".to_string());
        let source = match source_kind.to_lowercase().as_str() {
            "bridge" => SourceConfig::Bridge {
                url: lookup("BRIDGE_URL").unwrap_or_else(|| DEFAULT_BRIDGE_URL.to_string()),
                timeout: Duration::from_secs(parse_or(
                    "BRIDGE_TIMEOUT_SECS",
                    &lookup,
                    DEFAULT_BRIDGE_TIMEOUT_SECS,
                )?),
            },
            "fixture" => SourceConfig::Fixture {
                path: lookup("FIXTURE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE_PATH)),
            },
            other => {
                return Err(RelayError::config(format!(
                    "Unknown SYMBOL_SOURCE: {} (expected bridge or fixture)",
                    other
                )))
            }
        };

        Ok(Self {
            host,
            port,
            static_dir,
            source,
            require_source: parse_flag("REQUIRE_SOURCE", &lookup, defaults.require_source)?,
            serialize_source_calls: parse_flag(
                "SERIALIZE_SOURCE_CALLS",
                &lookup,
                defaults.serialize_source_calls,
            )?,
        })
    }

    /// Address to bind the listener to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(key: &str, lookup: &F, default: T) -> RelayResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| RelayError::config(format!("{} must be a number, got {}", key, value))),
        None => Ok(default),
    }
}

fn parse_flag<F>(key: &str, lookup: &F, default: bool) -> RelayResult<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(RelayError::config(format!(
                "{} must be true or false, got {}",
                key, value
            ))),
        },
        None => Ok(default),
    }
}
