//! Service configuration.
//!
//! Loaded once at startup from environment variables; CLI flags override.
//! The store URI is the only required setting; a missing value fails the
//! boot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the store data directory
pub const ENV_STORE_URI: &str = "SHOP_STORE_URI";
/// Environment variable for the listen host
pub const ENV_HTTP_HOST: &str = "SHOP_HTTP_HOST";
/// Environment variable for the listen port
pub const ENV_HTTP_PORT: &str = "SHOP_HTTP_PORT";
/// Environment variable for the shared mutation secret
pub const ENV_API_KEY: &str = "SHOP_API_KEY";

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Store URI not supplied by flag or environment
    #[error("store URI is required: set {ENV_STORE_URI} or pass --store-uri")]
    MissingStoreUri,

    /// Port value did not parse
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory of the document store
    pub store_uri: String,

    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret gating item mutations; absent disables gated writes
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from an arbitrary lookup. The CLI resolves
    /// through this with flags layered over the environment; tests use a
    /// map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_uri = lookup(ENV_STORE_URI).ok_or(ConfigError::MissingStoreUri)?;

        let host = lookup(ENV_HTTP_HOST).unwrap_or_else(default_host);

        let port = match lookup(ENV_HTTP_PORT) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => default_port(),
        };

        let api_key = lookup(ENV_API_KEY).filter(|k| !k.is_empty());

        Ok(Self {
            store_uri,
            host,
            port,
            api_key,
        })
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
