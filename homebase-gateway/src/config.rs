//! Gateway configuration, read from the environment.

use std::{net::SocketAddr, path::PathBuf};

/// Environment variable holding the listen address.
pub const LISTEN_ADDR_VAR: &str = "HOMEBASE_LISTEN_ADDR";

/// Environment variable naming a directory of schema overrides.
pub const SCHEMA_DIR_VAR: &str = "HOMEBASE_SCHEMA_DIR";

/// Environment variable holding the SQLite database path.
pub const DB_PATH_VAR: &str = "HOMEBASE_DB_PATH";

/// Database file used when [`DB_PATH_VAR`] is unset.
pub const DEFAULT_DB_PATH: &str = "homebase.db";

/// Listen address used when [`LISTEN_ADDR_VAR`] is unset.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The listen address does not parse as `host:port`.
    #[error("invalid HOMEBASE_LISTEN_ADDR '{value}': {source}")]
    InvalidListenAddr { value: String, source: std::net::AddrParseError },
}

/// Runtime configuration for the gateway binary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Socket address the HTTP server binds to.
    pub listen_addr: SocketAddr,

    /// Directory whose `<name>.json` files override built-in schemas.
    pub schema_dir: Option<PathBuf>,

    /// SQLite file holding every collection. Created if missing.
    pub db_path: PathBuf,
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidListenAddr`] if the address is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidListenAddr`] if the address is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr = addr
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr { value: addr.clone(), source })?;
        let schema_dir = lookup(SCHEMA_DIR_VAR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        let db_path = lookup(DB_PATH_VAR)
            .filter(|path| !path.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);
        Ok(Self { listen_addr, schema_dir, db_path })
    }
}
