//! Process configuration, read from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set when USE_PERSISTENT_STORES=true")]
    Missing(&'static str),

    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Which beer store backs the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

impl StoreConfig {
    pub fn label(&self) -> &'static str {
        match self {
            StoreConfig::InMemory => "memory",
            StoreConfig::Postgres { .. } => "postgres",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl AppConfig {
    /// In-memory configuration bound to `bind_addr` (dev/tests).
    pub fn in_memory(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            store: StoreConfig::InMemory,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// - `TAPROOM_BIND_ADDR` (default `0.0.0.0:8080`)
    /// - `USE_PERSISTENT_STORES` (`true` selects Postgres)
    /// - `DATABASE_URL` (required when persistent)
    /// - `DATABASE_MAX_CONNECTIONS` (default 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("TAPROOM_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "TAPROOM_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let persistent = match lookup("USE_PERSISTENT_STORES") {
            None => false,
            Some(v) => parse_flag(&v).ok_or_else(|| ConfigError::Invalid {
                var: "USE_PERSISTENT_STORES",
                reason: format!("expected true/false, got {v:?}"),
            })?,
        };

        let store = if persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;

            let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                None => DEFAULT_MAX_CONNECTIONS,
                Some(v) => v
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ConfigError::Invalid {
                        var: "DATABASE_MAX_CONNECTIONS",
                        reason: format!("expected a positive integer, got {v:?}"),
                    })?,
            };

            StoreConfig::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StoreConfig::InMemory
        };

        Ok(Self { bind_addr, store })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
