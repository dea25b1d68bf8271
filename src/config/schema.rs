//! Configuration schema definitions.
//!
//! All types derive Serde traits and default every field so a minimal (or
//! absent) config file still yields a runnable service.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Admission gate configuration.
    pub admission: AdmissionConfig,

    /// Graceful shutdown configuration.
    pub shutdown: ShutdownConfig,

    /// Database configuration.
    pub database: DatabaseConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request processing timeout in seconds, bounding slow clients.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 15 }
    }
}

/// Admission gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Maximum requests concurrently inside the handler pipeline.
    /// Zero is invalid configuration and fails deserialization.
    pub max_concurrent: NonZeroUsize,

    /// How long an arrival may wait for a free slot before being rejected,
    /// in milliseconds.
    pub wait_ms: u64,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_concurrent: NonZeroUsize::new(5).unwrap_or(NonZeroUsize::MIN),
            wait_ms: 1_000,
        }
    }
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Grace period for draining in-flight requests, in seconds.
    pub grace_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { grace_secs: 60 }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path; ":memory:" opens an in-memory database.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "database.db".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = AppConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 15);
        assert_eq!(config.admission.max_concurrent.get(), 5);
        assert_eq!(config.admission.wait_ms, 1_000);
        assert_eq!(config.shutdown.grace_secs, 60);
        assert_eq!(config.database.path, "database.db");
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("[admission]\nmax_concurrent = 2\n")
            .expect("partial config parses");
        assert_eq!(config.admission.max_concurrent.get(), 2);
        assert_eq!(config.admission.wait_ms, 1_000);
    }

    #[test]
    fn zero_capacity_is_rejected_at_parse_time() {
        let result: Result<AppConfig, _> = toml::from_str("[admission]\nmax_concurrent = 0\n");
        assert!(result.is_err());
    }
}
