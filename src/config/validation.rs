//! Configuration validation.
//!
//! Semantic checks that serde cannot express. Returns every violation, not
//! just the first, so an operator can fix a config file in one pass.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The listener bind address does not parse as host:port.
    InvalidBindAddress(String),
    /// The shutdown grace period is zero; a drain needs a deadline.
    ZeroGracePeriod,
    /// The admission wait interval is zero; arrivals would never wait.
    ZeroAdmissionWait,
    /// The request timeout is zero.
    ZeroRequestTimeout,
    /// The database path is empty.
    EmptyDatabasePath,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address '{}'", addr)
            }
            ValidationError::ZeroGracePeriod => write!(f, "shutdown grace period must be > 0"),
            ValidationError::ZeroAdmissionWait => write!(f, "admission wait must be > 0"),
            ValidationError::ZeroRequestTimeout => write!(f, "request timeout must be > 0"),
            ValidationError::EmptyDatabasePath => write!(f, "database path must not be empty"),
        }
    }
}

/// Validate a fully assembled configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.shutdown.grace_secs == 0 {
        errors.push(ValidationError::ZeroGracePeriod);
    }
    if config.admission.wait_ms == 0 {
        errors.push(ValidationError::ZeroAdmissionWait);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.database.path.is_empty() {
        errors.push(ValidationError::EmptyDatabasePath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
