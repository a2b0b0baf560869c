//! Configuration module.
//!
//! Loads cache and janitor settings from environment variables. Every
//! variable is optional and falls back to the documented default.

use std::env;
use std::time::Duration;

use crate::cache::{CacheConfig, MAX_TTL};
use crate::janitor::JanitorConfig;

pub const CACHE_CAPACITY_VAR: &str = "CLOUDMAP_CACHE_CAPACITY";
pub const NAMESPACE_TTL_VAR: &str = "CLOUDMAP_NAMESPACE_TTL_SECS";
pub const SERVICE_TTL_VAR: &str = "CLOUDMAP_SERVICE_TTL_SECS";
pub const ENDPOINT_TTL_VAR: &str = "CLOUDMAP_ENDPOINT_TTL_MILLIS";
pub const POLL_INTERVAL_VAR: &str = "CLOUDMAP_OPERATION_POLL_INTERVAL_MILLIS";
pub const POLL_ATTEMPTS_VAR: &str = "CLOUDMAP_OPERATION_POLL_ATTEMPTS";

/// Invalid configuration value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    NotPositive { var: &'static str, value: String },

    #[error("{var} exceeds the maximum TTL of {max_secs}s")]
    TtlTooLarge { var: &'static str, max_secs: u64 },
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub cache: CacheConfig,
    pub janitor: JanitorConfig,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(capacity) = positive(&lookup, CACHE_CAPACITY_VAR)? {
            config.cache.max_capacity = capacity;
        }
        if let Some(ttl) = ttl(&lookup, NAMESPACE_TTL_VAR, Duration::from_secs)? {
            config.cache.namespace_ttl = ttl;
        }
        if let Some(ttl) = ttl(&lookup, SERVICE_TTL_VAR, Duration::from_secs)? {
            config.cache.service_ttl = ttl;
        }
        if let Some(ttl) = ttl(&lookup, ENDPOINT_TTL_VAR, Duration::from_millis)? {
            config.cache.endpoint_ttl = ttl;
        }
        if let Some(millis) = positive(&lookup, POLL_INTERVAL_VAR)? {
            config.janitor.poll_interval = Duration::from_millis(millis);
        }
        if let Some(attempts) = positive(&lookup, POLL_ATTEMPTS_VAR)? {
            config.janitor.poll_attempts =
                u32::try_from(attempts).map_err(|_| ConfigError::NotPositive {
                    var: POLL_ATTEMPTS_VAR,
                    value: attempts.to_string(),
                })?;
        }

        Ok(config)
    }
}

/// Parse an optional, strictly positive integer variable.
fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(var).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::NotPositive { var, value: raw }),
    }
}

/// Parse an optional TTL variable, bounded by [`MAX_TTL`].
fn ttl(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    unit: fn(u64) -> Duration,
) -> Result<Option<Duration>, ConfigError> {
    match positive(lookup, var)?.map(unit) {
        Some(ttl) if ttl > MAX_TTL => Err(ConfigError::TtlTooLarge {
            var,
            max_secs: MAX_TTL.as_secs(),
        }),
        ttl => Ok(ttl),
    }
}
