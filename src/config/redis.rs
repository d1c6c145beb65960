//! Redis configuration
//!
//! Optional: when absent, sessions are cached in process.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Redis configuration for the shared session cache
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,

    /// Expiry for cached sessions; no expiry when unset or zero
    #[serde(default)]
    pub session_ttl_secs: Option<u64>,
}

impl RedisConfig {
    /// Session TTL as Duration
    pub fn session_ttl(&self) -> Option<Duration> {
        self.session_ttl_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Validate Redis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        Ok(())
    }
}
