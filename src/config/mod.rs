//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COPYCRAFT` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a runnable
//! development configuration.
//!
//! # Example
//!
//! ```no_run
//! use copycraft_checkout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod checkout;
mod error;
mod redis;
mod server;

pub use checkout::CheckoutConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Listener, request timeout, CORS and logging
    #[serde(default)]
    pub server: ServerConfig,

    /// Checkout flow configuration (storage paths, simulated latencies)
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Shared session cache; in-process cache when absent
    #[serde(default)]
    pub redis: Option<RedisConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COPYCRAFT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COPYCRAFT__SERVER__LISTEN_ADDR=127.0.0.1:9090` -> `server.listen_addr = "127.0.0.1:9090"`
    /// - `COPYCRAFT__CHECKOUT__VERIFICATION_DELAY_MS=500` -> `checkout.verification_delay_ms = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COPYCRAFT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.checkout.validate()?;
        if let Some(redis) = &self.redis {
            redis.validate()?;
        }
        Ok(())
    }
}
