//! Checkout configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Checkout flow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    /// Price used when a session request names none
    #[serde(default = "default_price_id")]
    pub price_id: String,

    /// JSON file holding every checkout session
    #[serde(default = "default_session_store_path")]
    pub session_store_path: PathBuf,

    /// JSON file holding entitlements; in-memory when unset
    pub entitlement_store_path: Option<PathBuf>,

    /// Simulated payment confirmation latency
    #[serde(default = "default_verification_delay")]
    pub verification_delay_ms: u64,

    /// Upper bound on a payment confirmation
    #[serde(default = "default_verification_timeout")]
    pub verification_timeout_ms: u64,

    /// Simulated notification processing latency
    #[serde(default = "default_notification_delay")]
    pub notification_delay_ms: u64,

    /// Simulated provider cancellation latency
    #[serde(default = "default_cancellation_delay")]
    pub cancellation_delay_ms: u64,

    /// Confirmation endpoint for notifications; dispatched in-process when unset
    pub notification_endpoint: Option<String>,

    /// Base of the hosted payment page reference
    #[serde(default = "default_redirect_base")]
    pub redirect_base: String,
}

impl CheckoutConfig {
    pub fn verification_delay(&self) -> Duration {
        Duration::from_millis(self.verification_delay_ms)
    }

    pub fn verification_timeout(&self) -> Duration {
        Duration::from_millis(self.verification_timeout_ms)
    }

    pub fn notification_delay(&self) -> Duration {
        Duration::from_millis(self.notification_delay_ms)
    }

    pub fn cancellation_delay(&self) -> Duration {
        Duration::from_millis(self.cancellation_delay_ms)
    }

    /// Validate checkout configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.price_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CHECKOUT__PRICE_ID"));
        }
        if self.session_store_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("CHECKOUT__SESSION_STORE_PATH"));
        }
        if self.verification_timeout_ms <= self.verification_delay_ms {
            return Err(ValidationError::VerificationTimeoutTooShort);
        }
        if let Some(endpoint) = &self.notification_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidNotificationEndpoint);
            }
        }
        Ok(())
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            price_id: default_price_id(),
            session_store_path: default_session_store_path(),
            entitlement_store_path: None,
            verification_delay_ms: default_verification_delay(),
            verification_timeout_ms: default_verification_timeout(),
            notification_delay_ms: default_notification_delay(),
            cancellation_delay_ms: default_cancellation_delay(),
            notification_endpoint: None,
            redirect_base: default_redirect_base(),
        }
    }
}

fn default_price_id() -> String {
    "pro_monthly_49".to_string()
}

fn default_session_store_path() -> PathBuf {
    PathBuf::from("data/checkout_sessions.json")
}

fn default_verification_delay() -> u64 {
    2000
}

fn default_verification_timeout() -> u64 {
    10_000
}

fn default_notification_delay() -> u64 {
    1000
}

fn default_cancellation_delay() -> u64 {
    800
}

fn default_redirect_base() -> String {
    "/checkout/mock-session".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_config_defaults() {
        let config = CheckoutConfig::default();
        assert_eq!(config.price_id, "pro_monthly_49");
        assert_eq!(config.verification_delay(), Duration::from_millis(2000));
        assert_eq!(config.verification_timeout(), Duration::from_secs(10));
        assert_eq!(config.notification_delay(), Duration::from_millis(1000));
        assert_eq!(config.cancellation_delay(), Duration::from_millis(800));
        assert!(config.notification_endpoint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_must_exceed_delay() {
        let config = CheckoutConfig {
            verification_delay_ms: 5000,
            verification_timeout_ms: 5000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::VerificationTimeoutTooShort)
        );
    }

    #[test]
    fn test_notification_endpoint_must_be_http() {
        let config = CheckoutConfig {
            notification_endpoint: Some("ftp://example.com/hook".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidNotificationEndpoint)
        );

        let config = CheckoutConfig {
            notification_endpoint: Some("http://localhost:8080/api/webhooks/mock".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_price_is_rejected() {
        let config = CheckoutConfig {
            price_id: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
