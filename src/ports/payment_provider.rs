//! Payment provider ports for confirmation and subscription management.
//!
//! Defines the contract for the payment gateway side of checkout. The only
//! implementation shipped is a simulation, but callers depend on these traits
//! so that a real gateway (or a decline path) can be introduced without
//! changing them.
//!
//! # Design
//!
//! - **Verification is separate from management**: `PaymentVerifier` confirms
//!   one checkout session; `PaymentProvider` manages the subscription afterwards
//! - **Business declines are values**: a decline is `success: false`, not an error
//! - **Errors are transport-level**: timeouts, unreachable provider, etc.

use crate::domain::checkout::CustomerId;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for confirming that a checkout session was paid.
#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    /// Confirm payment for a session.
    ///
    /// A declined payment is reported as `success: false`; `Err` means the
    /// confirmation itself could not be obtained.
    async fn verify(&self, session_id: &SessionId) -> Result<PaymentVerification, PaymentError>;
}

/// Port for subscription management on the provider side.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Cancel the user's subscription with the provider.
    async fn cancel_subscription(&self, user_id: &UserId) -> Result<(), PaymentError>;
}

/// Outcome of a payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerification {
    /// Whether the provider confirmed the payment.
    pub success: bool,

    /// Provider customer the payment is attributed to.
    pub customer_id: CustomerId,
}

impl PaymentVerification {
    pub fn confirmed(customer_id: CustomerId) -> Self {
        Self {
            success: true,
            customer_id,
        }
    }

    pub fn declined(customer_id: CustomerId) -> Self {
        Self {
            success: false,
            customer_id,
        }
    }
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Timeout, message)
    }

    /// Create a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Whether the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        DomainError::new(ErrorCode::PaymentNotConfirmed, err.to_string())
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Provider did not answer in time.
    Timeout,

    /// Provider API error.
    ProviderError,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentErrorCode::NetworkError | PaymentErrorCode::Timeout)
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::Timeout => "timeout",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_ports_are_object_safe() {
        fn _accepts_verifier(_v: &dyn PaymentVerifier) {}
        fn _accepts_provider(_p: &dyn PaymentProvider) {}
    }

    #[test]
    fn payment_error_retryable() {
        assert!(PaymentError::network("down").is_retryable());
        assert!(PaymentError::timeout("slow").is_retryable());
        assert!(!PaymentError::provider("bad request").is_retryable());
    }

    #[test]
    fn payment_error_display() {
        let err = PaymentError::timeout("no answer after 10s");
        assert_eq!(err.to_string(), "timeout: no answer after 10s");
    }

    #[test]
    fn verification_constructors() {
        let customer = CustomerId::parse("mock_cus_1").unwrap();
        assert!(PaymentVerification::confirmed(customer.clone()).success);
        assert!(!PaymentVerification::declined(customer).success);
    }
}
