//! Checkout-specific error types.
//!
//! Errors raised while validating a payment instrument, confirming a payment,
//! or driving an entitlement activation.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidCardNumber | 422 |
//! | InvalidExpiry | 422 |
//! | InvalidCvc | 422 |
//! | PaymentNotConfirmed | 402 |
//! | MissingUser | 400 |
//! | MalformedNotification | 400 |
//! | SessionNotFound | 404 |
//! | InternalFailure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Checkout-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Card number failed normalization, length, or Luhn checks.
    InvalidCardNumber,

    /// Expiry is malformed or already in the past.
    InvalidExpiry,

    /// CVC is not 3-4 digits.
    InvalidCvc,

    /// Verification did not confirm the payment (decline, timeout, provider error).
    PaymentNotConfirmed { reason: String },

    /// An entitlement operation was requested without a user.
    MissingUser,

    /// A payment notification was missing required fields.
    MalformedNotification { reason: String },

    /// The checkout session does not exist.
    SessionNotFound(SessionId),

    /// Unexpected failure in one of the workflow collaborators.
    InternalFailure(String),
}

impl CheckoutError {
    pub fn payment_not_confirmed(reason: impl Into<String>) -> Self {
        CheckoutError::PaymentNotConfirmed {
            reason: reason.into(),
        }
    }

    pub fn malformed_notification(reason: impl Into<String>) -> Self {
        CheckoutError::MalformedNotification {
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CheckoutError::InternalFailure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::InvalidCardNumber => ErrorCode::InvalidCardNumber,
            CheckoutError::InvalidExpiry => ErrorCode::InvalidExpiry,
            CheckoutError::InvalidCvc => ErrorCode::InvalidCvc,
            CheckoutError::PaymentNotConfirmed { .. } => ErrorCode::PaymentNotConfirmed,
            CheckoutError::MissingUser => ErrorCode::MissingUser,
            CheckoutError::MalformedNotification { .. } => ErrorCode::MalformedNotification,
            CheckoutError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            CheckoutError::InternalFailure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-facing error message.
    ///
    /// Internal failures never expose their cause.
    pub fn message(&self) -> String {
        match self {
            CheckoutError::InvalidCardNumber => {
                "Card number is invalid (Luhn check failed)".to_string()
            }
            CheckoutError::InvalidExpiry => {
                "Card expiry is invalid. Use the MM/YY format".to_string()
            }
            CheckoutError::InvalidCvc => "CVC is invalid".to_string(),
            CheckoutError::PaymentNotConfirmed { .. } => {
                "Payment was not confirmed. Please try again".to_string()
            }
            CheckoutError::MissingUser => "A user id is required".to_string(),
            CheckoutError::MalformedNotification { reason } => reason.clone(),
            CheckoutError::SessionNotFound(id) => format!("Checkout session not found: {}", id),
            CheckoutError::InternalFailure(_) => {
                "Could not complete the payment. Please try again".to_string()
            }
        }
    }

    /// Returns true for the local instrument checks.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CheckoutError::InvalidCardNumber | CheckoutError::InvalidExpiry | CheckoutError::InvalidCvc
        )
    }

    /// Returns true if the user may resubmit the same checkout.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckoutError::PaymentNotConfirmed { .. })
    }
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::PaymentNotConfirmed { reason } => {
                write!(f, "Payment not confirmed: {}", reason)
            }
            CheckoutError::InternalFailure(msg) => write!(f, "Internal failure: {}", msg),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for CheckoutError {}

impl From<DomainError> for CheckoutError {
    fn from(err: DomainError) -> Self {
        CheckoutError::InternalFailure(err.to_string())
    }
}

impl From<CheckoutError> for DomainError {
    fn from(err: CheckoutError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
