//! Checkout handlers.
//!
//! ## Commands
//! - Opening a checkout session
//! - Completing a checkout (validate, verify, activate, notify)
//!
//! ## Queries
//! - Resolving a session for the hosted payment page

mod complete_checkout;
mod create_checkout_session;
mod get_checkout_session;

// Commands
pub use complete_checkout::{
    CheckoutReceipt, CompleteCheckoutCommand, CompleteCheckoutHandler, NotificationStatus,
    DEFAULT_VERIFICATION_TIMEOUT,
};
pub use create_checkout_session::{
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, CreateCheckoutSessionResult,
};

// Queries
pub use get_checkout_session::{GetCheckoutSessionHandler, GetCheckoutSessionQuery};
