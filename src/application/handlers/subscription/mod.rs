//! Subscription handlers.
//!
//! ## Commands
//! - Cancelling a subscription
//!
//! ## Queries
//! - Get the current entitlement

mod cancel_subscription;
mod get_entitlement;

// Commands
pub use cancel_subscription::{CancelSubscriptionCommand, CancelSubscriptionHandler};

// Queries
pub use get_entitlement::{GetEntitlementHandler, GetEntitlementQuery, GetEntitlementResult};
