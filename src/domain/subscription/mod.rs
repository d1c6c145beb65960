//! Subscription domain module.
//!
//! Holds the per-user entitlement aggregate that gates Pro features.

mod entitlement;

pub use entitlement::{Entitlement, EntitlementRecord, SubscriptionPlan, SubscriptionStatus};
