//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamp, errors, state machine)
//! - `checkout` - Checkout sessions, instrument validation, workflow stages
//! - `subscription` - Per-user entitlement aggregate

pub mod checkout;
pub mod foundation;
pub mod subscription;
