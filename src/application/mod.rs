//! Application layer - Stores, Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

mod entitlement_store;
mod session_store;

pub use entitlement_store::EntitlementStore;
pub use session_store::SessionStore;
