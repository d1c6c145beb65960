//! Subscription Adapters
//!
//! Implementations of the `EntitlementRepository` port.
//!
//! - **InMemoryEntitlementRepository** - Default for development and tests
//! - **FileEntitlementRepository** - JSON object on disk keyed by user id

mod file_entitlement_repository;
mod in_memory_entitlement_repository;

pub use file_entitlement_repository::FileEntitlementRepository;
pub use in_memory_entitlement_repository::InMemoryEntitlementRepository;
