//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Session repositories (file, in-memory) and caches (in-memory, Redis)
//! - `subscription` - Entitlement repositories (file, in-memory)
//! - `payment` - Simulated payment verifier and provider
//! - `notification` - Notification dispatchers (in-process, HTTP)
//! - `http` - Axum REST API

pub mod http;
pub mod notification;
pub mod payment;
pub mod storage;
pub mod subscription;

pub use notification::{HttpNotificationDispatcher, InProcessNotificationDispatcher};
pub use payment::{SimulatedPaymentProvider, SimulatedPaymentVerifier};
pub use storage::{
    FileSessionRepository, InMemorySessionCache, InMemorySessionRepository, RedisSessionCache,
};
pub use subscription::{FileEntitlementRepository, InMemoryEntitlementRepository};
