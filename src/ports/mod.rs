//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Session Ports
//!
//! - `SessionRepository` - Durable checkout session storage
//! - `SessionCache` - Fast lookup tier in front of the repository
//! - `SessionReader` - Read-only session resolution
//!
//! ## Subscription Ports
//!
//! - `EntitlementRepository` - Per-user entitlement storage
//!
//! ## Payment Ports
//!
//! - `PaymentVerifier` - Confirms a checkout session was paid
//! - `PaymentProvider` - Provider-side subscription management
//! - `NotificationDispatcher` - Emits "session completed" notifications

mod entitlement_repository;
mod notification_dispatcher;
mod payment_provider;
mod session_cache;
mod session_reader;
mod session_repository;

pub use entitlement_repository::EntitlementRepository;
pub use notification_dispatcher::{DispatchError, NotificationDispatcher, PaymentNotification};
pub use payment_provider::{
    PaymentError, PaymentErrorCode, PaymentProvider, PaymentVerification, PaymentVerifier,
};
pub use session_cache::SessionCache;
pub use session_reader::SessionReader;
pub use session_repository::SessionRepository;
