//! Session cache port.
//!
//! Fast lookup tier in front of the durable session repository. Cache
//! failures are never fatal to callers; the session store logs them and
//! falls through to the repository.

use crate::domain::checkout::CheckoutSession;
use crate::domain::foundation::{DomainError, SessionId};
use async_trait::async_trait;

/// Port for a session lookup cache.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Get a cached session.
    ///
    /// # Errors
    ///
    /// - `CacheError` if the cache backend is unavailable
    async fn get(&self, id: &SessionId) -> Result<Option<CheckoutSession>, DomainError>;

    /// Cache a session.
    async fn put(&self, session: &CheckoutSession) -> Result<(), DomainError>;
}
