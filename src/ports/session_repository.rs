//! Checkout session repository port (durable side).
//!
//! Defines the contract for persisting and retrieving checkout sessions.
//! Sessions are immutable once created, so there is no update or delete.
//!
//! # Design
//!
//! - **Write-once**: `save` is an upsert keyed by session id
//! - **Lookup by id only**: no user-scoped queries

use crate::domain::checkout::CheckoutSession;
use crate::domain::foundation::{DomainError, SessionId};
use async_trait::async_trait;

/// Repository port for durable checkout session storage.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a session, replacing any record with the same id.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, session: &CheckoutSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find(&self, id: &SessionId) -> Result<Option<CheckoutSession>, DomainError>;
}
