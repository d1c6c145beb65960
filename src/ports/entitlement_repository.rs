//! Entitlement repository port.
//!
//! Stores one entitlement per user. Writes are plain overwrites: there is
//! no locking or compare-and-swap, so concurrent writers resolve as
//! last-write-wins.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::Entitlement;
use async_trait::async_trait;

/// Repository port for per-user entitlements.
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// Load the user's entitlement, `None` if never written.
    async fn load(&self, user_id: &UserId) -> Result<Option<Entitlement>, DomainError>;

    /// Store the user's entitlement, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn store(&self, user_id: &UserId, entitlement: &Entitlement) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entitlement_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EntitlementRepository) {}
    }
}
