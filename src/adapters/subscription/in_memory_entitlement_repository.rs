//! In-Memory Entitlement Repository Adapter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::Entitlement;
use crate::ports::EntitlementRepository;

/// In-memory entitlement storage keyed by user id
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntitlementRepository {
    entitlements: Arc<RwLock<HashMap<UserId, Entitlement>>>,
}

impl InMemoryEntitlementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entitlement directly (useful for tests)
    pub async fn insert(&self, user_id: UserId, entitlement: Entitlement) {
        self.entitlements.write().await.insert(user_id, entitlement);
    }
}

#[async_trait]
impl EntitlementRepository for InMemoryEntitlementRepository {
    async fn load(&self, user_id: &UserId) -> Result<Option<Entitlement>, DomainError> {
        Ok(self.entitlements.read().await.get(user_id).cloned())
    }

    async fn store(&self, user_id: &UserId, entitlement: &Entitlement) -> Result<(), DomainError> {
        self.entitlements
            .write()
            .await
            .insert(user_id.clone(), entitlement.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn unknown_user_loads_none() {
        let repo = InMemoryEntitlementRepository::new();
        assert!(repo.load(&UserId::new("u1").unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_overwrites() {
        let repo = InMemoryEntitlementRepository::new();
        let user = UserId::new("u1").unwrap();

        repo.store(&user, &Entitlement::activated(None, Timestamp::now()))
            .await
            .unwrap();
        let canceled = Entitlement::canceled(Timestamp::now());
        repo.store(&user, &canceled).await.unwrap();

        assert_eq!(repo.load(&user).await.unwrap(), Some(canceled));
    }
}
