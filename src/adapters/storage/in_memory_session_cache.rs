//! In-Memory Session Cache Adapter
//!
//! Sessions never change after creation, so entries are never invalidated
//! and there is no eviction.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::checkout::CheckoutSession;
use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::SessionCache;

/// Process-local session cache
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionCache {
    entries: Arc<RwLock<HashMap<SessionId, CheckoutSession>>>,
}

impl InMemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry, simulating a cold cache after a restart
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn contains(&self, id: &SessionId) -> bool {
        self.entries.read().await.contains_key(id)
    }
}

#[async_trait]
impl SessionCache for InMemorySessionCache {
    async fn get(&self, id: &SessionId) -> Result<Option<CheckoutSession>, DomainError> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn put(&self, session: &CheckoutSession) -> Result<(), DomainError> {
        self.entries
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }
}
