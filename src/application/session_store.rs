//! SessionStore - creates and resolves checkout sessions.
//!
//! Read-through cache over the durable repository. Sessions are immutable,
//! so cached entries never need invalidation. Cache failures are logged and
//! skipped; only repository failures reach the caller.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::checkout::CheckoutSession;
use crate::domain::foundation::{DomainError, PriceId, SessionId, UserId};
use crate::ports::{SessionCache, SessionReader, SessionRepository};

pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
    cache: Arc<dyn SessionCache>,
}

impl SessionStore {
    pub fn new(repository: Arc<dyn SessionRepository>, cache: Arc<dyn SessionCache>) -> Self {
        Self { repository, cache }
    }

    /// Open a new session and persist it to both tiers.
    pub async fn create(
        &self,
        price_id: PriceId,
        user_id: UserId,
    ) -> Result<CheckoutSession, DomainError> {
        let session = CheckoutSession::open(price_id, user_id);

        self.repository.save(&session).await?;
        self.cache_put(&session).await;

        tracing::info!(
            session_id = %session.id,
            user_id = %session.user_id,
            price_id = %session.price_id,
            "Checkout session created"
        );

        Ok(session)
    }

    /// Resolve a session: cache first, then the durable store (backfilling the cache on a hit).
    pub async fn resolve(&self, id: &SessionId) -> Result<Option<CheckoutSession>, DomainError> {
        match self.cache.get(id).await {
            Ok(Some(session)) => {
                tracing::debug!(session_id = %id, "Session cache hit");
                return Ok(Some(session));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(session_id = %id, error = %e, "Session cache read failed");
            }
        }

        let found = self.repository.find(id).await?;
        if let Some(session) = &found {
            self.cache_put(session).await;
        }

        Ok(found)
    }

    async fn cache_put(&self, session: &CheckoutSession) {
        if let Err(e) = self.cache.put(session).await {
            tracing::warn!(session_id = %session.id, error = %e, "Session cache write failed");
        }
    }
}

#[async_trait]
impl SessionReader for SessionStore {
    async fn resolve(&self, id: &SessionId) -> Result<Option<CheckoutSession>, DomainError> {
        SessionStore::resolve(self, id).await
    }
}
