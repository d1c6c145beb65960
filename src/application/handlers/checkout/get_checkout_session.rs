//! GetCheckoutSessionHandler - Query handler backing the hosted payment page.

use std::sync::Arc;

use crate::application::SessionStore;
use crate::domain::checkout::{CheckoutError, CheckoutSession};
use crate::domain::foundation::SessionId;

/// Query for a single session.
#[derive(Debug, Clone)]
pub struct GetCheckoutSessionQuery {
    pub session_id: SessionId,
}

pub struct GetCheckoutSessionHandler {
    sessions: Arc<SessionStore>,
}

impl GetCheckoutSessionHandler {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        query: GetCheckoutSessionQuery,
    ) -> Result<CheckoutSession, CheckoutError> {
        self.sessions
            .resolve(&query.session_id)
            .await?
            .ok_or(CheckoutError::SessionNotFound(query.session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemorySessionCache, InMemorySessionRepository};
    use crate::domain::foundation::{PriceId, UserId};

    fn store() -> Arc<SessionStore> {
        Arc::new(SessionStore::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(InMemorySessionCache::new()),
        ))
    }

    #[tokio::test]
    async fn returns_existing_session() {
        let store = store();
        let session = store
            .create(
                PriceId::new(PriceId::PRO_MONTHLY).unwrap(),
                UserId::new("u1").unwrap(),
            )
            .await
            .unwrap();
        let handler = GetCheckoutSessionHandler::new(store);

        let found = handler
            .handle(GetCheckoutSessionQuery {
                session_id: session.id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetCheckoutSessionHandler::new(store());
        let id = SessionId::new("mock_sess_0_missing0").unwrap();

        let err = handler
            .handle(GetCheckoutSessionQuery {
                session_id: id.clone(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::SessionNotFound(id));
    }
}
