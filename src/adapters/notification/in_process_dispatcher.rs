//! In-process notification dispatcher.
//!
//! Spawns the notification handler on the runtime and returns at once,
//! the way a provider webhook arrives independently of the checkout
//! request. Handler failures are logged; nobody awaits them.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::handlers::notification::{
    HandlePaymentNotificationCommand, HandlePaymentNotificationHandler,
};
use crate::ports::{DispatchError, NotificationDispatcher, PaymentNotification};

#[derive(Clone)]
pub struct InProcessNotificationDispatcher {
    handler: Arc<HandlePaymentNotificationHandler>,
}

impl InProcessNotificationDispatcher {
    pub fn new(handler: Arc<HandlePaymentNotificationHandler>) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl NotificationDispatcher for InProcessNotificationDispatcher {
    async fn dispatch(&self, notification: PaymentNotification) -> Result<(), DispatchError> {
        let handler = self.handler.clone();
        let session_id = notification.session_id.clone();

        tokio::spawn(async move {
            let cmd = HandlePaymentNotificationCommand {
                session_id: notification.session_id.to_string(),
                user_id: notification.user_id.to_string(),
            };
            if let Err(e) = handler.handle(cmd).await {
                tracing::warn!(
                    session_id = %notification.session_id,
                    error = %e,
                    "In-process payment notification failed"
                );
            }
        });

        tracing::debug!(session_id = %session_id, "Payment notification spawned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::subscription::InMemoryEntitlementRepository;
    use crate::application::EntitlementStore;
    use crate::domain::foundation::{SessionId, UserId};
    use std::time::Duration;

    #[tokio::test]
    async fn dispatch_returns_before_activation_and_activates_later() {
        let store = Arc::new(EntitlementStore::new(Arc::new(
            InMemoryEntitlementRepository::new(),
        )));
        let handler = Arc::new(
            HandlePaymentNotificationHandler::new(store.clone())
                .with_delay(Duration::from_millis(50)),
        );
        let dispatcher = InProcessNotificationDispatcher::new(handler);
        let user = UserId::new("u1").unwrap();

        dispatcher
            .dispatch(PaymentNotification::new(
                SessionId::new("mock_sess_1_abcd1234").unwrap(),
                user.clone(),
            ))
            .await
            .unwrap();

        assert!(!store.read(&user).await.unwrap().is_pro());

        tokio::time::sleep(Duration::from_millis(300)).await;

        let e = store.read(&user).await.unwrap();
        assert!(e.is_pro());
        assert_eq!(e.customer_id.unwrap().as_str(), "mock_cus_abcd1234");
    }
}
