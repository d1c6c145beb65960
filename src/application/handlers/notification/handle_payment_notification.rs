//! HandlePaymentNotificationHandler - Command handler for "checkout session completed" notifications.
//!
//! The notification path activates independently of the direct path and
//! never looks the session up: the customer id is derived from the session
//! id alone. Duplicate deliveries are not detected; activation is total,
//! so replaying a notification leaves the entitlement in the same state.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::application::EntitlementStore;
use crate::domain::checkout::{CheckoutError, CustomerId};
use crate::domain::foundation::{SessionId, UserId};

/// Event type acknowledged by this handler.
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// Default delay before the notification is processed.
pub const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_millis(1000);

/// Command to process a notification. Fields are raw and validated here.
#[derive(Debug, Clone, Default)]
pub struct HandlePaymentNotificationCommand {
    pub session_id: String,
    pub user_id: String,
}

/// Acknowledgement returned to the notification sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAck {
    pub received: bool,
    #[serde(rename = "type")]
    pub event_type: &'static str,
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Handler for payment notifications.
pub struct HandlePaymentNotificationHandler {
    entitlements: Arc<EntitlementStore>,
    delay: Duration,
}

impl HandlePaymentNotificationHandler {
    pub fn new(entitlements: Arc<EntitlementStore>) -> Self {
        Self {
            entitlements,
            delay: DEFAULT_NOTIFICATION_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentNotificationCommand,
    ) -> Result<NotificationAck, CheckoutError> {
        // 1. Validate payload
        let session_id = SessionId::new(cmd.session_id)
            .map_err(|_| CheckoutError::malformed_notification("Missing sessionId"))?;
        let user_id = UserId::new(cmd.user_id)
            .map_err(|_| CheckoutError::malformed_notification("Missing userId"))?;

        // 2. Simulated delivery latency
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        // 3. Activate
        let customer_id = CustomerId::for_session(&session_id);
        self.entitlements
            .activate(user_id.as_str(), Some(customer_id))
            .await?;

        tracing::info!(
            session_id = %session_id,
            user_id = %user_id,
            "Payment notification processed"
        );

        Ok(NotificationAck {
            received: true,
            event_type: CHECKOUT_SESSION_COMPLETED,
            session_id,
            user_id,
        })
    }
}
