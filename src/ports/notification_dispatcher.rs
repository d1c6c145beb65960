//! Payment notification dispatch port.
//!
//! After a direct activation, checkout emits a "session completed"
//! notification that independently drives the same activation. The
//! dispatcher decides how that notification travels: spawned in-process
//! or posted to a confirmation endpoint.

use crate::domain::foundation::{SessionId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of a "checkout session completed" notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotification {
    pub session_id: SessionId,
    pub user_id: UserId,
}

impl PaymentNotification {
    pub fn new(session_id: SessionId, user_id: UserId) -> Self {
        Self {
            session_id,
            user_id,
        }
    }
}

/// Errors raised while handing a notification off.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Notification endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("Notification endpoint rejected the request with status {0}")]
    Rejected(u16),

    #[error("Failed to encode notification: {0}")]
    Encoding(String),
}

/// Port for emitting payment notifications.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Hand the notification off for delivery.
    ///
    /// Returning `Ok` means the notification was accepted for delivery,
    /// not that activation has happened.
    async fn dispatch(&self, notification: PaymentNotification) -> Result<(), DispatchError>;
}
