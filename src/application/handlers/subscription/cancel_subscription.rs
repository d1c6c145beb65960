//! CancelSubscriptionHandler - Command handler for cancelling subscriptions.

use std::sync::Arc;

use crate::application::EntitlementStore;
use crate::domain::checkout::CheckoutError;
use crate::domain::foundation::UserId;
use crate::domain::subscription::Entitlement;
use crate::ports::PaymentProvider;

/// Command to cancel a subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub user_id: UserId,
}

/// Handler for cancelling subscriptions.
///
/// The provider is told first; the entitlement only drops to Free once the
/// provider accepted the cancellation.
pub struct CancelSubscriptionHandler {
    provider: Arc<dyn PaymentProvider>,
    entitlements: Arc<EntitlementStore>,
}

impl CancelSubscriptionHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>, entitlements: Arc<EntitlementStore>) -> Self {
        Self {
            provider,
            entitlements,
        }
    }

    pub async fn handle(&self, cmd: CancelSubscriptionCommand) -> Result<Entitlement, CheckoutError> {
        // 1. Provider side
        self.provider
            .cancel_subscription(&cmd.user_id)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %cmd.user_id, error = %e, "Provider cancellation failed");
                CheckoutError::internal(e.to_string())
            })?;

        // 2. Entitlement
        self.entitlements.cancel(cmd.user_id.as_str()).await
    }
}
