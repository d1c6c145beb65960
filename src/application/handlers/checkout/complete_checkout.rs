//! CompleteCheckoutHandler - drives one checkout attempt to activation.
//!
//! Pipeline: collect instrument → validate → verify (bounded by a timeout)
//! → activate the entitlement directly → dispatch the completion
//! notification. Any failure before activation halts the attempt; nothing
//! is rolled back because nothing was written. The notification is best
//! effort: it drives the same activation again, so losing it is harmless.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::application::EntitlementStore;
use crate::domain::checkout::{
    CheckoutError, CheckoutStage, CheckoutWorkflow, CustomerId, InstrumentValidator,
    PaymentInstrument,
};
use crate::domain::foundation::{SessionId, UserId};
use crate::ports::{NotificationDispatcher, PaymentNotification, PaymentVerifier};

/// Upper bound on a single payment verification.
pub const DEFAULT_VERIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Command to pay for a checkout session.
#[derive(Debug, Clone)]
pub struct CompleteCheckoutCommand {
    pub session_id: SessionId,
    /// Raw user id as received; blank values are rejected.
    pub user_id: String,
    pub instrument: PaymentInstrument,
}

/// Whether the completion notification was handed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Dispatched,
    Failed,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub session_id: SessionId,
    pub customer_id: CustomerId,
    pub stage: CheckoutStage,
    pub notification: NotificationStatus,
}

/// Orchestrates a checkout attempt.
pub struct CompleteCheckoutHandler {
    validator: InstrumentValidator,
    verifier: Arc<dyn PaymentVerifier>,
    entitlements: Arc<EntitlementStore>,
    notifications: Arc<dyn NotificationDispatcher>,
    verification_timeout: Duration,
}

impl CompleteCheckoutHandler {
    pub fn new(
        verifier: Arc<dyn PaymentVerifier>,
        entitlements: Arc<EntitlementStore>,
        notifications: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            validator: InstrumentValidator::new(),
            verifier,
            entitlements,
            notifications,
            verification_timeout: DEFAULT_VERIFICATION_TIMEOUT,
        }
    }

    pub fn with_verification_timeout(mut self, timeout: Duration) -> Self {
        self.verification_timeout = timeout;
        self
    }

    pub async fn handle(
        &self,
        cmd: CompleteCheckoutCommand,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let mut workflow = CheckoutWorkflow::start(cmd.session_id.clone());

        let user_id = match UserId::new(cmd.user_id.as_str()) {
            Ok(user_id) => user_id,
            Err(_) => return Err(workflow.fail(CheckoutError::MissingUser)),
        };

        // 1. Instrument
        advance(&mut workflow, CheckoutStage::InstrumentCollected)?;
        if let Err(e) = self.validator.validate(&cmd.instrument) {
            tracing::info!(session_id = %cmd.session_id, reason = %e, "Payment instrument rejected");
            return Err(workflow.fail(e));
        }
        advance(&mut workflow, CheckoutStage::Validated)?;

        // 2. Verification
        advance(&mut workflow, CheckoutStage::Verifying)?;
        let customer_id = self.verify(&mut workflow).await?;
        advance(&mut workflow, CheckoutStage::Verified)?;

        // 3. Direct activation
        advance(&mut workflow, CheckoutStage::Activating)?;
        if let Err(e) = self
            .entitlements
            .activate(user_id.as_str(), Some(customer_id.clone()))
            .await
        {
            tracing::error!(session_id = %cmd.session_id, user_id = %user_id, error = %e, "Direct activation failed");
            return Err(workflow.fail(CheckoutError::internal(e.to_string())));
        }
        advance(&mut workflow, CheckoutStage::Activated)?;

        // 4. Completion notification (best effort)
        let notification = match self
            .notifications
            .dispatch(PaymentNotification::new(cmd.session_id.clone(), user_id))
            .await
        {
            Ok(()) => NotificationStatus::Dispatched,
            Err(e) => {
                tracing::warn!(session_id = %cmd.session_id, error = %e, "Completion notification not dispatched");
                NotificationStatus::Failed
            }
        };

        Ok(CheckoutReceipt {
            session_id: cmd.session_id,
            customer_id,
            stage: workflow.stage(),
            notification,
        })
    }

    async fn verify(&self, workflow: &mut CheckoutWorkflow) -> Result<CustomerId, CheckoutError> {
        let session_id = workflow.session_id().clone();
        let outcome =
            tokio::time::timeout(self.verification_timeout, self.verifier.verify(&session_id))
                .await;

        match outcome {
            Ok(Ok(verification)) if verification.success => Ok(verification.customer_id),
            Ok(Ok(_)) => {
                tracing::info!(session_id = %session_id, "Payment declined by provider");
                Err(workflow.fail(CheckoutError::payment_not_confirmed("payment declined")))
            }
            Ok(Err(e)) => {
                tracing::warn!(session_id = %session_id, error = %e, "Payment verification failed");
                Err(workflow.fail(CheckoutError::payment_not_confirmed(e.to_string())))
            }
            Err(_) => {
                tracing::warn!(
                    session_id = %session_id,
                    timeout_ms = self.verification_timeout.as_millis() as u64,
                    "Payment verification timed out"
                );
                Err(workflow.fail(CheckoutError::payment_not_confirmed(
                    "verification timed out",
                )))
            }
        }
    }
}

fn advance(workflow: &mut CheckoutWorkflow, stage: CheckoutStage) -> Result<(), CheckoutError> {
    workflow
        .advance(stage)
        .map_err(|e| CheckoutError::internal(e.to_string()))
}
