//! Simulated payment verifier.
//!
//! Stands in for a real gateway confirmation: waits a configurable delay,
//! then reports success attributed to a customer id derived from the
//! session's user. Unknown sessions still confirm, using a customer id
//! derived from the session id instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::checkout::CustomerId;
use crate::domain::foundation::SessionId;
use crate::ports::{PaymentError, PaymentVerification, PaymentVerifier, SessionReader};

/// Default simulated confirmation latency.
pub const DEFAULT_VERIFICATION_DELAY: Duration = Duration::from_millis(2000);

/// Verifier that always confirms after a fixed delay.
///
/// # Example
///
/// ```ignore
/// let verifier = SimulatedPaymentVerifier::new(session_store.clone())
///     .with_delay(Duration::from_millis(50));
///
/// // Exercise the decline path without touching callers
/// verifier.set_decline_all(true);
/// ```
pub struct SimulatedPaymentVerifier {
    sessions: Arc<dyn SessionReader>,
    delay: Duration,
    decline_all: AtomicBool,
}

impl SimulatedPaymentVerifier {
    pub fn new(sessions: Arc<dyn SessionReader>) -> Self {
        Self {
            sessions,
            delay: DEFAULT_VERIFICATION_DELAY,
            decline_all: AtomicBool::new(false),
        }
    }

    /// Override the simulated latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make every subsequent verification report a decline.
    pub fn set_decline_all(&self, decline: bool) {
        self.decline_all.store(decline, Ordering::SeqCst);
    }

    async fn customer_for(&self, session_id: &SessionId) -> CustomerId {
        match self.sessions.resolve(session_id).await {
            Ok(Some(session)) => CustomerId::for_user(&session.user_id),
            Ok(None) => CustomerId::for_session(session_id),
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Session lookup failed during verification, deriving customer from session id"
                );
                CustomerId::for_session(session_id)
            }
        }
    }
}

#[async_trait]
impl PaymentVerifier for SimulatedPaymentVerifier {
    async fn verify(&self, session_id: &SessionId) -> Result<PaymentVerification, PaymentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let customer_id = self.customer_for(session_id).await;

        if self.decline_all.load(Ordering::SeqCst) {
            tracing::info!(session_id = %session_id, "Simulated verification declined");
            return Ok(PaymentVerification::declined(customer_id));
        }

        tracing::debug!(session_id = %session_id, customer_id = %customer_id, "Simulated verification confirmed");
        Ok(PaymentVerification::confirmed(customer_id))
    }
}
