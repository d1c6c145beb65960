//! Simulated payment provider for subscription management.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::ports::{PaymentError, PaymentProvider};

/// Default simulated cancellation latency.
pub const DEFAULT_CANCELLATION_DELAY: Duration = Duration::from_millis(800);

/// Provider that accepts every cancellation after a fixed delay.
#[derive(Clone)]
pub struct SimulatedPaymentProvider {
    delay: Duration,
    inner: Arc<Mutex<ProviderState>>,
}

#[derive(Default)]
struct ProviderState {
    next_error: Option<PaymentError>,
    canceled: Vec<UserId>,
}

impl SimulatedPaymentProvider {
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_CANCELLATION_DELAY,
            inner: Arc::new(Mutex::new(ProviderState::default())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the next call with `error`.
    pub fn set_error(&self, error: PaymentError) {
        if let Ok(mut state) = self.inner.lock() {
            state.next_error = Some(error);
        }
    }

    /// Users whose subscriptions were canceled, in call order.
    pub fn canceled_users(&self) -> Vec<UserId> {
        self.inner
            .lock()
            .map(|s| s.canceled.clone())
            .unwrap_or_default()
    }
}

impl Default for SimulatedPaymentProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProvider for SimulatedPaymentProvider {
    async fn cancel_subscription(&self, user_id: &UserId) -> Result<(), PaymentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut state = self
            .inner
            .lock()
            .map_err(|_| PaymentError::provider("provider state poisoned"))?;

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        state.canceled.push(user_id.clone());
        Ok(())
    }
}
