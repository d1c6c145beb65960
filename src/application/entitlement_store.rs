//! EntitlementStore - owns each user's subscription state.
//!
//! `activate` and `cancel` are total: the result never depends on the
//! prior state, so both activation paths of a checkout may run in any
//! order, any number of times. There is no locking; the last write wins.

use std::sync::Arc;

use crate::domain::checkout::{CheckoutError, CustomerId};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::Entitlement;
use crate::ports::EntitlementRepository;

pub struct EntitlementStore {
    repository: Arc<dyn EntitlementRepository>,
}

impl EntitlementStore {
    pub fn new(repository: Arc<dyn EntitlementRepository>) -> Self {
        Self { repository }
    }

    /// Grant Pro: `{active, pro, customer_id}`.
    ///
    /// # Errors
    ///
    /// - `MissingUser` if `user_id` is blank
    /// - `InternalFailure` if the repository write fails
    pub async fn activate(
        &self,
        user_id: &str,
        customer_id: Option<CustomerId>,
    ) -> Result<Entitlement, CheckoutError> {
        let user_id = parse_user(user_id)?;
        let entitlement = Entitlement::activated(customer_id, Timestamp::now());

        self.repository.store(&user_id, &entitlement).await?;

        tracing::info!(
            user_id = %user_id,
            customer_id = ?entitlement.customer_id.as_ref().map(|c| c.as_str()),
            "Subscription activated"
        );

        Ok(entitlement)
    }

    /// Revoke Pro: `{canceled, free}` with the customer cleared.
    ///
    /// # Errors
    ///
    /// - `MissingUser` if `user_id` is blank
    /// - `InternalFailure` if the repository write fails
    pub async fn cancel(&self, user_id: &str) -> Result<Entitlement, CheckoutError> {
        let user_id = parse_user(user_id)?;
        let entitlement = Entitlement::canceled(Timestamp::now());

        self.repository.store(&user_id, &entitlement).await?;

        tracing::info!(user_id = %user_id, "Subscription canceled");

        Ok(entitlement)
    }

    /// Current entitlement, `{inactive, free}` if the user never subscribed.
    pub async fn read(&self, user_id: &UserId) -> Result<Entitlement, CheckoutError> {
        Ok(self
            .repository
            .load(user_id)
            .await?
            .unwrap_or_else(Entitlement::inactive))
    }
}

fn parse_user(user_id: &str) -> Result<UserId, CheckoutError> {
    UserId::new(user_id).map_err(|_| CheckoutError::MissingUser)
}
