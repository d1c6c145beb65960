//! GetEntitlementHandler - Query handler for a user's subscription state.

use std::sync::Arc;

use crate::application::EntitlementStore;
use crate::domain::checkout::CheckoutError;
use crate::domain::foundation::UserId;
use crate::domain::subscription::Entitlement;

/// Query for the current entitlement.
#[derive(Debug, Clone)]
pub struct GetEntitlementQuery {
    pub user_id: UserId,
}

/// Entitlement plus the derived Pro flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetEntitlementResult {
    pub entitlement: Entitlement,
    pub is_pro: bool,
}

pub struct GetEntitlementHandler {
    entitlements: Arc<EntitlementStore>,
}

impl GetEntitlementHandler {
    pub fn new(entitlements: Arc<EntitlementStore>) -> Self {
        Self { entitlements }
    }

    pub async fn handle(
        &self,
        query: GetEntitlementQuery,
    ) -> Result<GetEntitlementResult, CheckoutError> {
        let entitlement = self.entitlements.read(&query.user_id).await?;
        Ok(GetEntitlementResult {
            is_pro: entitlement.is_pro(),
            entitlement,
        })
    }
}
