//! Entitlement aggregate.
//!
//! The entitlement is the subscription state owned per user. It only changes
//! through two total transitions, `activate` and `cancel`, each of which
//! fully determines the resulting status and plan regardless of prior state.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::CustomerId;
use crate::domain::foundation::Timestamp;

/// Subscription status as seen by the rest of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Inactive,
    Active,
    Canceled,
}

impl SubscriptionStatus {
    /// Lenient parse: unknown values fall back to `Inactive`.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("active") => SubscriptionStatus::Active,
            Some("canceled") => SubscriptionStatus::Canceled,
            _ => SubscriptionStatus::Inactive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Inactive => "inactive",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
        }
    }
}

/// Plan granted by the entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    #[default]
    Free,
    Pro,
}

impl SubscriptionPlan {
    /// Lenient parse: unknown values fall back to `Free`.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("pro") => SubscriptionPlan::Pro,
            _ => SubscriptionPlan::Free,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Pro => "pro",
        }
    }
}

/// A user's subscription entitlement.
///
/// # Invariants
///
/// - `Active` always pairs with `Pro`; `Canceled` always pairs with `Free`
/// - `customer_id` is only present on an active entitlement
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entitlement {
    pub status: SubscriptionStatus,
    pub plan: SubscriptionPlan,
    pub customer_id: Option<CustomerId>,
    pub updated_at: Option<Timestamp>,
}

impl Entitlement {
    /// Entitlement for a user who never subscribed: `{inactive, free}`.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Result of an activation: `{active, pro, customer_id}`.
    pub fn activated(customer_id: Option<CustomerId>, at: Timestamp) -> Self {
        Self {
            status: SubscriptionStatus::Active,
            plan: SubscriptionPlan::Pro,
            customer_id,
            updated_at: Some(at),
        }
    }

    /// Result of a cancellation: `{canceled, free}` with no customer.
    pub fn canceled(at: Timestamp) -> Self {
        Self {
            status: SubscriptionStatus::Canceled,
            plan: SubscriptionPlan::Free,
            customer_id: None,
            updated_at: Some(at),
        }
    }

    /// Pro-only features are gated on an active status; anything else is Free.
    pub fn is_pro(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Compares status, plan, and customer while ignoring the update stamp.
    pub fn same_state_as(&self, other: &Entitlement) -> bool {
        self.status == other.status
            && self.plan == other.plan
            && self.customer_id == other.customer_id
    }
}

/// Persisted layout of an entitlement.
///
/// Decoding is lenient so that records written by older clients (or edited
/// by hand) still map onto a valid entitlement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementRecord {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl EntitlementRecord {
    /// Field-by-field decoding of one stored entry.
    ///
    /// Unlike `serde_json::from_value`, a wrong-typed field only loses that
    /// field; it never rejects the whole record.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            status: text("status"),
            plan: text("plan"),
            customer_id: text("customerId"),
            updated_at: value.get("updatedAt").and_then(|v| v.as_i64()),
        }
    }
}

impl From<&Entitlement> for EntitlementRecord {
    fn from(entitlement: &Entitlement) -> Self {
        Self {
            status: Some(entitlement.status.as_str().to_string()),
            plan: Some(entitlement.plan.as_str().to_string()),
            customer_id: entitlement.customer_id.as_ref().map(|c| c.to_string()),
            updated_at: entitlement.updated_at.map(|t| t.as_unix_millis()),
        }
    }
}

impl From<EntitlementRecord> for Entitlement {
    fn from(record: EntitlementRecord) -> Self {
        Self {
            status: SubscriptionStatus::parse_lenient(record.status.as_deref()),
            plan: SubscriptionPlan::parse_lenient(record.plan.as_deref()),
            customer_id: record.customer_id.and_then(CustomerId::parse),
            updated_at: record.updated_at.map(Timestamp::from_unix_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str) -> Option<CustomerId> {
        CustomerId::parse(id)
    }

    #[test]
    fn default_is_inactive_free() {
        let e = Entitlement::inactive();
        assert_eq!(e.status, SubscriptionStatus::Inactive);
        assert_eq!(e.plan, SubscriptionPlan::Free);
        assert!(e.customer_id.is_none());
        assert!(!e.is_pro());
    }

    #[test]
    fn activated_is_active_pro() {
        let e = Entitlement::activated(customer("mock_cus_1"), Timestamp::now());
        assert_eq!(e.status, SubscriptionStatus::Active);
        assert_eq!(e.plan, SubscriptionPlan::Pro);
        assert!(e.is_pro());
    }

    #[test]
    fn canceled_clears_customer() {
        let e = Entitlement::canceled(Timestamp::now());
        assert_eq!(e.status, SubscriptionStatus::Canceled);
        assert_eq!(e.plan, SubscriptionPlan::Free);
        assert!(e.customer_id.is_none());
        assert!(!e.is_pro());
    }

    #[test]
    fn same_state_ignores_timestamp() {
        let a = Entitlement::activated(customer("c"), Timestamp::from_unix_millis(1));
        let b = Entitlement::activated(customer("c"), Timestamp::from_unix_millis(2));
        assert!(a.same_state_as(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn record_roundtrip_keeps_state() {
        let e = Entitlement::activated(customer("mock_cus_abc"), Timestamp::from_unix_millis(42));
        let json = serde_json::to_string(&EntitlementRecord::from(&e)).unwrap();
        let back: EntitlementRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(Entitlement::from(back), e);
    }

    #[test]
    fn record_decoding_is_lenient() {
        let record: EntitlementRecord =
            serde_json::from_str(r#"{"status":"paused","plan":"enterprise","customerId":"  "}"#)
                .unwrap();
        let e = Entitlement::from(record);
        assert_eq!(e.status, SubscriptionStatus::Inactive);
        assert_eq!(e.plan, SubscriptionPlan::Free);
        assert!(e.customer_id.is_none());
    }

    #[test]
    fn from_value_keeps_well_typed_fields() {
        let value = serde_json::json!({
            "status": 1,
            "plan": "pro",
            "customerId": "mock_cus_1",
            "updatedAt": "yesterday"
        });

        let record = EntitlementRecord::from_value(&value);

        assert_eq!(record.status, None);
        assert_eq!(record.plan.as_deref(), Some("pro"));
        assert_eq!(record.customer_id.as_deref(), Some("mock_cus_1"));
        assert_eq!(record.updated_at, None);
    }

    #[test]
    fn from_value_on_non_object_is_empty() {
        assert_eq!(
            EntitlementRecord::from_value(&serde_json::json!("active")),
            EntitlementRecord::default()
        );
    }

    #[test]
    fn empty_record_decodes_to_default() {
        let record: EntitlementRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(Entitlement::from(record), Entitlement::inactive());
    }

    #[test]
    fn canceled_record_omits_customer() {
        let json = serde_json::to_value(EntitlementRecord::from(&Entitlement::canceled(
            Timestamp::now(),
        )))
        .unwrap();
        assert_eq!(json["status"], "canceled");
        assert_eq!(json["plan"], "free");
        assert!(json.get("customerId").is_none());
    }
}
