//! HTTP DTOs (Data Transfer Objects) for checkout endpoints.
//!
//! These types define the JSON request/response structure for the checkout,
//! subscription and notification API. They serve as the boundary between
//! HTTP and the application layer. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::application::handlers::checkout::{
    CheckoutReceipt, CreateCheckoutSessionResult, NotificationStatus,
};
use crate::application::handlers::subscription::GetEntitlementResult;
use crate::domain::checkout::{CheckoutSession, CheckoutStage};
use crate::domain::subscription::Entitlement;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to open a checkout session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Price to subscribe to; the configured price is used when absent or blank.
    #[serde(default)]
    pub price_id: Option<String>,
}

/// Payment notification body.
///
/// Both fields are optional at the decoding layer so that a missing field
/// is reported as a malformed notification rather than a decoding error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotificationRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a newly created session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub redirect_reference: String,
}

impl From<CreateCheckoutSessionResult> for CreateSessionResponse {
    fn from(result: CreateCheckoutSessionResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            redirect_reference: result.redirect_reference,
        }
    }
}

/// Session details for the hosted payment page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub price_id: String,
    pub created_at: i64,
}

impl From<CheckoutSession> for SessionResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            session_id: session.id.to_string(),
            price_id: session.price_id.to_string(),
            created_at: session.created_at.as_unix_millis(),
        }
    }
}

/// Response for a completed checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceiptResponse {
    pub session_id: String,
    pub customer_id: String,
    pub stage: CheckoutStage,
    pub notification: NotificationStatus,
}

impl From<CheckoutReceipt> for CheckoutReceiptResponse {
    fn from(receipt: CheckoutReceipt) -> Self {
        Self {
            session_id: receipt.session_id.to_string(),
            customer_id: receipt.customer_id.to_string(),
            stage: receipt.stage,
            notification: receipt.notification,
        }
    }
}

/// Subscription state as shown to the product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementResponse {
    pub status: String,
    pub plan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub is_pro: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl From<Entitlement> for EntitlementResponse {
    fn from(entitlement: Entitlement) -> Self {
        Self {
            status: entitlement.status.as_str().to_string(),
            plan: entitlement.plan.as_str().to_string(),
            is_pro: entitlement.is_pro(),
            customer_id: entitlement.customer_id.map(|c| c.to_string()),
            updated_at: entitlement.updated_at.map(|t| t.as_unix_millis()),
        }
    }
}

impl From<GetEntitlementResult> for EntitlementResponse {
    fn from(result: GetEntitlementResult) -> Self {
        Self::from(result.entitlement)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error body returned to notification senders.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::CustomerId;
    use crate::domain::foundation::{SessionId, Timestamp};

    #[test]
    fn notification_request_tolerates_missing_fields() {
        let req: PaymentNotificationRequest = serde_json::from_str("{}").unwrap();
        assert!(req.session_id.is_none());
        assert!(req.user_id.is_none());

        let req: PaymentNotificationRequest =
            serde_json::from_str(r#"{"sessionId":"s1","userId":"u1"}"#).unwrap();
        assert_eq!(req.session_id.as_deref(), Some("s1"));
        assert_eq!(req.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn receipt_response_shape() {
        let response = CheckoutReceiptResponse::from(CheckoutReceipt {
            session_id: SessionId::new("s1").unwrap(),
            customer_id: CustomerId::parse("mock_cus_u1").unwrap(),
            stage: CheckoutStage::Activated,
            notification: NotificationStatus::Dispatched,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sessionId"], "s1");
        assert_eq!(json["customerId"], "mock_cus_u1");
        assert_eq!(json["stage"], "activated");
        assert_eq!(json["notification"], "dispatched");
    }

    #[test]
    fn inactive_entitlement_omits_customer() {
        let json = serde_json::to_value(EntitlementResponse::from(Entitlement::inactive())).unwrap();
        assert_eq!(json["status"], "inactive");
        assert_eq!(json["plan"], "free");
        assert_eq!(json["isPro"], false);
        assert!(json.get("customerId").is_none());
    }

    #[test]
    fn active_entitlement_includes_customer() {
        let e = Entitlement::activated(CustomerId::parse("c1"), Timestamp::from_unix_millis(5));
        let json = serde_json::to_value(EntitlementResponse::from(e)).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["plan"], "pro");
        assert_eq!(json["customerId"], "c1");
        assert_eq!(json["isPro"], true);
        assert_eq!(json["updatedAt"], 5);
    }
}
