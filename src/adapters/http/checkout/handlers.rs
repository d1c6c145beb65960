//! HTTP handlers for checkout, subscription and notification endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::checkout::{
    CompleteCheckoutCommand, CompleteCheckoutHandler, CreateCheckoutSessionCommand,
    CreateCheckoutSessionHandler, GetCheckoutSessionHandler, GetCheckoutSessionQuery,
    DEFAULT_VERIFICATION_TIMEOUT,
};
use crate::application::handlers::notification::{
    HandlePaymentNotificationCommand, HandlePaymentNotificationHandler,
};
use crate::application::handlers::subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, GetEntitlementHandler,
    GetEntitlementQuery,
};
use crate::application::{EntitlementStore, SessionStore};
use crate::domain::checkout::{CheckoutError, PaymentInstrument, DEFAULT_REDIRECT_BASE};
use crate::domain::foundation::{PriceId, SessionId, UserId};
use crate::ports::{NotificationDispatcher, PaymentProvider, PaymentVerifier};

use super::dto::{
    CheckoutReceiptResponse, CreateSessionRequest, CreateSessionResponse, EntitlementResponse,
    ErrorResponse, PaymentNotificationRequest, SessionResponse, WebhookErrorResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Tunables for the checkout flow.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Price used when a session request names none.
    pub price_id: PriceId,
    pub redirect_base: String,
    pub verification_timeout: Duration,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            price_id: PriceId::pro_monthly(),
            redirect_base: DEFAULT_REDIRECT_BASE.to_string(),
            verification_timeout: DEFAULT_VERIFICATION_TIMEOUT,
        }
    }
}

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub sessions: Arc<SessionStore>,
    pub entitlements: Arc<EntitlementStore>,
    pub payment_verifier: Arc<dyn PaymentVerifier>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub notification_dispatcher: Arc<dyn NotificationDispatcher>,
    pub notification_handler: Arc<HandlePaymentNotificationHandler>,
    pub settings: CheckoutSettings,
}

impl CheckoutAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_session_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(self.sessions.clone())
            .with_redirect_base(self.settings.redirect_base.clone())
    }

    pub fn get_session_handler(&self) -> GetCheckoutSessionHandler {
        GetCheckoutSessionHandler::new(self.sessions.clone())
    }

    pub fn complete_checkout_handler(&self) -> CompleteCheckoutHandler {
        CompleteCheckoutHandler::new(
            self.payment_verifier.clone(),
            self.entitlements.clone(),
            self.notification_dispatcher.clone(),
        )
        .with_verification_timeout(self.settings.verification_timeout)
    }

    pub fn cancel_subscription_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.payment_provider.clone(), self.entitlements.clone())
    }

    pub fn get_entitlement_handler(&self) -> GetEntitlementHandler {
        GetEntitlementHandler::new(self.entitlements.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from request.
///
/// Authentication happens upstream; the gateway forwards the verified user
/// id in the `X-User-Id` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::new(s).ok())
            .ok_or(AuthenticationRequired)?;

        Ok(AuthenticatedUser { user_id })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/checkout/sessions - Open a checkout session
pub async fn create_session(
    State(state): State<CheckoutAppState>,
    user: AuthenticatedUser,
    request: Option<Json<CreateSessionRequest>>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let requested = request.and_then(|Json(r)| r.price_id);
    let price_id = requested
        .and_then(|p| PriceId::new(p).ok())
        .unwrap_or_else(|| state.settings.price_id.clone());

    let cmd = CreateCheckoutSessionCommand {
        price_id,
        user_id: user.user_id,
    };

    let result = state.create_session_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(CreateSessionResponse::from(result))))
}

/// GET /api/checkout/sessions/:session_id - Session details for the payment page
///
/// Sessions owned by another user are reported as not found.
pub async fn get_session(
    State(state): State<CheckoutAppState>,
    user: AuthenticatedUser,
    Path(session_id): Path<SessionId>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let session_id = parse_session_id(session_id)?;

    let session = state
        .get_session_handler()
        .handle(GetCheckoutSessionQuery {
            session_id: session_id.clone(),
        })
        .await?;

    if session.user_id != user.user_id {
        return Err(CheckoutError::SessionNotFound(session_id).into());
    }

    Ok(Json(SessionResponse::from(session)))
}

/// POST /api/checkout/sessions/:session_id/pay - Submit card details and activate
pub async fn complete_checkout(
    State(state): State<CheckoutAppState>,
    user: AuthenticatedUser,
    Path(session_id): Path<SessionId>,
    Json(instrument): Json<PaymentInstrument>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let cmd = CompleteCheckoutCommand {
        session_id: parse_session_id(session_id)?,
        user_id: user.user_id.to_string(),
        instrument,
    };

    let receipt = state.complete_checkout_handler().handle(cmd).await?;

    Ok(Json(CheckoutReceiptResponse::from(receipt)))
}

/// Path segments arrive untrimmed; a blank id can only name a missing session.
fn parse_session_id(raw: SessionId) -> Result<SessionId, CheckoutError> {
    SessionId::new(raw.as_str()).map_err(|_| CheckoutError::SessionNotFound(raw))
}

// ════════════════════════════════════════════════════════════════════════════════
// Subscription Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/subscription - Current user's subscription state
pub async fn get_subscription(
    State(state): State<CheckoutAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let result = state
        .get_entitlement_handler()
        .handle(GetEntitlementQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(EntitlementResponse::from(result)))
}

/// POST /api/subscription/cancel - Cancel the current user's subscription
pub async fn cancel_subscription(
    State(state): State<CheckoutAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let entitlement = state
        .cancel_subscription_handler()
        .handle(CancelSubscriptionCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(EntitlementResponse::from(entitlement)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Notification Endpoint
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/webhooks/mock - "Checkout session completed" notification
///
/// Unauthenticated: the sender is the payment side, not a user.
///
/// A body that is not valid JSON is the sender's fault and answers 400
/// `{"error": "Invalid JSON body"}`, like a blank `sessionId` or `userId`.
/// The generic 500 `"Webhook processing failed"` is reserved for failures
/// after the notification was understood, so senders can tell "fix the
/// payload" from "retry later".
pub async fn handle_payment_notification(
    State(state): State<CheckoutAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let request: PaymentNotificationRequest = serde_json::from_slice(&body)
        .map_err(|_| WebhookApiError::BadRequest("Invalid JSON body".to_string()))?;

    let cmd = HandlePaymentNotificationCommand {
        session_id: request.session_id.unwrap_or_default(),
        user_id: request.user_id.unwrap_or_default(),
    };

    let ack = state.notification_handler.handle(cmd).await?;

    Ok(Json(ack))
}

/// GET /health - Liveness probe
pub async fn health() -> &'static str {
    "ok"
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
#[derive(Debug)]
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl From<crate::domain::foundation::DomainError> for CheckoutApiError {
    fn from(err: crate::domain::foundation::DomainError) -> Self {
        Self(CheckoutError::from(err))
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            CheckoutError::InvalidCardNumber
            | CheckoutError::InvalidExpiry
            | CheckoutError::InvalidCvc => StatusCode::UNPROCESSABLE_ENTITY,
            CheckoutError::PaymentNotConfirmed { .. } => StatusCode::PAYMENT_REQUIRED,
            CheckoutError::MissingUser | CheckoutError::MalformedNotification { .. } => {
                StatusCode::BAD_REQUEST
            }
            CheckoutError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            CheckoutError::InternalFailure(detail) => {
                tracing::error!(error = %detail, "Checkout request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // message() never carries internal detail
        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

/// Error type for the notification endpoint, which answers `{error}` bodies.
#[derive(Debug)]
pub enum WebhookApiError {
    BadRequest(String),
    Failed(CheckoutError),
}

impl From<CheckoutError> for WebhookApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::MalformedNotification { reason } => WebhookApiError::BadRequest(reason),
            other => WebhookApiError::Failed(other),
        }
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            WebhookApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(WebhookErrorResponse { error })).into_response()
            }
            WebhookApiError::Failed(err) => {
                tracing::error!(error = %err, "Payment notification processing failed");
                let body = WebhookErrorResponse {
                    error: "Webhook processing failed".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_are_unprocessable() {
        for err in [
            CheckoutError::InvalidCardNumber,
            CheckoutError::InvalidExpiry,
            CheckoutError::InvalidCvc,
        ] {
            let response = CheckoutApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[tokio::test]
    async fn payment_not_confirmed_is_payment_required() {
        let response =
            CheckoutApiError::from(CheckoutError::payment_not_confirmed("declined")).into_response();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

        let json = body_json(response).await;
        assert_eq!(json["code"], "PAYMENT_NOT_CONFIRMED");
    }

    #[tokio::test]
    async fn internal_failure_hides_detail() {
        let response =
            CheckoutApiError::from(CheckoutError::internal("disk full at /var/data")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert!(!json["message"].as_str().unwrap().contains("disk full"));
    }

    #[tokio::test]
    async fn session_not_found_is_404() {
        let err = CheckoutError::SessionNotFound(SessionId::new("s1").unwrap());
        assert_eq!(
            CheckoutApiError::from(err).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn webhook_malformed_is_400_with_reason() {
        let response =
            WebhookApiError::from(CheckoutError::malformed_notification("Missing userId"))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing userId");
    }

    #[tokio::test]
    async fn webhook_internal_is_generic_500() {
        let response = WebhookApiError::from(CheckoutError::internal("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Webhook processing failed");
    }
}
