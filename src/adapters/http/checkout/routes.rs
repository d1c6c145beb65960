//! Axum router configuration for checkout endpoints.
//!
//! This module defines the route structure for checkout-related API endpoints
//! and wires them to their corresponding handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_subscription, complete_checkout, create_session, get_session, get_subscription,
    handle_payment_notification, CheckoutAppState,
};

/// Create the checkout session router.
///
/// # Routes (require authentication)
/// - `POST /sessions` - Open a checkout session
/// - `GET /sessions/:session_id` - Session details for the payment page
/// - `POST /sessions/:session_id/pay` - Submit card details and activate
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:session_id", get(get_session))
        .route("/sessions/:session_id/pay", post(complete_checkout))
}

/// Create the subscription router.
///
/// # Routes (require authentication)
/// - `GET /` - Current subscription state
/// - `POST /cancel` - Cancel the subscription
pub fn subscription_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/", get(get_subscription))
        .route("/cancel", post(cancel_subscription))
}

/// Create the notification router.
///
/// Separate from the user routes because notifications carry no user
/// authentication.
///
/// # Routes
/// - `POST /mock` - "Checkout session completed" notification
pub fn webhook_routes() -> Router<CheckoutAppState> {
    Router::new().route("/mock", post(handle_payment_notification))
}

/// Create the complete checkout module router, suitable for mounting at `/api`.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", checkout_router())
///     .with_state(app_state);
/// ```
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new()
        .nest("/checkout", checkout_routes())
        .nest("/subscription", subscription_routes())
        .nest("/webhooks", webhook_routes())
}
