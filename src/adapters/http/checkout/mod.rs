//! HTTP adapter for checkout endpoints.
//!
//! Exposes the checkout flow via REST API:
//! - `POST /api/checkout/sessions` - Open a checkout session
//! - `GET /api/checkout/sessions/:session_id` - Session details for the payment page
//! - `POST /api/checkout/sessions/:session_id/pay` - Pay and activate
//! - `GET /api/subscription` - Current subscription state
//! - `POST /api/subscription/cancel` - Cancel the subscription
//! - `POST /api/webhooks/mock` - "Checkout session completed" notification

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{
    AuthenticatedUser, CheckoutApiError, CheckoutAppState, CheckoutSettings, WebhookApiError,
};
pub use routes::checkout_router;
