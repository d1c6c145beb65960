//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the full service: the checkout module under
//! `/api`, a `/health` probe, and the cross-cutting tower layers.

pub mod checkout;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use checkout::checkout_router;
pub use checkout::CheckoutAppState;

/// Build the application router with tracing, CORS and request timeout layers.
///
/// An empty `cors_origins` list allows any origin.
pub fn app_router(
    state: CheckoutAppState,
    cors_origins: &[String],
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/health", get(checkout::handlers::health))
        .nest("/api", checkout_router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins))
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(parsed)
    }
}
