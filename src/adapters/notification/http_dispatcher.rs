//! HTTP notification dispatcher.
//!
//! Posts `{sessionId, userId}` to a confirmation endpoint, typically this
//! service's own `/api/webhooks/mock` route on another instance. The
//! request is awaited so transport failures surface to the caller, which
//! logs them without failing the checkout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::ports::{DispatchError, NotificationDispatcher, PaymentNotification};

/// Default request timeout for notification delivery.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct HttpNotificationDispatcher {
    client: Client,
    endpoint: String,
}

impl HttpNotificationDispatcher {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, DispatchError> {
        Self::with_timeout(endpoint, DEFAULT_DISPATCH_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NotificationDispatcher for HttpNotificationDispatcher {
    async fn dispatch(&self, notification: PaymentNotification) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&notification)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    DispatchError::Encoding(e.to_string())
                } else {
                    DispatchError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Rejected(status.as_u16()));
        }

        tracing::debug!(
            session_id = %notification.session_id,
            endpoint = %self.endpoint,
            "Payment notification delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::app_router;
    use crate::adapters::http::checkout::CheckoutAppState;
    use crate::bootstrap::build_state;
    use crate::config::{AppConfig, CheckoutConfig};
    use crate::domain::foundation::{SessionId, UserId};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use std::net::SocketAddr;
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    // ════════════════════════════════════════════════════════════════════════════
    // Local server helpers
    // ════════════════════════════════════════════════════════════════════════════

    async fn serve(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        addr
    }

    async fn checkout_service(dir: &TempDir) -> (CheckoutAppState, SocketAddr) {
        let config = AppConfig {
            checkout: CheckoutConfig {
                session_store_path: dir.path().join("sessions.json"),
                verification_delay_ms: 0,
                notification_delay_ms: 0,
                cancellation_delay_ms: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let state = build_state(&config).await.unwrap();
        let addr = serve(app_router(state.clone(), &[], Duration::from_secs(5))).await;
        (state, addr)
    }

    fn notification(session_id: &str, user_id: &str) -> PaymentNotification {
        PaymentNotification::new(
            SessionId::new(session_id).unwrap(),
            UserId::new(user_id).unwrap(),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Delivery
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn delivered_notification_activates_on_the_receiving_service() {
        let dir = TempDir::new().unwrap();
        let (state, addr) = checkout_service(&dir).await;
        let dispatcher =
            HttpNotificationDispatcher::new(format!("http://{}/api/webhooks/mock", addr)).unwrap();

        dispatcher
            .dispatch(notification("mock_sess_1700000000000_abcd1234", "u1"))
            .await
            .unwrap();

        let entitlement = state
            .entitlements
            .read(&UserId::new("u1").unwrap())
            .await
            .unwrap();
        assert!(entitlement.is_pro());
        assert_eq!(entitlement.customer_id.unwrap().as_str(), "mock_cus_abcd1234");
    }

    #[tokio::test]
    async fn blank_user_is_rejected_by_the_receiving_service() {
        let dir = TempDir::new().unwrap();
        let (_state, addr) = checkout_service(&dir).await;
        let dispatcher =
            HttpNotificationDispatcher::new(format!("http://{}/api/webhooks/mock", addr)).unwrap();
        // Decoded payloads skip the id constructors, so a blank user can reach the wire.
        let blank_user: PaymentNotification =
            serde_json::from_value(serde_json::json!({"sessionId": "s1", "userId": "  "}))
                .unwrap();

        let result = dispatcher.dispatch(blank_user).await;

        assert_eq!(result, Err(DispatchError::Rejected(400)));
    }

    #[tokio::test]
    async fn unknown_route_is_rejected_with_its_status() {
        let dir = TempDir::new().unwrap();
        let (_state, addr) = checkout_service(&dir).await;
        let dispatcher =
            HttpNotificationDispatcher::new(format!("http://{}/api/webhooks/missing", addr))
                .unwrap();

        let result = dispatcher.dispatch(notification("s1", "u1")).await;

        assert_eq!(result, Err(DispatchError::Rejected(404)));
    }

    #[tokio::test]
    async fn client_error_reply_is_rejected() {
        let router = Router::new().route("/hook", post(|| async { StatusCode::BAD_REQUEST }));
        let addr = serve(router).await;
        let dispatcher =
            HttpNotificationDispatcher::new(format!("http://{}/hook", addr)).unwrap();

        let result = dispatcher.dispatch(notification("s1", "u1")).await;

        assert_eq!(result, Err(DispatchError::Rejected(400)));
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        // Bind then release a port so nothing is listening on it.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let dispatcher = HttpNotificationDispatcher::with_timeout(
            format!("http://{}/api/webhooks/mock", addr),
            Duration::from_millis(500),
        )
        .unwrap();

        let result = dispatcher.dispatch(notification("s1", "u1")).await;

        assert!(matches!(result, Err(DispatchError::Unreachable(_))));
    }

    #[test]
    fn keeps_endpoint() {
        let dispatcher = HttpNotificationDispatcher::new("http://localhost:8080/api/webhooks/mock")
            .unwrap();
        assert_eq!(
            dispatcher.endpoint(),
            "http://localhost:8080/api/webhooks/mock"
        );
    }
}
