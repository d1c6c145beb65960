//! Service assembly: turns an `AppConfig` into a ready `CheckoutAppState`.
//!
//! Chooses adapters from configuration:
//! - sessions: file repository, cached in Redis when configured, in process otherwise
//! - entitlements: file repository when a path is set, in memory otherwise
//! - notifications: HTTP dispatch when an endpoint is set, in process otherwise

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::http::checkout::{CheckoutAppState, CheckoutSettings};
use crate::adapters::notification::{HttpNotificationDispatcher, InProcessNotificationDispatcher};
use crate::adapters::payment::{SimulatedPaymentProvider, SimulatedPaymentVerifier};
use crate::adapters::storage::{FileSessionRepository, InMemorySessionCache, RedisSessionCache};
use crate::adapters::subscription::{FileEntitlementRepository, InMemoryEntitlementRepository};
use crate::application::handlers::notification::HandlePaymentNotificationHandler;
use crate::application::{EntitlementStore, SessionStore};
use crate::config::{AppConfig, ConfigError};
use crate::domain::foundation::{DomainError, PriceId};
use crate::ports::{
    DispatchError, EntitlementRepository, NotificationDispatcher, SessionCache,
};

/// Errors raised while starting the service.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Session cache unavailable: {0}")]
    Cache(#[from] DomainError),

    #[error("Notification dispatcher unavailable: {0}")]
    Dispatcher(#[from] DispatchError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the shared application state from configuration.
pub async fn build_state(config: &AppConfig) -> Result<CheckoutAppState, StartupError> {
    let checkout = &config.checkout;

    // Sessions
    let cache: Arc<dyn SessionCache> = match &config.redis {
        Some(redis) => {
            let cache = RedisSessionCache::connect(&redis.url)
                .await?
                .with_ttl(redis.session_ttl_secs);
            tracing::info!("Session cache: redis");
            Arc::new(cache)
        }
        None => Arc::new(InMemorySessionCache::new()),
    };
    let sessions = Arc::new(SessionStore::new(
        Arc::new(FileSessionRepository::new(&checkout.session_store_path)),
        cache,
    ));

    // Entitlements
    let entitlement_repository: Arc<dyn EntitlementRepository> =
        match &checkout.entitlement_store_path {
            Some(path) => Arc::new(FileEntitlementRepository::new(path)),
            None => Arc::new(InMemoryEntitlementRepository::new()),
        };
    let entitlements = Arc::new(EntitlementStore::new(entitlement_repository));

    // Payment
    let payment_verifier = Arc::new(
        SimulatedPaymentVerifier::new(sessions.clone()).with_delay(checkout.verification_delay()),
    );
    let payment_provider =
        Arc::new(SimulatedPaymentProvider::new().with_delay(checkout.cancellation_delay()));

    // Notifications
    let notification_handler = Arc::new(
        HandlePaymentNotificationHandler::new(entitlements.clone())
            .with_delay(checkout.notification_delay()),
    );
    let notification_dispatcher: Arc<dyn NotificationDispatcher> =
        match &checkout.notification_endpoint {
            Some(endpoint) => {
                tracing::info!(endpoint = %endpoint, "Notifications dispatched over HTTP");
                Arc::new(HttpNotificationDispatcher::new(endpoint.clone())?)
            }
            None => Arc::new(InProcessNotificationDispatcher::new(
                notification_handler.clone(),
            )),
        };

    let price_id = PriceId::new(checkout.price_id.as_str())
        .map_err(|e| StartupError::Invalid(e.to_string()))?;

    Ok(CheckoutAppState {
        sessions,
        entitlements,
        payment_verifier,
        payment_provider,
        notification_dispatcher,
        notification_handler,
        settings: CheckoutSettings {
            price_id,
            redirect_base: checkout.redirect_base.clone(),
            verification_timeout: checkout.verification_timeout(),
        },
    })
}
