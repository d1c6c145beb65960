//! CreateCheckoutSessionHandler - Command handler for opening checkout sessions.

use std::sync::Arc;

use crate::application::SessionStore;
use crate::domain::checkout::{CheckoutError, DEFAULT_REDIRECT_BASE};
use crate::domain::foundation::{PriceId, SessionId, UserId};

/// Command to open a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    pub price_id: PriceId,
    pub user_id: UserId,
}

/// Result of a created session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCheckoutSessionResult {
    pub session_id: SessionId,
    /// Where the client should send the user to enter card details.
    pub redirect_reference: String,
}

/// Handler for opening checkout sessions.
pub struct CreateCheckoutSessionHandler {
    sessions: Arc<SessionStore>,
    redirect_base: String,
}

impl CreateCheckoutSessionHandler {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self {
            sessions,
            redirect_base: DEFAULT_REDIRECT_BASE.to_string(),
        }
    }

    pub fn with_redirect_base(mut self, redirect_base: impl Into<String>) -> Self {
        self.redirect_base = redirect_base.into();
        self
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CreateCheckoutSessionResult, CheckoutError> {
        let session = self.sessions.create(cmd.price_id, cmd.user_id).await?;

        Ok(CreateCheckoutSessionResult {
            redirect_reference: session.redirect_reference(&self.redirect_base),
            session_id: session.id,
        })
    }
}
