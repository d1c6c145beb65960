//! Checkout session entity.
//!
//! A session represents one checkout attempt. It is written once when the
//! checkout starts and never mutated or deleted afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PriceId, SessionId, Timestamp, UserId};

/// Path under which the hosted payment page for a session is served.
pub const DEFAULT_REDIRECT_BASE: &str = "/checkout/mock-session";

/// One checkout attempt.
///
/// # Invariants
///
/// - `id` is globally unique and immutable
/// - All fields are fixed at creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: SessionId,
    pub user_id: UserId,
    pub price_id: PriceId,
    pub created_at: Timestamp,
}

impl CheckoutSession {
    /// Opens a new session with a freshly generated identifier.
    ///
    /// `created_at` is kept at millisecond precision, matching the persisted layout.
    pub fn open(price_id: PriceId, user_id: UserId) -> Self {
        Self {
            id: SessionId::generate(),
            user_id,
            price_id,
            created_at: Timestamp::now().truncated_to_millis(),
        }
    }

    /// Relative reference the client is redirected to for payment.
    pub fn redirect_reference(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.id)
    }
}

/// Persisted layout of a session: `{sessionId, userId, priceId, createdAt}`
/// with `createdAt` in Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: String,
    pub user_id: String,
    pub price_id: String,
    pub created_at: i64,
}

impl From<&CheckoutSession> for SessionRecord {
    fn from(session: &CheckoutSession) -> Self {
        Self {
            session_id: session.id.to_string(),
            user_id: session.user_id.to_string(),
            price_id: session.price_id.to_string(),
            created_at: session.created_at.as_unix_millis(),
        }
    }
}

impl TryFrom<SessionRecord> for CheckoutSession {
    type Error = crate::domain::foundation::ValidationError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SessionId::new(record.session_id)?,
            user_id: UserId::new(record.user_id)?,
            price_id: PriceId::new(record.price_id)?,
            created_at: Timestamp::from_unix_millis(record.created_at),
        })
    }
}
