//! Pseudo customer identifiers.
//!
//! Two independent derivations exist: the verification path derives from the
//! session's user, the notification path derives from the session id alone.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{SessionId, UserId};

const CUSTOMER_ID_PREFIX: &str = "mock_cus_";
const CUSTOMER_SUFFIX_LEN: usize = 8;

/// Payment-provider customer identifier attached to an active entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Wraps an existing identifier; blank input yields `None`.
    pub fn parse(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// `mock_cus_` + first 8 characters of the user id.
    pub fn for_user(user_id: &UserId) -> Self {
        Self(format!("{}{}", CUSTOMER_ID_PREFIX, user_id.prefix(CUSTOMER_SUFFIX_LEN)))
    }

    /// `mock_cus_` + last 8 characters of the session id.
    pub fn for_session(session_id: &SessionId) -> Self {
        Self(format!("{}{}", CUSTOMER_ID_PREFIX, session_id.suffix(CUSTOMER_SUFFIX_LEN)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
