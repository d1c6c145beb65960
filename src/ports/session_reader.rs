//! Session reader port (read side).
//!
//! Read-only view used by collaborators that only need to resolve a
//! session, such as the payment verifier.

use crate::domain::checkout::CheckoutSession;
use crate::domain::foundation::{DomainError, SessionId};
use async_trait::async_trait;

/// Reader port for resolving checkout sessions.
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// Resolve a session by id, returning `None` if it was never created.
    async fn resolve(&self, id: &SessionId) -> Result<Option<CheckoutSession>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn SessionReader) {}
    }
}
