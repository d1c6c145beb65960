//! Redis-backed session cache for multi-server deployments.
//!
//! Sessions are stored as JSON under `checkout:session:<id>`. An optional
//! TTL keeps the cache tidy; the durable repository remains the source of
//! truth, so an expired entry is simply a cache miss.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::checkout::{CheckoutSession, SessionRecord};
use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::SessionCache;

const KEY_PREFIX: &str = "checkout:session:";

/// Redis session cache
#[derive(Clone)]
pub struct RedisSessionCache {
    conn: MultiplexedConnection,
    ttl_secs: Option<u64>,
}

impl RedisSessionCache {
    /// Create a new Redis session cache.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            ttl_secs: None,
        }
    }

    /// Expire entries after `ttl_secs`.
    pub fn with_ttl(mut self, ttl_secs: Option<u64>) -> Self {
        self.ttl_secs = ttl_secs.filter(|ttl| *ttl > 0);
        self
    }

    /// Connect to Redis and build a cache.
    pub async fn connect(url: &str) -> Result<Self, DomainError> {
        let client = redis::Client::open(url).map_err(|e| DomainError::cache(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| DomainError::cache(e.to_string()))?;
        Ok(Self::new(conn))
    }

    fn key_for(id: &SessionId) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn get(&self, id: &SessionId) -> Result<Option<CheckoutSession>, DomainError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(Self::key_for(id))
            .await
            .map_err(|e: redis::RedisError| DomainError::cache(e.to_string()))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let record: SessionRecord =
            serde_json::from_str(&raw).map_err(|e| DomainError::cache(e.to_string()))?;
        let session =
            CheckoutSession::try_from(record).map_err(|e| DomainError::cache(e.to_string()))?;

        Ok(Some(session))
    }

    async fn put(&self, session: &CheckoutSession) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let key = Self::key_for(&session.id);
        let json = serde_json::to_string(&SessionRecord::from(session))
            .map_err(|e| DomainError::cache(e.to_string()))?;

        match self.ttl_secs {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, json, ttl)
                .await
                .map_err(|e: redis::RedisError| DomainError::cache(e.to_string())),
            None => conn
                .set::<_, _, ()>(key, json)
                .await
                .map_err(|e: redis::RedisError| DomainError::cache(e.to_string())),
        }
    }
}
