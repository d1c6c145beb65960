//! Session Storage Adapters
//!
//! Implementations of the `SessionRepository` and `SessionCache` ports.
//!
//! ## Available Adapters
//!
//! - **FileSessionRepository** - Durable JSON list on disk
//! - **InMemorySessionRepository** - Durable-store stand-in (testing/development)
//! - **InMemorySessionCache** - Process-local cache
//! - **RedisSessionCache** - Shared cache for multi-server deployments
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSessionRepository, InMemorySessionCache};
//!
//! let repository = FileSessionRepository::new("./data/checkout_sessions.json");
//! let cache = InMemorySessionCache::new();
//! ```

mod file_session_repository;
mod in_memory_session_cache;
mod in_memory_session_repository;
mod redis_session_cache;

pub use file_session_repository::FileSessionRepository;
pub use in_memory_session_cache::InMemorySessionCache;
pub use in_memory_session_repository::InMemorySessionRepository;
pub use redis_session_cache::RedisSessionCache;
