//! Store boundary: the exact operation set the core is allowed to use.
//!
//! Everything the service persists goes through [`StoreBackend`]; the trait
//! deliberately mirrors the Redis hash / set / sorted-set commands the data
//! model is built on, and nothing else. `RedisBackend` is the production
//! implementation; `MemoryBackend` backs the test suites.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

pub mod keys;
pub mod memory;
pub mod redis;

pub use self::memory::MemoryBackend;
pub use self::redis::RedisBackend;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store was unreachable or timed out; safe to retry.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record came back with missing or malformed fields.
    #[error("malformed record at {key}: {reason}")]
    MalformedRecord { key: String, reason: String },
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The persistence operations this core requires (and no others).
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Key existence check.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Read all fields of a hash. A missing key yields an empty map.
    async fn hash_read(&self, key: &str) -> StoreResult<HashMap<String, String>>;

    /// Write (upsert) hash fields.
    async fn hash_write(&self, key: &str, fields: &[(String, String)]) -> StoreResult<()>;

    /// Remove a key entirely.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Add a member to a set.
    async fn set_add(&self, key: &str, member: &str) -> StoreResult<()>;

    /// Add a member to a sorted set under the given score.
    async fn sorted_set_add(&self, key: &str, score: i64, member: &str) -> StoreResult<()>;

    /// Remove a member from a sorted set.
    async fn sorted_set_remove(&self, key: &str, member: &str) -> StoreResult<()>;

    /// Full ascending range of a sorted set (score order, ties by member).
    async fn sorted_set_range(&self, key: &str) -> StoreResult<Vec<String>>;

    /// Batched hash reads issued as one round trip, in input order.
    async fn hash_read_many(&self, keys: &[String]) -> StoreResult<Vec<HashMap<String, String>>>;
}
