use super::{StoreBackend, StoreError, StoreResult};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use redis_utils::SharedConnectionManager;
use std::collections::HashMap;

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Redis-backed store over the process-wide connection manager.
pub struct RedisBackend {
    manager: SharedConnectionManager,
}

impl RedisBackend {
    pub fn new(manager: SharedConnectionManager) -> Self {
        Self { manager }
    }

    /// Clone the manager out of the mutex so the lock is never held
    /// across a network round trip.
    async fn connection(&self) -> ConnectionManager {
        self.manager.lock().await.clone()
    }
}

#[async_trait]
impl StoreBackend for RedisBackend {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.connection().await;
        Ok(conn.exists(key).await?)
    }

    async fn hash_read(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        let mut conn = self.connection().await;
        Ok(conn.hgetall(key).await?)
    }

    async fn hash_write(&self, key: &str, fields: &[(String, String)]) -> StoreResult<()> {
        let mut conn = self.connection().await;
        conn.hset_multiple::<_, _, _, ()>(key, fields).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.connection().await;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn set_add(&self, key: &str, member: &str) -> StoreResult<()> {
        let mut conn = self.connection().await;
        conn.sadd::<_, _, ()>(key, member).await?;
        Ok(())
    }

    async fn sorted_set_add(&self, key: &str, score: i64, member: &str) -> StoreResult<()> {
        let mut conn = self.connection().await;
        conn.zadd::<_, _, _, ()>(key, member, score).await?;
        Ok(())
    }

    async fn sorted_set_remove(&self, key: &str, member: &str) -> StoreResult<()> {
        let mut conn = self.connection().await;
        conn.zrem::<_, _, ()>(key, member).await?;
        Ok(())
    }

    async fn sorted_set_range(&self, key: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.connection().await;
        Ok(conn.zrange(key, 0, -1).await?)
    }

    async fn hash_read_many(&self, keys: &[String]) -> StoreResult<Vec<HashMap<String, String>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection().await;
        let mut pipe = redis::pipe();
        for key in keys {
            pipe.hgetall(key);
        }
        Ok(pipe.query_async(&mut conn).await?)
    }
}
