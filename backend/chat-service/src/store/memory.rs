//! In-memory twin of the Redis backend.
//!
//! Sorted sets are kept as `BTreeSet<(score, member)>`, which reproduces
//! Redis's ordering exactly: ascending score, ties broken by member bytes.

use super::{StoreBackend, StoreResult};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryInner {
    hashes: HashMap<String, HashMap<String, String>>,
    sets: HashMap<String, HashSet<String>>,
    zsets: HashMap<String, BTreeSet<(i64, String)>>,
}

#[derive(Default)]
pub struct MemoryBackend {
    inner: RwLock<MemoryInner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.hashes.contains_key(key)
            || inner.sets.contains_key(key)
            || inner.zsets.contains_key(key))
    }

    async fn hash_read(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        let inner = self.inner.read().await;
        Ok(inner.hashes.get(key).cloned().unwrap_or_default())
    }

    async fn hash_write(&self, key: &str, fields: &[(String, String)]) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let hash = inner.hashes.entry(key.to_string()).or_default();
        for (field, value) in fields {
            hash.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.hashes.remove(key);
        inner.sets.remove(key);
        inner.zsets.remove(key);
        Ok(())
    }

    async fn set_add(&self, key: &str, member: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn sorted_set_add(&self, key: &str, score: i64, member: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let zset = inner.zsets.entry(key.to_string()).or_default();
        // re-adding a member updates its score, as ZADD does
        zset.retain(|(_, m)| m.as_str() != member);
        zset.insert((score, member.to_string()));
        Ok(())
    }

    async fn sorted_set_remove(&self, key: &str, member: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let now_empty = match inner.zsets.get_mut(key) {
            Some(zset) => {
                zset.retain(|(_, m)| m.as_str() != member);
                zset.is_empty()
            }
            None => false,
        };
        // Redis drops a sorted set once its last member is gone
        if now_empty {
            inner.zsets.remove(key);
        }
        Ok(())
    }

    async fn sorted_set_range(&self, key: &str) -> StoreResult<Vec<String>> {
        let inner = self.inner.read().await;
        Ok(inner
            .zsets
            .get(key)
            .map(|zset| zset.iter().map(|(_, m)| m.clone()).collect())
            .unwrap_or_default())
    }

    async fn hash_read_many(&self, keys: &[String]) -> StoreResult<Vec<HashMap<String, String>>> {
        let inner = self.inner.read().await;
        Ok(keys
            .iter()
            .map(|key| inner.hashes.get(key).cloned().unwrap_or_default())
            .collect())
    }
}
