//! In-process [`KvStore`] for tests and local development

use super::KvStore;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::Mutex;

#[derive(Default)]
struct Data {
    sorted_sets: HashMap<String, HashMap<String, i64>>,
    hashes: HashMap<String, HashMap<String, String>>,
    strings: HashMap<String, String>,
    sets: HashMap<String, BTreeSet<String>>,
}

impl Data {
    fn remove(&mut self, key: &str) {
        self.sorted_sets.remove(key);
        self.hashes.remove(key);
        self.strings.remove(key);
        self.sets.remove(key);
    }
}

/// Memory store with Redis-like semantics for the primitives the roster uses
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Data>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held, across all value types
    pub async fn key_count(&self) -> usize {
        let data = self.data.lock().await;
        data.sorted_sets.len() + data.hashes.len() + data.strings.len() + data.sets.len()
    }

    /// Add `member` to the plain set at `key`
    ///
    /// Not part of [`KvStore`]: the roster never writes plain sets, this
    /// only lets tests lay down data in the older set-indexed layout.
    pub async fn sadd(&self, key: &str, member: &str) {
        let mut data = self.data.lock().await;
        data.sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn zadd(&self, key: &str, score: i64, member: &str) -> Result<()> {
        let mut data = self.data.lock().await;
        data.sorted_sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string(), score);
        Ok(())
    }

    async fn zrange_all(&self, key: &str) -> Result<Vec<String>> {
        let data = self.data.lock().await;
        let Some(set) = data.sorted_sets.get(key) else {
            return Ok(Vec::new());
        };
        let mut scored: Vec<(i64, &String)> = set.iter().map(|(m, s)| (*s, m)).collect();
        scored.sort();
        Ok(scored.into_iter().map(|(_, m)| m.clone()).collect())
    }

    async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut data = self.data.lock().await;
        let map = data.hashes.entry(key.to_string()).or_default();
        for (field, value) in fields {
            map.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        let data = self.data.lock().await;
        Ok(data.hashes.get(key).cloned().unwrap_or_default())
    }

    async fn hgetall_many(&self, keys: &[String]) -> Result<Vec<HashMap<String, String>>> {
        let data = self.data.lock().await;
        Ok(keys
            .iter()
            .map(|k| data.hashes.get(k).cloned().unwrap_or_default())
            .collect())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let data = self.data.lock().await;
        Ok(data
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn del(&self, keys: &[String]) -> Result<()> {
        let mut data = self.data.lock().await;
        for key in keys {
            data.remove(key);
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.data.lock().await;
        Ok(data.strings.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.lock().await;
        data.strings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut data = self.data.lock().await;
        let current = match data.strings.get(key) {
            Some(v) => v.parse::<i64>().map_err(|_| {
                Error::InvalidInput(format!("value at {} is not an integer", key))
            })?,
            None => 0,
        };
        let next = current.checked_add(1).ok_or_else(|| {
            Error::InvalidInput(format!("increment at {} would overflow", key))
        })?;
        data.strings.insert(key.to_string(), next.to_string());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zrange_orders_by_score_then_member() {
        let store = MemoryStore::new();
        store.zadd("z", 30, "c").await.unwrap();
        store.zadd("z", 10, "b").await.unwrap();
        store.zadd("z", 10, "a").await.unwrap();

        assert_eq!(store.zrange_all("z").await.unwrap(), vec!["a", "b", "c"]);
        assert!(store.zrange_all("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zadd_updates_existing_score() {
        let store = MemoryStore::new();
        store.zadd("z", 1, "a").await.unwrap();
        store.zadd("z", 2, "b").await.unwrap();
        store.zadd("z", 3, "a").await.unwrap();

        assert_eq!(store.zrange_all("z").await.unwrap(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_hash_roundtrip_and_bulk_read() {
        let store = MemoryStore::new();
        store
            .hset_all("h1", &[("a".into(), "1".into()), ("b".into(), "2".into())])
            .await
            .unwrap();
        store.hset_all("h1", &[("b".into(), "3".into())]).await.unwrap();

        let h1 = store.hgetall("h1").await.unwrap();
        assert_eq!(h1.get("a").map(String::as_str), Some("1"));
        assert_eq!(h1.get("b").map(String::as_str), Some("3"));

        let many = store
            .hgetall_many(&["h1".to_string(), "nope".to_string()])
            .await
            .unwrap();
        assert_eq!(many.len(), 2);
        assert!(many[1].is_empty());
    }

    #[tokio::test]
    async fn test_del_removes_any_type() {
        let store = MemoryStore::new();
        store.zadd("z", 1, "a").await.unwrap();
        store.set("s", "v").await.unwrap();
        store.hset_all("h", &[("f".into(), "v".into())]).await.unwrap();

        store
            .del(&["z".to_string(), "s".to_string(), "h".to_string()])
            .await
            .unwrap();

        assert_eq!(store.key_count().await, 0);
    }

    #[tokio::test]
    async fn test_incr_creates_and_increments() {
        let store = MemoryStore::new();
        assert_eq!(store.incr("n").await.unwrap(), 1);
        assert_eq!(store.incr("n").await.unwrap(), 2);
        assert_eq!(store.get("n").await.unwrap().as_deref(), Some("2"));

        store.set("bad", "x").await.unwrap();
        assert!(store.incr("bad").await.is_err());
    }

    #[tokio::test]
    async fn test_incr_overflow_is_error() {
        let store = MemoryStore::new();
        store.set("n", &i64::MAX.to_string()).await.unwrap();

        let err = store.incr("n").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(store.get("n").await.unwrap(), Some(i64::MAX.to_string()));
    }

    #[tokio::test]
    async fn test_smembers_and_del_on_plain_sets() {
        let store = MemoryStore::new();
        store.sadd("s", "b").await;
        store.sadd("s", "a").await;
        store.sadd("s", "a").await;

        let mut members = store.smembers("s").await.unwrap();
        members.sort();
        assert_eq!(members, vec!["a", "b"]);
        assert!(store.smembers("missing").await.unwrap().is_empty());

        store.del(&["s".to_string()]).await.unwrap();
        assert_eq!(store.key_count().await, 0);
    }
}
