//! Key-value store abstraction
//!
//! The roster keeps all state in a remote key-value store. Only a handful of
//! primitives are needed: sorted-set add and full range read, plain-set
//! read, field-map write and (bulk) read, key delete, and plain string
//! get/set/increment.
//!
//! The store handle is created once at process start and passed to every
//! service as `Arc<dyn KvStore>`.

use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Shared store handle
pub type SharedStore = Arc<dyn KvStore>;

/// Primitive operations required from the backing key-value store
///
/// None of these are transactional together; a failure part-way through a
/// sequence of calls leaves earlier writes in place.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Short backend name for logging
    fn backend_tag(&self) -> &'static str;

    /// Add `member` to the sorted set at `key` with `score` (updates the
    /// score if already present)
    async fn zadd(&self, key: &str, score: i64, member: &str) -> Result<()>;

    /// All members of the sorted set at `key`, ascending by score
    ///
    /// Members with equal scores come back in lexicographic order. A missing
    /// key yields an empty list.
    async fn zrange_all(&self, key: &str) -> Result<Vec<String>>;

    /// Write the given fields into the field map at `key`
    async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<()>;

    /// Read the whole field map at `key` (empty map when missing)
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>>;

    /// Read several field maps at once, in the order of `keys`
    async fn hgetall_many(&self, keys: &[String]) -> Result<Vec<HashMap<String, String>>>;

    /// All members of the plain set at `key`, in no particular order
    async fn smembers(&self, key: &str) -> Result<Vec<String>>;

    /// Delete the given keys, whatever their type
    async fn del(&self, keys: &[String]) -> Result<()>;

    /// Read a plain string value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a plain string value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Increment an integer counter, creating it at 0 first if missing
    async fn incr(&self, key: &str) -> Result<i64>;
}

/// Builds the namespaced keys used by the roster and its companions
#[derive(Debug, Clone)]
pub struct Keys {
    namespace: String,
}

impl Keys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Sorted set of entry ids scored by display order
    pub fn member_order(&self) -> String {
        format!("{}:miembros_orden", self.namespace)
    }

    /// Plain set of entry ids written by the older, unordered layout
    ///
    /// Read for compatibility and removed by a clear; never written.
    pub fn legacy_members(&self) -> String {
        format!("{}:miembros_ids", self.namespace)
    }

    /// Field map of one roster entry
    pub fn member(&self, id: &str) -> String {
        format!("{}:miembro:{}", self.namespace, id)
    }

    pub fn announcement(&self) -> String {
        format!("{}:anuncio", self.namespace)
    }

    pub fn high_score(&self) -> String {
        format!("{}:highscore", self.namespace)
    }

    pub fn total_games(&self) -> String {
        format!("{}:total_games", self.namespace)
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::new("fiesta")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let keys = Keys::new("fiesta");
        assert_eq!(keys.member_order(), "fiesta:miembros_orden");
        assert_eq!(keys.legacy_members(), "fiesta:miembros_ids");
        assert_eq!(keys.member("abc"), "fiesta:miembro:abc");
        assert_eq!(keys.announcement(), "fiesta:anuncio");
        assert_eq!(keys.high_score(), "fiesta:highscore");
        assert_eq!(keys.total_games(), "fiesta:total_games");
    }

    #[test]
    fn test_namespace_is_applied() {
        let keys = Keys::new("test-42");
        assert_eq!(keys.member("x"), "test-42:miembro:x");
        assert_eq!(keys.namespace(), "test-42");
    }
}
