use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use ghn_core::{InfoCache, Result};

/// In-memory cache for tests and ephemeral runs. Paths returned by
/// `path_for` are synthetic and never backed by a file.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InfoCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(key))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        PathBuf::from("mem").join(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrip() {
        let cache = MemoryCache::new();

        assert!(cache.get("k").await.unwrap().is_none());
        cache.put("k", b"data").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().unwrap(), b"data");
        assert!(cache.contains("k").await.unwrap());
    }

    #[tokio::test]
    async fn put_overwrites() {
        let cache = MemoryCache::new();
        cache.put("k", b"old").await.unwrap();
        cache.put("k", b"new").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().unwrap(), b"new");
    }
}
