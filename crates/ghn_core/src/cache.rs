use async_trait::async_trait;
use std::path::PathBuf;

use crate::Result;

/// Persistent key to bytes store backing user metadata and avatars.
#[async_trait]
pub trait InfoCache: Send + Sync {
    /// Stored bytes for a key, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn put(&self, key: &str, data: &[u8]) -> Result<()>;

    async fn contains(&self, key: &str) -> Result<bool>;

    /// Local path a key resolves to, whether or not it is populated yet.
    fn path_for(&self, key: &str) -> PathBuf;
}
