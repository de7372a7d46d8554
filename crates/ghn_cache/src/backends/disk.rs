use async_trait::async_trait;
use std::path::PathBuf;

use ghn_core::{Error, InfoCache, Result};

/// File-per-key store under a single cache directory, the layout being
/// `<root>/{login}.json`, `<root>/{login}_orgs.json`, `<root>/{login}.jpg`.
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Opens the cache, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Default root under the platform cache directory.
    pub fn default_root() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|dir| dir.join("ghn"))
            .ok_or_else(|| Error::Cache("no cache directory available".to_string()))
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl InfoCache for DiskCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        tokio::fs::write(self.path_for(key), data).await?;
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.path_for(key)).await?)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}
