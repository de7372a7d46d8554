use async_trait::async_trait;

use crate::types::{Entry, FeedSource};
use crate::Result;

/// Producer of parsed entries for one feed source.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch and parse one feed into entries, in document order.
    async fn fetch(&self, source: &FeedSource) -> Result<Vec<Entry>>;
}
