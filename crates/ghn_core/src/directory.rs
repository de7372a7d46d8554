use async_trait::async_trait;

use crate::types::UserRecord;
use crate::Result;

/// Resolves author handles to display metadata.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve an author string to a displayable user record.
    async fn resolve(&self, author: &str) -> Result<UserRecord>;

    /// Organization handles the given login belongs to.
    async fn organizations(&self, login: &str) -> Result<Vec<String>>;
}
