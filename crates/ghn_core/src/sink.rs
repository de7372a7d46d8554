use async_trait::async_trait;

use crate::types::NotificationRecord;
use crate::Result;

/// Consumer side of the pipeline: makes one record visible to the user.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn show(&self, record: &NotificationRecord) -> Result<()>;
}
