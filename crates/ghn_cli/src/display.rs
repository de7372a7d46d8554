use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use ghn_core::{NotificationRecord, NotificationSink, Result};

/// Prints notifications to the terminal, standing in for a desktop
/// notification server. The display timeout is carried as metadata for
/// sinks that can honor it.
pub struct ConsoleSink {
    timeout: Option<Duration>,
}

impl ConsoleSink {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl NotificationSink for ConsoleSink {
    async fn show(&self, record: &NotificationRecord) -> Result<()> {
        println!("{}: {}", record.title, record.message);
        debug!(
            "displayed notification (icon {}, timeout {:?})",
            record.icon.display(),
            self.timeout
        );
        Ok(())
    }
}
