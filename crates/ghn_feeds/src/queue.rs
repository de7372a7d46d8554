use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ghn_core::NotificationBatch;

/// Hand-off between the poll schedule and the display schedule.
///
/// One producer, one consumer. Push and drain both return immediately, so
/// neither schedule can stall the other; batches cross as single units.
#[derive(Clone, Default)]
pub struct NotificationQueue {
    batches: Arc<Mutex<VecDeque<NotificationBatch>>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one cycle's batch.
    pub fn push(&self, batch: NotificationBatch) {
        self.batches.lock().unwrap().push_back(batch);
    }

    /// Take every batch queued so far, oldest first.
    pub fn drain(&self) -> Vec<NotificationBatch> {
        self.batches.lock().unwrap().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghn_core::NotificationRecord;
    use std::path::PathBuf;

    fn record(title: &str) -> NotificationRecord {
        NotificationRecord {
            title: title.to_string(),
            message: "m".to_string(),
            icon: PathBuf::new(),
        }
    }

    #[test]
    fn drain_returns_batches_in_push_order() {
        let queue = NotificationQueue::new();
        queue.push(vec![record("first")]);
        queue.push(vec![record("second")]);

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0][0].title, "first");
        assert_eq!(drained[1][0].title, "second");
        assert!(queue.is_empty());
    }

    #[test]
    fn drain_on_empty_returns_immediately() {
        let queue = NotificationQueue::new();
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn batches_survive_as_units() {
        let queue = NotificationQueue::new();
        queue.push(vec![record("a"), record("b")]);
        queue.push(vec![]);

        let drained = queue.drain();
        assert_eq!(drained[0].len(), 2);
        assert!(drained[1].is_empty());
    }

    #[test]
    fn clones_share_the_same_queue() {
        let producer = NotificationQueue::new();
        let consumer = producer.clone();
        producer.push(vec![record("x")]);
        assert_eq!(consumer.drain().len(), 1);
        assert!(producer.is_empty());
    }
}
