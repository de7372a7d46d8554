pub mod atom;
pub mod classify;
pub mod poller;
pub mod queue;
pub mod seen;

pub use atom::AtomFetcher;
pub use classify::{classify, match_project, Decision};
pub use poller::FeedPoller;
pub use queue::NotificationQueue;
pub use seen::SeenTracker;
