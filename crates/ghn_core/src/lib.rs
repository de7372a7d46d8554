pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod sink;
pub mod types;

pub use cache::InfoCache;
pub use config::{FilterConfig, PollSettings};
pub use directory::UserDirectory;
pub use error::Error;
pub use fetch::FeedFetcher;
pub use sink::NotificationSink;
pub use types::{
    Entry, EntryAuthor, FeedSource, NotificationBatch, NotificationRecord, UserRecord,
};

pub type Result<T> = std::result::Result<T, Error>;
