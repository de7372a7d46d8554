use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Author assigned to every entry collected from the blog feed.
pub const BLOG_AUTHOR: &str = "GitHub Blog";

/// One activity event or blog post, as parsed out of a feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Globally unique within a feed, used as the dedup key.
    pub id: String,
    pub author: String,
    pub title: String,
    pub link: String,
    pub updated: DateTime<Utc>,
    pub authors: Vec<EntryAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryAuthor {
    pub name: String,
}

impl Entry {
    /// Canonical author name used by the filter rules. Entries with an
    /// empty author list fall back to the display author field.
    pub fn primary_author(&self) -> &str {
        self.authors
            .first()
            .map(|a| a.name.as_str())
            .unwrap_or(&self.author)
    }
}

/// A feed URL, optionally flagged as the blog feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSource {
    pub url: String,
    pub blog: bool,
}

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            blog: false,
        }
    }

    pub fn blog(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            blog: true,
        }
    }
}

/// Display metadata for one login, resolved through the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub login: String,
    pub display_name: Option<String>,
    pub avatar_path: PathBuf,
    pub organizations: Vec<String>,
}

impl UserRecord {
    /// Name shown as the notification title.
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.login)
    }
}

/// One ready-to-display notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub title: String,
    pub message: String,
    pub icon: PathBuf,
}

/// Everything one poll cycle produced, handed over as a single unit.
pub type NotificationBatch = Vec<NotificationRecord>;
