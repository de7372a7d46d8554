use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use ghn_core::types::BLOG_AUTHOR;
use ghn_core::{
    Entry, FeedFetcher, FeedSource, FilterConfig, NotificationBatch, NotificationRecord,
    PollSettings, UserDirectory, UserRecord,
};

use crate::classify::{classify, Decision};
use crate::queue::NotificationQueue;
use crate::seen::SeenTracker;

/// Runs the poll cycle: fetch every configured feed, drop entries already
/// seen, order and cap the remainder, filter and enrich what is left, and
/// emit the result as one batch.
///
/// Owns the seen-id state; exactly one poller instance drives a given set
/// of feeds for the process lifetime.
pub struct FeedPoller {
    feeds: Vec<FeedSource>,
    fetcher: Arc<dyn FeedFetcher>,
    users: Arc<dyn UserDirectory>,
    filter: FilterConfig,
    settings: PollSettings,
    seen: SeenTracker,
    queue: NotificationQueue,
}

impl FeedPoller {
    pub fn new(
        feeds: Vec<FeedSource>,
        fetcher: Arc<dyn FeedFetcher>,
        users: Arc<dyn UserDirectory>,
        filter: FilterConfig,
        settings: PollSettings,
        queue: NotificationQueue,
    ) -> Self {
        Self {
            feeds,
            fetcher,
            users,
            filter,
            settings,
            seen: SeenTracker::new(),
            queue,
        }
    }

    /// One full cycle. The returned batch has also been pushed onto the
    /// queue as a single unit, empty or not.
    pub async fn run_cycle(&mut self) -> NotificationBatch {
        let fresh = self.collect_new().await;
        info!(
            "collected {} new entries across {} feeds",
            fresh.len(),
            self.feeds.len()
        );

        let batch = self.build_batch(fresh).await;
        self.queue.push(batch.clone());
        batch
    }

    /// Fetches every feed and keeps the entries not seen before, in
    /// feed-list order. Fetches run concurrently; a failed feed just
    /// contributes nothing this cycle.
    async fn collect_new(&mut self) -> Vec<Entry> {
        let fetches = self.feeds.iter().map(|source| {
            let fetcher = self.fetcher.clone();
            async move {
                debug!("fetching feed {}", source.url);
                match fetcher.fetch(source).await {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!("failed to fetch {}: {}", source.url, e);
                        Vec::new()
                    }
                }
            }
        });
        let results = join_all(fetches).await;

        let mut fresh = Vec::new();
        for (source, entries) in self.feeds.iter().zip(results) {
            for mut entry in entries {
                if !self.seen.mark_if_new(&entry.id) {
                    continue;
                }
                if source.blog {
                    entry.author = BLOG_AUTHOR.to_string();
                }
                fresh.push(entry);
            }
        }
        fresh
    }

    /// Orders the collected entries by update time (stable, so ties keep
    /// feed order), keeps the most recent `max_items`, then filters and
    /// enriches each survivor.
    async fn build_batch(&self, mut entries: Vec<Entry>) -> NotificationBatch {
        entries.sort_by(|a, b| a.updated.cmp(&b.updated));

        if entries.len() > self.settings.max_items {
            entries.drain(..entries.len() - self.settings.max_items);
        }

        let mut batch = Vec::new();
        let mut resolved: HashMap<String, UserRecord> = HashMap::new();

        for entry in &entries {
            match classify(entry, &self.filter) {
                Decision::Include => {}
                Decision::Skip => {
                    debug!("skipping entry by {}", entry.primary_author());
                    continue;
                }
                Decision::HaltBatch => {
                    info!("blacklisted project hit, dropping the rest of this cycle");
                    break;
                }
            }

            let user = match resolved.get(&entry.author) {
                Some(user) => user.clone(),
                None => {
                    let user = self.resolve_user(&entry.author).await;
                    resolved.insert(entry.author.clone(), user.clone());
                    user
                }
            };

            batch.push(self.build_record(entry, &user));
        }

        batch
    }

    async fn resolve_user(&self, author: &str) -> UserRecord {
        match self.users.resolve(author).await {
            Ok(user) => user,
            Err(e) => {
                warn!("failed to resolve {}: {}", author, e);
                UserRecord {
                    login: author.split_whitespace().next().unwrap_or(author).to_string(),
                    display_name: None,
                    avatar_path: PathBuf::new(),
                    organizations: Vec::new(),
                }
            }
        }
    }

    fn build_record(&self, entry: &Entry, user: &UserRecord) -> NotificationRecord {
        let message = if self.settings.hyperlinks && !entry.link.is_empty() {
            hyperlink_message(&entry.title, &entry.link)
        } else {
            entry.title.clone()
        };

        let icon = if entry.author == BLOG_AUTHOR {
            self.settings.blog_icon.clone()
        } else {
            user.avatar_path.clone()
        };

        NotificationRecord {
            title: user.title().to_string(),
            message,
            icon,
        }
    }
}

/// Embeds the entry link on the second word of the title, for notification
/// servers that render body hyperlinks. One-word titles stay untouched.
fn hyperlink_message(title: &str, link: &str) -> String {
    let mut parts: Vec<String> = title.split(' ').map(str::to_string).collect();
    if parts.len() > 1 {
        parts[1] = format!("<a href=\"{}\">{}</a>", link, parts[1]);
    }
    parts.join(" ")
}
