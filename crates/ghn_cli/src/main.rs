mod config;
mod display;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use ghn_cache::DiskCache;
use ghn_core::{Error, FilterConfig, NotificationSink, PollSettings, Result, UserDirectory};
use ghn_feeds::{AtomFetcher, FeedPoller, NotificationQueue};
use ghn_github::{build_feed_list, UserInfoCache};

use crate::config::FileConfig;
use crate::display::ConsoleSink;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DISPLAY_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(name = "ghn", version, about = "GitHub activity feed notifier")]
struct Cli {
    /// Feed update interval in seconds
    #[arg(short = 'i', long, default_value_t = 300)]
    update_interval: u64,

    /// Maximum number of items displayed per update
    #[arg(short = 'm', long, default_value_t = 3)]
    max_items: usize,

    /// Notification display timeout in seconds
    #[arg(short = 't', long)]
    display_timeout: Option<u64>,

    /// Also watch the GitHub blog feed
    #[arg(short = 'b', long)]
    blog: bool,

    /// Only show entries from the important-authors list
    #[arg(short = 'a', long)]
    important_authors: bool,

    /// Only show entries from the important-projects list
    #[arg(short = 'p', long)]
    important_projects: bool,

    /// Hide entries from the blacklist-authors list
    #[arg(short = 'u', long)]
    blacklist_authors: bool,

    /// Stop a cycle at the first entry from the blacklist-projects list
    #[arg(short = 'r', long)]
    blacklist_projects: bool,

    /// Watch the feeds of the account's organizations
    #[arg(short = 'o', long, default_value_t = true, action = clap::ArgAction::Set)]
    organizations: bool,

    /// Drop blacklisted organizations from the watched feeds
    #[arg(short = 'k', long)]
    blacklist_organizations: bool,

    /// Embed the entry link into the notification body
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    hyperlinks: bool,

    /// Icon shown for blog entries
    #[arg(long, default_value = "octocat.png")]
    blog_icon: PathBuf,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cache directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// GitHub account, overriding the config file
    #[arg(long)]
    user: Option<String>,

    /// API token for the private feeds, overriding the config file
    #[arg(long)]
    token: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn build_filter(cli: &Cli, file: &FileConfig) -> FilterConfig {
    FilterConfig {
        important_authors: cli.important_authors,
        important_projects: cli.important_projects,
        blacklist_authors: cli.blacklist_authors,
        blacklist_projects: cli.blacklist_projects,
        organizations: cli.organizations,
        blacklist_organizations: cli.blacklist_organizations,
        important_author_list: file.important.authors.clone(),
        important_project_list: file.important.projects.clone(),
        blacklist_author_list: file.blacklist.authors.clone(),
        blacklist_project_list: file.blacklist.projects.clone(),
        blacklist_organization_list: file.blacklist.organizations.clone(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let file = FileConfig::load(cli.config.as_deref())?;

    let settings = PollSettings {
        interval: Duration::from_secs(cli.update_interval),
        max_items: cli.max_items,
        hyperlinks: cli.hyperlinks,
        blog: cli.blog,
        blog_icon: cli.blog_icon.clone(),
    };
    settings.validate()?;

    let user = cli.user.clone().unwrap_or_else(|| file.account.user.clone());
    let token = cli.token.clone().unwrap_or_else(|| file.account.token.clone());
    if user.is_empty() || token.is_empty() {
        return Err(Error::Config(
            "a GitHub user and token are required ([account] in the config file, or --user/--token)"
                .to_string(),
        ));
    }

    let filter = build_filter(&cli, &file);

    let cache_root = match cli.cache_dir.clone() {
        Some(dir) => dir,
        None => DiskCache::default_root()?,
    };
    let cache = Arc::new(DiskCache::new(cache_root)?);
    let users = Arc::new(UserInfoCache::new(cache, REQUEST_TIMEOUT)?);

    let organizations = if filter.organizations {
        users.organizations(&user).await?
    } else {
        Vec::new()
    };

    let feeds = build_feed_list(&user, &token, settings.blog, &organizations, &filter);
    info!("watching {} feeds for {}", feeds.len(), user);

    let fetcher = Arc::new(AtomFetcher::new(REQUEST_TIMEOUT)?);
    let queue = NotificationQueue::new();
    let interval = settings.interval;
    let mut poller = FeedPoller::new(feeds, fetcher, users, filter, settings, queue.clone());

    // Producer schedule: one cycle, then sleep. A slow cycle delays the
    // next interval rather than overlapping it.
    tokio::spawn(async move {
        loop {
            let batch = poller.run_cycle().await;
            info!("cycle produced {} notifications", batch.len());
            tokio::time::sleep(interval).await;
        }
    });

    // Consumer schedule: drain whatever is queued, never wait on the
    // producer.
    let sink = ConsoleSink::new(cli.display_timeout.map(Duration::from_secs));
    loop {
        for batch in queue.drain() {
            for record in batch {
                if let Err(e) = sink.show(&record).await {
                    error!("failed to display notification: {}", e);
                }
            }
        }
        tokio::time::sleep(DISPLAY_INTERVAL).await;
    }
}
