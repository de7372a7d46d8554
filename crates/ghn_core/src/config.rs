use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::{Error, Result};

/// Importance/blacklist toggles and the match lists they refer to.
///
/// The `*_list` fields are only consulted while the matching toggle is on,
/// so a populated list with its toggle off is inert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub important_authors: bool,
    pub important_projects: bool,
    pub blacklist_authors: bool,
    pub blacklist_projects: bool,
    /// Follow the feeds of the account's organizations.
    pub organizations: bool,
    pub blacklist_organizations: bool,

    pub important_author_list: Vec<String>,
    /// Patterns of the form `project` or `owner/project`.
    pub important_project_list: Vec<String>,
    pub blacklist_author_list: Vec<String>,
    pub blacklist_project_list: Vec<String>,
    pub blacklist_organization_list: Vec<String>,
}

/// Settings for the poll schedule itself.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_items: usize,
    /// Embed the entry link into the notification body.
    pub hyperlinks: bool,
    pub blog: bool,
    /// Icon used for blog entries instead of an avatar.
    pub blog_icon: PathBuf,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            max_items: 3,
            hyperlinks: true,
            blog: false,
            blog_icon: PathBuf::from("octocat.png"),
        }
    }
}

impl PollSettings {
    /// Fatal-at-startup checks, run before the first cycle.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::Config(
                "the update interval must be > 0".to_string(),
            ));
        }
        if self.max_items == 0 {
            return Err(Error::Config(
                "the maximum number of items must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
