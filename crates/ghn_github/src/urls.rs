use ghn_core::{FeedSource, FilterConfig};

pub const BLOG_FEED_URL: &str = "https://github.com/blog.atom";

/// Feed set for one account: the personal feed, the actor feed, optionally
/// the blog, and one feed per followed organization.
///
/// The organization blacklist applies here, so excluded organizations never
/// reach the poller at all.
pub fn build_feed_list(
    user: &str,
    token: &str,
    blog: bool,
    organizations: &[String],
    filter: &FilterConfig,
) -> Vec<FeedSource> {
    let mut feeds = vec![
        FeedSource::new(format!(
            "https://github.com/{}.private.atom?token={}",
            user, token
        )),
        FeedSource::new(format!(
            "https://github.com/{}.private.actor.atom?token={}",
            user, token
        )),
    ];

    if blog {
        feeds.push(FeedSource::blog(BLOG_FEED_URL));
    }

    if filter.organizations {
        for org in organizations {
            if filter.blacklist_organizations
                && filter.blacklist_organization_list.iter().any(|o| o == org)
            {
                continue;
            }
            feeds.push(FeedSource::new(format!(
                "https://github.com/organizations/{}/{}.private.atom?token={}",
                org, user, token
            )));
        }
    }

    feeds
}
