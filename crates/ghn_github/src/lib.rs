pub mod urls;
pub mod users;

pub use urls::{build_feed_list, BLOG_FEED_URL};
pub use users::UserInfoCache;
