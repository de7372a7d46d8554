use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use ghn_core::{InfoCache, Result, UserDirectory, UserRecord};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Fallback avatar used when a profile carries no `avatar_url`.
const PLACEHOLDER_AVATAR_URL: &str = "http://www.gravatar.com/avatar/?s=48";

#[derive(Debug, Deserialize)]
struct ProfilePayload {
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl ProfilePayload {
    /// Minimal stand-in when the remote profile is unreachable.
    fn fallback(login: &str) -> Self {
        Self {
            login: login.to_string(),
            name: None,
            avatar_url: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrgPayload {
    login: String,
}

/// Resolves author handles to display metadata, backed by a persistent
/// cache with network fallback.
///
/// Profiles and organization lists are cached once per login; avatars are
/// fetched at most once per cache lifetime. Failed fetches are never
/// persisted, so a later cycle may retry them.
pub struct UserInfoCache {
    client: reqwest::Client,
    cache: Arc<dyn InfoCache>,
    api_base: String,
}

impl UserInfoCache {
    pub fn new(cache: Arc<dyn InfoCache>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("ghn")
            .build()?;
        Ok(Self {
            client,
            cache,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Points profile lookups at a different API root.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Author strings may be full display names; the handle is the first
    /// whitespace-separated token.
    fn login_of(author: &str) -> &str {
        author.split_whitespace().next().unwrap_or(author)
    }

    async fn profile(&self, login: &str) -> Result<ProfilePayload> {
        let key = format!("{}.json", login);
        if let Some(data) = self.cache.get(&key).await? {
            return Ok(serde_json::from_slice(&data)?);
        }

        let url = format!("{}/users/{}", self.api_base, login);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let data = response.bytes().await?;
                self.cache.put(&key, &data).await?;
                Ok(serde_json::from_slice(&data)?)
            }
            Ok(response) => {
                warn!("profile fetch for {} returned {}", login, response.status());
                Ok(ProfilePayload::fallback(login))
            }
            Err(e) => {
                warn!("profile fetch for {} failed: {}", login, e);
                Ok(ProfilePayload::fallback(login))
            }
        }
    }

    /// Makes sure `{login}.jpg` has been fetched once and returns its cache
    /// path, populated or not. Callers tolerate a placeholder when offline.
    async fn ensure_avatar(&self, login: &str, avatar_url: Option<&str>) -> Result<PathBuf> {
        let key = format!("{}.jpg", login);
        if !self.cache.contains(&key).await? {
            let url = avatar_url.unwrap_or(PLACEHOLDER_AVATAR_URL);
            match self.client.get(url).send().await {
                Ok(response) if response.status().is_success() => {
                    let data = response.bytes().await?;
                    self.cache.put(&key, &data).await?;
                }
                Ok(response) => {
                    warn!("avatar fetch for {} returned {}", login, response.status())
                }
                Err(e) => warn!("avatar fetch for {} failed: {}", login, e),
            }
        }
        Ok(self.cache.path_for(&key))
    }
}

#[async_trait]
impl UserDirectory for UserInfoCache {
    async fn resolve(&self, author: &str) -> Result<UserRecord> {
        let login = Self::login_of(author);
        let profile = self.profile(login).await?;
        let avatar_path = self
            .ensure_avatar(login, profile.avatar_url.as_deref())
            .await?;
        let organizations = self.organizations(login).await?;

        Ok(UserRecord {
            login: profile.login,
            display_name: profile.name,
            avatar_path,
            organizations,
        })
    }

    async fn organizations(&self, login: &str) -> Result<Vec<String>> {
        let login = Self::login_of(login);
        let key = format!("{}_orgs.json", login);
        if let Some(data) = self.cache.get(&key).await? {
            let orgs: Vec<OrgPayload> = serde_json::from_slice(&data)?;
            return Ok(orgs.into_iter().map(|o| o.login).collect());
        }

        let url = format!("{}/users/{}/orgs", self.api_base, login);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let data = response.bytes().await?;
                self.cache.put(&key, &data).await?;
                let orgs: Vec<OrgPayload> = serde_json::from_slice(&data)?;
                Ok(orgs.into_iter().map(|o| o.login).collect())
            }
            Ok(response) => {
                warn!(
                    "organizations fetch for {} returned {}",
                    login,
                    response.status()
                );
                Ok(Vec::new())
            }
            Err(e) => {
                warn!("organizations fetch for {} failed: {}", login, e);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghn_cache::MemoryCache;

    // Nothing listens on this port; every network attempt fails fast and
    // exercises the fallback paths.
    const UNREACHABLE_BASE: &str = "http://127.0.0.1:1";

    fn users(cache: MemoryCache) -> UserInfoCache {
        UserInfoCache::new(Arc::new(cache), Duration::from_millis(250))
            .unwrap()
            .with_api_base(UNREACHABLE_BASE)
    }

    #[tokio::test]
    async fn cached_profile_is_served_without_network() {
        let cache = MemoryCache::new();
        cache
            .put(
                "octocat.json",
                br#"{"login": "octocat", "name": "The Octocat", "avatar_url": null}"#,
            )
            .await
            .unwrap();
        cache.put("octocat.jpg", b"jpeg").await.unwrap();
        cache.put("octocat_orgs.json", br#"[{"login": "acme"}]"#).await.unwrap();

        let record = users(cache).resolve("octocat").await.unwrap();
        assert_eq!(record.login, "octocat");
        assert_eq!(record.display_name.as_deref(), Some("The Octocat"));
        assert_eq!(record.organizations, vec!["acme".to_string()]);
        assert!(!record.avatar_path.as_os_str().is_empty());
    }

    #[tokio::test]
    async fn unreachable_profile_falls_back_to_login_only() {
        let record = users(MemoryCache::new()).resolve("ghost").await.unwrap();
        assert_eq!(record.login, "ghost");
        assert!(record.display_name.is_none());
        assert!(record.organizations.is_empty());
        // The avatar path is still usable as a placeholder location.
        assert!(!record.avatar_path.as_os_str().is_empty());
    }

    #[tokio::test]
    async fn failed_fetches_are_not_persisted() {
        let cache = MemoryCache::new();
        let directory = users(cache.clone());

        directory.resolve("ghost").await.unwrap();
        assert!(cache.get("ghost.json").await.unwrap().is_none());
        assert!(cache.get("ghost_orgs.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cached_avatar_is_not_refetched() {
        let cache = MemoryCache::new();
        cache
            .put("octocat.json", br#"{"login": "octocat"}"#)
            .await
            .unwrap();
        cache.put("octocat.jpg", b"original").await.unwrap();
        cache.put("octocat_orgs.json", b"[]").await.unwrap();

        let directory = users(cache.clone());
        directory.resolve("octocat").await.unwrap();
        directory.resolve("octocat").await.unwrap();

        // Two resolves later the cached bytes are untouched.
        assert_eq!(cache.get("octocat.jpg").await.unwrap().unwrap(), b"original");
    }

    #[tokio::test]
    async fn display_names_resolve_to_their_handle() {
        let cache = MemoryCache::new();
        cache
            .put("octocat.json", br#"{"login": "octocat"}"#)
            .await
            .unwrap();
        cache.put("octocat.jpg", b"jpeg").await.unwrap();
        cache.put("octocat_orgs.json", b"[]").await.unwrap();

        let record = users(cache).resolve("octocat lastname").await.unwrap();
        assert_eq!(record.login, "octocat");
    }
}
