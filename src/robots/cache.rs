//! Per-host robots.txt cache: the shared structure behind C2, Host Policy Cache.
//!
//! Keyed by `scheme://host`. Concurrent misses against the same host may each
//! issue a fetch; the last writer wins and subsequent readers see whatever
//! landed last, per the spec's stated tolerance for that race.

use crate::robots::parser::ParsedRobots;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

/// Thread-safe cache of parsed robots.txt policies, one per `scheme://host`.
pub struct HostPolicyCache {
    cache: RwLock<HashMap<String, ParsedRobots>>,
    client: reqwest::Client,
}

impl HostPolicyCache {
    /// Builds a cache backed by a dedicated HTTP client for robots.txt fetches,
    /// using its own (typically shorter) connect/read timeouts distinct from
    /// the page fetcher's client.
    pub fn new(
        user_agent: &str,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .connect_timeout(connect_timeout)
            .timeout(connect_timeout + read_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            cache: RwLock::new(HashMap::new()),
            client,
        })
    }

    fn origin_key(url: &Url) -> Option<String> {
        url.host_str()
            .map(|host| format!("{}://{}", url.scheme(), host))
    }

    /// Answers "may fetch?" for a single URL, fetching and caching the host's
    /// robots.txt on first access. Failures of any kind cache a permissive
    /// sentinel rather than leaving the host uncached.
    pub async fn may_fetch(&self, url: &Url, user_agent: &str) -> bool {
        let Some(key) = Self::origin_key(url) else {
            return true;
        };

        if let Some(robots) = self.cache.read().await.get(&key) {
            return robots.is_allowed(url.path(), user_agent);
        }

        let robots = self.fetch_and_parse(&key, user_agent).await;
        let allowed = robots.is_allowed(url.path(), user_agent);
        self.cache.write().await.insert(key, robots);
        allowed
    }

    async fn fetch_and_parse(&self, origin: &str, user_agent: &str) -> ParsedRobots {
        let robots_url = format!("{origin}/robots.txt");

        let response = self
            .client
            .get(&robots_url)
            .header("User-Agent", user_agent)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) => {
                    debug!(origin, "fetched robots.txt");
                    ParsedRobots::from_content(&body)
                }
                Err(e) => {
                    warn!(origin, error = %e, "failed to read robots.txt body, defaulting to allow");
                    ParsedRobots::allow_all()
                }
            },
            Ok(resp) => {
                debug!(origin, status = %resp.status(), "robots.txt non-200, defaulting to allow");
                ParsedRobots::allow_all()
            }
            Err(e) => {
                warn!(origin, error = %e, "robots.txt fetch failed, defaulting to allow");
                ParsedRobots::allow_all()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_when_cache_miss_and_unreachable_host() {
        let cache = HostPolicyCache::new(
            "test-agent/1.0",
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
        .unwrap();

        // Port 1 on localhost should refuse the connection promptly.
        let url = Url::parse("http://127.0.0.1:1/page").unwrap();
        assert!(cache.may_fetch(&url, "test-agent/1.0").await);
    }

    #[tokio::test]
    async fn second_lookup_uses_cached_policy_without_refetch() {
        let cache = HostPolicyCache::new(
            "test-agent/1.0",
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
        .unwrap();

        let url = Url::parse("http://127.0.0.1:1/page").unwrap();
        assert!(cache.may_fetch(&url, "test-agent/1.0").await);

        {
            let mut guard = cache.cache.write().await;
            guard.insert(
                "http://127.0.0.1:1".to_string(),
                ParsedRobots::from_content("User-agent: *\nDisallow: /"),
            );
        }

        assert!(!cache.may_fetch(&url, "test-agent/1.0").await);
    }
}
