//! HTTP client for the two GitHub endpoints the tracker uses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use tracker::ports::{FollowingSource, RelationshipChecker};
use tracker::{CheckError, FetchError, Followee, Login, PageNumber, PageSize, Username};

use crate::classify::{classify_check, classify_listing};
use crate::wire::decode_followees;

/// Public GitHub REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// Errors building a [`GithubClient`].
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("API token contains characters not allowed in a header")]
    InvalidToken,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Optional token sent as a bearer credential. Raises the request quota.
    pub token: Option<String>,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: concat!("following-tracker/", env!("CARGO_PKG_VERSION")).to_owned(),
            token: None,
            timeout: None,
        }
    }
}

/// GitHub REST client implementing both tracker ports.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    base_url: Url,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| GithubError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GithubError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "not a hierarchical URL".to_owned(),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| GithubError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// `{base}/users/{username}/following?per_page={n}&page={p}`
pub fn following_url(base: &Url, username: &str, page: PageNumber, per_page: PageSize) -> Url {
    let mut url = endpoint(base, &["users", username, "following"]);
    url.query_pairs_mut()
        .append_pair("per_page", &per_page.get().to_string())
        .append_pair("page", &page.get().to_string());
    url
}

/// `{base}/users/{follower}/following/{target}`
pub fn relationship_url(base: &Url, follower: &str, target: &str) -> Url {
    endpoint(base, &["users", follower, "following", target])
}

fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[async_trait]
impl FollowingSource for GithubClient {
    #[instrument(skip_all, fields(username = %username, page = %page))]
    async fn list_following(
        &self,
        username: &Username,
        page: PageNumber,
        per_page: PageSize,
    ) -> Result<Vec<Followee>, FetchError> {
        let url = following_url(&self.base_url, username.as_str(), page, per_page);
        debug!(%url, "GET following");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        classify_listing(response.status(), response.headers())?;

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        decode_followees(&body).map_err(|e| {
            warn!(error = %e, "undecodable followee listing");
            FetchError::Transport(e.to_string())
        })
    }
}

#[async_trait]
impl RelationshipChecker for GithubClient {
    #[instrument(skip_all, fields(follower = %follower, target = %target))]
    async fn is_following(&self, follower: &Login, target: &Login) -> Result<bool, CheckError> {
        let url = relationship_url(&self.base_url, follower.as_str(), target.as_str());
        debug!(%url, "GET relationship");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CheckError::Transport(e.to_string()))?;

        classify_check(response.status(), response.headers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse(DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn following_url_carries_pagination() {
        let url = following_url(
            &base(),
            "alice",
            PageNumber::new(3).unwrap(),
            PageSize::DEFAULT,
        );
        assert_eq!(
            url.as_str(),
            "https://api.github.com/users/alice/following?per_page=10&page=3"
        );
    }

    #[test]
    fn relationship_url_orders_follower_then_target() {
        let url = relationship_url(&base(), "bob", "alice");
        assert_eq!(url.as_str(), "https://api.github.com/users/bob/following/alice");
    }

    #[test]
    fn base_url_with_path_prefix_is_kept() {
        let base = Url::parse("https://ghe.example.com/api/v3/").unwrap();
        let url = relationship_url(&base, "bob", "alice");
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/users/bob/following/alice"
        );
    }

    #[test]
    fn username_is_escaped_as_a_single_segment() {
        let url = following_url(&base(), "a/b?c", PageNumber::FIRST, PageSize::DEFAULT);
        assert!(url.path().starts_with("/users/a%2Fb%3Fc/following"));
    }

    #[test]
    fn rejects_unusable_base_urls() {
        let config = GithubConfig {
            base_url: "not a url".into(),
            ..GithubConfig::default()
        };
        assert!(matches!(
            GithubClient::new(&config),
            Err(GithubError::InvalidBaseUrl { .. })
        ));

        let config = GithubConfig {
            base_url: "mailto:someone@example.com".into(),
            ..GithubConfig::default()
        };
        assert!(matches!(
            GithubClient::new(&config),
            Err(GithubError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn rejects_token_with_newline() {
        let config = GithubConfig {
            token: Some("abc\ndef".into()),
            ..GithubConfig::default()
        };
        assert!(matches!(
            GithubClient::new(&config),
            Err(GithubError::InvalidToken)
        ));
    }

    #[test]
    fn builds_with_defaults() {
        let client = GithubClient::new(&GithubConfig::default()).unwrap();
        assert_eq!(client.base_url().host_str(), Some("api.github.com"));
    }
}
