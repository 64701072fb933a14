use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::GithubError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "profilecard";
const PAGE_SIZE: &str = "100";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY: usize = 200;
const MAX_HANDLE_LEN: usize = 39;

/// Subset of `GET /users/{handle}` we care about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub stargazers_count: u64,
}

/// One entry of the public activity feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: Value,
}

impl Event {
    pub fn is_push(&self) -> bool {
        self.kind == "PushEvent"
    }

    /// Number of commits carried by a push payload (0 for anything else).
    pub fn commit_count(&self) -> u64 {
        self.payload
            .get("commits")
            .and_then(Value::as_array)
            .map(|commits| commits.len() as u64)
            .unwrap_or(0)
    }
}

/// `/users/{handle}{suffix}`, refusing anything that is not a GitHub login
/// (ASCII alphanumerics and single inner hyphens, at most 39 characters).
fn user_path(handle: &str, suffix: &str) -> Result<String, GithubError> {
    let valid = !handle.is_empty()
        && handle.len() <= MAX_HANDLE_LEN
        && handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !handle.starts_with('-')
        && !handle.ends_with('-')
        && !handle.contains("--");

    if !valid {
        return Err(GithubError::InvalidHandle {
            handle: handle.to_string(),
        });
    }
    Ok(format!("/users/{handle}{suffix}"))
}

#[derive(Deserialize)]
struct SearchResponse {
    total_count: u64,
}

/// Read-only view of a remote source-hosting service.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn user(&self, handle: &str) -> Result<UserProfile, GithubError>;

    /// First page (up to 100) of the handle's repositories, most recently updated first.
    async fn repositories(&self, handle: &str) -> Result<Vec<Repository>, GithubError>;

    /// First page (up to 100) of the handle's public activity events.
    async fn public_events(&self, handle: &str) -> Result<Vec<Event>, GithubError>;

    /// `total_count` reported by the issue/PR search for `query`.
    async fn search_total(&self, query: &str) -> Result<u64, GithubError>;
}

#[derive(Clone)]
pub struct GithubClient {
    token: Arc<String>,
    http: Arc<Client>,
    base_url: Arc<String>,
}

impl GithubClient {
    /// Create a GitHub REST client authenticated with `token`.
    pub fn new(token: impl Into<String>, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            token: Arc::new(token.into()),
            http: Arc::new(http),
            base_url: Arc::new(base_url.trim_end_matches('/').to_string()),
        })
    }

    /// Low-level GET with status checking. Single attempt, no retry.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GithubError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, ?query, "GET");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&*self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .query(query)
            .send()
            .await
            .map_err(|source| GithubError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|source| GithubError::Transport {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(GithubError::Status {
                status: status.as_u16(),
                url,
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|source| GithubError::Decode { url, source })
    }
}

#[async_trait]
impl ProfileSource for GithubClient {
    async fn user(&self, handle: &str) -> Result<UserProfile, GithubError> {
        self.get_json(&user_path(handle, "")?, &[]).await
    }

    async fn repositories(&self, handle: &str) -> Result<Vec<Repository>, GithubError> {
        self.get_json(
            &user_path(handle, "/repos")?,
            &[("per_page", PAGE_SIZE), ("sort", "updated")],
        )
        .await
    }

    async fn public_events(&self, handle: &str) -> Result<Vec<Event>, GithubError> {
        self.get_json(
            &user_path(handle, "/events/public")?,
            &[("per_page", PAGE_SIZE)],
        )
        .await
    }

    async fn search_total(&self, query: &str) -> Result<u64, GithubError> {
        let parsed: SearchResponse = self
            .get_json("/search/issues", &[("q", query), ("per_page", "1")])
            .await?;
        Ok(parsed.total_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_profile_tolerates_nulls() {
        let json = r#"{
            "login": "octocat",
            "name": null,
            "location": "San Francisco",
            "bio": null,
            "company": "@github",
            "blog": "",
            "followers": 42,
            "following": 7
        }"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.name, None);
        assert_eq!(user.location.as_deref(), Some("San Francisco"));
        assert_eq!(user.blog.as_deref(), Some(""));
        assert_eq!(user.followers, 42);
        assert_eq!(user.following, 7);
    }

    #[test]
    fn push_event_counts_commits() {
        let json = r#"{
            "type": "PushEvent",
            "created_at": "2026-03-01T10:00:00Z",
            "payload": { "commits": [{"sha": "a"}, {"sha": "b"}] }
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.is_push());
        assert_eq!(event.commit_count(), 2);
    }

    #[test]
    fn non_push_event_without_payload_has_no_commits() {
        let json = r#"{ "type": "WatchEvent", "created_at": "2026-03-01T10:00:00Z" }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(!event.is_push());
        assert_eq!(event.commit_count(), 0);
    }

    #[test]
    fn repository_missing_stars_defaults_to_zero() {
        let repos: Vec<Repository> =
            serde_json::from_str(r#"[{"name": "a", "stargazers_count": 3}, {"name": "b"}]"#)
                .unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].stargazers_count, 3);
        assert_eq!(repos[1].stargazers_count, 0);
    }

    #[test]
    fn user_path_accepts_logins() {
        assert_eq!(user_path("octocat", "").unwrap(), "/users/octocat");
        assert_eq!(
            user_path("Dineshs737", "/repos").unwrap(),
            "/users/Dineshs737/repos"
        );
        assert_eq!(
            user_path("mona-lisa", "/events/public").unwrap(),
            "/users/mona-lisa/events/public"
        );
    }

    #[test]
    fn user_path_rejects_path_and_query_characters() {
        for bad in ["", "octo/cat", "octo?x=1", "../admin", "octo cat", "-octo", "octo--cat"] {
            let err = user_path(bad, "").unwrap_err();
            assert!(
                matches!(err, GithubError::InvalidHandle { ref handle } if handle == bad),
                "{bad:?} should be rejected"
            );
        }
        assert!(user_path(&"a".repeat(40), "").is_err());
    }

    #[tokio::test]
    async fn invalid_handle_fails_before_any_request() {
        let client = GithubClient::new("token", "http://127.0.0.1:9").unwrap();
        let err = client.repositories("octo/cat").await.unwrap_err();
        assert!(matches!(err, GithubError::InvalidHandle { .. }));
    }

    #[test]
    fn client_trims_trailing_slash_from_base_url() {
        let client = GithubClient::new("token", "https://example.test/api/").unwrap();
        assert_eq!(client.base_url.as_str(), "https://example.test/api");
    }
}
