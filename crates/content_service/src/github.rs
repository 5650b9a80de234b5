//! Hosting API client.

use async_trait::async_trait;
use common::Contents;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::settings::DEFAULT_API_URL;

/// Hosting API errors.
#[derive(Error, Debug)]
pub enum HostingError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Access token is not a valid header value")]
    InvalidToken,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Hosting API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Could not decode hosting API response: {0}")]
    Decode(String),
}

impl HostingError {
    /// One-line description without upstream payloads.
    pub fn summary(&self) -> String {
        match self {
            Self::InvalidUrl(_) => "invalid hosting API URL".to_string(),
            Self::InvalidToken => "invalid access token".to_string(),
            Self::Request(_) => "hosting API request failed".to_string(),
            Self::Status { status, .. } => format!("hosting API returned {status}"),
            Self::Decode(_) => "hosting API response was not a listing".to_string(),
        }
    }
}

/// Source of repository root listings.
#[async_trait]
pub trait ContentsApi: Send + Sync {
    /// Root contents of `owner/repo`, or `None` if the repository is unknown.
    async fn root_contents(&self, owner: &str, repo: &str) -> Result<Option<Contents>, HostingError>;
}

/// GitHub REST client holding the service credential.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: Url,
}

impl GitHubClient {
    /// Client for the public GitHub API.
    pub fn new(token: &str) -> Result<Self, HostingError> {
        Self::with_api_base(token, DEFAULT_API_URL)
    }

    /// Client for the API rooted at `api_base`.
    pub fn with_api_base(token: &str, api_base: &str) -> Result<Self, HostingError> {
        let api_base = Url::parse(api_base).map_err(|e| HostingError::InvalidUrl(format!("{api_base}: {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(HostingError::InvalidUrl(api_base.to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| HostingError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));

        let http = reqwest::Client::builder()
            .user_agent(concat!("content-service/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { http, api_base })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// `<base>/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, HostingError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| HostingError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url`. `Ok(None)` on 404, error on any other non-2xx.
    async fn get(&self, url: Url) -> Result<Option<reqwest::Response>, HostingError> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HostingError::Status { status, body });
        }
        Ok(Some(response))
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ContentsApi for GitHubClient {
    async fn root_contents(&self, owner: &str, repo: &str) -> Result<Option<Contents>, HostingError> {
        let repo_url = self.endpoint(&["repos", owner, repo])?;
        if self.get(repo_url).await?.is_none() {
            tracing::info!(owner, repo, "Repository not found");
            return Ok(None);
        }

        // An empty repository has no contents and answers 404 here.
        let contents_url = self.endpoint(&["repos", owner, repo, "contents", ""])?;
        let Some(response) = self.get(contents_url).await? else {
            tracing::info!(owner, repo, "Repository has no contents");
            return Ok(Some(Contents::empty()));
        };

        let body = response.bytes().await?;
        let contents: Contents = serde_json::from_slice(&body).map_err(|e| HostingError::Decode(e.to_string()))?;
        tracing::debug!(owner, repo, entries = contents.len(), "Fetched root contents");
        Ok(Some(contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::HeaderMap as RequestHeaders;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::net::SocketAddr;

    async fn spawn_server(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn authorized(headers: &RequestHeaders) -> bool {
        headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer ghp_test")
    }

    async fn repo(Path((owner, repo)): Path<(String, String)>, headers: RequestHeaders) -> axum::response::Response {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        match (owner.as_str(), repo.as_str()) {
            ("alice", _) => Json(json!({ "full_name": format!("alice/{repo}") })).into_response(),
            _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response(),
        }
    }

    async fn contents(Path((_owner, repo)): Path<(String, String)>) -> axum::response::Response {
        match repo.as_str() {
            "repo1" => Json(json!([{
                "name": "README.md",
                "path": "README.md",
                "sha": "abc",
                "size": 10,
                "url": "https://api.example/repos/alice/repo1/contents/README.md",
                "html_url": "https://example/alice/repo1/blob/main/README.md",
                "git_url": "https://api.example/git/blobs/abc",
                "download_url": "https://raw.example/alice/repo1/main/README.md",
                "type": "file",
                "_links": {}
            }]))
            .into_response(),
            "empty" => (StatusCode::NOT_FOUND, Json(json!({ "message": "This repository is empty." }))).into_response(),
            "garbled" => "not json".into_response(),
            _ => (StatusCode::FORBIDDEN, "rate limited").into_response(),
        }
    }

    async fn client() -> GitHubClient {
        let router = Router::new()
            .route("/api/v3/repos/{owner}/{repo}", get(repo))
            .route("/api/v3/repos/{owner}/{repo}/contents/", get(contents));
        let addr = spawn_server(router).await;
        GitHubClient::with_api_base("ghp_test", &format!("http://{addr}/api/v3/")).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = GitHubClient::with_api_base("t", "https://ghe.example/api/v3").unwrap();
        let url = client.endpoint(&["repos", "al ice", "re?po", "contents", ""]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example/api/v3/repos/al%20ice/re%3Fpo/contents/");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(
            GitHubClient::with_api_base("t", "mailto:api@example.com"),
            Err(HostingError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_token_with_control_characters() {
        let err = GitHubClient::new("ghp_bad\ntoken").unwrap_err();
        assert!(matches!(err, HostingError::InvalidToken));
        assert_eq!(err.summary(), "invalid access token");
        assert!(!err.to_string().contains("URL"));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = GitHubClient::new("ghp_secret").unwrap();
        let printed = format!("{client:?}");
        assert!(printed.contains("https://api.github.com/"));
        assert!(!printed.contains("ghp_secret"));
    }

    #[tokio::test]
    async fn test_root_contents() {
        let client = client().await;
        let contents = client.root_contents("alice", "repo1").await.unwrap().unwrap();

        let entries = contents.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label(), "README.md (10 bytes) (abc)");
        assert_eq!(
            entries[0].download_url.as_deref(),
            Some("https://raw.example/alice/repo1/main/README.md")
        );
    }

    #[tokio::test]
    async fn test_unknown_repository_is_none() {
        let client = client().await;
        assert!(client.root_contents("nobody", "repo1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_repository_is_empty_listing() {
        let client = client().await;
        let contents = client.root_contents("alice", "empty").await.unwrap().unwrap();
        assert!(contents.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let client = client().await;
        let err = client.root_contents("alice", "private").await.unwrap_err();

        match err {
            HostingError::Status { status, ref body } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.summary(), "hosting API returned 403 Forbidden");
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let client = client().await;
        let err = client.root_contents("alice", "garbled").await.unwrap_err();
        assert!(matches!(err, HostingError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_credential_is_upstream_error() {
        let router = Router::new().route("/repos/{owner}/{repo}", get(repo));
        let addr = spawn_server(router).await;
        let client = GitHubClient::with_api_base("wrong", &format!("http://{addr}")).unwrap();

        let err = client.root_contents("alice", "repo1").await.unwrap_err();
        assert!(matches!(err, HostingError::Status { status: StatusCode::UNAUTHORIZED, .. }));
    }
}
