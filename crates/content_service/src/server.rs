//! Axum web server for the content service.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::github::ContentsApi;
use crate::handlers::repo_contents;
use crate::settings::Settings;

/// Server configuration options.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bind_addr: settings.bind_addr,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    api: Arc<dyn ContentsApi>,
    debug: bool,
}

impl AppState {
    pub fn new(api: Arc<dyn ContentsApi>, debug: bool) -> Self {
        Self { api, debug }
    }

    pub fn api(&self) -> &dyn ContentsApi {
        self.api.as_ref()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let github_routes = Router::new()
        .route("/github/repos/{username}/{repo_name}/contents/", get(repo_contents))
        .route("/github/repos/{username}/{repo_name}/contents", get(repo_contents));

    Router::new()
        .nest("/api", github_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server.
///
/// This starts the Axum server and blocks until shutdown.
pub async fn run_server(state: AppState, config: ServerConfig) -> anyhow::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Starting content service at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::HostingError;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use common::{Contents, Entry, EntryKind};
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Canned hosting API that records what it was asked for.
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<(String, String)>>,
    }

    fn entry(name: &str, kind: EntryKind) -> Entry {
        Entry {
            name: name.to_string(),
            path: name.to_string(),
            kind,
            download_url: match kind {
                EntryKind::File => Some(format!("https://raw.example/{name}")),
                _ => None,
            },
            html_url: Some(format!("https://example/{name}")),
            size: if kind == EntryKind::File { 10 } else { 0 },
            sha: "abc".to_string(),
        }
    }

    #[async_trait]
    impl ContentsApi for FakeApi {
        async fn root_contents(&self, owner: &str, repo: &str) -> Result<Option<Contents>, HostingError> {
            self.calls.lock().unwrap().push((owner.to_string(), repo.to_string()));
            match (owner, repo) {
                ("alice", "repo1") => Ok(Some(Contents::Listing(vec![
                    entry("README.md", EntryKind::File),
                    entry("src", EntryKind::Dir),
                ]))),
                ("alice", "single") => Ok(Some(Contents::Single(entry("README.md", EntryKind::File)))),
                ("alice", "broken") => Err(HostingError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: "upstream exploded".to_string(),
                }),
                _ => Ok(None),
            }
        }
    }

    fn app(debug: bool) -> (Router, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::default());
        (build_router(AppState::new(api.clone(), debug)), api)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_repo_contents_endpoint() {
        let (app, api) = app(false);
        let (status, json) = get_json(app, "/api/github/repos/alice/repo1/contents/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([
                {
                    "name": "README.md",
                    "path": "README.md",
                    "type": "file",
                    "download_url": "https://raw.example/README.md",
                    "html_url": "https://example/README.md",
                    "size": 10,
                    "sha": "abc"
                },
                {
                    "name": "src",
                    "path": "src",
                    "type": "dir",
                    "download_url": null,
                    "html_url": "https://example/src",
                    "size": 0,
                    "sha": "abc"
                }
            ])
        );
        assert_eq!(*api.calls.lock().unwrap(), vec![("alice".to_string(), "repo1".to_string())]);
    }

    #[tokio::test]
    async fn test_single_file_is_an_object() {
        let (app, _) = app(false);
        let (status, json) = get_json(app, "/api/github/repos/alice/single/contents/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "README.md");
        assert_eq!(json["type"], "file");
    }

    #[tokio::test]
    async fn test_unknown_repository_returns_empty_list() {
        // Clients cannot distinguish this from an empty repository.
        let (app, _) = app(false);
        let (status, json) = get_json(app, "/api/github/repos/nobody/nothing/contents/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn test_hosting_failure_is_bad_gateway() {
        let (app, _) = app(false);
        let (status, json) = get_json(app, "/api/github/repos/alice/broken/contents/").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], "Failed to fetch repository contents");
        assert_eq!(json["details"], "hosting API returned 500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_hosting_failure_details_in_debug() {
        let (app, _) = app(true);
        let (_, json) = get_json(app, "/api/github/repos/alice/broken/contents/").await;

        assert!(json["details"].as_str().unwrap().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_path_without_trailing_slash() {
        let (app, _) = app(false);
        let (status, _) = get_json(app, "/api/github/repos/alice/repo1/contents").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_encoded_segments_are_decoded() {
        let (app, api) = app(false);
        get_json(app, "/api/github/repos/al%20ice/re%3Fpo/contents/").await;

        assert_eq!(*api.calls.lock().unwrap(), vec![("al ice".to_string(), "re?po".to_string())]);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (app, _) = app(false);
        let response = app
            .oneshot(Request::builder().uri("/api/github/repos/alice").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_server_config_default() {
        assert_eq!(ServerConfig::default().bind_addr.to_string(), "127.0.0.1:8000");
    }
}
