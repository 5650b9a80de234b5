//! Client for the repository content service.

use crate::client::{ClientConfig, ClientError, HttpClient};
use common::{ContentError, ContentResult, ContentSource, Contents};
use url::Url;

/// Fetches repository listings from the content service over HTTP.
pub struct ContentServiceClient {
    http: HttpClient,
    base_url: Url,
}

impl ContentServiceClient {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: &str, config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http: HttpClient::with_config(config)?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/api/github/repos/<owner>/<repo>/contents/`, with each segment
    /// percent-encoded.
    pub fn contents_url(&self, owner: &str, repo: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "github", "repos", owner, repo, "contents", ""]);
        Ok(url)
    }
}

impl ContentSource for ContentServiceClient {
    fn fetch_contents(&self, owner: &str, repo: &str) -> ContentResult<Contents> {
        let url = self.contents_url(owner, repo).map_err(ContentError::from)?;
        tracing::info!(owner, repo, %url, "Fetching repository contents");

        let contents: Contents = self.http.get_json(&url).map_err(ContentError::from)?;
        tracing::debug!(owner, repo, entries = contents.len(), "Fetched repository contents");
        Ok(contents)
    }
}

impl From<ClientError> for ContentError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidUrl(msg) => ContentError::InvalidUrl(msg),
            ClientError::Timeout(after) => ContentError::timeout(format!("no response after {after:?}")),
            ClientError::Status { status, body } => ContentError::Status {
                status: status.as_u16(),
                body,
            },
            ClientError::Response(msg) => ContentError::Decode(msg),
            ClientError::Connection(msg) | ClientError::InvalidHeader(msg) | ClientError::Build(msg) => {
                ContentError::Network(msg)
            }
        }
    }
}
