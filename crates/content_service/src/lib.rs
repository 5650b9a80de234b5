//! Repository content service.
//!
//! Serves the root listing of a hosted repository as JSON:
//! - `GET /api/github/repos/{username}/{repo_name}/contents/`
//!
//! The hosting API credential is held by a [`GitHubClient`] injected into
//! the router state at startup.

pub mod error;
pub mod github;
pub mod handlers;
pub mod server;
pub mod settings;

pub use error::ServiceError;
pub use github::{ContentsApi, GitHubClient, HostingError};
pub use server::{build_router, run_server, AppState, ServerConfig};
pub use settings::{Settings, SettingsError};
