//! Request handlers.

use axum::extract::{Path, State};
use axum::Json;
use common::Contents;

use crate::error::ServiceError;
use crate::server::AppState;

/// Root listing of `username/repo_name`.
///
/// An unknown repository yields an empty list rather than 404. Clients
/// cannot tell it apart from an empty repository.
pub async fn repo_contents(
    State(state): State<AppState>,
    Path((username, repo_name)): Path<(String, String)>,
) -> Result<Json<Contents>, ServiceError> {
    match state.api().root_contents(&username, &repo_name).await {
        Ok(Some(contents)) => {
            tracing::info!(%username, %repo_name, entries = contents.len(), "Served repository contents");
            Ok(Json(contents))
        }
        Ok(None) => {
            tracing::info!(%username, %repo_name, "Unknown repository, returning empty listing");
            Ok(Json(Contents::empty()))
        }
        Err(err) => {
            tracing::warn!(%username, %repo_name, error = %err, "Hosting API request failed");
            Err(ServiceError::upstream(&err, state.debug()))
        }
    }
}
