//! Address-bar input resolution.
//!
//! Input starting with `GitHub/` is a pseudo-URL naming a repository and is
//! handled by the shell itself. Anything else goes to the web view untouched.

use thiserror::Error;

/// Literal prefix that marks a repository pseudo-URL. Case-sensitive.
pub const GITHUB_PREFIX: &str = "GitHub/";

/// Where a piece of address-bar input should go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Load in the tab's web view as typed.
    Web(String),
    /// Show the root listing of a hosted repository.
    GithubRepo { owner: String, repo: String },
}

/// Malformed `GitHub/...` input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PseudoUrlError {
    #[error("Invalid address '{input}': expected GitHub/<owner>/<repo>, found {found} segment(s)")]
    WrongSegmentCount { input: String, found: usize },

    #[error("Invalid address '{input}': owner and repository must not be empty")]
    EmptySegment { input: String },
}

impl NavigationTarget {
    /// Classify address-bar input.
    pub fn resolve(input: &str) -> Result<Self, PseudoUrlError> {
        let Some(rest) = input.strip_prefix(GITHUB_PREFIX) else {
            return Ok(Self::Web(input.to_string()));
        };

        let segments: Vec<&str> = rest.split('/').collect();
        match segments.as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(Self::GithubRepo {
                owner: (*owner).to_string(),
                repo: (*repo).to_string(),
            }),
            [_, _] => Err(PseudoUrlError::EmptySegment {
                input: input.to_string(),
            }),
            _ => Err(PseudoUrlError::WrongSegmentCount {
                input: input.to_string(),
                found: segments.len(),
            }),
        }
    }

    /// Whether input would be intercepted by the shell instead of the web view.
    pub fn is_pseudo_url(input: &str) -> bool {
        input.starts_with(GITHUB_PREFIX)
    }
}

/// The pseudo-URL shown in the address bar for a repository panel.
pub fn github_location(owner: &str, repo: &str) -> String {
    format!("{GITHUB_PREFIX}{owner}/{repo}")
}
