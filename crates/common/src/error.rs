//! Common error types.

use thiserror::Error;

/// Failure while fetching a repository listing for display.
///
/// Every variant is recoverable: the shell renders it in place of the
/// listing and keeps running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Content service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode listing: {0}")]
    Decode(String),
}

pub type ContentResult<T> = Result<T, ContentError>;

impl ContentError {
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Short heading used when the error is shown to the user.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "Bad service address",
            Self::Network(_) => "Could not reach the content service",
            Self::Timeout(_) => "The content service did not answer in time",
            Self::Status { .. } => "The content service reported an error",
            Self::Decode(_) => "The content service sent an unreadable listing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ContentError::Status {
            status: 502,
            body: "upstream".to_string(),
        };
        assert_eq!(err.to_string(), "Content service returned 502: upstream");
    }

    #[test]
    fn test_headings_are_distinct() {
        let errors = [
            ContentError::invalid_url("x"),
            ContentError::network("x"),
            ContentError::timeout("x"),
            ContentError::decode("x"),
        ];
        let mut headings: Vec<_> = errors.iter().map(|e| e.heading()).collect();
        headings.dedup();
        assert_eq!(headings.len(), errors.len());
    }
}
