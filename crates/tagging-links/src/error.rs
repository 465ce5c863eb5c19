//! Error types for link stores
//!
//! Distinguishes the failures callers react to differently:
//! - Missing link sets (recoverable on read)
//! - Version conflicts (reload and retry, or report)
//! - Everything else (fatal to the current operation)

use reqwest::StatusCode;

/// Link store failure
#[derive(Debug, thiserror::Error)]
pub enum LinkStoreError {
    /// No link set exists for the content item
    #[error("no link set for content item {content_id}")]
    NotFound {
        /// Content item
        content_id: String,
    },

    /// Link set changed since the version the caller read
    #[error("link set for {content_id} changed since version {previous_version}")]
    VersionConflict {
        /// Content item
        content_id: String,
        /// Version the caller sent
        previous_version: u64,
    },

    /// Store answered with an unexpected status
    #[error("link store returned {status} for {content_id}: {body}")]
    Upstream {
        /// Content item
        content_id: String,
        /// HTTP status
        status: StatusCode,
        /// Response body, truncated
        body: String,
    },

    /// Request never completed
    #[error("link store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not understood
    #[error("invalid link store response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL cannot carry a path
    #[error("invalid link store url: {0}")]
    InvalidUrl(String),
}

impl LinkStoreError {
    /// Check if the link set does not exist
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an optimistic-concurrency failure
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }

    /// Check if repeating the same request might succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

impl From<url::ParseError> for LinkStoreError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}
