//! Error types for tagging operations
//!
//! Provides error handling for:
//! - Link store failures during load and publish
//! - Concurrent modification of a content item's links
//! - Taxonomy and configuration loading

use crate::config::ConfigError;
use tagging_links::LinkStoreError;
use tagging_taxonomy::TaxonomyError;

/// Main tagging error type
#[derive(Debug, thiserror::Error)]
pub enum TaggingError {
    /// Link store failed; fatal to the current operation
    #[error("link store error: {0}")]
    Upstream(#[from] LinkStoreError),

    /// Links changed since they were loaded
    #[error("links for {content_id} changed since version {previous_version}; reload and try again")]
    VersionConflict {
        /// Content item
        content_id: String,
        /// Version the publish was based on
        previous_version: u64,
    },

    /// Taxonomy could not be loaded
    #[error("taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TaggingError {
    /// Check if the failure is a concurrent modification
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }

    /// Check if repeating the same call might succeed
    ///
    /// A conflict is not retryable as-is: the selection has to be reloaded.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream(e) => e.is_retryable(),
            _ => false,
        }
    }
}
