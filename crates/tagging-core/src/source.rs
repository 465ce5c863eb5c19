//! Taxonomy sources
//!
//! The taxonomy is always handed to the reconciler explicitly; a
//! [`TaxonomySource`] is where a caller gets it from.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tagging_taxonomy::{Taxonomy, TaxonomyError};

/// Provider of the published and draft taxonomy
#[async_trait]
pub trait TaxonomySource: Send + Sync {
    /// Build or fetch the taxonomy
    ///
    /// # Errors
    /// When the taxonomy cannot be read or decoded.
    async fn load_taxonomy(&self) -> Result<Arc<Taxonomy>, TaxonomyError>;
}

/// Source that always returns the same prebuilt taxonomy
#[derive(Debug, Clone)]
pub struct StaticTaxonomySource {
    taxonomy: Arc<Taxonomy>,
}

impl StaticTaxonomySource {
    /// Create source
    #[inline]
    #[must_use]
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
        }
    }
}

#[async_trait]
impl TaxonomySource for StaticTaxonomySource {
    async fn load_taxonomy(&self) -> Result<Arc<Taxonomy>, TaxonomyError> {
        Ok(Arc::clone(&self.taxonomy))
    }
}

/// Source reading a JSON taxonomy snapshot from disk on every load
#[derive(Debug, Clone)]
pub struct FileTaxonomySource {
    path: PathBuf,
}

impl FileTaxonomySource {
    /// Create source for a snapshot file
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TaxonomySource for FileTaxonomySource {
    async fn load_taxonomy(&self) -> Result<Arc<Taxonomy>, TaxonomyError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| TaxonomyError::io_error(&self.path, e))?;
        let taxonomy = Taxonomy::from_snapshot_json(&json)?;

        tracing::debug!(
            path = %self.path.display(),
            taxons = taxonomy.len(),
            published = taxonomy.published_branches().len(),
            draft = taxonomy.draft_branches().len(),
            "loaded taxonomy snapshot"
        );
        Ok(Arc::new(taxonomy))
    }
}
