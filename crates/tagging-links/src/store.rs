//! The link store seam
//!
//! [`LinkStore`] is the external service holding the versioned list of taxon
//! ids tagged to each content item.

use crate::error::LinkStoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tagging_taxonomy::TaxonId;

/// Taxon links of one content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSet {
    /// Content item
    pub content_id: String,
    /// Tagged taxons in stored order
    pub taxons: Vec<TaxonId>,
    /// Optimistic-concurrency token
    pub version: u64,
}

impl LinkSet {
    /// Create link set
    #[inline]
    #[must_use]
    pub fn new(content_id: impl Into<String>, taxons: Vec<TaxonId>, version: u64) -> Self {
        Self {
            content_id: content_id.into(),
            taxons,
            version,
        }
    }
}

/// Outcome of a successful patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReceipt {
    /// Version after the write, when the store reports it
    pub version: Option<u64>,
}

/// Versioned taxon link storage
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Fetch the current links of a content item
    ///
    /// # Errors
    /// `NotFound` when the item has no link set; any other variant on failure.
    async fn get_links(&self, content_id: &str) -> Result<LinkSet, LinkStoreError>;

    /// Replace the taxon links of a content item
    ///
    /// The write only succeeds if the stored version still equals
    /// `previous_version`.
    ///
    /// # Errors
    /// `VersionConflict` when another writer got there first; any other
    /// variant on failure.
    async fn patch_links(
        &self,
        content_id: &str,
        taxons: &[TaxonId],
        previous_version: u64,
    ) -> Result<PatchReceipt, LinkStoreError>;
}
