//! Loading and publishing taxon links
//!
//! [`Tagger`] is the only component that talks to the link store. It never
//! retries: a version conflict is handed straight back to the caller, which
//! decides between reloading and reporting the conflict.

use crate::error::TaggingError;
use crate::reconciler::Reconciler;
use crate::selection::SelectionState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tagging_links::{LinkStore, LinkStoreError};
use tagging_taxonomy::{TaxonId, Taxonomy};

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Content item
    pub content_id: String,
    /// Taxons written to the link store
    pub taxons: Vec<TaxonId>,
    /// Link-set version after the write, when reported
    pub version: Option<u64>,
}

/// Loads selections from, and publishes them to, a link store
#[derive(Clone)]
pub struct Tagger {
    store: Arc<dyn LinkStore>,
}

impl fmt::Debug for Tagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tagger").finish_non_exhaustive()
    }
}

impl Tagger {
    /// Create tagger over a link store
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Load the current selection of a content item
    ///
    /// A content item without a link set yields an empty selection at
    /// version `0`.
    ///
    /// # Errors
    /// `Upstream` for any link store failure other than a missing link set.
    pub async fn load(&self, content_id: &str) -> Result<SelectionState, TaggingError> {
        match self.store.get_links(content_id).await {
            Ok(set) => {
                tracing::debug!(
                    content_id,
                    taxons = set.taxons.len(),
                    version = set.version,
                    "loaded links"
                );
                Ok(SelectionState::from(set))
            }
            Err(LinkStoreError::NotFound { .. }) => {
                tracing::debug!(content_id, "no link set yet, starting empty");
                Ok(SelectionState::empty(content_id))
            }
            Err(e) => Err(TaggingError::Upstream(e)),
        }
    }

    /// Load the current selection and wrap it in a [`Reconciler`]
    ///
    /// # Errors
    /// See [`Tagger::load`].
    pub async fn load_reconciler(
        &self,
        content_id: &str,
        taxonomy: Arc<Taxonomy>,
    ) -> Result<Reconciler, TaggingError> {
        let selection = self.load(content_id).await?;
        Ok(Reconciler::new(taxonomy, selection))
    }

    /// Write the most specific selected taxons back to the link store
    ///
    /// The write is guarded by the selection's `previous_version`.
    ///
    /// # Errors
    /// - `VersionConflict` if the links changed since the selection was read
    /// - `Upstream` for any other link store failure
    pub async fn publish(&self, reconciler: &Reconciler) -> Result<PublishReceipt, TaggingError> {
        let selection = reconciler.selection();
        let taxons = reconciler.most_specific_taxons();

        let receipt = self
            .store
            .patch_links(&selection.content_id, &taxons, selection.previous_version)
            .await
            .map_err(|e| match e {
                LinkStoreError::VersionConflict {
                    content_id,
                    previous_version,
                } => {
                    tracing::warn!(%content_id, previous_version, "links changed concurrently");
                    TaggingError::VersionConflict {
                        content_id,
                        previous_version,
                    }
                }
                other => TaggingError::Upstream(other),
            })?;

        tracing::info!(
            content_id = %selection.content_id,
            selected = selection.len(),
            published = taxons.len(),
            version = ?receipt.version,
            "published taxon links"
        );

        Ok(PublishReceipt {
            content_id: selection.content_id.clone(),
            taxons,
            version: receipt.version,
        })
    }
}
