//! Taxon selection of one content item

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tagging_links::LinkSet;
use tagging_taxonomy::TaxonId;

/// Taxons selected for a content item, with the link-set version they were
/// read at
///
/// Selection order is kept as loaded; duplicate ids collapse. Ids unknown to
/// the taxonomy are allowed and end up classified as invisible drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Content item being tagged
    pub content_id: String,
    /// Selected taxon ids
    pub selected_taxons: IndexSet<TaxonId>,
    /// Link-set version to echo back when publishing
    pub previous_version: u64,
}

impl SelectionState {
    /// Create selection from caller-supplied data
    #[must_use]
    pub fn new<I, T>(content_id: impl Into<String>, taxons: I, previous_version: u64) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaxonId>,
    {
        Self {
            content_id: content_id.into(),
            selected_taxons: taxons.into_iter().map(Into::into).collect(),
            previous_version,
        }
    }

    /// Selection of a content item that has no link set yet
    #[inline]
    #[must_use]
    pub fn empty(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            selected_taxons: IndexSet::new(),
            previous_version: 0,
        }
    }

    /// Whether the id is selected
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.selected_taxons.contains(id)
    }

    /// Number of selected taxons
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected_taxons.len()
    }

    /// Whether nothing is selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_taxons.is_empty()
    }
}

impl From<LinkSet> for SelectionState {
    fn from(set: LinkSet) -> Self {
        Self::new(set.content_id, set.taxons, set.version)
    }
}
