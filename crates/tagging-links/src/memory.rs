//! In-memory link store
//!
//! Mirrors the publishing API's versioning: every successful patch bumps the
//! version by one, and a patch is accepted only against the current version
//! (version `0` for a content item with no link set yet).

use crate::error::LinkStoreError;
use crate::store::{LinkSet, LinkStore, PatchReceipt};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tagging_taxonomy::TaxonId;

/// Link store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    sets: RwLock<HashMap<String, LinkSet>>,
}

impl InMemoryLinkStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a pre-existing link set
    #[must_use]
    pub fn with_link_set(self, set: LinkSet) -> Self {
        self.insert(set);
        self
    }

    /// Insert or replace a link set, bypassing version checks
    pub fn insert(&self, set: LinkSet) {
        self.sets.write().insert(set.content_id.clone(), set);
    }

    /// Current link set of a content item
    #[must_use]
    pub fn snapshot(&self, content_id: &str) -> Option<LinkSet> {
        self.sets.read().get(content_id).cloned()
    }

    /// Number of content items with a link set
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.read().len()
    }

    /// Whether no content item has a link set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.read().is_empty()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn get_links(&self, content_id: &str) -> Result<LinkSet, LinkStoreError> {
        self.snapshot(content_id)
            .ok_or_else(|| LinkStoreError::NotFound {
                content_id: content_id.to_string(),
            })
    }

    async fn patch_links(
        &self,
        content_id: &str,
        taxons: &[TaxonId],
        previous_version: u64,
    ) -> Result<PatchReceipt, LinkStoreError> {
        let mut sets = self.sets.write();
        let current = sets.get(content_id).map_or(0, |set| set.version);

        if current != previous_version {
            tracing::debug!(content_id, current, previous_version, "rejecting stale patch");
            return Err(LinkStoreError::VersionConflict {
                content_id: content_id.to_string(),
                previous_version,
            });
        }

        let version = current + 1;
        sets.insert(
            content_id.to_string(),
            LinkSet::new(content_id, taxons.to_vec(), version),
        );

        Ok(PatchReceipt {
            version: Some(version),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxons(ids: &[&str]) -> Vec<TaxonId> {
        ids.iter().copied().map(TaxonId::from).collect()
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let store = InMemoryLinkStore::new();
        let err = store.get_links("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn first_patch_against_version_zero() {
        let store = InMemoryLinkStore::new();
        let receipt = store.patch_links("abc", &taxons(&["a"]), 0).await.unwrap();

        assert_eq!(receipt.version, Some(1));
        let stored = store.get_links("abc").await.unwrap();
        assert_eq!(stored.taxons, taxons(&["a"]));
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn stale_patch_conflicts_and_keeps_data() {
        let store = InMemoryLinkStore::new().with_link_set(LinkSet::new("abc", taxons(&["a"]), 4));

        let err = store.patch_links("abc", &taxons(&["b"]), 3).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.snapshot("abc").unwrap().taxons, taxons(&["a"]));

        let receipt = store.patch_links("abc", &taxons(&["b"]), 4).await.unwrap();
        assert_eq!(receipt.version, Some(5));
    }

    #[tokio::test]
    async fn nonzero_version_for_absent_set_conflicts() {
        let store = InMemoryLinkStore::new();
        let err = store.patch_links("abc", &[], 2).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(store.is_empty());
    }
}
