//! Selection reconciliation
//!
//! Classifies the selected taxons of a content item against the taxonomy:
//! - **Published**: reachable from a published branch
//! - **Visible draft**: reachable from a draft branch
//! - **Invisible draft**: selected but reachable from neither (deleted,
//!   hidden or malformed ids)
//!
//! and computes the most specific taxons to persist.

use crate::selection::SelectionState;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tagging_taxonomy::{BranchKind, TaxonId, Taxonomy};

/// The three-way split of a selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonClassification {
    /// Selected taxons on published branches, in traversal order
    pub published: Vec<TaxonId>,
    /// Selected taxons on draft branches, in traversal order
    pub visible_draft: Vec<TaxonId>,
    /// Selected taxons found on no branch, in selection order
    pub invisible_draft: Vec<TaxonId>,
}

/// Reconciles one selection against an injected taxonomy
///
/// Branch matches are computed on first access and cached. Changing the
/// selection through [`Reconciler::set_selected`], [`Reconciler::select`] or
/// [`Reconciler::deselect`] clears the cache.
#[derive(Debug)]
pub struct Reconciler {
    taxonomy: Arc<Taxonomy>,
    selection: SelectionState,
    published: OnceCell<Vec<TaxonId>>,
    visible_draft: OnceCell<Vec<TaxonId>>,
}

impl Reconciler {
    /// Create reconciler
    #[inline]
    #[must_use]
    pub fn new(taxonomy: Arc<Taxonomy>, selection: SelectionState) -> Self {
        Self {
            taxonomy,
            selection,
            published: OnceCell::new(),
            visible_draft: OnceCell::new(),
        }
    }

    /// Current selection
    #[inline]
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Taxonomy the selection is reconciled against
    #[inline]
    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Consume into the selection
    #[inline]
    #[must_use]
    pub fn into_selection(self) -> SelectionState {
        self.selection
    }

    /// Selected taxons reachable from published branches
    pub fn published_taxons(&self) -> &[TaxonId] {
        self.published
            .get_or_init(|| self.match_kind(BranchKind::Published))
    }

    /// Selected taxons reachable from draft branches
    ///
    /// An id that also occurs on a published branch counts as published only.
    pub fn visible_draft_taxons(&self) -> &[TaxonId] {
        self.visible_draft.get_or_init(|| {
            let published: HashSet<&TaxonId> = self.published_taxons().iter().collect();
            let mut draft = self.match_kind(BranchKind::Draft);
            draft.retain(|id| !published.contains(id));
            draft
        })
    }

    /// Selected taxons reachable from no branch, in selection order
    #[must_use]
    pub fn invisible_draft_taxons(&self) -> Vec<TaxonId> {
        let visible: HashSet<&TaxonId> = self
            .published_taxons()
            .iter()
            .chain(self.visible_draft_taxons())
            .collect();

        self.selection
            .selected_taxons
            .iter()
            .filter(|id| !visible.contains(id))
            .cloned()
            .collect()
    }

    /// Selected taxons with no more specific selected taxon below them
    #[must_use]
    pub fn most_specific_taxons(&self) -> Vec<TaxonId> {
        self.taxonomy.most_specific(&self.selection.selected_taxons)
    }

    /// All three classifications at once
    #[must_use]
    pub fn classification(&self) -> TaxonClassification {
        TaxonClassification {
            published: self.published_taxons().to_vec(),
            visible_draft: self.visible_draft_taxons().to_vec(),
            invisible_draft: self.invisible_draft_taxons(),
        }
    }

    /// Replace the whole selection
    pub fn set_selected(&mut self, taxons: impl IntoIterator<Item = TaxonId>) {
        self.selection.selected_taxons = taxons.into_iter().collect();
        self.invalidate();
    }

    /// Add one taxon; returns whether it was newly selected
    pub fn select(&mut self, id: impl Into<TaxonId>) -> bool {
        let added = self.selection.selected_taxons.insert(id.into());
        if added {
            self.invalidate();
        }
        added
    }

    /// Remove one taxon; returns whether it was selected
    pub fn deselect(&mut self, id: &str) -> bool {
        let removed = self.selection.selected_taxons.shift_remove(id);
        if removed {
            self.invalidate();
        }
        removed
    }

    /// Drop cached branch matches
    #[inline]
    pub fn invalidate(&mut self) {
        self.published.take();
        self.visible_draft.take();
    }

    /// Whether branch matches are currently cached
    #[inline]
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.published.get().is_some() || self.visible_draft.get().is_some()
    }

    fn match_kind(&self, kind: BranchKind) -> Vec<TaxonId> {
        let matched = self
            .taxonomy
            .match_branches(&self.selection.selected_taxons, kind);
        tracing::debug!(
            content_id = %self.selection.content_id,
            ?kind,
            matched = matched.len(),
            "matched selection against branches"
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tagging_taxonomy::TaxonNode;
    use tagging_test_utils::{
        lineage_taxonomy, published_and_draft_taxonomy, root_with_child, taxon_ids as ids,
        CHILD_TAXON, CONTENT_ID, GRANDPARENT_TAXON, PARENT_TAXON,
    };

    fn reconciler(taxonomy: Taxonomy, selected: &[&str]) -> Reconciler {
        Reconciler::new(
            Arc::new(taxonomy),
            SelectionState::new(CONTENT_ID, selected.iter().copied(), 1),
        )
    }

    #[test]
    fn published_taxons_from_published_branch() {
        let r = reconciler(Taxonomy::published_only([root_with_child()]), &["bbbb", "cccc"]);
        assert_eq!(r.published_taxons(), ids(&["bbbb"]).as_slice());
        assert!(r.visible_draft_taxons().is_empty());
    }

    #[test]
    fn visible_draft_taxons_from_draft_branch() {
        let r = reconciler(Taxonomy::draft_only([root_with_child()]), &["bbbb", "cccc"]);
        assert_eq!(r.visible_draft_taxons(), ids(&["bbbb"]).as_slice());
        assert!(r.published_taxons().is_empty());
    }

    #[test]
    fn invisible_draft_taxons_are_the_remainder() {
        let r = reconciler(
            published_and_draft_taxonomy(),
            &["published-taxon", "draft-taxon", "invisible-draft-taxon"],
        );

        assert_eq!(r.invisible_draft_taxons(), ids(&["invisible-draft-taxon"]));
        assert_eq!(
            r.classification(),
            TaxonClassification {
                published: ids(&["published-taxon"]),
                visible_draft: ids(&["draft-taxon"]),
                invisible_draft: ids(&["invisible-draft-taxon"]),
            }
        );
    }

    #[test]
    fn most_specific_drops_ancestors() {
        let r = reconciler(
            lineage_taxonomy(),
            &[GRANDPARENT_TAXON, PARENT_TAXON, CHILD_TAXON],
        );
        assert_eq!(r.most_specific_taxons(), ids(&[CHILD_TAXON]));
    }

    #[test]
    fn matches_are_cached_until_selection_changes() {
        let mut r = reconciler(Taxonomy::published_only([root_with_child()]), &["aaaa"]);
        assert!(!r.is_cached());

        assert_eq!(r.published_taxons(), ids(&["aaaa"]).as_slice());
        assert!(r.is_cached());

        assert!(r.select("bbbb"));
        assert!(!r.is_cached());
        assert_eq!(r.published_taxons(), ids(&["aaaa", "bbbb"]).as_slice());

        assert!(r.deselect("aaaa"));
        assert_eq!(r.published_taxons(), ids(&["bbbb"]).as_slice());

        r.set_selected(ids(&["cccc"]));
        assert!(r.published_taxons().is_empty());
        assert_eq!(r.invisible_draft_taxons(), ids(&["cccc"]));
    }

    #[test]
    fn unchanged_selection_keeps_cache() {
        let mut r = reconciler(Taxonomy::published_only([root_with_child()]), &["aaaa"]);
        let _ = r.published_taxons();

        assert!(!r.select("aaaa"));
        assert!(!r.deselect("zzzz"));
        assert!(r.is_cached());
    }

    #[test]
    fn id_on_both_halves_is_published() {
        let taxonomy = Taxonomy::new(
            [TaxonNode::new("moving-taxon")],
            [TaxonNode::new("draft-root").with_child(TaxonNode::new("moving-taxon"))],
        );
        let r = reconciler(taxonomy, &["moving-taxon", "draft-root"]);

        assert_eq!(r.published_taxons(), ids(&["moving-taxon"]).as_slice());
        assert_eq!(r.visible_draft_taxons(), ids(&["draft-root"]).as_slice());
        assert!(r.invisible_draft_taxons().is_empty());
        // The published occurrence has nothing selected below it.
        assert_eq!(r.most_specific_taxons(), ids(&["moving-taxon"]));
    }

    #[test]
    fn empty_selection_is_all_empty() {
        let r = reconciler(Taxonomy::published_only([root_with_child()]), &[]);
        assert_eq!(r.classification(), TaxonClassification::default());
        assert!(r.most_specific_taxons().is_empty());
    }
}
