//! Branch matching
//!
//! Finds which selected taxon ids are reachable from a branch of the
//! taxonomy. A taxon and any of its descendants can be matched
//! independently, so every child is visited whether or not its parent
//! matched.

use crate::id::TaxonId;
use crate::tree::{BranchKind, NodeIdx, Taxonomy};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// Membership test over a set of selected taxon ids
pub trait Selected {
    /// Whether `id` is selected
    fn is_selected(&self, id: &TaxonId) -> bool;
}

impl<S: BuildHasher> Selected for HashSet<TaxonId, S> {
    #[inline]
    fn is_selected(&self, id: &TaxonId) -> bool {
        self.contains(id)
    }
}

impl<S: BuildHasher> Selected for IndexSet<TaxonId, S> {
    #[inline]
    fn is_selected(&self, id: &TaxonId) -> bool {
        self.contains(id)
    }
}

impl Selected for BTreeSet<TaxonId> {
    #[inline]
    fn is_selected(&self, id: &TaxonId) -> bool {
        self.contains(id)
    }
}

// Linear scan; fine for the handful of ids a content item is tagged with.
impl Selected for [TaxonId] {
    #[inline]
    fn is_selected(&self, id: &TaxonId) -> bool {
        self.contains(id)
    }
}

impl Selected for Vec<TaxonId> {
    #[inline]
    fn is_selected(&self, id: &TaxonId) -> bool {
        self.as_slice().is_selected(id)
    }
}

impl Taxonomy {
    /// Selected ids found in the subtree rooted at `branch`, in pre-order
    #[must_use]
    pub fn match_branch<S>(&self, selected: &S, branch: NodeIdx) -> Vec<TaxonId>
    where
        S: Selected + ?Sized,
    {
        self.preorder(branch)
            .map(|idx| &self.entry(idx).id)
            .filter(|id| selected.is_selected(id))
            .cloned()
            .collect()
    }

    /// Selected ids found across every branch of one kind, branch by branch
    #[must_use]
    pub fn match_branches<S>(&self, selected: &S, kind: BranchKind) -> Vec<TaxonId>
    where
        S: Selected + ?Sized,
    {
        self.branches(kind)
            .iter()
            .flat_map(|branch| self.match_branch(selected, *branch))
            .collect()
    }
}
