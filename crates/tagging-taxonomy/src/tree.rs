//! Arena-backed taxonomy
//!
//! Provides [`Taxonomy`], the flattened form of the published and draft
//! taxon trees:
//! - Entries are stored in pre-order, published branches first
//! - Children always sit at a higher index than their parent
//! - Traversals are iterative, so deep taxonomies cannot overflow the stack

use crate::id::TaxonId;
use crate::node::TaxonNode;
use std::collections::HashMap;

/// Position of an entry inside a [`Taxonomy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIdx(usize);

impl NodeIdx {
    /// Raw arena index
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which half of the taxonomy a branch belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// Live, visible to end users
    Published,
    /// Not yet live, may still be tagged internally
    Draft,
}

/// Flattened taxon node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonEntry {
    /// Content identifier
    pub id: TaxonId,
    /// Title, when known
    pub title: Option<String>,
    /// Base path, when known
    pub base_path: Option<String>,
    /// Parent entry (`None` for branch roots)
    pub parent: Option<NodeIdx>,
    /// Child entries in display order
    pub children: Vec<NodeIdx>,
    /// Distance from the branch root
    pub depth: usize,
    /// Branch half this entry was reached from
    pub kind: BranchKind,
}

/// Taxonomy tree split into published and draft branches
///
/// Immutable once built. The same taxon id may occur more than once (for
/// example under two parents); every occurrence gets its own entry.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    pub(crate) entries: Vec<TaxonEntry>,
    published: Vec<NodeIdx>,
    draft: Vec<NodeIdx>,
    by_id: HashMap<TaxonId, Vec<NodeIdx>>,
}

impl Taxonomy {
    /// Build taxonomy from nested published and draft branches
    #[must_use]
    pub fn new(
        published: impl IntoIterator<Item = TaxonNode>,
        draft: impl IntoIterator<Item = TaxonNode>,
    ) -> Self {
        let mut taxonomy = Self::default();
        for branch in published {
            let root = taxonomy.flatten(branch, BranchKind::Published);
            taxonomy.published.push(root);
        }
        for branch in draft {
            let root = taxonomy.flatten(branch, BranchKind::Draft);
            taxonomy.draft.push(root);
        }
        taxonomy
    }

    /// Build taxonomy with published branches only
    #[inline]
    #[must_use]
    pub fn published_only(published: impl IntoIterator<Item = TaxonNode>) -> Self {
        Self::new(published, std::iter::empty())
    }

    /// Build taxonomy with draft branches only
    #[inline]
    #[must_use]
    pub fn draft_only(draft: impl IntoIterator<Item = TaxonNode>) -> Self {
        Self::new(std::iter::empty(), draft)
    }

    fn flatten(&mut self, branch: TaxonNode, kind: BranchKind) -> NodeIdx {
        let root = NodeIdx(self.entries.len());
        let mut stack = vec![(branch, None::<NodeIdx>, 0usize)];

        while let Some((node, parent, depth)) = stack.pop() {
            let idx = NodeIdx(self.entries.len());
            let TaxonNode {
                id,
                title,
                base_path,
                children,
            } = node;

            if let Some(parent) = parent {
                self.entries[parent.0].children.push(idx);
            }
            self.by_id.entry(id.clone()).or_default().push(idx);
            self.entries.push(TaxonEntry {
                id,
                title,
                base_path,
                parent,
                children: Vec::with_capacity(children.len()),
                depth,
                kind,
            });

            // Reversed so the first child is popped (and numbered) first.
            for child in children.into_iter().rev() {
                stack.push((child, Some(idx), depth + 1));
            }
        }

        root
    }

    /// Roots of the published branches
    #[inline]
    #[must_use]
    pub fn published_branches(&self) -> &[NodeIdx] {
        &self.published
    }

    /// Roots of the draft branches
    #[inline]
    #[must_use]
    pub fn draft_branches(&self) -> &[NodeIdx] {
        &self.draft
    }

    /// Roots of one half of the taxonomy
    #[inline]
    #[must_use]
    pub fn branches(&self, kind: BranchKind) -> &[NodeIdx] {
        match kind {
            BranchKind::Published => &self.published,
            BranchKind::Draft => &self.draft,
        }
    }

    /// Get entry
    ///
    /// # Panics
    /// If `idx` was not produced by this taxonomy.
    #[inline]
    #[must_use]
    pub fn entry(&self, idx: NodeIdx) -> &TaxonEntry {
        &self.entries[idx.0]
    }

    /// Get entry if `idx` is in range
    #[inline]
    #[must_use]
    pub fn get(&self, idx: NodeIdx) -> Option<&TaxonEntry> {
        self.entries.get(idx.0)
    }

    /// Every occurrence of a taxon id
    #[inline]
    #[must_use]
    pub fn find(&self, id: &str) -> &[NodeIdx] {
        self.by_id.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the id occurs anywhere in the taxonomy
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Total number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the taxonomy has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full taxon catalogue: published branches then draft branches, each
    /// in pre-order
    pub fn catalogue(&self) -> impl Iterator<Item = (NodeIdx, &TaxonEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (NodeIdx(i), entry))
    }

    /// Pre-order walk of the subtree rooted at `root`, including `root`
    #[inline]
    #[must_use]
    pub fn preorder(&self, root: NodeIdx) -> Preorder<'_> {
        Preorder {
            taxonomy: self,
            stack: vec![root],
        }
    }

    /// Pre-order walk of everything strictly below `idx`
    #[must_use]
    pub fn descendants(&self, idx: NodeIdx) -> Preorder<'_> {
        let stack = self.entry(idx).children.iter().rev().copied().collect();
        Preorder {
            taxonomy: self,
            stack,
        }
    }

    /// Content ids of everything strictly below `idx`
    #[must_use]
    pub fn descendant_ids(&self, idx: NodeIdx) -> Vec<&TaxonId> {
        self.descendants(idx).map(|d| &self.entry(d).id).collect()
    }

    /// Walk from `idx` up to its branch root, excluding `idx`
    pub fn ancestors(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        std::iter::successors(self.entry(idx).parent, move |p| self.entry(*p).parent)
    }
}

/// Iterative pre-order traversal over a [`Taxonomy`]
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    taxonomy: &'a Taxonomy,
    stack: Vec<NodeIdx>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        self.stack
            .extend(self.taxonomy.entry(idx).children.iter().rev().copied());
        Some(idx)
    }
}
