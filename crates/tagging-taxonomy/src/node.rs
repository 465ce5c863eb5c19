//! Nested taxon trees
//!
//! [`TaxonNode`] is the owned, nested form a taxonomy arrives in (from a
//! taxonomy document or built by hand). It is flattened into a
//! [`Taxonomy`](crate::Taxonomy) arena before any matching happens.

use crate::id::TaxonId;
use serde::{Deserialize, Serialize};

/// Node of a nested taxon tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonNode {
    /// Content identifier
    pub id: TaxonId,
    /// Human readable title, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Base path on the public site, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Child taxons in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaxonNode>,
}

impl TaxonNode {
    /// Create leaf node
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<TaxonId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            base_path: None,
            children: Vec::new(),
        }
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// With base path
    #[inline]
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Append a child
    #[inline]
    #[must_use]
    pub fn with_child(mut self, child: TaxonNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children
    #[inline]
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = TaxonNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, including self
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}
