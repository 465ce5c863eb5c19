//! Taxonomy trees for content tagging
//!
//! Reconciles flat taxon selections against a hierarchical taxonomy.
//!
//! # Core Concepts
//!
//! - [`TaxonId`]: Opaque content identifier of a taxon
//! - [`TaxonNode`]: Nested tree form, as built by hand or decoded from documents
//! - [`Taxonomy`]: Arena of published and draft branches with iterative traversal
//! - [`Selected`]: Membership test used by matching and pruning
//!
//! # Example
//!
//! ```rust
//! use tagging_taxonomy::{BranchKind, TaxonId, TaxonNode, Taxonomy};
//!
//! let taxonomy = Taxonomy::published_only([
//!     TaxonNode::new("aaaa").with_child(TaxonNode::new("bbbb")),
//! ]);
//!
//! let selected = vec![TaxonId::from("aaaa"), TaxonId::from("bbbb")];
//!
//! // Both ids are reachable from the published branch
//! let published = taxonomy.match_branches(&selected, BranchKind::Published);
//! assert_eq!(published.len(), 2);
//!
//! // Only the deeper one needs persisting
//! assert_eq!(taxonomy.most_specific(&selected), vec![TaxonId::from("bbbb")]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod covering;
mod document;
mod error;
mod id;
mod matching;
mod node;
mod tree;

// Re-exports
pub use document::{DocumentLinks, ExpandedLinksHash, TaxonDocument, TaxonomySnapshot};
pub use error::TaxonomyError;
pub use id::TaxonId;
pub use matching::Selected;
pub use node::TaxonNode;
pub use tree::{BranchKind, NodeIdx, Preorder, TaxonEntry, Taxonomy};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
