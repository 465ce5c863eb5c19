//! Testing utilities for the tagging workspace
//!
//! Shared taxonomy shapes, link sets and publishing API payloads.

#![allow(missing_docs)]

use serde_json::{json, Value};
use tagging_links::{InMemoryLinkStore, LinkSet};
use tagging_taxonomy::{TaxonId, TaxonNode, Taxonomy};

pub const CONTENT_ID: &str = "64aadc14-9bca-40d9-abb6-4f21f9792a05";

pub const GRANDPARENT_TAXON: &str = "grandparent-0000-0000-0000-000000000000";
pub const PARENT_TAXON: &str = "parent-0000-0000-0000-000000000000";
pub const CHILD_TAXON: &str = "child-0000-0000-0000-000000000000";

pub fn taxon_ids(ids: &[&str]) -> Vec<TaxonId> {
    ids.iter().copied().map(TaxonId::from).collect()
}

/// `grandparent → parent → child`, as a single published branch
pub fn lineage_branch() -> TaxonNode {
    TaxonNode::new(GRANDPARENT_TAXON)
        .with_title("Grandparent")
        .with_base_path("/grandparent")
        .with_child(
            TaxonNode::new(PARENT_TAXON)
                .with_title("Parent")
                .with_base_path("/grandparent/parent")
                .with_child(
                    TaxonNode::new(CHILD_TAXON)
                        .with_title("Child")
                        .with_base_path("/grandparent/parent/child"),
                ),
        )
}

pub fn lineage_taxonomy() -> Taxonomy {
    Taxonomy::published_only([lineage_branch()])
}

/// Root `aaaa` with one child `bbbb`
pub fn root_with_child() -> TaxonNode {
    TaxonNode::new("aaaa")
        .with_title("I am the root taxon.")
        .with_base_path("/root-path")
        .with_child(
            TaxonNode::new("bbbb")
                .with_title("I am one child taxon.")
                .with_base_path("/child-path-one"),
        )
}

/// One published and one draft leaf branch
pub fn published_and_draft_taxonomy() -> Taxonomy {
    Taxonomy::new(
        [TaxonNode::new("published-taxon")],
        [TaxonNode::new("draft-taxon")],
    )
}

pub fn link_set(taxons: &[&str], version: u64) -> LinkSet {
    LinkSet::new(CONTENT_ID, taxon_ids(taxons), version)
}

pub fn store_with(taxons: &[&str], version: u64) -> InMemoryLinkStore {
    InMemoryLinkStore::new().with_link_set(link_set(taxons, version))
}

/// Root taxon document in the content store's expanded-links shape
pub fn root_taxon_document() -> Value {
    json!({
        "base_path": "/root-path",
        "content_id": "aaaa",
        "title": "I am the root taxon.",
        "expanded_links_hash": {
            "expanded_links": {
                "child_taxons": [
                    {
                        "base_path": "/child-path-one",
                        "content_id": "bbbb",
                        "title": "I am one child taxon.",
                        "links": {}
                    }
                ]
            }
        }
    })
}

/// Snapshot file contents with the root document as its only published branch
pub fn snapshot_json(draft: &[Value]) -> String {
    json!({
        "published_branches": [root_taxon_document()],
        "draft_branches": draft,
    })
    .to_string()
}
