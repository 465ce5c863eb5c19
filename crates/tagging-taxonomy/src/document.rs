//! Taxonomy documents
//!
//! Decodes taxons in the publishing platform's expanded-links shape:
//!
//! ```json
//! {
//!   "content_id": "aaaa",
//!   "title": "Education",
//!   "base_path": "/education",
//!   "expanded_links_hash": {
//!     "expanded_links": {
//!       "child_taxons": [
//!         { "content_id": "bbbb", "links": { "child_taxons": [] } }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Top-level taxons carry their children under `expanded_links_hash`,
//! nested taxons under `links`. Unknown fields are ignored.

use crate::error::TaxonomyError;
use crate::node::TaxonNode;
use crate::tree::Taxonomy;
use serde::{Deserialize, Serialize};

/// Taxon as served by the content store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonDocument {
    /// Content identifier
    #[serde(default)]
    pub content_id: Option<String>,
    /// Title
    #[serde(default)]
    pub title: Option<String>,
    /// Base path
    #[serde(default)]
    pub base_path: Option<String>,
    /// Links of a nested taxon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<DocumentLinks>,
    /// Links of a top-level taxon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_links_hash: Option<ExpandedLinksHash>,
}

/// `links` block of a taxon document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLinks {
    /// Child taxons
    #[serde(default)]
    pub child_taxons: Vec<TaxonDocument>,
}

/// `expanded_links_hash` block of a top-level taxon document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedLinksHash {
    /// Expanded links
    #[serde(default)]
    pub expanded_links: DocumentLinks,
}

impl TaxonDocument {
    /// Convert into a nested [`TaxonNode`]
    ///
    /// Nesting depth is already bounded by the JSON decoder's recursion
    /// limit, so the conversion recurses.
    ///
    /// # Errors
    /// `MissingContentId` if this document or any child lacks a content id.
    pub fn into_node(self) -> Result<TaxonNode, TaxonomyError> {
        let Some(content_id) = self.content_id else {
            return Err(TaxonomyError::MissingContentId {
                base_path: self.base_path,
            });
        };

        let children = self
            .expanded_links_hash
            .map(|hash| hash.expanded_links.child_taxons)
            .unwrap_or_default()
            .into_iter()
            .chain(self.links.map(|links| links.child_taxons).unwrap_or_default())
            .map(TaxonDocument::into_node)
            .collect::<Result<Vec<_>, _>>()?;

        let mut node = TaxonNode::new(content_id).with_children(children);
        node.title = self.title;
        node.base_path = self.base_path;
        Ok(node)
    }
}

/// Published and draft branches as taxon documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomySnapshot {
    /// Live level-one taxons
    #[serde(default)]
    pub published_branches: Vec<TaxonDocument>,
    /// Draft level-one taxons
    #[serde(default)]
    pub draft_branches: Vec<TaxonDocument>,
}

impl TaxonomySnapshot {
    /// Decode snapshot from JSON
    ///
    /// # Errors
    /// `Decode` if the text is not a snapshot.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the taxonomy arena
    ///
    /// # Errors
    /// `MissingContentId` if any taxon lacks a content id.
    pub fn into_taxonomy(self) -> Result<Taxonomy, TaxonomyError> {
        let published = self
            .published_branches
            .into_iter()
            .map(TaxonDocument::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        let draft = self
            .draft_branches
            .into_iter()
            .map(TaxonDocument::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Taxonomy::new(published, draft))
    }
}

impl Taxonomy {
    /// Decode and build a taxonomy from a snapshot document
    ///
    /// # Errors
    /// See [`TaxonomySnapshot::from_json`] and [`TaxonomySnapshot::into_taxonomy`].
    pub fn from_snapshot_json(json: &str) -> Result<Self, TaxonomyError> {
        TaxonomySnapshot::from_json(json)?.into_taxonomy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root_document() -> serde_json::Value {
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

    #[test]
    fn root_document_into_node() {
        let doc: TaxonDocument = serde_json::from_value(root_document()).unwrap();
        let node = doc.into_node().unwrap();

        assert_eq!(node.id.as_str(), "aaaa");
        assert_eq!(node.base_path.as_deref(), Some("/root-path"));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].title.as_deref(), Some("I am one child taxon."));
    }

    #[test]
    fn nested_links_are_followed() {
        let doc: TaxonDocument = serde_json::from_value(json!({
            "content_id": "a",
            "links": { "child_taxons": [
                { "content_id": "b", "links": { "child_taxons": [ { "content_id": "c" } ] } }
            ]}
        }))
        .unwrap();

        assert_eq!(doc.into_node().unwrap().subtree_size(), 3);
    }

    #[test]
    fn missing_content_id_is_rejected() {
        let doc: TaxonDocument = serde_json::from_value(json!({
            "content_id": "a",
            "links": { "child_taxons": [ { "base_path": "/orphan" } ] }
        }))
        .unwrap();

        let err = doc.into_node().unwrap_err();
        assert!(matches!(
            err,
            TaxonomyError::MissingContentId { base_path: Some(ref p) } if p == "/orphan"
        ));
        assert!(err.to_string().contains("/orphan"));
    }

    #[test]
    fn snapshot_builds_both_halves() {
        let json = json!({
            "published_branches": [root_document()],
            "draft_branches": [{ "content_id": "draft-root" }]
        })
        .to_string();

        let taxonomy = Taxonomy::from_snapshot_json(&json).unwrap();
        assert_eq!(taxonomy.published_branches().len(), 1);
        assert_eq!(taxonomy.draft_branches().len(), 1);
        assert!(taxonomy.contains("bbbb"));
        assert!(taxonomy.contains("draft-root"));
    }

    #[test]
    fn invalid_json_is_decode_error() {
        assert!(matches!(
            Taxonomy::from_snapshot_json("{ not json"),
            Err(TaxonomyError::Decode(_))
        ));
    }
}
