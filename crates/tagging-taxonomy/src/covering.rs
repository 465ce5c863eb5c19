//! Most specific taxons
//!
//! Drops every selected taxon that already has a more specific (deeper)
//! selected taxon beneath it. This is a pruning filter only: siblings are
//! never merged into their parent.

use crate::id::TaxonId;
use crate::matching::Selected;
use crate::tree::Taxonomy;
use std::collections::HashSet;

impl Taxonomy {
    /// Selected taxons with no selected descendant, in catalogue order
    ///
    /// A catalogue entry is dropped when any selected id sits anywhere below
    /// it, even if the entry itself is selected. Each entry is decided on its
    /// own: an id occurring more than once is emitted if any occurrence is
    /// selected and uncovered, and then only once. Selected ids absent from
    /// the catalogue are never emitted.
    #[must_use]
    pub fn most_specific<S>(&self, selected: &S) -> Vec<TaxonId>
    where
        S: Selected + ?Sized,
    {
        let mut covered = vec![false; self.entries.len()];

        // Children always have a higher index than their parent, so a reverse
        // sweep sees every descendant before its ancestor.
        for (idx, entry) in self.entries.iter().enumerate().rev() {
            let Some(parent) = entry.parent else { continue };
            if covered[idx] || selected.is_selected(&entry.id) {
                covered[parent.index()] = true;
            }
        }

        let mut emitted = HashSet::new();
        self.entries
            .iter()
            .zip(covered)
            .filter(|(entry, covered)| !covered && selected.is_selected(&entry.id))
            .filter(|(entry, _)| emitted.insert(&entry.id))
            .map(|(entry, _)| entry.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TaxonNode;
    use pretty_assertions::assert_eq;

    fn ids(ids: &[&str]) -> Vec<TaxonId> {
        ids.iter().copied().map(TaxonId::from).collect()
    }

    fn lineage() -> Taxonomy {
        Taxonomy::published_only([TaxonNode::new("grandparent").with_child(
            TaxonNode::new("parent").with_child(TaxonNode::new("child")),
        )])
    }

    #[test]
    fn keeps_only_deepest_of_lineage() {
        let selected = ids(&["grandparent", "parent", "child"]);
        assert_eq!(lineage().most_specific(&selected), ids(&["child"]));
    }

    #[test]
    fn distant_descendant_prunes_ancestor() {
        let selected = ids(&["grandparent", "child"]);
        assert_eq!(lineage().most_specific(&selected), ids(&["child"]));
    }

    #[test]
    fn lone_ancestor_is_kept() {
        let selected = ids(&["parent"]);
        assert_eq!(lineage().most_specific(&selected), ids(&["parent"]));
    }

    #[test]
    fn siblings_are_not_merged() {
        let taxonomy = Taxonomy::published_only([TaxonNode::new("p")
            .with_children([TaxonNode::new("s1"), TaxonNode::new("s2")])]);
        let selected = ids(&["s2", "s1"]);
        assert_eq!(taxonomy.most_specific(&selected), ids(&["s1", "s2"]));
    }

    #[test]
    fn unknown_ids_are_not_emitted() {
        let selected = ids(&["child", "not-in-taxonomy"]);
        assert_eq!(lineage().most_specific(&selected), ids(&["child"]));
    }

    #[test]
    fn result_follows_catalogue_order() {
        let taxonomy = Taxonomy::new(
            [TaxonNode::new("a"), TaxonNode::new("b")],
            [TaxonNode::new("draft")],
        );
        let selected = ids(&["draft", "b", "a"]);
        assert_eq!(taxonomy.most_specific(&selected), ids(&["a", "b", "draft"]));
    }

    #[test]
    fn repeated_id_emitted_once() {
        let taxonomy = Taxonomy::published_only([
            TaxonNode::new("a").with_child(TaxonNode::new("shared")),
            TaxonNode::new("b").with_child(TaxonNode::new("shared")),
        ]);
        let selected = ids(&["shared"]);
        assert_eq!(taxonomy.most_specific(&selected), ids(&["shared"]));
    }

    #[test]
    fn repeated_id_decided_per_occurrence() {
        let taxonomy = Taxonomy::published_only([
            TaxonNode::new("shared").with_child(TaxonNode::new("deep")),
            TaxonNode::new("other").with_child(TaxonNode::new("shared")),
        ]);
        let selected = ids(&["shared", "deep"]);
        assert_eq!(taxonomy.most_specific(&selected), ids(&["deep", "shared"]));
    }

    #[test]
    fn id_on_both_halves_survives_uncovered_occurrence() {
        let taxonomy = Taxonomy::new(
            [TaxonNode::new("moving")],
            [TaxonNode::new("moving").with_child(TaxonNode::new("x"))],
        );
        let selected = ids(&["moving", "x"]);
        assert_eq!(taxonomy.most_specific(&selected), ids(&["moving", "x"]));
    }
}
