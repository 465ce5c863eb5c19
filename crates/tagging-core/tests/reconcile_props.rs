//! Property tests for selection classification

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tagging_core::{Reconciler, SelectionState};
use tagging_taxonomy::{TaxonId, TaxonNode, Taxonomy};

const CONTENT_ID: &str = "content";

fn build(prefix: &str, i: usize, children: &[Vec<usize>]) -> TaxonNode {
    TaxonNode::new(format!("{prefix}{i}"))
        .with_children(children[i].iter().map(|&c| build(prefix, c, children)))
}

/// Build a forest from a parent table: entry `i` hangs under `parents[i]`
/// when that index is smaller, otherwise it starts a new branch.
fn forest(prefix: &str, parents: &[usize]) -> Vec<TaxonNode> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); parents.len()];
    let mut roots = Vec::new();
    for (i, &p) in parents.iter().enumerate() {
        if p < i {
            children[p].push(i);
        } else {
            roots.push(i);
        }
    }

    roots
        .into_iter()
        .map(|r| build(prefix, r, &children))
        .collect()
}

fn taxonomy_strategy() -> impl Strategy<Value = Taxonomy> {
    (
        prop::collection::vec(0usize..12, 0..12),
        prop::collection::vec(0usize..8, 0..8),
        any::<bool>(),
    )
        .prop_map(|(published, draft, share_prefix)| {
            // Sharing a prefix makes the same ids appear in both halves.
            let draft_prefix = if share_prefix { "p" } else { "d" };
            Taxonomy::new(forest("p", &published), forest(draft_prefix, &draft))
        })
}

fn selection_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            (0usize..12).prop_map(|i| format!("p{i}")),
            (0usize..8).prop_map(|i| format!("d{i}")),
            (0usize..4).prop_map(|i| format!("gone{i}")),
        ],
        0..16,
    )
}

proptest! {
    #[test]
    fn classification_partitions_selection(
        taxonomy in taxonomy_strategy(),
        selected in selection_strategy(),
    ) {
        let r = Reconciler::new(
            Arc::new(taxonomy),
            SelectionState::new(CONTENT_ID, selected, 0),
        );
        let c = r.classification();

        let published: HashSet<&TaxonId> = c.published.iter().collect();
        let draft: HashSet<&TaxonId> = c.visible_draft.iter().collect();
        let invisible: HashSet<&TaxonId> = c.invisible_draft.iter().collect();

        prop_assert!(published.is_disjoint(&draft));
        prop_assert!(invisible.is_disjoint(&published));
        prop_assert!(invisible.is_disjoint(&draft));

        let union: HashSet<&TaxonId> = published
            .iter()
            .chain(draft.iter())
            .chain(invisible.iter())
            .copied()
            .collect();
        let selection: HashSet<&TaxonId> = r.selection().selected_taxons.iter().collect();
        prop_assert_eq!(union, selection);
    }

    #[test]
    fn invisible_ids_are_unknown_to_the_taxonomy(
        taxonomy in taxonomy_strategy(),
        selected in selection_strategy(),
    ) {
        let r = Reconciler::new(
            Arc::new(taxonomy),
            SelectionState::new(CONTENT_ID, selected, 0),
        );
        for id in r.invisible_draft_taxons() {
            prop_assert!(!r.taxonomy().contains(id.as_str()));
        }
        for id in r.most_specific_taxons() {
            prop_assert!(r.taxonomy().contains(id.as_str()));
            prop_assert!(r.selection().contains(id.as_str()));
        }
    }

    #[test]
    fn cache_agrees_with_fresh_reconciler(
        taxonomy in taxonomy_strategy(),
        first in selection_strategy(),
        second in selection_strategy(),
    ) {
        let taxonomy = Arc::new(taxonomy);
        let mut r = Reconciler::new(
            taxonomy.clone(),
            SelectionState::new(CONTENT_ID, first, 0),
        );
        let _ = r.classification();

        r.set_selected(second.iter().map(|s| TaxonId::from(s.as_str())));
        let fresh = Reconciler::new(taxonomy, SelectionState::new(CONTENT_ID, second, 0));

        prop_assert_eq!(r.classification(), fresh.classification());
    }
}
