//! Property suite: tree answers checked against brute-force oracles on
//! random string sets.

mod common;

use colored_gst::{GeneralizedSuffixTree, SENTINEL};
use common::*;
use proptest::prelude::*;

fn letters(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c')], 0..max_len)
}

fn input_strings() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(letters(12), 1..6)
}

fn build(strings: &[Vec<u8>]) -> GeneralizedSuffixTree {
    let mut tree = GeneralizedSuffixTree::new();
    for s in strings {
        tree.add_string(s).expect("insertion within cap succeeds");
    }
    tree
}

proptest! {
    #[test]
    fn membership_matches_oracle(strings in input_strings(), query in letters(8)) {
        let tree = build(&strings);
        prop_assert_eq!(tree.is_substring(&query), naive_is_substring(&strings, &query));
        prop_assert_eq!(tree.is_suffix(&query), naive_is_suffix(&strings, &query));
    }

    #[test]
    fn every_registered_suffix_is_found(strings in input_strings()) {
        let tree = build(&strings);
        for s in &strings {
            for start in 0..=s.len() {
                prop_assert!(tree.is_substring(&s[start..]));
                prop_assert!(tree.is_suffix(&s[start..]));
            }
        }
    }

    #[test]
    fn insertion_order_is_irrelevant(strings in input_strings(), query in letters(8)) {
        let forward = build(&strings);
        let reversed: Vec<Vec<u8>> = strings.iter().rev().cloned().collect();
        let backward = build(&reversed);

        prop_assert_eq!(forward.is_substring(&query), backward.is_substring(&query));
        prop_assert_eq!(forward.is_suffix(&query), backward.is_suffix(&query));
        for s in &strings {
            for start in 0..s.len() {
                prop_assert!(backward.is_suffix(&s[start..]));
            }
        }
    }

    #[test]
    fn colors_reflect_suffix_reachability(strings in input_strings()) {
        let mut tree = build(&strings);
        tree.compute_colors();

        // Bit k is set on a node exactly when the node's path occurs in
        // string k (sentinel included), i.e. when some suffix of string k
        // runs through the node.
        let terminated: Vec<Vec<u8>> = strings
            .iter()
            .map(|s| {
                let mut t = s.clone();
                t.push(SENTINEL);
                t
            })
            .collect();

        for (node, path) in nodes_with_paths(&tree) {
            let colors = tree.colors_of(node);
            for (idx, stored) in terminated.iter().enumerate() {
                let id = idx as u32 + 1;
                let expected = naive_is_substring(std::slice::from_ref(stored), &path);
                prop_assert_eq!(
                    colors.contains(id),
                    expected,
                    "node at path {:?} vs string {}",
                    path,
                    id
                );
            }
        }
    }

    #[test]
    fn node_count_grows_linearly(strings in input_strings()) {
        let tree = build(&strings);
        let total_len: usize = strings.iter().map(Vec::len).sum();
        prop_assert!(tree.graph().node_count() <= 2 * (total_len + strings.len()) + 2);
    }

    #[test]
    fn recoloring_is_stable(strings in input_strings()) {
        let mut tree = build(&strings);
        tree.compute_colors();
        let first: Vec<_> = nodes_with_paths(&tree)
            .into_iter()
            .map(|(node, _)| tree.colors_of(node))
            .collect();
        tree.compute_colors();
        let second: Vec<_> = nodes_with_paths(&tree)
            .into_iter()
            .map(|(node, _)| tree.colors_of(node))
            .collect();
        prop_assert_eq!(first, second);
    }
}
