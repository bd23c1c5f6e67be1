//! Shared helpers: brute-force oracles and a deterministic string generator.

#![allow(dead_code)]

use colored_gst::{GeneralizedSuffixTree, NodeId};

/// splitmix64, so randomized scenarios are reproducible without an extra
/// dependency.
pub struct SplitMix {
    state: u64,
}

impl SplitMix {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    pub fn pick(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

pub fn random_string(rng: &mut SplitMix, len: usize, alphabet: &[u8]) -> Vec<u8> {
    (0..len).map(|_| alphabet[rng.pick(alphabet.len())]).collect()
}

pub fn naive_is_substring(strings: &[Vec<u8>], query: &[u8]) -> bool {
    if query.is_empty() {
        return true;
    }
    strings
        .iter()
        .any(|s| s.windows(query.len()).any(|window| window == query))
}

pub fn naive_is_suffix(strings: &[Vec<u8>], query: &[u8]) -> bool {
    strings.iter().any(|s| s.ends_with(query))
}

/// Node reached by consuming `path` exactly, or `None` when the path ends
/// mid-edge or leaves the tree.
pub fn node_at_path(tree: &GeneralizedSuffixTree, path: &[u8]) -> Option<NodeId> {
    let mut node = tree.root();
    let mut rest = path;
    while !rest.is_empty() {
        let mut advanced = false;
        for (byte, span, target) in tree.children_of(node) {
            if byte != rest[0] {
                continue;
            }
            let label = tree.label_of(span);
            if rest.len() < label.len() || &rest[..label.len()] != label {
                return None;
            }
            rest = &rest[label.len()..];
            node = target;
            advanced = true;
            break;
        }
        if !advanced {
            return None;
        }
    }
    Some(node)
}

/// Every node reachable from the root, paired with its full path label.
pub fn nodes_with_paths(tree: &GeneralizedSuffixTree) -> Vec<(NodeId, Vec<u8>)> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    collect(tree, tree.root(), &mut path, &mut out);
    out
}

fn collect(
    tree: &GeneralizedSuffixTree,
    node: NodeId,
    path: &mut Vec<u8>,
    out: &mut Vec<(NodeId, Vec<u8>)>,
) {
    out.push((node, path.clone()));
    for (_, span, target) in tree.children_of(node) {
        let label = tree.label_of(span).to_vec();
        path.extend_from_slice(&label);
        collect(tree, target, path, out);
        path.truncate(path.len() - label.len());
    }
}
