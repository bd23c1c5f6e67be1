//! Read-only traversal surface.
//!
//! Everything a consumer (REPL, visualizer) needs to walk the tree without
//! touching construction state: child enumeration with resolved labels,
//! color inspection, labeled-path enumeration grouped by color set, and a
//! plain-text dump.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::registry::SENTINEL;
use crate::tree::{ColorSet, NodeId, Span, ROOT};
use crate::GeneralizedSuffixTree;

impl GeneralizedSuffixTree {
    /// Resolve a span to its concrete bytes. Open right ends clamp to the
    /// current end of the backing string; empty and synthetic spans resolve
    /// to nothing.
    pub fn label_of(&self, span: Span) -> &[u8] {
        if span.ref_id == 0 || span.is_empty() {
            return &[];
        }
        let stored = self.registry.view(span.ref_id);
        if stored.is_empty() {
            return &[];
        }
        let right = span.right.min(self.registry.last_index(span.ref_id));
        if span.left > right {
            return &[];
        }
        &stored[span.left as usize..=right as usize]
    }

    /// Children of `node` as `(first byte, edge span, target)`, in ascending
    /// first-byte order.
    pub fn children_of(&self, node: NodeId) -> Vec<(u8, Span, NodeId)> {
        self.graph
            .children(node)
            .into_iter()
            .map(|(byte, transition)| (byte, transition.span, transition.target))
            .collect()
    }

    /// Color mask of `node` as of the last coloring run.
    pub fn colors_of(&self, node: NodeId) -> ColorSet {
        self.graph.node(node).colors()
    }

    /// Enumerate labeled paths below `from`, grouped by color set.
    ///
    /// Colors are recomputed first if the tree changed. A node owned by a
    /// single string contributes the first byte of its path as a compact
    /// identifier; a node shared by several strings contributes the full
    /// path with a trailing sentinel trimmed.
    pub fn enumerate_paths(&mut self, from: NodeId) -> HashMap<ColorSet, Vec<Vec<u8>>> {
        self.compute_colors();
        let mut result = HashMap::new();
        let mut path = Vec::new();
        self.enumerate_paths_dfs(from, &mut path, &mut result);
        result
    }

    fn enumerate_paths_dfs(
        &self,
        node: NodeId,
        path: &mut Vec<u8>,
        result: &mut HashMap<ColorSet, Vec<Vec<u8>>>,
    ) {
        let colors = self.graph.node(node).colors();
        let owners = colors.count();
        if owners > 0 {
            let entry: Vec<u8> = if owners == 1 {
                path.first().copied().into_iter().collect()
            } else {
                let mut full = path.clone();
                if full.last() == Some(&SENTINEL) {
                    full.pop();
                }
                full
            };
            if !entry.is_empty() || owners > 1 {
                result.entry(colors).or_default().push(entry);
            }
        }

        for (_, transition) in self.graph.children(node) {
            let label_len = {
                let label = self.label_of(transition.span);
                path.extend_from_slice(label);
                label.len()
            };
            self.enumerate_paths_dfs(transition.target, path, result);
            path.truncate(path.len() - label_len);
        }
    }

    /// Indented plain-text rendering of the tree below the root, labels with
    /// open ends resolved and color masks appended where present.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_rec(ROOT, 0, &mut out);
        out
    }

    fn dump_rec(&self, node: NodeId, depth: usize, out: &mut String) {
        for (_, transition) in self.graph.children(node) {
            let label = String::from_utf8_lossy(self.label_of(transition.span)).into_owned();
            let colors = self.graph.node(transition.target).colors();
            for _ in 0..depth {
                out.push_str("    ");
            }
            if colors.is_empty() {
                let _ = writeln!(out, "{}", label);
            } else {
                let _ = writeln!(out, "{} {}", label, colors);
            }
            self.dump_rec(transition.target, depth + 1, out);
        }
    }
}
