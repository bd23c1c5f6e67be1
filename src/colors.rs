//! Lazy color computation.
//!
//! Two stages, run together on the first query against a dirty tree: every
//! suffix of every registered string is walked down to the leaf it ends at
//! (the sentinel guarantees one exists), then a post-order pass ORs masks up
//! toward the root. Construction leaves transient provenance hints on nodes;
//! the pass starts from a clean slate so only reachability decides the final
//! masks.

use crate::registry::StringId;
use crate::tree::{ColorSet, NodeId, Pos, ROOT};
use crate::GeneralizedSuffixTree;

impl GeneralizedSuffixTree {
    /// Recompute every node's color mask.
    ///
    /// Idempotent: a no-op while the tree is structurally unchanged since the
    /// last run. Any insertion or edge split re-arms it.
    pub fn compute_colors(&mut self) {
        if self.colors_clean {
            return;
        }
        self.graph.clear_colors();
        for id in 1..=self.registry.count() as StringId {
            self.mark_leaves_for(id);
        }
        self.propagate_colors(ROOT);
        self.colors_clean = true;
    }

    /// Walk every suffix of string `id` from the root and mark the leaf it
    /// ends at.
    fn mark_leaves_for(&mut self, id: StringId) {
        let len = self.registry.len(id);
        for start in 0..len {
            let mut node = ROOT;
            let mut pos = start;
            while pos < len {
                let byte = self.registry.byte_at(id, pos);
                let Some(edge) = self.graph.find_transition(node, byte) else {
                    break;
                };
                let span = edge.span;
                let end = span.right.min(self.registry.last_index(span.ref_id));
                let edge_len = end - span.left + 1;
                let mut matched: Pos = 0;
                while matched < edge_len && pos + matched < len {
                    if self.registry.byte_at(id, pos + matched)
                        != self.registry.byte_at(span.ref_id, span.left + matched)
                    {
                        break;
                    }
                    matched += 1;
                }
                pos += matched;
                node = edge.target;
                if self.graph.node(node).is_leaf() {
                    self.graph.node_mut(node).colors.insert(id);
                    break;
                }
                if matched < edge_len {
                    break;
                }
            }
        }
    }

    /// Post-order OR of children masks, folding in each outgoing edge's
    /// label provenance. Sound because any node on the path of a suffix
    /// prefix also lies on that suffix's root-to-leaf path.
    fn propagate_colors(&mut self, node: NodeId) -> ColorSet {
        let children: Vec<(StringId, NodeId)> = self
            .graph
            .node(node)
            .transitions
            .values()
            .map(|transition| (transition.span.ref_id, transition.target))
            .collect();
        if children.is_empty() {
            return self.graph.node(node).colors();
        }

        let mut accumulated = self.graph.node(node).colors();
        for (edge_ref, child) in children {
            accumulated.insert(edge_ref);
            accumulated.merge(self.propagate_colors(child));
        }
        self.graph.node_mut(node).colors = accumulated;
        accumulated
    }
}
