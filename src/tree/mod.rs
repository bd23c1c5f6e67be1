//! The node graph: arena storage, root and sink, transition-table operations.
//!
//! The graph owns every node through its parent edges alone. Root and sink
//! occupy the first two arena slots for the lifetime of the tree and point at
//! each other through their suffix links, which makes Ukkonen's first
//! extension of any suffix uniform: the sink answers every byte with a
//! synthetic transition back into the root.

mod node;
pub mod traversal;

pub use node::{ColorSet, Node, NodeId, NodeKind, Pos, Span, Transition, OPEN_END};

/// Arena slot of the root node.
pub const ROOT: NodeId = 0;
/// Arena slot of the auxiliary sink node.
pub const SINK: NodeId = 1;

/// Arena-backed graph of suffix-tree nodes.
#[derive(Debug)]
pub struct TreeGraph {
    nodes: Vec<Node>,
}

impl TreeGraph {
    /// Fresh graph holding only the root and the sink, linked to each other.
    pub fn new() -> Self {
        let mut root = Node::new(NodeKind::Root);
        root.suffix_link = Some(SINK);
        let mut sink = Node::new(NodeKind::Sink);
        sink.suffix_link = Some(ROOT);
        Self {
            nodes: vec![root, sink],
        }
    }

    /// Immutable access to a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Allocate a fresh internal node.
    pub(crate) fn create_internal(&mut self) -> NodeId {
        self.push(NodeKind::Internal)
    }

    /// Allocate a fresh leaf.
    pub(crate) fn create_leaf(&mut self) -> NodeId {
        self.push(NodeKind::Leaf)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::new(kind));
        self.nodes.len() - 1
    }

    /// Outgoing transition of `node` whose label starts with `byte`.
    ///
    /// The sink answers every byte with a synthetic transition into the root
    /// carrying an empty span; [`canonize`](crate::GeneralizedSuffixTree)
    /// performs the actual one-byte consume structurally.
    pub fn find_transition(&self, node: NodeId, byte: u8) -> Option<Transition> {
        if matches!(self.nodes[node].kind(), NodeKind::Sink) {
            return Some(Transition {
                span: Span::synthetic(),
                target: ROOT,
            });
        }
        self.nodes[node].transitions.get(&byte).copied()
    }

    /// Insert or overwrite the transition of `node` keyed by `byte`.
    pub(crate) fn set_transition(&mut self, node: NodeId, byte: u8, transition: Transition) {
        self.nodes[node].transitions.insert(byte, transition);
    }

    /// Children of `node` in ascending first-byte order, so traversal is
    /// deterministic for consumers.
    pub fn children(&self, node: NodeId) -> Vec<(u8, Transition)> {
        let mut out: Vec<(u8, Transition)> = self.nodes[node]
            .transitions
            .iter()
            .map(|(&byte, &transition)| (byte, transition))
            .collect();
        out.sort_by_key(|(byte, _)| *byte);
        out
    }

    /// Total number of nodes, root and sink included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node census of the graph.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            total_nodes: self.nodes.len(),
            leaves: 0,
            internal: 0,
        };
        for node in &self.nodes {
            match node.kind() {
                NodeKind::Leaf => stats.leaves += 1,
                NodeKind::Internal => stats.internal += 1,
                NodeKind::Root | NodeKind::Sink => {}
            }
        }
        stats
    }

    pub(crate) fn clear_colors(&mut self) {
        for node in &mut self.nodes {
            node.colors.clear();
        }
    }
}

impl Default for TreeGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Node census reported by [`TreeGraph::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Total nodes, root and sink included.
    pub total_nodes: usize,
    /// Leaf nodes (registered suffix endpoints).
    pub leaves: usize,
    /// Materialized internal nodes.
    pub internal: usize,
}
