//! # Colored generalized suffix tree
//!
//! Online construction of a generalized suffix tree over byte strings using
//! Ukkonen's algorithm, with per-node color sets recording which input
//! strings contribute to each subtree.
//!
//! ## Core algorithm
//!
//! 1. **Reference pairs**: a position in the tree is a base node plus an
//!    on-edge offset, kept canonical by `canonize`
//! 2. **Suffix links**: each extension hops to the next shorter suffix in
//!    amortized O(1), which keeps construction linear
//! 3. **Open-ended leaf edges**: leaf labels end at "the current end" of
//!    their string and grow implicitly as characters are appended
//! 4. **Shared sentinel**: every stored string is terminated by the same
//!    sentinel byte, so each suffix ends at a leaf; strings are told apart
//!    by ID, and a lazy coloring pass marks every node with the set of
//!    strings whose suffixes run through it
//!
//! ## Usage
//!
//! ```
//! use colored_gst::GeneralizedSuffixTree;
//!
//! let mut tree = GeneralizedSuffixTree::new();
//! tree.add_string(b"abc").unwrap();
//! tree.add_string(b"abd").unwrap();
//! assert!(tree.is_substring(b"ab"));
//! assert!(tree.is_suffix(b"bd"));
//! assert!(!tree.is_suffix(b"ab"));
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod registry; // String storage and identifier assignment
pub mod tree; // Node graph, transitions, color sets

mod colors; // Lazy color computation
mod ukkonen; // Online construction driver

pub use registry::{StringId, StringRegistry, MAX_STRINGS, SENTINEL};
pub use tree::{
    ColorSet, Node, NodeId, NodeKind, Pos, Span, Transition, TreeGraph, TreeStats, OPEN_END, ROOT,
    SINK,
};

use thiserror::Error;
use ukkonen::RefPoint;

/// Errors surfaced by tree construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GstError {
    /// Input contains the terminal sentinel byte and cannot be stored.
    #[error("input contains the sentinel byte at position {position}")]
    SentinelInInput {
        /// Offset of the first sentinel byte within the input.
        position: usize,
    },

    /// The registry already holds the maximum number of strings.
    #[error("string capacity exhausted ({limit} strings)")]
    CapacityExhausted {
        /// The fixed string cap (the color-mask width).
        limit: usize,
    },

    /// An internal invariant was violated mid-construction. The tree is left
    /// in an undefined state and must be discarded.
    #[error("suffix tree invariant broken: {detail}")]
    CorruptTree {
        /// Which invariant check tripped.
        detail: &'static str,
    },
}

impl GstError {
    pub(crate) fn corrupt(detail: &'static str) -> Self {
        GstError::CorruptTree { detail }
    }
}

/// Generalized suffix tree with per-node color sets.
///
/// Strings are inserted incrementally; membership queries are available at
/// any point. Coloring is computed lazily on the first call that needs it
/// and cached until the next structural change. All mutating operations,
/// lazy recoloring included, take `&mut self`, so required serialization of
/// writers against readers is enforced by the borrow checker.
#[derive(Debug)]
pub struct GeneralizedSuffixTree {
    registry: StringRegistry,
    graph: TreeGraph,
    colors_clean: bool,
}

impl GeneralizedSuffixTree {
    /// Empty tree: just the root and the sink, no strings.
    pub fn new() -> Self {
        Self {
            registry: StringRegistry::new(),
            graph: TreeGraph::new(),
            colors_clean: false,
        }
    }

    /// Register `input` and extend the tree with all of its suffixes.
    ///
    /// Returns the assigned ID (1-based, insertion order). Inputs containing
    /// the sentinel byte and insertions past [`MAX_STRINGS`] are rejected
    /// with the tree untouched. Inserting the same bytes twice succeeds with
    /// a fresh ID; the shared paths end up carrying both colors.
    ///
    /// A [`GstError::CorruptTree`] error removes the registry entry but does
    /// not undo structural mutation; the tree must be discarded.
    pub fn add_string(&mut self, input: &[u8]) -> Result<StringId, GstError> {
        let id = self.registry.append(input)?;
        if let Err(error) = self.deploy_suffixes(id) {
            self.registry.remove_last();
            return Err(error);
        }
        self.colors_clean = false;
        Ok(id)
    }

    /// True iff `query` occurs as a contiguous substring of some inserted
    /// string. Queries containing the sentinel byte are never substrings.
    pub fn is_substring(&self, query: &[u8]) -> bool {
        if query.contains(&SENTINEL) {
            return false;
        }
        let mut point = RefPoint::root();
        self.fast_forward(query, &mut point).is_none()
    }

    /// True iff `query` is a suffix of some inserted string. Queries
    /// containing the sentinel byte are never suffixes.
    pub fn is_suffix(&self, query: &[u8]) -> bool {
        if query.contains(&SENTINEL) {
            return false;
        }
        let mut terminated = Vec::with_capacity(query.len() + 1);
        terminated.extend_from_slice(query);
        terminated.push(SENTINEL);
        let mut point = RefPoint::root();
        self.fast_forward(&terminated, &mut point).is_none()
    }

    /// Number of IDs issued so far.
    pub fn string_count(&self) -> usize {
        self.registry.count()
    }

    /// Original bytes for `id` with the sentinel stripped; empty for unknown
    /// IDs.
    pub fn get_string(&self, id: StringId) -> &[u8] {
        self.registry.original(id)
    }

    /// Handle of the root node, the entry point for traversal.
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Read access to the node graph.
    pub fn graph(&self) -> &TreeGraph {
        &self.graph
    }

    /// Node census of the tree.
    pub fn stats(&self) -> TreeStats {
        self.graph.stats()
    }
}
