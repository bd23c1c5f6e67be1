//! Online construction: reference-pair machinery and the extension driver.
//!
//! The construction state is a canonical reference pair: a base node plus a
//! span of the string being inserted. An empty span means the position is
//! exactly at the node; a non-empty one means the position lies that many
//! characters down the edge whose label starts with the span's first byte.
//! `canonize` keeps the pair canonical, `test_and_split` materializes
//! implicit positions on demand, and `update` walks the suffix-link chain
//! once per appended character, which is what keeps the total work linear.

use crate::registry::StringId;
use crate::tree::{NodeId, Pos, Span, Transition, ROOT, SINK};
use crate::{GeneralizedSuffixTree, GstError};

/// Reference pair under construction: the base node and the left end of the
/// pending span. The right end is carried by the caller.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RefPoint {
    pub(crate) node: NodeId,
    pub(crate) pos: Pos,
}

impl RefPoint {
    pub(crate) fn root() -> Self {
        Self { node: ROOT, pos: 0 }
    }
}

impl GeneralizedSuffixTree {
    /// Shorten `(node, stored[ref_id][left..=right])` to canonical form by
    /// walking down every edge the span fully covers.
    ///
    /// The sink has no real edges; it consumes exactly one byte, whatever it
    /// is, and hands the walk to the root.
    pub(crate) fn canonize(
        &self,
        node: NodeId,
        ref_id: StringId,
        left: Pos,
        right: Pos,
    ) -> Result<RefPoint, GstError> {
        let mut node = node;
        let mut left = left;
        while left <= right {
            if node == SINK {
                node = ROOT;
                left += 1;
                continue;
            }
            let byte = self.registry.byte_at(ref_id, left);
            let edge = self
                .graph
                .find_transition(node, byte)
                .ok_or(GstError::corrupt("canonize: no transition under a non-empty span"))?;
            // Open-ended edges look unbounded here, so the walk can never
            // descend past a leaf.
            let edge_len = edge.span.right - edge.span.left;
            if edge_len > right - left {
                break;
            }
            left += edge_len + 1;
            node = edge.target;
        }
        Ok(RefPoint { node, pos: left })
    }

    /// Decide whether the position `(node, stored[ref_id][left..=right])`
    /// already continues with byte `t`.
    ///
    /// Returns `(true, node)` when it does. When the position is implicit and
    /// does not, the covering edge is split and the freshly materialized
    /// internal node is returned alongside `false`.
    pub(crate) fn test_and_split(
        &mut self,
        node: NodeId,
        ref_id: StringId,
        left: Pos,
        right: Pos,
        t: u8,
    ) -> Result<(bool, NodeId), GstError> {
        if right < left {
            // The position is exactly at `node`.
            return Ok(match self.graph.find_transition(node, t) {
                Some(existing) => {
                    // Provenance hint on the continuation target; the lazy
                    // coloring pass rebuilds the authoritative masks later.
                    self.graph.node_mut(existing.target).colors.insert(ref_id);
                    (true, node)
                }
                None => (false, node),
            });
        }

        let delta = right - left;
        let first = self.registry.byte_at(ref_id, left);
        let edge = self
            .graph
            .find_transition(node, first)
            .ok_or(GstError::corrupt("test_and_split: no transition under the active span"))?;
        let espan = edge.span;
        let probe = self.registry.byte_at(espan.ref_id, espan.left + delta + 1);
        if probe == t {
            return Ok((true, node));
        }

        // Materialize the implicit position: the old edge now stops at the
        // split node, which carries the remainder toward the original target.
        let split = self.graph.create_internal();
        self.graph.set_transition(
            split,
            probe,
            Transition {
                span: Span::new(espan.ref_id, espan.left + delta + 1, espan.right),
                target: edge.target,
            },
        );
        self.graph.set_transition(
            node,
            first,
            Transition {
                span: Span::new(espan.ref_id, espan.left, espan.left + delta),
                target: split,
            },
        );
        self.colors_clean = false;
        Ok((false, split))
    }

    /// Extend the tree with the character at `stored[ref_id][current]`,
    /// starting from the canonical pair `(node, stored[ref_id][left..current-1])`.
    ///
    /// Walks the border path: at every non-endpoint position a new open-ended
    /// leaf is attached, then the suffix link hops to the next shorter
    /// suffix. Stops at the first endpoint and returns it as the next active
    /// point.
    pub(crate) fn update(
        &mut self,
        node: NodeId,
        ref_id: StringId,
        left: Pos,
        current: Pos,
    ) -> Result<RefPoint, GstError> {
        let t = self.registry.byte_at(ref_id, current);
        let mut oldr = ROOT;
        let mut active = RefPoint { node, pos: left };

        let (mut endpoint, mut out) =
            self.test_and_split(active.node, ref_id, active.pos, current - 1, t)?;
        while !endpoint {
            let leaf = self.graph.create_leaf();
            self.graph.node_mut(leaf).colors.insert(ref_id);
            self.graph.set_transition(
                out,
                t,
                Transition {
                    span: Span::open(ref_id, current),
                    target: leaf,
                },
            );
            self.colors_clean = false;

            if oldr != ROOT {
                self.graph.node_mut(oldr).suffix_link = Some(out);
            }
            oldr = out;

            let link = self
                .graph
                .node(active.node)
                .suffix_link()
                .ok_or(GstError::corrupt("update: active node has no suffix link"))?;
            active = self.canonize(link, ref_id, active.pos, current - 1)?;
            let (is_endpoint, out_node) =
                self.test_and_split(active.node, ref_id, active.pos, current - 1, t)?;
            endpoint = is_endpoint;
            out = out_node;
        }

        if oldr != ROOT {
            self.graph.node_mut(oldr).suffix_link = Some(active.node);
        }
        Ok(active)
    }

    /// Walk `s` down from `point`, matching as far as possible.
    ///
    /// Returns the index where `s` diverges from the tree, leaving `point` at
    /// the node just above the divergence with `pos` at the last matched
    /// node boundary; or `None` when all of `s` is consumed.
    pub(crate) fn fast_forward(&self, s: &[u8], point: &mut RefPoint) -> Option<Pos> {
        let s_len = s.len() as Pos;
        let mut k = point.pos;
        loop {
            if k >= s_len {
                return None;
            }
            let Some(edge) = self.graph.find_transition(point.node, s[k as usize]) else {
                point.pos = k;
                return Some(k);
            };
            // The first byte matches by keying; compare the rest of the edge
            // label, with open ends resolved to the backing string's end.
            let span = edge.span;
            let stored = self.registry.view(span.ref_id);
            let end = span.right.min(self.registry.last_index(span.ref_id));
            let mut i: Pos = 1;
            while i <= end - span.left {
                if k + i >= s_len {
                    return None;
                }
                if s[(k + i) as usize] != stored[(span.left + i) as usize] {
                    point.pos = k;
                    return Some(k + i);
                }
                i += 1;
            }
            point.node = edge.target;
            k += i;
            point.pos = k;
        }
    }

    /// Insert every suffix of the stored string `id` into the tree.
    ///
    /// Fast-forwards through whatever prefix of the string is already
    /// present, then drives `update`/`canonize` once per remaining character.
    pub(crate) fn deploy_suffixes(&mut self, id: StringId) -> Result<(), GstError> {
        let mut point = RefPoint::root();
        let diverged = {
            let stored = self.registry.view(id);
            self.fast_forward(stored, &mut point)
        };
        // The whole string, sentinel included, may already be a path when
        // the same bytes were inserted before; the coloring pass picks the
        // new ID up from the registry, so there is nothing to deploy.
        let Some(first) = diverged else {
            return Ok(());
        };

        let len = self.registry.len(id);
        let mut i = first;
        while i < len {
            let mid = self.update(point.node, id, point.pos, i)?;
            point = self.canonize(mid.node, id, mid.pos, i)?;
            i += 1;
        }
        Ok(())
    }
}
