//! The pivot strategy for enumerating all *minimum* (s,t) cuts.
//!
//! This pivot operates on the condensed reverse residual graph of a maximum
//! flow, which is acyclic. Source-side partitions of minimum cuts are
//! exactly the sets closed under in-neighbors there, so the pivot picks a
//! *minimal active* vertex — an active vertex no other active vertex can
//! reach inside the graph induced on `V ∖ S` — and returns everything that
//! reaches it as the region `I(S, v)` that must accompany it to the source
//! side.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::graph::DiGraph;
use crate::visit::Bfs;
use crate::Direction;

use super::search::{BatchQueue, MarkedStack};

pub(super) fn pivot(
    graph: &DiGraph,
    active: &FixedBitSet,
    s: &BatchQueue,
    t: &MarkedStack,
    target: usize,
) -> Option<(usize, Vec<usize>)> {
    let n = graph.node_count();
    if s.len() == n {
        return None;
    }

    // The graph induced on K = V \ S, with its index maps.
    let mut keep = FixedBitSet::with_capacity(n);
    keep.set_range(.., true);
    for &v in s.as_slice() {
        keep.set(v, false);
    }
    let (gbar, _, invmap) = graph.induced_subgraph(&keep);
    let nb = gbar.node_count();

    // Remove inactive vertices that no remaining vertex feeds; what is left
    // with in-degree zero and active is minimal among the active vertices.
    let mut indegree = vec![0usize; nb];
    for e in 0..gbar.edge_count() {
        let (_, b) = gbar.edge_endpoints(e);
        indegree[b] += 1;
    }
    let mut queue: VecDeque<usize> = (0..nb)
        .filter(|&v| indegree[v] == 0 && !active.contains(invmap[v]))
        .collect();
    while let Some(v) = queue.pop_front() {
        for w in gbar.neighbors_directed(v, Direction::Outgoing) {
            indegree[w] -= 1;
            if indegree[w] == 0 && !active.contains(invmap[w]) {
                queue.push_back(w);
            }
        }
    }

    // The first minimal active vertex that is still assignable.
    for v in 0..nb {
        let orig = invmap[v];
        if indegree[v] == 0 && active.contains(orig) && orig != target && !t.contains(orig) {
            // I(S, v): everything that reaches v within K, minus T.
            let mut reach = Bfs::empty(graph).restrict(&keep).reversed();
            reach.push_root(orig);
            let mut isv = Vec::new();
            while let Some(u) = reach.next(graph) {
                if !t.contains(u) {
                    isv.push(u);
                }
            }
            debug_assert!(isv.contains(&orig));
            return Some((orig, isv));
        }
    }

    None
}
