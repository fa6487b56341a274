//! The pivot strategy for enumerating *all* (s,t) cuts.
//!
//! Given the partial assignment `(S, T)`, the pivot searches Γ(S) — the
//! out-neighborhood of the source side — for a vertex `v` whose absorption
//! keeps the assignment extendable to a cut, and returns the minimal vertex
//! set `I(S, v)` that must accompany `v` to the source side. Candidates are
//! screened through the dominator structure of the graph induced on
//! `V ∖ S`, reverse-rooted at the target: only Γ(S)-vertices minimal under
//! dominance can yield a fresh cut, and a candidate is viable only if
//! absorbing its dominated region stays clear of `T` and the target.

use fixedbitset::FixedBitSet;

use crate::algo::dominators::lengauer_tarjan;
use crate::algo::AlgoError;
use crate::graph::Graph;
use crate::visit::Bfs;
use crate::{Direction, EdgeType};

use super::search::{BatchQueue, MarkedStack};

pub(super) fn pivot<Ty: EdgeType>(
    graph: &Graph<Ty>,
    s: &BatchQueue,
    t: &MarkedStack,
    source: usize,
    target: usize,
) -> Result<Option<(usize, Vec<usize>)>, AlgoError> {
    let n = graph.node_count();

    // The graph induced on K = V \ S, with its index maps.
    let mut keep = FixedBitSet::with_capacity(n);
    keep.set_range(.., true);
    for &v in s.as_slice() {
        keep.set(v, false);
    }
    let (gbar, map, invmap) = graph.induced_subgraph(&keep);
    let bar_target = map[target].expect("the target never joins the source side");

    // Dominance toward the target: every path from a kept vertex to the
    // target must pass through the vertex's dominators. Kept vertices that
    // cannot reach the target at all form the leftout set.
    let dom = lengauer_tarjan(&gbar, bar_target, Direction::Incoming)?;
    let mut leftout_bar = FixedBitSet::with_capacity(gbar.node_count());
    for u in dom.unreachable() {
        leftout_bar.insert(u);
    }

    // Γ(S): out-neighbors of S that are not in S; the source stands in for
    // the empty S. Vertices that cannot reach the target are excluded.
    let mut in_gamma = FixedBitSet::with_capacity(n);
    let mut gamma = Vec::new();
    if s.is_empty() {
        gamma.push(source);
        in_gamma.insert(source);
    } else {
        for &v in s.as_slice() {
            for w in graph.neighbors_directed(v, Direction::Outgoing) {
                if !s.contains(w) && !in_gamma.contains(w) {
                    in_gamma.insert(w);
                    gamma.push(w);
                }
            }
        }
    }
    gamma.retain(|&v| map[v].map_or(false, |b| !leftout_bar.contains(b)));

    // Mark the non-minimal elements of Γ(S) under dominance: walking the
    // dominator tree from the root, a Γ(S)-vertex with another Γ(S)-vertex
    // below it is not minimal.
    let nb = gbar.node_count();
    let mut gamma_bar = FixedBitSet::with_capacity(nb);
    for &v in &gamma {
        gamma_bar.insert(map[v].expect("Γ(S) is disjoint from S"));
    }
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nb];
    for v in 0..nb {
        if let Some(d) = dom.immediate_dominator(v) {
            children[d].push(v);
        }
    }
    let mut nonmin = FixedBitSet::with_capacity(nb);
    let mut walk: Vec<(usize, Option<usize>)> = vec![(bar_target, None)];
    while let Some((v, mut nearest)) = walk.pop() {
        if gamma_bar.contains(v) {
            if let Some(above) = nearest {
                nonmin.insert(above);
            }
            nearest = Some(v);
        }
        for &c in &children[v] {
            walk.push((c, nearest));
        }
    }

    // Try the minimal elements in turn.
    for &v in &gamma {
        let bar_v = map[v].expect("Γ(S) is disjoint from S");
        if nonmin.contains(bar_v) {
            continue;
        }

        // Nu(v): the dominator subtree below v, in original vertex ids.
        let mut nu = FixedBitSet::with_capacity(n);
        let mut subtree = vec![bar_v];
        while let Some(u) = subtree.pop() {
            nu.insert(invmap[u]);
            subtree.extend_from_slice(&children[u]);
        }

        // The region Γ(S) floods within Nu(v) must stay clear of T and the
        // target, otherwise absorbing v would wall the target off.
        let mut flood = Bfs::empty(graph).restrict(&nu);
        for &g in &gamma {
            flood.push_root(g);
        }
        let mut viable = true;
        while let Some(u) = flood.next(graph) {
            if u == target || t.contains(u) {
                viable = false;
                break;
            }
        }
        if !viable {
            continue;
        }

        // I(S, v): everything v reaches inside Nu(v) plus the leftout
        // vertices it drags along.
        let mut allowed = nu;
        for u in leftout_bar.ones() {
            allowed.insert(invmap[u]);
        }
        let mut reach = Bfs::empty(graph).restrict(&allowed);
        reach.push_root(v);
        let mut isv = Vec::new();
        while let Some(u) = reach.next(graph) {
            isv.push(u);
        }
        debug_assert!(isv.contains(&v));
        return Ok(Some((v, isv)));
    }

    Ok(None)
}
