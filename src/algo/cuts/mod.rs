//! Exhaustive enumeration of (s,t) edge cuts.
//!
//! Both entry points implement the recursive partition scheme of [Provan
//! and Shier][ps]: a binary search tree over partial assignments `(S, T)`
//! of vertices to the source and target sides, where each tree node either
//! branches on a pivot vertex or emits the source-side partition `S`.
//! What distinguishes the two problems is purely the pivot strategy:
//!
//! * [`all_st_cuts`] screens pivot candidates through the dominator
//!   structure of the graph induced on the unassigned vertices, and lists
//!   every minimal (s,t) edge cut of the graph;
//! * [`all_st_mincuts`] runs on the condensation of the reverse residual
//!   graph of a maximum flow, where minimum cuts correspond one-to-one to
//!   in-closed vertex sets, and picks minimal active vertices.
//!
//! [ps]: https://doi.org/10.1007/BF02288323

mod all_cuts;
mod min_cuts;
mod search;

use fixedbitset::FixedBitSet;

use crate::graph::Graph;
use crate::EdgeType;

use super::scc::condensation;
use super::{ford_fulkerson, reverse_residual_graph, AlgoError};
use search::{enumerate, BatchQueue, MarkedStack};

/// List all (s,t) edge cuts of a directed graph.
///
/// An (s,t) edge cut is a set of edges whose removal disconnects `source`
/// from `target`; the enumeration lists every cut that is *minimal* (no
/// proper subset of it is itself a cut), each exactly once.
///
/// # Arguments
/// * `graph`: a directed graph.
/// * `source`: the vertex the cuts separate from `target`.
/// * `target`: the vertex the cuts separate from `source`.
///
/// # Returns
/// Returns a tuple of two parallel lists:
/// * `Vec<Vec<usize>>`: the cuts, each a list of edge ids;
/// * `Vec<Vec<usize>>`: for each cut, the vertices on the source side —
///   the vertices still reachable from `source` once the cut is removed.
///   Each cut consists exactly of the edges leaving its partition.
///
/// The order of the cuts is deterministic for a given graph but not part
/// of the contract.
///
/// # Errors
/// * [`AlgoError::Unimplemented`] if the graph is undirected.
/// * [`AlgoError::VertexOutOfBounds`] if `source` or `target` is not a
///   vertex of the graph.
/// * [`AlgoError::SourceTargetEqual`] if `source == target`.
///
/// # Complexity
/// The number of minimal cuts can be exponential in the graph size; the
/// running time is **O(c · |V| · (|V| + |E|))** for `c` enumerated cuts,
/// with **O(|V| + |E|)** auxiliary space per recursion level.
///
/// # Example
/// ```rust
/// use flowcuts::DiGraph;
/// use flowcuts::algo::all_st_cuts;
///
/// // a diamond: 0 -> {1, 2} -> 3
/// let graph = DiGraph::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]);
/// let (cuts, partitions) = all_st_cuts(&graph, 0, 3).unwrap();
/// assert_eq!(cuts.len(), 4);
/// assert_eq!(partitions.len(), 4);
/// ```
pub fn all_st_cuts<Ty: EdgeType>(
    graph: &Graph<Ty>,
    source: usize,
    target: usize,
) -> Result<(Vec<Vec<usize>>, Vec<Vec<usize>>), AlgoError> {
    let n = graph.node_count();
    if !graph.is_directed() {
        return Err(AlgoError::Unimplemented);
    }
    if source >= n {
        return Err(AlgoError::VertexOutOfBounds(source));
    }
    if target >= n {
        return Err(AlgoError::VertexOutOfBounds(target));
    }
    if source == target {
        return Err(AlgoError::SourceTargetEqual);
    }

    let mut s = BatchQueue::new(n);
    let mut t = MarkedStack::new(n);
    let mut partitions = Vec::new();
    let mut pivot =
        |s: &BatchQueue, t: &MarkedStack| all_cuts::pivot(graph, s, t, source, target);
    enumerate(n, &mut s, &mut t, &mut pivot, &mut partitions)?;

    let cuts = partitions
        .iter()
        .map(|p| crossing_edges(graph, p, None))
        .collect();
    Ok((cuts, partitions))
}

/// List all minimum-capacity (s,t) edge cuts of a directed graph.
///
/// # Arguments
/// * `graph`: a directed graph.
/// * `source`: the vertex the cuts separate from `target`.
/// * `target`: the vertex the cuts separate from `source`.
/// * `capacity`: positive edge capacities, one per edge index.
///
/// # Returns
/// Returns a tuple of three values:
/// * `f64`: the minimum cut value, equal to the maximum flow from `source`
///   to `target`;
/// * `Vec<Vec<usize>>`: the minimum cuts, each a list of edge ids;
/// * `Vec<Vec<usize>>`: for each cut, the vertices on the source side.
///
/// If the maximum flow is zero (the target is unreachable), no positive
/// edge can cross any cut and both lists are empty.
///
/// # Errors
/// * [`AlgoError::Unimplemented`] if the graph is undirected.
/// * [`AlgoError::VertexOutOfBounds`] if `source` or `target` is not a
///   vertex of the graph.
/// * [`AlgoError::SourceTargetEqual`] if `source == target`.
/// * [`AlgoError::LengthMismatch`] if `capacity` does not have one entry
///   per edge.
/// * [`AlgoError::NonPositiveCapacity`] if any capacity is zero or
///   negative.
///
/// # Complexity
/// One maximum-flow computation (**O(|V||E|²)**) plus **O(|V| + |E|)** per
/// enumerated cut; the number of minimum cuts can be exponential.
///
/// # Example
/// ```rust
/// use flowcuts::DiGraph;
/// use flowcuts::algo::all_st_mincuts;
///
/// // a path with a unit bottleneck in the middle
/// let graph = DiGraph::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
/// let (value, cuts, _) = all_st_mincuts(&graph, 0, 3, &[2.0, 1.0, 2.0]).unwrap();
/// assert_eq!(value, 1.0);
/// assert_eq!(cuts, vec![vec![1]]);
/// ```
pub fn all_st_mincuts<Ty: EdgeType>(
    graph: &Graph<Ty>,
    source: usize,
    target: usize,
    capacity: &[f64],
) -> Result<(f64, Vec<Vec<usize>>, Vec<Vec<usize>>), AlgoError> {
    let n = graph.node_count();
    let m = graph.edge_count();
    if !graph.is_directed() {
        return Err(AlgoError::Unimplemented);
    }
    if source >= n {
        return Err(AlgoError::VertexOutOfBounds(source));
    }
    if target >= n {
        return Err(AlgoError::VertexOutOfBounds(target));
    }
    if source == target {
        return Err(AlgoError::SourceTargetEqual);
    }
    if capacity.len() != m {
        return Err(AlgoError::LengthMismatch {
            expected: m,
            found: capacity.len(),
        });
    }
    for (e, &c) in capacity.iter().enumerate() {
        if c <= 0.0 {
            return Err(AlgoError::NonPositiveCapacity(e));
        }
    }

    let (value, flow) = ford_fulkerson(graph, source, target, capacity)?;
    let residual = reverse_residual_graph(graph, Some(capacity), &flow)?;

    // Contract the strongly connected components of the reverse residual
    // graph; minimum cuts cannot separate vertices inside one component.
    let cond = condensation(&residual);
    let nc = cond.graph.node_count();

    // A contracted vertex is active iff it touches an original edge that
    // carries flow; only active vertices can seed new partitions.
    let mut active = FixedBitSet::with_capacity(nc);
    for e in 0..m {
        if flow[e] > 0.0 {
            let (a, b) = graph.edge_endpoints(e);
            active.insert(cond.membership[a]);
            active.insert(cond.membership[b]);
        }
    }

    let new_target = cond.membership[target];
    // At a maximum flow the residual graph has no source-to-target path, so
    // its reverse cannot merge the two into one component.
    debug_assert_ne!(cond.membership[source], new_target);

    let mut s = BatchQueue::new(nc);
    let mut t = MarkedStack::new(nc);
    let mut contracted = Vec::new();
    let mut pivot = |s: &BatchQueue, t: &MarkedStack| {
        Ok(min_cuts::pivot(&cond.graph, &active, s, t, new_target))
    };
    enumerate(nc, &mut s, &mut t, &mut pivot, &mut contracted)?;

    // Fan the contracted partitions back out to the original vertex set;
    // the cut of each partition is its crossing positive-flow edges.
    let mut cuts = Vec::with_capacity(contracted.len());
    let mut partitions = Vec::with_capacity(contracted.len());
    for cp in &contracted {
        let mut partition = Vec::new();
        for &c in cp {
            partition.extend_from_slice(&cond.components[c]);
        }
        cuts.push(crossing_edges(graph, &partition, Some(&flow)));
        partitions.push(partition);
    }
    Ok((value, cuts, partitions))
}

/// The edges leaving `partition`, optionally restricted to edges carrying
/// positive flow.
fn crossing_edges<Ty: EdgeType>(
    graph: &Graph<Ty>,
    partition: &[usize],
    flow: Option<&[f64]>,
) -> Vec<usize> {
    let mut mask = FixedBitSet::with_capacity(graph.node_count());
    for &v in partition {
        mask.insert(v);
    }
    (0..graph.edge_count())
        .filter(|&e| {
            if let Some(flow) = flow {
                if flow[e] <= 0.0 {
                    return false;
                }
            }
            let (a, b) = graph.edge_endpoints(e);
            mask.contains(a) && !mask.contains(b)
        })
        .collect()
}
