//! Flow-network transformations.
//!
//! These are the building-block graph surgeries that convert
//! vertex-capacity and maximum-flow problems into forms consumable by the
//! flow and cut algorithms: the [Even–Tarjan vertex-splitting
//! reduction](even_tarjan_reduction), the [residual graph](residual_graph)
//! and the [reverse residual graph](reverse_residual_graph).

use crate::graph::{DiGraph, Graph};
use crate::EdgeType;

use super::AlgoError;

/// Split every vertex of `graph` into an in-copy and an out-copy, reducing
/// vertex capacities to edge capacities as in [Even and Tarjan][0].
///
/// On `n` vertices and `m` edges the result has `2n` vertices and `2m + n`
/// edges. Vertex `v`'s in-copy keeps the index `v`, its out-copy is
/// `v + n`. The first `n` edges are the *inner* edges `v → v + n` with
/// capacity 1; each original edge `(u, v)` then contributes the two *outer*
/// edges `u + n → v` and `v + n → u`. Outer edges get the sentinel capacity
/// `n`, which no unit-vertex-capacity flow can saturate, so downstream
/// maximum-flow computations may treat it as infinite.
///
/// # Errors
/// * [`AlgoError::TooManyEdges`] if `2m + n` or `2n` overflows.
///
/// # Complexity
/// * Time complexity: **O(|V| + |E|)**.
/// * Auxiliary space: **O(|V| + |E|)**.
///
/// [0]: https://doi.org/10.1137/0204043
pub fn even_tarjan_reduction<Ty: EdgeType>(
    graph: &Graph<Ty>,
) -> Result<(DiGraph, Vec<f64>), AlgoError> {
    let n = graph.node_count();
    let m = graph.edge_count();
    let nodes = n.checked_mul(2).ok_or(AlgoError::TooManyEdges)?;
    let edges = m
        .checked_mul(2)
        .and_then(|e| e.checked_add(n))
        .ok_or(AlgoError::TooManyEdges)?;

    let mut result = DiGraph::with_capacity(nodes, edges);
    for _ in 0..nodes {
        result.add_node();
    }
    let mut capacity = Vec::with_capacity(edges);
    let infinity = n as f64;
    for v in 0..n {
        result.add_edge(v, v + n);
        capacity.push(1.0);
    }
    for e in 0..m {
        let (u, v) = graph.edge_endpoints(e);
        result.add_edge(u + n, v);
        capacity.push(infinity);
        result.add_edge(v + n, u);
        capacity.push(infinity);
    }
    Ok((result, capacity))
}

/// Build the residual graph of `graph` under the given capacities and flow.
///
/// The result has the same vertex set and one edge `(from, to)` per
/// original edge whose residual capacity `c − f` is strictly positive; the
/// parallel vector holds those residual capacities.
///
/// # Errors
/// * [`AlgoError::LengthMismatch`] if `capacity` or `flow` does not have
///   one entry per edge.
///
/// # Complexity
/// * Time complexity: **O(|V| + |E|)**.
/// * Auxiliary space: **O(|V| + |E|)**.
pub fn residual_graph<Ty: EdgeType>(
    graph: &Graph<Ty>,
    capacity: &[f64],
    flow: &[f64],
) -> Result<(DiGraph, Vec<f64>), AlgoError> {
    let m = graph.edge_count();
    if capacity.len() != m {
        return Err(AlgoError::LengthMismatch {
            expected: m,
            found: capacity.len(),
        });
    }
    if flow.len() != m {
        return Err(AlgoError::LengthMismatch {
            expected: m,
            found: flow.len(),
        });
    }

    let n = graph.node_count();
    let mut result = DiGraph::with_capacity(n, m);
    for _ in 0..n {
        result.add_node();
    }
    let mut residual = Vec::new();
    for e in 0..m {
        let rc = capacity[e] - flow[e];
        if rc > 0.0 {
            let (u, v) = graph.edge_endpoints(e);
            result.add_edge(u, v);
            residual.push(rc);
        }
    }
    Ok((result, residual))
}

/// Build the reverse residual graph of `graph` under the given capacities
/// and flow.
///
/// The result has the same vertex set; each original edge `(from, to)`
/// contributes the edge `(from, to)` iff its flow is positive, and the
/// edge `(to, from)` iff its flow is below capacity. This is the
/// edge-reverse of the residual graph; it is the graph whose closed vertex
/// sets certify minimum cuts.
///
/// When `capacity` is `None` every edge has capacity 1.
///
/// # Errors
/// * [`AlgoError::LengthMismatch`] if `flow`, or `capacity` when present,
///   does not have one entry per edge.
///
/// # Complexity
/// * Time complexity: **O(|V| + |E|)**.
/// * Auxiliary space: **O(|V| + |E|)**.
pub fn reverse_residual_graph<Ty: EdgeType>(
    graph: &Graph<Ty>,
    capacity: Option<&[f64]>,
    flow: &[f64],
) -> Result<DiGraph, AlgoError> {
    let m = graph.edge_count();
    if let Some(capacity) = capacity {
        if capacity.len() != m {
            return Err(AlgoError::LengthMismatch {
                expected: m,
                found: capacity.len(),
            });
        }
    }
    if flow.len() != m {
        return Err(AlgoError::LengthMismatch {
            expected: m,
            found: flow.len(),
        });
    }

    let n = graph.node_count();
    let mut result = DiGraph::with_capacity(n, m);
    for _ in 0..n {
        result.add_node();
    }
    for e in 0..m {
        let (u, v) = graph.edge_endpoints(e);
        let c = capacity.map_or(1.0, |c| c[e]);
        if flow[e] > 0.0 {
            result.add_edge(u, v);
        }
        if flow[e] < c {
            result.add_edge(v, u);
        }
    }
    Ok(result)
}
