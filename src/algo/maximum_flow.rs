//! Maximum flow with per-edge flow values.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::graph::Graph;
use crate::{Direction, EdgeType};

use super::AlgoError;

/// [Ford–Fulkerson][ff] algorithm in the [Edmonds–Karp][ek] variation.
/// Computes the maximum flow from `source` to `target` in a directed graph
/// with the given edge capacities.
///
/// # Arguments
/// * `graph`: a directed graph.
/// * `source`: the vertex where the flow starts.
/// * `target`: the vertex where the flow ends.
/// * `capacities`: non-negative edge capacities, one per edge index.
///
/// # Returns
/// Returns a tuple of two values:
/// * `f64`: the computed maximum flow value;
/// * `Vec<f64>`: the flow of each edge, indexed by edge id.
///
/// # Errors
/// * [`AlgoError::NotDirected`] if the graph is undirected.
/// * [`AlgoError::VertexOutOfBounds`] if `source` or `target` is not a
///   vertex of the graph.
/// * [`AlgoError::SourceTargetEqual`] if `source == target`.
/// * [`AlgoError::LengthMismatch`] if `capacities` does not have one entry
///   per edge.
///
/// # Complexity
/// * Time complexity: **O(|V||E|²)**.
/// * Auxiliary space: **O(|V| + |E|)**.
///
/// [ff]: https://en.wikipedia.org/wiki/Ford%E2%80%93Fulkerson_algorithm
/// [ek]: https://en.wikipedia.org/wiki/Edmonds%E2%80%93Karp_algorithm
pub fn ford_fulkerson<Ty: EdgeType>(
    graph: &Graph<Ty>,
    source: usize,
    target: usize,
    capacities: &[f64],
) -> Result<(f64, Vec<f64>), AlgoError> {
    let n = graph.node_count();
    let m = graph.edge_count();
    if !graph.is_directed() {
        return Err(AlgoError::NotDirected);
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
    if capacities.len() != m {
        return Err(AlgoError::LengthMismatch {
            expected: m,
            found: capacities.len(),
        });
    }

    let mut flows = vec![0.0; m];
    let mut value = 0.0;
    let mut edge_to: Vec<Option<usize>> = vec![None; n];
    while has_augmenting_path(graph, source, target, &mut edge_to, capacities, &flows) {
        // Find the bottleneck of the path, walking back from the target.
        let mut delta = f64::INFINITY;
        let mut vertex = target;
        while vertex != source {
            let e = edge_to[vertex].expect("augmenting path reached the source");
            let (a, b) = graph.edge_endpoints(e);
            let residual = if b == vertex {
                capacities[e] - flows[e]
            } else {
                flows[e]
            };
            delta = delta.min(residual);
            vertex = if b == vertex { a } else { b };
        }
        // Push `delta` along the path.
        let mut vertex = target;
        while vertex != source {
            let e = edge_to[vertex].expect("augmenting path reached the source");
            let (a, b) = graph.edge_endpoints(e);
            if b == vertex {
                flows[e] += delta;
                vertex = a;
            } else {
                flows[e] -= delta;
                vertex = b;
            }
        }
        value += delta;
    }
    Ok((value, flows))
}

/// Breadth-first search for an augmenting path in the residual network:
/// out-edges offer their remaining capacity `c − f`, in-edges offer their
/// accumulated flow `f`.
fn has_augmenting_path<Ty: EdgeType>(
    graph: &Graph<Ty>,
    source: usize,
    target: usize,
    edge_to: &mut [Option<usize>],
    capacities: &[f64],
    flows: &[f64],
) -> bool {
    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    let mut queue = VecDeque::new();
    visited.insert(source);
    queue.push_back(source);

    while let Some(vertex) = queue.pop_front() {
        let out_edges = graph.edges_directed(vertex, Direction::Outgoing);
        let in_edges = graph.edges_directed(vertex, Direction::Incoming);
        for e in out_edges.chain(in_edges) {
            let (a, b) = graph.edge_endpoints(e);
            if a == b {
                // a self-loop never extends an augmenting path
                continue;
            }
            let next = if a == vertex { b } else { a };
            let residual = if a == vertex {
                capacities[e] - flows[e]
            } else {
                flows[e]
            };
            if !visited.contains(next) && residual > 0.0 {
                visited.insert(next);
                edge_to[next] = Some(e);
                if next == target {
                    return true;
                }
                queue.push_back(next);
            }
        }
    }
    false
}
