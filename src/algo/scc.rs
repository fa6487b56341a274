//! Strongly connected components and graph condensation.

use std::collections::HashSet;

use fixedbitset::FixedBitSet;

use crate::graph::{DiGraph, Graph};
use crate::{Direction, EdgeType};

/// The not-yet-discovered sentinel for DFS numbers.
const UNVISITED: usize = usize::MAX;

/// Return the strongly connected components of the graph, each as a list of
/// vertex ids.
///
/// This is an iterative formulation of [Tarjan's algorithm][1]: a single
/// depth-first pass driven by an explicit neighbor-cursor stack (the same
/// scheme the dominator computation uses to build its spanning tree). Every
/// vertex carries the smallest DFS number its subtree can reach through at
/// most one non-tree edge; a vertex whose subtree cannot climb above the
/// vertex itself seals a component, which consists of the run of still-open
/// vertices above it on the component stack.
///
/// Components are emitted in postorder: a component is sealed only after
/// every component reachable from it, so the list is a reverse topological
/// order of the condensation. The order of vertex ids within a component is
/// arbitrary.
///
/// For an undirected graph, the components are simply the connected
/// components.
///
/// # Complexity
/// * Time complexity: **O(|V| + |E|)**.
/// * Auxiliary space: **O(|V|)**.
///
/// [1]: https://en.wikipedia.org/wiki/Tarjan%27s_strongly_connected_components_algorithm
pub fn tarjan_scc<Ty: EdgeType>(graph: &Graph<Ty>) -> Vec<Vec<usize>> {
    let n = graph.node_count();
    let mut order = vec![UNVISITED; n];
    let mut low = vec![0; n];
    // vertices discovered but not yet assigned to a sealed component
    let mut open = FixedBitSet::with_capacity(n);
    let mut open_stack: Vec<usize> = Vec::new();
    let mut components = Vec::new();
    let mut counter = 0;

    let mut work: Vec<(usize, std::vec::IntoIter<usize>)> = Vec::new();
    for start in 0..n {
        if order[start] != UNVISITED {
            continue;
        }
        order[start] = counter;
        low[start] = counter;
        counter += 1;
        open.insert(start);
        open_stack.push(start);
        work.push((
            start,
            graph
                .neighbors_directed(start, Direction::Outgoing)
                .collect::<Vec<_>>()
                .into_iter(),
        ));
        loop {
            let (v, next) = match work.last_mut() {
                Some((v, successors)) => (*v, successors.next()),
                None => break,
            };
            match next {
                Some(w) if order[w] == UNVISITED => {
                    order[w] = counter;
                    low[w] = counter;
                    counter += 1;
                    open.insert(w);
                    open_stack.push(w);
                    work.push((
                        w,
                        graph
                            .neighbors_directed(w, Direction::Outgoing)
                            .collect::<Vec<_>>()
                            .into_iter(),
                    ));
                }
                Some(w) => {
                    // a non-tree edge lowers `low` only while its head is
                    // still open; sealed components cannot be climbed into
                    if open.contains(w) && order[w] < low[v] {
                        low[v] = order[w];
                    }
                }
                None => {
                    work.pop();
                    if let Some(&(parent, _)) = work.last() {
                        if low[v] < low[parent] {
                            low[parent] = low[v];
                        }
                    }
                    if low[v] == order[v] {
                        // v cannot climb above itself: everything still open
                        // above it belongs to its component
                        let mut component = Vec::new();
                        loop {
                            let w = open_stack.pop().expect("component root stays open");
                            open.set(w, false);
                            component.push(w);
                            if w == v {
                                break;
                            }
                        }
                        components.push(component);
                    }
                }
            }
        }
    }
    components
}

/// The condensation of a graph: one vertex per strongly connected
/// component, with the membership maps in both directions.
#[derive(Clone, Debug)]
pub struct Condensation {
    /// The contracted graph. It is simple: self-loops and parallel edges
    /// arising from the contraction are dropped.
    pub graph: DiGraph,
    /// For each original vertex, the contracted vertex it became.
    pub membership: Vec<usize>,
    /// For each contracted vertex, the original vertices it contains.
    pub components: Vec<Vec<usize>>,
}

/// Condense every strongly connected component of `g` into a single vertex.
///
/// Contracted vertices are numbered by the postorder of [`tarjan_scc`], so
/// every surviving edge points from a higher to a lower component index and
/// the result is acyclic.
///
/// # Complexity
/// * Time complexity: **O(|V| + |E|)**.
/// * Auxiliary space: **O(|V| + |E|)**.
pub fn condensation<Ty: EdgeType>(g: &Graph<Ty>) -> Condensation {
    let components = tarjan_scc(g);
    let mut membership = vec![0; g.node_count()];
    for (c, component) in components.iter().enumerate() {
        for &v in component {
            membership[v] = c;
        }
    }
    let mut graph = DiGraph::with_capacity(components.len(), 0);
    for _ in 0..components.len() {
        graph.add_node();
    }
    let mut seen = HashSet::new();
    for e in 0..g.edge_count() {
        let (a, b) = g.edge_endpoints(e);
        let (ca, cb) = (membership[a], membership[b]);
        if ca != cb && seen.insert((ca, cb)) {
            graph.add_edge(ca, cb);
        }
    }
    Condensation {
        graph,
        membership,
        components,
    }
}
