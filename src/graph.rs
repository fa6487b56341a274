//! A compact index graph using an adjacency list representation.
//!
//! Vertices are `usize` indices in `0..n`, edges are `usize` indices in
//! `0..m`. The graph stores no weights; edge-indexed data such as capacities
//! and flows are kept in parallel vectors by the caller.

use std::marker::PhantomData;

use fixedbitset::FixedBitSet;

use crate::{Directed, Direction, EdgeType, Undirected};

/// A compact graph with `usize` vertex and edge indices.
///
/// The graph is parameterized over its edge type: [`Directed`] or
/// [`Undirected`]. Parallel edges and self-loops are allowed.
///
/// Vertices are created by [`add_node`](Graph::add_node) and identified by
/// the order of creation; edges likewise by [`add_edge`](Graph::add_edge).
/// Removal is not supported, which keeps both index spaces dense and lets
/// callers attach per-edge data as plain slices.
#[derive(Clone, Debug)]
pub struct Graph<Ty: EdgeType = Directed> {
    edges: Vec<(usize, usize)>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
    ty: PhantomData<Ty>,
}

/// A `Graph` with directed edges.
pub type DiGraph = Graph<Directed>;

/// A `Graph` with undirected edges.
pub type UnGraph = Graph<Undirected>;

impl<Ty: EdgeType> Default for Graph<Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ty: EdgeType> Graph<Ty> {
    /// Create a new, empty `Graph`.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create a new `Graph` with estimated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Graph {
            edges: Vec::with_capacity(edges),
            out_edges: Vec::with_capacity(nodes),
            in_edges: Vec::with_capacity(nodes),
            ty: PhantomData,
        }
    }

    /// Create a `Graph` on `nodes` vertices from an iterator of
    /// `(source, target)` pairs.
    ///
    /// **Panics** if an endpoint is out of bounds.
    pub fn from_edges<I>(nodes: usize, iterable: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::with_capacity(nodes, 0);
        for _ in 0..nodes {
            graph.add_node();
        }
        for (a, b) in iterable {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Return the number of vertices in the graph.
    pub fn node_count(&self) -> usize {
        self.out_edges.len()
    }

    /// Return the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has directed edges or not.
    #[inline]
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Add a vertex to the graph and return its index.
    pub fn add_node(&mut self) -> usize {
        let index = self.out_edges.len();
        self.out_edges.push(Vec::new());
        self.in_edges.push(Vec::new());
        index
    }

    /// Add an edge from `a` to `b` and return its index.
    ///
    /// For an undirected graph the edge is listed in the adjacency of both
    /// endpoints, in both directions.
    ///
    /// **Panics** if `a` or `b` is out of bounds.
    pub fn add_edge(&mut self, a: usize, b: usize) -> usize {
        assert!(
            a < self.node_count() && b < self.node_count(),
            "Graph::add_edge: edge endpoint out of bounds"
        );
        let index = self.edges.len();
        self.edges.push((a, b));
        self.out_edges[a].push(index);
        self.in_edges[b].push(index);
        if !Ty::is_directed() && a != b {
            self.out_edges[b].push(index);
            self.in_edges[a].push(index);
        }
        index
    }

    /// Return the endpoints `(source, target)` of edge `e`.
    ///
    /// **Panics** if `e` is out of bounds.
    #[inline]
    pub fn edge_endpoints(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }

    /// Return an iterator over the edge indices incident to `v` in the given
    /// direction.
    ///
    /// For an undirected graph both directions yield all incident edges.
    pub fn edges_directed(&self, v: usize, dir: Direction) -> impl Iterator<Item = usize> + '_ {
        match dir {
            Direction::Outgoing => self.out_edges[v].iter().copied(),
            Direction::Incoming => self.in_edges[v].iter().copied(),
        }
    }

    /// Return an iterator over the vertices adjacent to `v` in the given
    /// direction.
    ///
    /// Vertices appear once per connecting edge, so parallel edges yield
    /// repeated neighbors.
    pub fn neighbors_directed(&self, v: usize, dir: Direction) -> impl Iterator<Item = usize> + '_ {
        self.edges_directed(v, dir).map(move |e| {
            let (a, b) = self.edges[e];
            if a == v {
                b
            } else {
                a
            }
        })
    }

    /// Return the subgraph induced by the vertices in `keep`, together with
    /// the forward index map (original vertex → induced vertex) and the
    /// inverse map (induced vertex → original vertex).
    ///
    /// Induced vertices are numbered in increasing order of their original
    /// index. An edge survives iff both of its endpoints are kept.
    pub fn induced_subgraph(&self, keep: &FixedBitSet) -> (Self, Vec<Option<usize>>, Vec<usize>) {
        let mut forward = vec![None; self.node_count()];
        let mut inverse = Vec::with_capacity(keep.count_ones(..));
        for v in keep.ones() {
            forward[v] = Some(inverse.len());
            inverse.push(v);
        }
        let mut sub = Self::with_capacity(inverse.len(), 0);
        for _ in 0..inverse.len() {
            sub.add_node();
        }
        for &(a, b) in &self.edges {
            if let (Some(a), Some(b)) = (forward[a], forward[b]) {
                sub.add_edge(a, b);
            }
        }
        (sub, forward, inverse)
    }
}
