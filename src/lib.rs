//! **flowcuts** is a library of graph-theoretic building blocks for
//! network-flow and program-analysis pipelines.
//!
//! The crate revolves around three tightly related primitives:
//!
//! * flow-network transformations: the [Even–Tarjan vertex-splitting
//!   reduction](algo::even_tarjan_reduction) and
//!   [residual](algo::residual_graph) /
//!   [reverse-residual](algo::reverse_residual_graph) graph construction;
//! * the [Lengauer–Tarjan dominator tree](algo::lengauer_tarjan) of a
//!   flowgraph rooted at a start vertex;
//! * [Provan–Shier enumeration](algo::all_st_cuts) of all (s,t) edge cuts
//!   and of [all minimum (s,t) edge cuts](algo::all_st_mincuts) of a
//!   directed graph, including the vertex partitions on the source side.
//!
//! Graphs are compact: vertices are `usize` indices in `0..n`, edges are
//! `usize` indices in `0..m`, and edge-indexed data such as capacities and
//! flows travel in parallel vectors next to the [`Graph`] they describe.

pub use crate::graph::{DiGraph, Graph, UnGraph};
pub use crate::Direction::{Incoming, Outgoing};

pub mod algo;
pub mod graph;
pub mod visit;

/// Edge direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// An `Outgoing` edge is an outward edge *from* the current vertex.
    Outgoing = 0,
    /// An `Incoming` edge is an inbound edge *to* the current vertex.
    Incoming = 1,
}

impl Direction {
    /// Return the opposite `Direction`.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Outgoing => Incoming,
            Incoming => Outgoing,
        }
    }
}

/// Marker type for a directed graph.
#[derive(Copy, Clone, Debug)]
pub enum Directed {}

/// Marker type for an undirected graph.
#[derive(Copy, Clone, Debug)]
pub enum Undirected {}

/// A graph's edge type determines whether it has directed edges or not.
pub trait EdgeType {
    fn is_directed() -> bool;
}

impl EdgeType for Directed {
    #[inline]
    fn is_directed() -> bool {
        true
    }
}

impl EdgeType for Undirected {
    #[inline]
    fn is_directed() -> bool {
        false
    }
}
