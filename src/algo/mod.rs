/*!
This module contains the graph algorithms of `flowcuts`. The simple search
algorithms, depth-first and breadth-first search, are implemented in the
[`visit`](crate::visit) module.

The `algo` module contains multiple submodules, each implementing a specific
algorithm or set of algorithms:

* [`dominators`]: the Lengauer–Tarjan dominator tree of a rooted flowgraph;
* [`network`]: flow-network transformations (Even–Tarjan vertex splitting,
  residual and reverse-residual graphs);
* [`maximum_flow`]: maximum flow with per-edge flow values;
* [`scc`]: strongly connected components and graph condensation;
* [`cuts`]: Provan–Shier enumeration of all (s,t) cuts and of all minimum
  (s,t) cuts.
*/

pub mod cuts;
pub mod dominators;
pub mod maximum_flow;
pub mod network;
pub mod scc;

pub use cuts::{all_st_cuts, all_st_mincuts};
pub use dominators::{lengauer_tarjan, Dominators};
pub use maximum_flow::ford_fulkerson;
pub use network::{even_tarjan_reduction, residual_graph, reverse_residual_graph};
pub use scc::{condensation, tarjan_scc, Condensation};

use thiserror::Error;

/// An error raised by the algorithms in this module.
///
/// Every fallible operation validates its arguments before it allocates or
/// mutates anything, and failure never yields partial results.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum AlgoError {
    /// A vertex id does not exist in the graph.
    #[error("vertex {0} is out of bounds")]
    VertexOutOfBounds(usize),
    /// The source and target of a flow or cut computation coincide.
    #[error("source and target must be distinct vertices")]
    SourceTargetEqual,
    /// The operation is only defined on directed graphs.
    #[error("expected a directed graph")]
    NotDirected,
    /// An edge-indexed vector does not match the graph's edge count.
    #[error("expected an edge vector of length {expected}, got {found}")]
    LengthMismatch {
        /// The graph's edge count.
        expected: usize,
        /// The length of the offending vector.
        found: usize,
    },
    /// A capacity value was zero or negative.
    #[error("capacity of edge {0} is not positive")]
    NonPositiveCapacity(usize),
    /// The operation is not implemented for undirected graphs.
    #[error("not implemented for undirected graphs")]
    Unimplemented,
    /// A derived graph would exceed the supported edge count.
    #[error("edge count overflows the supported range")]
    TooManyEdges,
}
