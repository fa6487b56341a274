//! Graph traversal: depth-first and breadth-first search.
//!
//! Both traversals are stepping structs in the same style: they do not
//! borrow the graph, so the graph stays accessible while the traversal is
//! live, and `next(&graph)` advances one vertex at a time.
//!
//! Beyond the plain traversals, both support
//!
//! * a traversal [`Direction`], so a reverse search needs no reversed copy
//!   of the graph, and
//! * an optional *restriction set*: vertices outside the set are treated as
//!   if they were absent, including when pushed as roots.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::graph::Graph;
use crate::{Direction, EdgeType};

/// Visit vertices of a graph in a depth-first-search (DFS) order, emitting
/// vertices when they are first discovered.
///
/// The traversal covers the vertices reachable from the roots pushed with
/// [`push_root`](Dfs::push_root); [`Dfs::new`] pushes a single root.
///
/// ```
/// use flowcuts::DiGraph;
/// use flowcuts::visit::Dfs;
///
/// let graph = DiGraph::from_edges(4, [(0, 1), (1, 2), (3, 2)]);
/// let mut dfs = Dfs::new(&graph, 0);
/// let mut order = Vec::new();
/// while let Some(v) = dfs.next(&graph) {
///     order.push(v);
/// }
/// assert_eq!(order, vec![0, 1, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct Dfs {
    /// The stack of vertices to visit.
    pub stack: Vec<usize>,
    /// The map of discovered vertices.
    pub discovered: FixedBitSet,
    restricted: Option<FixedBitSet>,
    dir: Direction,
}

impl Dfs {
    /// Create a new `Dfs` starting at `start`, following outgoing edges.
    pub fn new<Ty: EdgeType>(graph: &Graph<Ty>, start: usize) -> Self {
        let mut dfs = Dfs::empty(graph);
        dfs.push_root(start);
        dfs
    }

    /// Create a new `Dfs` with no roots.
    pub fn empty<Ty: EdgeType>(graph: &Graph<Ty>) -> Self {
        Dfs {
            stack: Vec::new(),
            discovered: FixedBitSet::with_capacity(graph.node_count()),
            restricted: None,
            dir: Direction::Outgoing,
        }
    }

    /// Restrict the traversal to the vertices in `allowed`.
    ///
    /// Apply before pushing roots; roots outside `allowed` are ignored.
    pub fn restrict(mut self, allowed: &FixedBitSet) -> Self {
        self.restricted = Some(allowed.clone());
        self
    }

    /// Follow edges opposite to the current traversal direction.
    pub fn reversed(mut self) -> Self {
        self.dir = self.dir.opposite();
        self
    }

    /// Add a root vertex. Already-discovered or restricted-away vertices are
    /// ignored.
    pub fn push_root(&mut self, v: usize) {
        if self.is_allowed(v) && !self.discovered.contains(v) {
            self.discovered.insert(v);
            self.stack.push(v);
        }
    }

    /// Clear the visit state.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.discovered.clear();
    }

    /// Return the next vertex of the traversal, or `None` if it is done.
    pub fn next<Ty: EdgeType>(&mut self, graph: &Graph<Ty>) -> Option<usize> {
        let node = self.stack.pop()?;
        for succ in graph.neighbors_directed(node, self.dir) {
            if self.is_allowed(succ) && !self.discovered.contains(succ) {
                self.discovered.insert(succ);
                self.stack.push(succ);
            }
        }
        Some(node)
    }

    #[inline]
    fn is_allowed(&self, v: usize) -> bool {
        self.restricted.as_ref().map_or(true, |r| r.contains(v))
    }
}

/// Visit vertices of a graph in a breadth-first-search (BFS) order, emitting
/// vertices when they are first discovered.
///
/// The traversal covers the vertices reachable from the roots pushed with
/// [`push_root`](Bfs::push_root); [`Bfs::new`] pushes a single root. Roots
/// pushed before stepping begins act as a multi-source search.
#[derive(Clone, Debug)]
pub struct Bfs {
    /// The queue of vertices to visit.
    pub queue: VecDeque<usize>,
    /// The map of discovered vertices.
    pub discovered: FixedBitSet,
    restricted: Option<FixedBitSet>,
    dir: Direction,
}

impl Bfs {
    /// Create a new `Bfs` starting at `start`, following outgoing edges.
    pub fn new<Ty: EdgeType>(graph: &Graph<Ty>, start: usize) -> Self {
        let mut bfs = Bfs::empty(graph);
        bfs.push_root(start);
        bfs
    }

    /// Create a new `Bfs` with no roots.
    pub fn empty<Ty: EdgeType>(graph: &Graph<Ty>) -> Self {
        Bfs {
            queue: VecDeque::new(),
            discovered: FixedBitSet::with_capacity(graph.node_count()),
            restricted: None,
            dir: Direction::Outgoing,
        }
    }

    /// Restrict the traversal to the vertices in `allowed`.
    ///
    /// Apply before pushing roots; roots outside `allowed` are ignored.
    pub fn restrict(mut self, allowed: &FixedBitSet) -> Self {
        self.restricted = Some(allowed.clone());
        self
    }

    /// Follow edges opposite to the current traversal direction.
    pub fn reversed(mut self) -> Self {
        self.dir = self.dir.opposite();
        self
    }

    /// Add a root vertex. Already-discovered or restricted-away vertices are
    /// ignored.
    pub fn push_root(&mut self, v: usize) {
        if self.is_allowed(v) && !self.discovered.contains(v) {
            self.discovered.insert(v);
            self.queue.push_back(v);
        }
    }

    /// Return the next vertex of the traversal, or `None` if it is done.
    pub fn next<Ty: EdgeType>(&mut self, graph: &Graph<Ty>) -> Option<usize> {
        let node = self.queue.pop_front()?;
        for succ in graph.neighbors_directed(node, self.dir) {
            if self.is_allowed(succ) && !self.discovered.contains(succ) {
                self.discovered.insert(succ);
                self.queue.push_back(succ);
            }
        }
        Some(node)
    }

    #[inline]
    fn is_allowed(&self, v: usize) -> bool {
        self.restricted.as_ref().map_or(true, |r| r.contains(v))
    }
}
