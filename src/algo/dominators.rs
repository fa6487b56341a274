//! Compute dominators of a flowgraph.
//!
//! # The Dominance Relation
//!
//! In a directed graph with a root vertex **R**, a vertex **A** is said to
//! *dominate* a vertex **B** iff every path from **R** to **B** contains
//! **A**.
//!
//! The vertex **A** is said to *strictly dominate* the vertex **B** iff
//! **A** dominates **B** and **A ≠ B**.
//!
//! The vertex **A** is said to be the *immediate dominator* of a vertex
//! **B** iff it strictly dominates **B** and there does not exist any vertex
//! **C** where **A** dominates **C** and **C** dominates **B**.

use crate::graph::{DiGraph, Graph};
use crate::{Direction, EdgeType};

use super::AlgoError;

/// The undefined sentinel: a vertex that has no DFS number, no immediate
/// dominator, or no forest ancestor yet.
const UNDEFINED: usize = usize::MAX;

/// The dominance relation for some graph, root and traversal mode.
#[derive(Debug, Clone)]
pub struct Dominators {
    root: usize,
    mode: Direction,
    // idom[v] is the immediate dominator of v; the root maps to itself and
    // vertices not reachable from the root map to UNDEFINED.
    idom: Vec<usize>,
}

impl Dominators {
    /// Get the root vertex used to construct these dominance relations.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Get the immediate dominator of the given vertex.
    ///
    /// Returns `None` for any vertex that is not reachable from the root,
    /// and for the root itself.
    pub fn immediate_dominator(&self, v: usize) -> Option<usize> {
        if v >= self.idom.len() || v == self.root || self.idom[v] == UNDEFINED {
            None
        } else {
            Some(self.idom[v])
        }
    }

    /// Whether the given vertex was reachable from the root.
    pub fn is_reachable(&self, v: usize) -> bool {
        v < self.idom.len() && self.idom[v] != UNDEFINED
    }

    /// Iterate over the vertices that were not reachable from the root, in
    /// increasing order.
    pub fn unreachable(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.idom.len()).filter(move |&v| self.idom[v] == UNDEFINED)
    }

    /// Iterate over the given vertex's strict dominators, from its immediate
    /// dominator up to the root.
    ///
    /// If the given vertex is not reachable from the root, then `None` is
    /// returned.
    pub fn strict_dominators(&self, v: usize) -> Option<DominatorsIter<'_>> {
        if self.is_reachable(v) {
            Some(DominatorsIter {
                dominators: self,
                node: self.immediate_dominator(v),
            })
        } else {
            None
        }
    }

    /// Iterate over all of the given vertex's dominators (including the
    /// given vertex itself).
    ///
    /// If the given vertex is not reachable from the root, then `None` is
    /// returned.
    pub fn dominators(&self, v: usize) -> Option<DominatorsIter<'_>> {
        if self.is_reachable(v) {
            Some(DominatorsIter {
                dominators: self,
                node: Some(v),
            })
        } else {
            None
        }
    }

    /// Iterate over all vertices immediately dominated by the given vertex
    /// (not including the given vertex itself).
    pub fn immediately_dominated_by(&self, v: usize) -> DominatedByIter<'_> {
        DominatedByIter {
            dominators: self,
            node: v,
            cursor: 0,
        }
    }

    /// Build the dominator tree as a graph on the same vertex set.
    ///
    /// For every reachable non-root vertex `v` the tree contains the edge
    /// `(idom(v), v)` when the relation was computed in the
    /// [`Outgoing`](Direction::Outgoing) mode, and `(v, idom(v))` in the
    /// [`Incoming`](Direction::Incoming) mode. Unreachable vertices are
    /// isolated.
    pub fn dominator_tree(&self) -> DiGraph {
        let n = self.idom.len();
        let mut tree = DiGraph::with_capacity(n, n.saturating_sub(1));
        for _ in 0..n {
            tree.add_node();
        }
        for v in 0..n {
            if v == self.root || self.idom[v] == UNDEFINED {
                continue;
            }
            let _ = match self.mode {
                Direction::Outgoing => tree.add_edge(self.idom[v], v),
                Direction::Incoming => tree.add_edge(v, self.idom[v]),
            };
        }
        tree
    }
}

/// Iterator for a vertex's dominators.
#[derive(Debug, Clone)]
pub struct DominatorsIter<'a> {
    dominators: &'a Dominators,
    node: Option<usize>,
}

impl<'a> Iterator for DominatorsIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let next = self.node.take();
        if let Some(next) = next {
            self.node = self.dominators.immediate_dominator(next);
        }
        next
    }
}

/// Iterator for the vertices immediately dominated by a given vertex.
#[derive(Debug, Clone)]
pub struct DominatedByIter<'a> {
    dominators: &'a Dominators,
    node: usize,
    cursor: usize,
}

impl<'a> Iterator for DominatedByIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.cursor < self.dominators.idom.len() {
            let v = self.cursor;
            self.cursor += 1;
            // The root dominates itself, but it should not be reported.
            if self.dominators.idom[v] == self.node && v != self.node {
                return Some(v);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.dominators.idom.len() - self.cursor))
    }
}

/// A fixed-size forest of linked buckets over `0..n`, backed by two index
/// vectors.
///
/// `head[b]` is the most recently inserted element of bucket `b` and
/// `next[x]` chains the elements below it; both use [`UNDEFINED`] as the
/// list terminator. An element must not be inserted while it is still in
/// some bucket. No ordering is guaranteed between insertions and pops.
#[derive(Debug)]
struct Buckets {
    head: Vec<usize>,
    next: Vec<usize>,
}

impl Buckets {
    fn new(n: usize) -> Self {
        Buckets {
            head: vec![UNDEFINED; n],
            next: vec![UNDEFINED; n],
        }
    }

    fn insert(&mut self, bucket: usize, elem: usize) {
        self.next[elem] = self.head[bucket];
        self.head[bucket] = elem;
    }

    fn pop(&mut self, bucket: usize) -> Option<usize> {
        let elem = self.head[bucket];
        if elem == UNDEFINED {
            return None;
        }
        self.head[bucket] = self.next[elem];
        self.next[elem] = UNDEFINED;
        Some(elem)
    }

    fn is_empty(&self, bucket: usize) -> bool {
        self.head[bucket] == UNDEFINED
    }
}

/// Compute the dominance relation of `graph` rooted at `root` with the
/// algorithm described in ["A Fast Algorithm for Finding Dominators in a
/// Flowgraph" by Thomas Lengauer and Robert E. Tarjan][0].
///
/// This is the *simple* version of the algorithm: LINK does no balancing, so
/// the running time is **O(|E| log |V|)** rather than the
/// inverse-Ackermann bound of the sophisticated version, which ["Finding
/// Dominators in Practice"][1] found to be slower on every graph they
/// tested.
///
/// With `mode == Outgoing` the flowgraph is traversed along its edges; with
/// `mode == Incoming` the entire computation runs on the reverse
/// orientation, i.e. the result describes which vertices every path *to*
/// the root must pass through.
///
/// Vertices not reachable from the root take no part in the relation; they
/// are reported by [`Dominators::unreachable`].
///
/// # Errors
/// * [`AlgoError::NotDirected`] if the graph is undirected.
/// * [`AlgoError::VertexOutOfBounds`] if `root` is not a vertex of the
///   graph.
///
/// # Complexity
/// * Time complexity: **O(|E| log |V|)**.
/// * Auxiliary space: **O(|V| + |E|)**.
///
/// [0]: https://www.cs.princeton.edu/courses/archive/spr03/cs423/download/dominators.pdf
/// [1]: http://jgaa.info/accepted/2006/GeorgiadisTarjanWerneck2006.10.1.pdf
pub fn lengauer_tarjan<Ty: EdgeType>(
    graph: &Graph<Ty>,
    root: usize,
    mode: Direction,
) -> Result<Dominators, AlgoError> {
    if !graph.is_directed() {
        return Err(AlgoError::NotDirected);
    }
    let n = graph.node_count();
    if root >= n {
        return Err(AlgoError::VertexOutOfBounds(root));
    }

    // Step 1: depth-first search from the root, numbering vertices in
    // preorder. The explicit neighbor-cursor stack yields a genuine DFS
    // spanning tree, which the semidominator path lemmas require.
    //
    // From here on the algorithm works in DFS-number space: `vertex[i]` is
    // the i-th visited vertex, `number[v]` its preorder number, `parent[i]`
    // the number of its spanning-tree parent.
    let mut number = vec![UNDEFINED; n];
    let mut vertex = Vec::with_capacity(n);
    let mut parent = Vec::with_capacity(n);

    number[root] = 0;
    vertex.push(root);
    parent.push(0);
    let mut work: Vec<(usize, std::vec::IntoIter<usize>)> = vec![(
        0,
        graph
            .neighbors_directed(root, mode)
            .collect::<Vec<_>>()
            .into_iter(),
    )];
    loop {
        let (vn, next) = match work.last_mut() {
            Some((vn, neighbors)) => (*vn, neighbors.next()),
            None => break,
        };
        match next {
            Some(w) if number[w] == UNDEFINED => {
                let wn = vertex.len();
                number[w] = wn;
                vertex.push(w);
                parent.push(vn);
                work.push((
                    wn,
                    graph
                        .neighbors_directed(w, mode)
                        .collect::<Vec<_>>()
                        .into_iter(),
                ));
            }
            Some(_) => {}
            None => {
                work.pop();
            }
        }
    }
    let size = vertex.len();

    // Pruned predecessor lists in number space: for each reachable vertex,
    // its predecessors in the opposite direction with unreachable
    // predecessors filtered out.
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); size];
    for (wn, &w) in vertex.iter().enumerate() {
        for u in graph.neighbors_directed(w, mode.opposite()) {
            if number[u] != UNDEFINED {
                preds[wn].push(number[u]);
            }
        }
    }

    // Steps 2 and 3 happen simultaneously: process the non-root vertices in
    // decreasing preorder, computing semidominators (step 2) and implicitly
    // defining immediate dominators (step 3), while maintaining the
    // LINK/EVAL forest inside the spanning tree.
    let mut semi: Vec<usize> = (0..size).collect();
    let mut label: Vec<usize> = (0..size).collect();
    let mut ancestor = vec![UNDEFINED; size];
    let mut dom = vec![0usize; size];
    let mut buckets = Buckets::new(size);
    let mut path = Vec::new();

    for w in (1..size).rev() {
        // Step 2.
        for &v in &preds[w] {
            let u = eval(v, &mut ancestor, &mut label, &semi, &mut path);
            if semi[u] < semi[w] {
                semi[w] = semi[u];
            }
        }

        buckets.insert(semi[w], w);
        // LINK(parent(w), w), the simple variant: no balancing.
        ancestor[w] = parent[w];

        // Step 3: empty the bucket of w's parent.
        let p = parent[w];
        while let Some(v) = buckets.pop(p) {
            let u = eval(v, &mut ancestor, &mut label, &semi, &mut path);
            dom[v] = if semi[u] < semi[v] { u } else { p };
        }
    }
    debug_assert!((0..size).all(|b| buckets.is_empty(b)));

    // Step 4: fill in immediate dominators not explicitly defined by step 3.
    for w in 1..size {
        if dom[w] != semi[w] {
            dom[w] = dom[dom[w]];
        }
    }
    dom[0] = 0;

    // Translate the numbers back into vertex ids.
    let mut idom = vec![UNDEFINED; n];
    for (wn, &w) in vertex.iter().enumerate() {
        idom[w] = vertex[dom[wn]];
    }

    Ok(Dominators { root, mode, idom })
}

// If `v` is the root of a tree in the forest, return `v`. Otherwise return
// a vertex of minimum semidominator among those on the forest path from the
// tree root (exclusive) down to `v`.
fn eval(
    v: usize,
    ancestor: &mut [usize],
    label: &mut [usize],
    semi: &[usize],
    path: &mut Vec<usize>,
) -> usize {
    if ancestor[v] == UNDEFINED {
        v
    } else {
        compress(v, ancestor, label, semi, path);
        label[v]
    }
}

// Path compression for `eval`, with an explicit stack instead of recursion.
// Climb to the child of the tree root collecting the path, then unwind from
// the highest element down: propagate the minimum-semidominator label and
// splice each element's ancestor up to the tree root.
fn compress(
    v: usize,
    ancestor: &mut [usize],
    label: &mut [usize],
    semi: &[usize],
    path: &mut Vec<usize>,
) {
    debug_assert!(ancestor[v] != UNDEFINED);
    debug_assert!(path.is_empty());
    let mut u = v;
    while ancestor[ancestor[u]] != UNDEFINED {
        path.push(u);
        u = ancestor[u];
    }
    while let Some(w) = path.pop() {
        let a = ancestor[w];
        if semi[label[a]] < semi[label[w]] {
            label[w] = label[a];
        }
        ancestor[w] = ancestor[a];
    }
}
