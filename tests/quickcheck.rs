use fixedbitset::FixedBitSet;
use hashbrown::HashSet;
use itertools::Itertools;
use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};

use flowcuts::algo::{
    all_st_cuts, all_st_mincuts, even_tarjan_reduction, lengauer_tarjan, residual_graph,
    reverse_residual_graph,
};
use flowcuts::visit::Bfs;
use flowcuts::{DiGraph, Outgoing};

/// A random digraph small enough for the O(n·m) dominator oracle.
#[derive(Clone, Debug)]
struct Small(DiGraph);

impl Arbitrary for Small {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = 2 + usize::arbitrary(g) % 39;
        let m = usize::arbitrary(g) % (2 * n + 1);
        Small(random_graph(g, n, m))
    }
}

/// A random digraph small enough for exhaustive cut enumeration by subsets.
#[derive(Clone, Debug)]
struct Tiny(DiGraph);

impl Arbitrary for Tiny {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = 2 + usize::arbitrary(g) % 5;
        let m = usize::arbitrary(g) % (2 * n + 1);
        Tiny(random_graph(g, n, m))
    }
}

/// A `Tiny` graph with random positive integer capacities.
#[derive(Clone, Debug)]
struct TinyNet(DiGraph, Vec<f64>);

impl Arbitrary for TinyNet {
    fn arbitrary(g: &mut Gen) -> Self {
        let Tiny(graph) = Tiny::arbitrary(g);
        let capacity = (0..graph.edge_count())
            .map(|_| (1 + usize::arbitrary(g) % 3) as f64)
            .collect();
        TinyNet(graph, capacity)
    }
}

/// A `Small` graph with capacities and a feasible (not necessarily
/// conserving) per-edge flow assignment.
#[derive(Clone, Debug)]
struct FlowState(DiGraph, Vec<f64>, Vec<f64>);

impl Arbitrary for FlowState {
    fn arbitrary(g: &mut Gen) -> Self {
        let Small(graph) = Small::arbitrary(g);
        let capacity: Vec<f64> = (0..graph.edge_count())
            .map(|_| (1 + usize::arbitrary(g) % 4) as f64)
            .collect();
        let flow = capacity
            .iter()
            .map(|&c| (usize::arbitrary(g) % (c as usize + 1)) as f64)
            .collect();
        FlowState(graph, capacity, flow)
    }
}

fn random_graph(g: &mut Gen, n: usize, m: usize) -> DiGraph {
    let mut graph = DiGraph::with_capacity(n, m);
    for _ in 0..n {
        graph.add_node();
    }
    for _ in 0..m {
        let a = usize::arbitrary(g) % n;
        let b = usize::arbitrary(g) % n;
        graph.add_edge(a, b);
    }
    graph
}

/// Vertices reachable from `root`, with `removed` treated as absent.
fn reachable_without(graph: &DiGraph, root: usize, removed: Option<usize>) -> Vec<bool> {
    let n = graph.node_count();
    let mut allowed = FixedBitSet::with_capacity(n);
    allowed.set_range(.., true);
    if let Some(r) = removed {
        allowed.set(r, false);
    }
    let mut bfs = Bfs::empty(graph).restrict(&allowed);
    bfs.push_root(root);
    let mut seen = vec![false; n];
    while let Some(v) = bfs.next(graph) {
        seen[v] = true;
    }
    seen
}

/// The edge ids leaving `side`, in increasing order.
fn crossing(graph: &DiGraph, side: &HashSet<usize>) -> Vec<usize> {
    (0..graph.edge_count())
        .filter(|&e| {
            let (a, b) = graph.edge_endpoints(e);
            side.contains(&a) && !side.contains(&b)
        })
        .collect()
}

/// Vertices reachable from `root` once the edges in `cut` are removed, in
/// increasing order.
fn reach_minus_cut(graph: &DiGraph, root: usize, cut: &[usize]) -> Vec<usize> {
    let removed: HashSet<usize> = cut.iter().copied().collect();
    let n = graph.node_count();
    let mut seen = vec![false; n];
    seen[root] = true;
    let mut stack = vec![root];
    while let Some(v) = stack.pop() {
        for e in 0..graph.edge_count() {
            let (a, b) = graph.edge_endpoints(e);
            if a == v && !removed.contains(&e) && !seen[b] {
                seen[b] = true;
                stack.push(b);
            }
        }
    }
    (0..n).filter(|&v| seen[v]).collect()
}

/// All source-side vertex sets: subsets of V containing `s` but not `t`.
fn source_sides(n: usize, s: usize, t: usize) -> Vec<HashSet<usize>> {
    let free: Vec<usize> = (0..n).filter(|&v| v != s && v != t).collect();
    (0..(1usize << free.len()))
        .map(|mask| {
            let mut side: HashSet<usize> = HashSet::new();
            side.insert(s);
            for (i, &v) in free.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    side.insert(v);
                }
            }
            side
        })
        .collect()
}

fn normalize(
    cuts: Vec<Vec<usize>>,
    partitions: Vec<Vec<usize>>,
) -> HashSet<(Vec<usize>, Vec<usize>)> {
    cuts.into_iter()
        .zip(partitions)
        .map(|(c, p)| {
            (
                c.into_iter().sorted().collect(),
                p.into_iter().sorted().collect(),
            )
        })
        .collect()
}

quickcheck! {
    /// The Lengauer-Tarjan result agrees vertex-for-vertex with the naive
    /// "delete a vertex, see what becomes unreachable" dominance oracle,
    /// and the dominator tree has one edge per reachable non-root vertex.
    fn prop_dominators_match_naive_oracle(g: Small) -> bool {
        let graph = g.0;
        let n = graph.node_count();
        let dom = match lengauer_tarjan(&graph, 0, Outgoing) {
            Ok(dom) => dom,
            Err(_) => return false,
        };

        let base = reachable_without(&graph, 0, None);
        let reachable_count = base.iter().filter(|&&r| r).count();
        if dom.dominator_tree().edge_count() != reachable_count - 1 {
            return false;
        }

        for v in 0..n {
            if dom.is_reachable(v) != base[v] {
                return false;
            }
            if !base[v] {
                continue;
            }
            let naive: HashSet<usize> = (0..n)
                .filter(|&u| u != v && !reachable_without(&graph, 0, Some(u))[v])
                .collect();
            let mine: HashSet<usize> = match dom.strict_dominators(v) {
                Some(iter) => iter.collect(),
                None => return false,
            };
            if naive != mine {
                return false;
            }
        }
        true
    }

    /// The Even-Tarjan reduction has the promised shape: 2n vertices,
    /// 2m + n edges, unit inner capacities and sentinel outer capacities.
    fn prop_even_tarjan_shape(g: Small) -> bool {
        let graph = g.0;
        let n = graph.node_count();
        let m = graph.edge_count();
        let (reduced, capacity) = even_tarjan_reduction(&graph).unwrap();
        if reduced.node_count() != 2 * n
            || reduced.edge_count() != 2 * m + n
            || capacity.len() != 2 * m + n
        {
            return false;
        }
        for v in 0..n {
            if reduced.edge_endpoints(v) != (v, v + n) || capacity[v] != 1.0 {
                return false;
            }
        }
        for e in 0..m {
            let (u, v) = graph.edge_endpoints(e);
            if reduced.edge_endpoints(n + 2 * e) != (u + n, v)
                || reduced.edge_endpoints(n + 2 * e + 1) != (v + n, u)
                || capacity[n + 2 * e] != n as f64
                || capacity[n + 2 * e + 1] != n as f64
            {
                return false;
            }
        }
        true
    }

    /// The residual graph holds exactly one edge per original edge with a
    /// positive residual, with the matching residual capacity.
    fn prop_residual_completeness(s: FlowState) -> bool {
        let FlowState(graph, capacity, flow) = s;
        let (residual, rc) = residual_graph(&graph, &capacity, &flow).unwrap();
        let expected: Vec<(usize, usize, f64)> = (0..graph.edge_count())
            .filter(|&e| capacity[e] - flow[e] > 0.0)
            .map(|e| {
                let (a, b) = graph.edge_endpoints(e);
                (a, b, capacity[e] - flow[e])
            })
            .collect();
        residual.edge_count() == expected.len()
            && expected
                .iter()
                .enumerate()
                .all(|(i, &(a, b, c))| residual.edge_endpoints(i) == (a, b) && rc[i] == c)
    }

    /// The reverse residual graph holds a forward copy per flow-carrying
    /// edge and a reverse copy per unsaturated edge.
    fn prop_reverse_residual_shape(s: FlowState) -> bool {
        let FlowState(graph, capacity, flow) = s;
        let reverse = reverse_residual_graph(&graph, Some(&capacity), &flow).unwrap();
        let mut expected = Vec::new();
        for e in 0..graph.edge_count() {
            let (a, b) = graph.edge_endpoints(e);
            if flow[e] > 0.0 {
                expected.push((a, b));
            }
            if flow[e] < capacity[e] {
                expected.push((b, a));
            }
        }
        reverse.edge_count() == expected.len()
            && expected
                .iter()
                .enumerate()
                .all(|(i, &ab)| reverse.edge_endpoints(i) == ab)
    }

    /// `all_st_cuts` lists exactly the minimal (s,t) cuts, each once, and
    /// each partition is the source-reachable side of its cut.
    fn prop_all_cuts_are_the_minimal_cuts(t: Tiny) -> bool {
        let graph = t.0;
        let n = graph.node_count();
        let (s, target) = (0, n - 1);
        let (cuts, partitions) = all_st_cuts(&graph, s, target).unwrap();

        if !reach_minus_cut(&graph, s, &[]).contains(&target) {
            return cuts.is_empty() && partitions.is_empty();
        }

        let all: HashSet<Vec<usize>> = source_sides(n, s, target)
            .iter()
            .map(|side| crossing(&graph, side))
            .collect();
        let minimal: Vec<&Vec<usize>> = all
            .iter()
            .filter(|c| {
                !all.iter()
                    .any(|d| d.len() < c.len() && d.iter().all(|e| c.contains(e)))
            })
            .collect();
        let expected: HashSet<(Vec<usize>, Vec<usize>)> = minimal
            .into_iter()
            .map(|cut| (cut.clone(), reach_minus_cut(&graph, s, cut)))
            .collect();

        let count = cuts.len();
        let actual = normalize(cuts, partitions);
        actual.len() == count && actual == expected
    }

    /// `all_st_mincuts` reports the brute-force minimum cut value and lists
    /// exactly the source-side sets achieving it.
    fn prop_all_mincuts_match_brute_force(t: TinyNet) -> TestResult {
        let TinyNet(graph, capacity) = t;
        let n = graph.node_count();
        let (s, target) = (0, n - 1);
        let (value, cuts, partitions) = all_st_mincuts(&graph, s, target, &capacity).unwrap();

        let sides = source_sides(n, s, target);
        let table: Vec<(f64, Vec<usize>, Vec<usize>)> = sides
            .iter()
            .map(|side| {
                let cut = crossing(&graph, side);
                let total = cut.iter().map(|&e| capacity[e]).sum();
                let mut part: Vec<usize> = side.iter().copied().collect();
                part.sort_unstable();
                (total, cut, part)
            })
            .collect();
        let best = table.iter().map(|&(c, _, _)| c).fold(f64::INFINITY, f64::min);

        if best == 0.0 {
            // the target is unreachable: zero flow, nothing to enumerate
            return TestResult::from_bool(
                value == 0.0 && cuts.is_empty() && partitions.is_empty(),
            );
        }
        if value != best {
            return TestResult::failed();
        }

        let expected: HashSet<(Vec<usize>, Vec<usize>)> = table
            .into_iter()
            .filter(|&(total, _, _)| total == best)
            .map(|(_, cut, part)| (cut, part))
            .collect();
        let count = cuts.len();
        let actual = normalize(cuts, partitions);
        TestResult::from_bool(actual.len() == count && actual == expected)
    }
}
