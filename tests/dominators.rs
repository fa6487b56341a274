use flowcuts::algo::{lengauer_tarjan, AlgoError};
use flowcuts::{DiGraph, Incoming, Outgoing, UnGraph};

#[test]
fn lengauer_tarjan_paper_example() {
    // The flowgraph from Fig. 1 of the Lengauer-Tarjan paper, relabeled to
    // integers.
    let graph = DiGraph::from_edges(
        13,
        [
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 4),
            (2, 1),
            (2, 4),
            (2, 5),
            (3, 6),
            (3, 7),
            (4, 12),
            (5, 8),
            (6, 9),
            (7, 9),
            (7, 10),
            (8, 5),
            (8, 11),
            (9, 11),
            (10, 9),
            (11, 0),
            (11, 9),
            (12, 8),
        ],
    );
    let dom = lengauer_tarjan(&graph, 0, Outgoing).unwrap();

    let expected = [
        None,
        Some(0),
        Some(0),
        Some(0),
        Some(0),
        Some(0),
        Some(3),
        Some(3),
        Some(0),
        Some(0),
        Some(7),
        Some(0),
        Some(0),
    ];
    for (v, &idom) in expected.iter().enumerate() {
        assert_eq!(dom.immediate_dominator(v), idom, "idom of vertex {}", v);
    }
    assert_eq!(dom.root(), 0);
    assert_eq!(dom.unreachable().count(), 0);
}

#[test]
fn unreachable_vertex_is_reported() {
    let graph = DiGraph::from_edges(3, [(0, 1)]);
    let dom = lengauer_tarjan(&graph, 0, Outgoing).unwrap();
    assert_eq!(dom.immediate_dominator(0), None);
    assert_eq!(dom.immediate_dominator(1), Some(0));
    assert_eq!(dom.immediate_dominator(2), None);
    assert!(!dom.is_reachable(2));
    assert_eq!(dom.unreachable().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn dominator_tree_shape() {
    let graph = DiGraph::from_edges(
        6,
        [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 1)],
    );
    let dom = lengauer_tarjan(&graph, 0, Outgoing).unwrap();
    let tree = dom.dominator_tree();

    // one tree edge per reachable non-root vertex; vertex 5 is unreachable
    let reachable = (0..6).filter(|&v| dom.is_reachable(v)).count();
    assert_eq!(reachable, 5);
    assert_eq!(tree.node_count(), 6);
    assert_eq!(tree.edge_count(), reachable - 1);
    for e in 0..tree.edge_count() {
        let (parent, child) = tree.edge_endpoints(e);
        assert_eq!(dom.immediate_dominator(child), Some(parent));
    }
}

#[test]
fn incoming_mode_runs_on_the_reverse_orientation() {
    // 0 -> 1 -> 2 and 0 -> 2: rooted at 2 in reverse, vertex 1 is
    // bypassable but 2 gates everything.
    let graph = DiGraph::from_edges(3, [(0, 1), (1, 2), (0, 2)]);
    let dom = lengauer_tarjan(&graph, 2, Incoming).unwrap();
    assert_eq!(dom.immediate_dominator(0), Some(2));
    assert_eq!(dom.immediate_dominator(1), Some(2));
    assert_eq!(dom.immediate_dominator(2), None);

    // the tree orientation points toward the root in this mode
    let tree = dom.dominator_tree();
    assert_eq!(tree.edge_count(), 2);
    for e in 0..2 {
        let (_, head) = tree.edge_endpoints(e);
        assert_eq!(head, 2);
    }
}

#[test]
fn self_loops_and_parallel_edges_are_harmless() {
    let graph = DiGraph::from_edges(4, [(0, 0), (0, 1), (0, 1), (1, 2), (2, 2), (2, 3)]);
    let dom = lengauer_tarjan(&graph, 0, Outgoing).unwrap();
    assert_eq!(dom.immediate_dominator(1), Some(0));
    assert_eq!(dom.immediate_dominator(2), Some(1));
    assert_eq!(dom.immediate_dominator(3), Some(2));
}

#[test]
fn invalid_inputs() {
    let graph = DiGraph::from_edges(2, [(0, 1)]);
    assert_eq!(
        lengauer_tarjan(&graph, 9, Outgoing).unwrap_err(),
        AlgoError::VertexOutOfBounds(9)
    );
    let undirected = UnGraph::from_edges(2, [(0, 1)]);
    assert_eq!(
        lengauer_tarjan(&undirected, 0, Outgoing).unwrap_err(),
        AlgoError::NotDirected
    );
}
