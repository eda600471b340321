//! Path reconstruction from parent links.

use wayfind_core::{Graph, Vertex};

use crate::node::NodeTable;

/// Walk parent links from `goal` back to `start` and return the path in
/// travel order, both endpoints included.
///
/// Only valid once `goal` has been reached; anything else is a contract
/// violation that asserts in debug builds and yields an empty path in
/// release builds.
pub(crate) fn reconstruct(nodes: &NodeTable, start: Vertex, goal: Vertex, vertex_count: usize) -> Vec<Vertex> {
    debug_assert!(nodes.g(goal).is_some(), "reconstruct called before {goal} was reached");
    if nodes.g(goal).is_none() {
        return Vec::new();
    }

    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        let Some(p) = nodes.parent(cur) else {
            debug_assert!(false, "parent chain from {goal} broke at {cur}");
            return Vec::new();
        };
        // A simple path visits each vertex at most once.
        if path.len() > vertex_count {
            debug_assert!(false, "parent chain from {goal} contains a cycle");
            return Vec::new();
        }
        path.push(p);
        cur = p;
    }
    path.reverse();
    path
}

/// Total weight along `path`, taking the cheapest edge between each
/// consecutive pair.
///
/// Returns `None` if some consecutive pair has no connecting edge. A
/// single-vertex path costs zero; an empty path has no cost.
pub fn path_cost(graph: &Graph, path: &[Vertex]) -> Option<f64> {
    if path.is_empty() {
        return None;
    }
    path.windows(2)
        .map(|w| graph.edge_weight(w[0], w[1]))
        .sum()
}
