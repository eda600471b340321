//! Dijkstra distance maps.
//!
//! These serve as the ground truth the heuristic analyzer and the tests
//! compare A* against, so they share nothing with the A* core beyond the
//! graph type.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use wayfind_core::{Graph, Vertex};

use crate::node::{PathNode, UNREACHABLE};

/// Reference into the distance array, ordered by `cost` for `BinaryHeap`.
#[derive(Clone, Copy)]
struct CostRef {
    cost: f64,
    vertex: Vertex,
}

impl PartialEq for CostRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CostRef {}

impl PartialOrd for CostRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CostRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// Multi-source shortest distances, computed once and queried many times.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    dist: Vec<f64>,
    reached: Vec<PathNode>,
}

impl DistanceMap {
    /// Run Dijkstra from every vertex in `sources` at cost 0.
    ///
    /// Expansion stops at vertices whose cost would exceed `max_cost`
    /// (pass [`UNREACHABLE`] for no limit). Sources outside the graph are
    /// ignored.
    pub fn compute(graph: &Graph, sources: &[Vertex], max_cost: f64) -> Self {
        let mut dist = vec![UNREACHABLE; graph.vertex_count()];
        let mut settled = vec![false; graph.vertex_count()];
        let mut reached = Vec::new();
        let mut open: BinaryHeap<Reverse<CostRef>> = BinaryHeap::new();

        for &src in sources {
            if graph.contains(src) && dist[src.index()] != 0.0 {
                dist[src.index()] = 0.0;
                open.push(Reverse(CostRef {
                    cost: 0.0,
                    vertex: src,
                }));
            }
        }

        while let Some(Reverse(current)) = open.pop() {
            let ci = current.vertex.index();
            if settled[ci] {
                continue;
            }
            settled[ci] = true;
            reached.push(PathNode {
                vertex: current.vertex,
                cost: current.cost,
            });

            for edge in graph.neighbors(current.vertex) {
                let ni = edge.to.index();
                if settled[ni] {
                    continue;
                }
                let tentative = current.cost + edge.weight;
                if tentative > max_cost || tentative >= dist[ni] {
                    continue;
                }
                dist[ni] = tentative;
                open.push(Reverse(CostRef {
                    cost: tentative,
                    vertex: edge.to,
                }));
            }
        }

        Self { dist, reached }
    }

    /// Shortest distance to `v`, or [`UNREACHABLE`].
    pub fn at(&self, v: Vertex) -> f64 {
        self.dist.get(v.index()).copied().unwrap_or(UNREACHABLE)
    }

    /// Reached vertices in the order they were settled (non-decreasing cost).
    pub fn reached(&self) -> &[PathNode] {
        &self.reached
    }

    /// The full distance table indexed by vertex id.
    pub fn as_slice(&self) -> &[f64] {
        &self.dist
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.dist
    }
}

/// Single-source shortest distances from `source` to every vertex.
pub fn distances_from(graph: &Graph, source: Vertex) -> Vec<f64> {
    DistanceMap::compute(graph, &[source], UNREACHABLE).into_vec()
}
