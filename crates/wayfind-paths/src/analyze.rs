//! Offline heuristic verification.
//!
//! Runs Dijkstra from every vertex to get true all-pairs distances, then
//! checks a heuristic against them. This is O(V·(E log V) + V·E) and meant
//! for tests and tooling, never for the search hot path.

use wayfind_core::Graph;

use crate::dijkstra::distances_from;
use crate::heuristic::{Heuristic, HeuristicProperties};

/// Floating-point slack allowed in the admissibility and consistency checks.
pub const TOLERANCE: f64 = 1e-9;

/// Result of [`analyze_heuristic`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicReport {
    /// `h(u, v) ≤ dist(u, v)` for every reachable ordered pair, `u = v`
    /// included.
    pub admissible: bool,
    /// `h(u, g) ≤ w(u, u') + h(u', g)` for every edge and every goal `g`.
    pub consistent: bool,
    /// Mean of `|h(u, v) − dist(u, v)|` over reachable ordered pairs.
    pub mean_absolute_error: f64,
    /// Reachable ordered pairs compared, `(v, v)` included.
    pub pairs_checked: u64,
    pub admissibility_violations: u64,
    pub consistency_violations: u64,
    /// Largest `h(u, v) − dist(u, v)`, zero when never positive.
    pub worst_overestimate: f64,
}

impl HeuristicReport {
    /// The measured guarantees, suitable for
    /// [`Declared`](crate::Declared).
    pub fn properties(&self) -> HeuristicProperties {
        HeuristicProperties {
            admissible: self.admissible,
            consistent: self.consistent && self.admissible,
        }
    }
}

/// Check `heuristic` against the true distances of `graph`.
pub fn analyze_heuristic<H>(graph: &Graph, heuristic: &H) -> HeuristicReport
where
    H: Heuristic + ?Sized,
{
    let mut pairs_checked = 0u64;
    let mut admissibility_violations = 0u64;
    let mut abs_error_sum = 0.0;
    let mut worst_overestimate = 0.0f64;

    for u in graph.vertices() {
        let dist = distances_from(graph, u);
        for v in graph.vertices() {
            let d = dist[v.index()];
            if d.is_infinite() {
                continue;
            }
            let h = heuristic.estimate(u, v);
            pairs_checked += 1;
            abs_error_sum += (h - d).abs();
            worst_overestimate = worst_overestimate.max(h - d);
            if h > d + TOLERANCE {
                admissibility_violations += 1;
            }
        }
    }

    let mut consistency_violations = 0u64;
    for goal in graph.vertices() {
        for (u, edge) in graph.edges() {
            let lhs = heuristic.estimate(u, goal);
            let rhs = edge.weight + heuristic.estimate(edge.to, goal);
            if lhs > rhs + TOLERANCE {
                consistency_violations += 1;
            }
        }
    }

    let mean_absolute_error = if pairs_checked == 0 {
        0.0
    } else {
        abs_error_sum / pairs_checked as f64
    };

    let report = HeuristicReport {
        admissible: admissibility_violations == 0,
        consistent: consistency_violations == 0,
        mean_absolute_error,
        pairs_checked,
        admissibility_violations,
        consistency_violations,
        worst_overestimate,
    };
    log::debug!(
        "heuristic analysis over {} vertices: admissible={} consistent={} mae={:.6} worst_over={:.6}",
        graph.vertex_count(),
        report.admissible,
        report.consistent,
        report.mean_absolute_error,
        report.worst_overestimate,
    );
    report
}
