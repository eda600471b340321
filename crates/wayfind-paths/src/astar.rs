//! The A* search core.
//!
//! A search moves through `Ready → Running → {Found, Exhausted}`. Each
//! [`Search::step`] pops one open-set entry, discards it if stale, and
//! otherwise expands it: the goal ends the search, anything else is closed
//! and its outgoing edges relaxed.
//!
//! With an admissible heuristic the first goal expansion carries the optimal
//! cost. Closed vertices are skipped unconditionally, which is only sound
//! when the heuristic is also consistent; [`SearchOptions::reopen_closed`]
//! lifts that restriction and [`SearchResult::optimality_guaranteed`]
//! reports which case applied.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::Instant;

use wayfind_core::{Graph, Vertex};

use crate::heuristic::Heuristic;
use crate::node::{NodeTable, UNREACHABLE};
use crate::open_set::OpenSet;
use crate::options::SearchOptions;
use crate::path;

/// Where a search is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Initialized, no step taken yet.
    Ready,
    Running,
    /// The goal was expanded.
    Found,
    /// The search ended without reaching the goal.
    Exhausted,
}

impl SearchState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    Found,
    /// The open set drained: the goal is unreachable.
    Exhausted,
    /// [`SearchOptions::max_nodes`] expansions were spent.
    NodeBudget,
    /// [`SearchOptions::deadline`] passed.
    Deadline,
    /// Start or goal is not a vertex of the graph.
    InvalidEndpoint,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Found => "found",
            Self::Exhausted => "exhausted",
            Self::NodeBudget => "node budget exceeded",
            Self::Deadline => "deadline exceeded",
            Self::InvalidEndpoint => "invalid endpoint",
        };
        f.write_str(s)
    }
}

/// Bookkeeping counters of a finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Entries pushed onto the open set.
    pub pushes: u64,
    /// Popped entries discarded as stale.
    pub stale_pops: u64,
    /// Closed vertices reopened through a cheaper path.
    pub reopened: u64,
    /// Closed vertices evicted by the closed-set cap.
    pub evictions: u64,
    /// Largest open-set size reached.
    pub peak_open: usize,
}

/// Outcome of a search. Not finding a path is a normal result, not an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Start to goal inclusive; empty unless `found`.
    pub path: Vec<Vertex>,
    /// Cost of `path`; [`UNREACHABLE`] unless `found`.
    pub cost: f64,
    /// Non-stale expansions, the goal's included.
    pub nodes_explored: u64,
    pub found: bool,
    pub termination: Termination,
    /// `found`, and the heuristic declares itself consistent, or admissible
    /// with reopening enabled.
    pub optimality_guaranteed: bool,
    pub stats: SearchStats,
}

// ---------------------------------------------------------------------------
// Closed-set eviction order
// ---------------------------------------------------------------------------

/// A closed vertex keyed by its g, max-first, for the bounded closed set.
#[derive(Clone, Copy)]
struct ClosedRef {
    g: f64,
    vertex: Vertex,
}

impl PartialEq for ClosedRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ClosedRef {}

impl PartialOrd for ClosedRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClosedRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.g
            .total_cmp(&other.g)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Owner of the per-search tables.
///
/// A `Searcher` can run any number of searches, one at a time, over any
/// graphs; its tables are reused so repeated queries do not allocate after
/// warm-up. Searchers are independent: give each thread its own and share
/// the graph by reference.
#[derive(Default)]
pub struct Searcher {
    nodes: NodeTable,
    open: OpenSet,
    closed_order: BinaryHeap<ClosedRef>,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a search from `start` to `goal` without running it.
    ///
    /// Drive it with [`Search::step`] or [`Search::run`].
    pub fn begin<'a, H>(
        &'a mut self,
        graph: &'a Graph,
        start: Vertex,
        goal: Vertex,
        heuristic: &'a H,
        options: &'a SearchOptions,
    ) -> Search<'a, H>
    where
        H: Heuristic + ?Sized,
    {
        self.nodes.reset(graph.vertex_count());
        self.open.clear();
        self.closed_order.clear();

        let mut search = Search {
            searcher: self,
            graph,
            heuristic,
            options,
            start,
            goal,
            state: SearchState::Ready,
            termination: None,
            nodes_explored: 0,
            closed_len: 0,
            stats: SearchStats::default(),
        };

        if !graph.contains(start) || !graph.contains(goal) {
            log::warn!(
                "astar: endpoint {start} -> {goal} outside graph of {} vertices",
                graph.vertex_count()
            );
            search.finish_with(Termination::InvalidEndpoint);
            return search;
        }

        search.searcher.nodes.record(start, 0.0, None);
        search.push(start, 0.0);
        search
    }

    /// Run a search from `start` to `goal` to completion.
    pub fn search<H>(
        &mut self,
        graph: &Graph,
        start: Vertex,
        goal: Vertex,
        heuristic: &H,
        options: &SearchOptions,
    ) -> SearchResult
    where
        H: Heuristic + ?Sized,
    {
        self.begin(graph, start, goal, heuristic, options).run()
    }
}

/// Run a single A* search with fresh tables.
///
/// See [`Searcher`] to reuse tables across queries.
pub fn search<H>(
    graph: &Graph,
    start: Vertex,
    goal: Vertex,
    heuristic: &H,
    options: &SearchOptions,
) -> SearchResult
where
    H: Heuristic + ?Sized,
{
    Searcher::new().search(graph, start, goal, heuristic, options)
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// An in-flight search borrowing a [`Searcher`]'s tables.
pub struct Search<'a, H: ?Sized> {
    searcher: &'a mut Searcher,
    graph: &'a Graph,
    heuristic: &'a H,
    options: &'a SearchOptions,
    start: Vertex,
    goal: Vertex,
    state: SearchState,
    termination: Option<Termination>,
    nodes_explored: u64,
    closed_len: usize,
    stats: SearchStats,
}

impl<H: Heuristic + ?Sized> Search<'_, H> {
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Non-stale expansions so far.
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    /// Current open-set size, stale entries included.
    pub fn open_len(&self) -> usize {
        self.searcher.open.len()
    }

    /// Whether `v` is currently closed.
    pub fn is_closed(&self, v: Vertex) -> bool {
        self.searcher.nodes.is_closed(v)
    }

    /// Best known cost from the start to `v` so far.
    pub fn g_score(&self, v: Vertex) -> Option<f64> {
        self.searcher.nodes.g(v)
    }

    /// Advance by one open-set pop and return the new state.
    pub fn step(&mut self) -> SearchState {
        if self.state.is_finished() {
            return self.state;
        }
        self.state = SearchState::Running;

        if let Some(reason) = self.limit_reached() {
            self.finish_with(reason);
            return self.state;
        }

        let Some(entry) = self.searcher.open.pop() else {
            self.finish_with(Termination::Exhausted);
            return self.state;
        };

        let v = entry.vertex;
        let stale = match self.searcher.nodes.g(v) {
            Some(g) => entry.g > g,
            None => true,
        };
        if stale || self.searcher.nodes.is_closed(v) {
            self.stats.stale_pops += 1;
            return self.state;
        }

        self.nodes_explored += 1;
        if v == self.goal {
            self.finish_with(Termination::Found);
            return self.state;
        }

        self.close(v, entry.g);
        self.expand(v, entry.g);
        self.state
    }

    /// Step until the search finishes and return its result.
    pub fn run(mut self) -> SearchResult {
        while !self.step().is_finished() {}
        self.into_result()
    }

    /// Consume the search and build its result.
    ///
    /// A search that has not finished yet reports `found = false` with the
    /// work done so far; it never returns a partial path.
    pub fn into_result(self) -> SearchResult {
        let termination = self.termination.unwrap_or(Termination::Exhausted);
        let mut stats = self.stats;
        stats.peak_open = self.searcher.open.peak_len();

        let found = termination == Termination::Found;
        let (path, cost) = if found {
            let nodes = &self.searcher.nodes;
            let path = path::reconstruct(nodes, self.start, self.goal, self.graph.vertex_count());
            (path, nodes.g(self.goal).unwrap_or(UNREACHABLE))
        } else {
            (Vec::new(), UNREACHABLE)
        };

        let props = self.heuristic.properties();
        let optimality_guaranteed =
            found && (props.consistent || (props.admissible && self.options.reopen_closed));

        log::debug!(
            "astar {} -> {}: {} cost={} explored={} pushes={} stale={} peak_open={}",
            self.start,
            self.goal,
            termination,
            cost,
            self.nodes_explored,
            stats.pushes,
            stats.stale_pops,
            stats.peak_open,
        );

        SearchResult {
            path,
            cost,
            nodes_explored: self.nodes_explored,
            found,
            termination,
            optimality_guaranteed,
            stats,
        }
    }

    fn finish_with(&mut self, termination: Termination) {
        self.termination = Some(termination);
        self.state = if termination == Termination::Found {
            SearchState::Found
        } else {
            SearchState::Exhausted
        };
    }

    fn limit_reached(&self) -> Option<Termination> {
        if let Some(max) = self.options.max_nodes {
            if self.nodes_explored >= max as u64 {
                return Some(Termination::NodeBudget);
            }
        }
        if let Some(deadline) = self.options.deadline {
            if Instant::now() >= deadline {
                return Some(Termination::Deadline);
            }
        }
        None
    }

    fn push(&mut self, v: Vertex, g: f64) {
        let h = self.heuristic.estimate(v, self.goal);
        debug_assert!(h >= 0.0, "heuristic returned {h} for {v} -> {}", self.goal);
        self.searcher.open.push(v, g, g + h);
        self.stats.pushes += 1;
    }

    fn close(&mut self, v: Vertex, g: f64) {
        self.searcher.nodes.set_closed(v, true);
        self.closed_len += 1;

        let Some(cap) = self.options.max_closed else {
            return;
        };
        self.searcher.closed_order.push(ClosedRef { g, vertex: v });
        while self.closed_len > cap {
            let Some(victim) = self.searcher.closed_order.pop() else {
                break;
            };
            // Skip references left behind by reopened vertices.
            let nodes = &self.searcher.nodes;
            if !nodes.is_closed(victim.vertex) || nodes.g(victim.vertex) != Some(victim.g) {
                continue;
            }
            if self.stats.evictions == 0 {
                log::warn!("astar: closed set exceeded {cap} vertices, evicting");
            }
            self.searcher.nodes.set_closed(victim.vertex, false);
            self.closed_len -= 1;
            self.stats.evictions += 1;
        }
    }

    fn expand(&mut self, v: Vertex, g: f64) {
        let graph = self.graph;
        for edge in graph.neighbors(v) {
            let n = edge.to;
            let tentative = g + edge.weight;
            let closed = self.searcher.nodes.is_closed(n);
            if closed && !self.options.reopen_closed {
                continue;
            }
            if let Some(best) = self.searcher.nodes.g(n) {
                if tentative >= best {
                    continue;
                }
            }
            if closed {
                self.searcher.nodes.set_closed(n, false);
                self.closed_len -= 1;
                self.stats.reopened += 1;
            }
            self.searcher.nodes.record(n, tentative, Some(v));
            self.push(n, tentative);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{HeuristicProperties, Null};
    use std::time::Duration;

    fn chain(n: u32) -> Graph {
        let mut g = Graph::new(n as usize);
        for i in 0..n - 1 {
            g.add_edge(Vertex(i), Vertex(i + 1), 1.0).unwrap();
        }
        g
    }

    #[test]
    fn state_machine_transitions() {
        let g = chain(3);
        let opts = SearchOptions::default();
        let mut searcher = Searcher::new();
        let mut s = searcher.begin(&g, Vertex(0), Vertex(2), &Null, &opts);
        assert_eq!(s.state(), SearchState::Ready);
        assert_eq!(s.open_len(), 1);

        assert_eq!(s.step(), SearchState::Running);
        assert!(s.is_closed(Vertex(0)));
        assert_eq!(s.g_score(Vertex(1)), Some(1.0));
        assert_eq!(s.step(), SearchState::Running);
        assert_eq!(s.step(), SearchState::Found);
        // Finished searches stay put.
        assert_eq!(s.step(), SearchState::Found);
        assert_eq!(s.nodes_explored(), 3);

        let res = s.into_result();
        assert!(res.found);
        assert_eq!(res.termination, Termination::Found);
        assert_eq!(res.path, vec![Vertex(0), Vertex(1), Vertex(2)]);
    }

    #[test]
    fn start_equals_goal() {
        let g = chain(2);
        let res = search(&g, Vertex(1), Vertex(1), &Null, &SearchOptions::default());
        assert!(res.found);
        assert_eq!(res.path, vec![Vertex(1)]);
        assert_eq!(res.cost, 0.0);
        assert_eq!(res.nodes_explored, 1);
    }

    #[test]
    fn invalid_endpoint_is_reported() {
        let g = chain(2);
        let res = search(&g, Vertex(0), Vertex(9), &Null, &SearchOptions::default());
        assert!(!res.found);
        assert_eq!(res.termination, Termination::InvalidEndpoint);
        assert_eq!(res.nodes_explored, 0);
        assert!(res.path.is_empty());
        assert_eq!(res.cost, UNREACHABLE);
    }

    #[test]
    fn unreachable_goal_exhausts() {
        let mut g = chain(3);
        let island = g.add_vertex();
        let res = search(&g, Vertex(0), island, &Null, &SearchOptions::default());
        assert!(!res.found);
        assert_eq!(res.termination, Termination::Exhausted);
        assert_eq!(res.nodes_explored, 3);
        assert!(!res.optimality_guaranteed);
    }

    #[test]
    fn node_budget_stops_without_partial_path() {
        let g = chain(10);
        let opts = SearchOptions::default().with_max_nodes(4);
        let res = search(&g, Vertex(0), Vertex(9), &Null, &opts);
        assert!(!res.found);
        assert_eq!(res.termination, Termination::NodeBudget);
        assert_eq!(res.nodes_explored, 4);
        assert!(res.path.is_empty());
    }

    #[test]
    fn budget_equal_to_needed_expansions_still_finds() {
        let g = chain(4);
        let opts = SearchOptions::default().with_max_nodes(4);
        let res = search(&g, Vertex(0), Vertex(3), &Null, &opts);
        assert!(res.found);
        assert_eq!(res.nodes_explored, 4);
    }

    #[test]
    fn past_deadline_stops_before_expanding() {
        let g = chain(5);
        let past = Instant::now() - Duration::from_millis(1);
        let opts = SearchOptions::default().with_deadline(past);
        let res = search(&g, Vertex(0), Vertex(4), &Null, &opts);
        assert!(!res.found);
        assert_eq!(res.termination, Termination::Deadline);
        assert_eq!(res.nodes_explored, 0);
    }

    #[test]
    fn unfinished_search_reports_no_path() {
        let g = chain(5);
        let opts = SearchOptions::default();
        let mut searcher = Searcher::new();
        let mut s = searcher.begin(&g, Vertex(0), Vertex(4), &Null, &opts);
        s.step();
        let res = s.into_result();
        assert!(!res.found);
        assert!(res.path.is_empty());
        assert_eq!(res.nodes_explored, 1);
    }

    #[test]
    fn stale_entries_are_discarded() {
        // 0 → 2 is expensive directly, cheap via 1. The direct entry for 2
        // goes stale once the cheaper one is pushed.
        let mut g = Graph::new(4);
        g.add_edge(Vertex(0), Vertex(2), 10.0).unwrap();
        g.add_edge(Vertex(0), Vertex(1), 1.0).unwrap();
        g.add_edge(Vertex(1), Vertex(2), 1.0).unwrap();
        g.add_edge(Vertex(2), Vertex(3), 20.0).unwrap();
        let res = search(&g, Vertex(0), Vertex(3), &Null, &SearchOptions::default());
        assert_eq!(res.cost, 22.0);
        assert_eq!(res.path, vec![Vertex(0), Vertex(1), Vertex(2), Vertex(3)]);
        assert_eq!(res.nodes_explored, 4);
        assert_eq!(res.stats.stale_pops, 1);
        assert_eq!(res.stats.pushes, 5);
    }

    /// Admissible but inconsistent: h(1) = 4 hides the cheap route through 1
    /// until 2 has been closed with a worse g.
    fn inconsistent_trap() -> (Graph, [f64; 4]) {
        let mut g = Graph::new(4);
        g.add_edge(Vertex(0), Vertex(1), 1.0).unwrap();
        g.add_edge(Vertex(0), Vertex(2), 4.0).unwrap();
        g.add_edge(Vertex(1), Vertex(2), 1.0).unwrap();
        g.add_edge(Vertex(2), Vertex(3), 4.0).unwrap();
        (g, [0.0, 4.0, 0.0, 0.0])
    }

    #[test]
    fn closed_skip_loses_optimality_with_inconsistent_heuristic() {
        let (g, table) = inconsistent_trap();
        let h = |v: Vertex, _goal: Vertex| table[v.index()];
        let h = crate::Declared::new(h, HeuristicProperties::ADMISSIBLE);
        let res = search(&g, Vertex(0), Vertex(3), &h, &SearchOptions::default());
        assert!(res.found);
        assert_eq!(res.cost, 8.0);
        assert!(!res.optimality_guaranteed);
    }

    #[test]
    fn reopening_restores_optimality() {
        let (g, table) = inconsistent_trap();
        let h = |v: Vertex, _goal: Vertex| table[v.index()];
        let h = crate::Declared::new(h, HeuristicProperties::ADMISSIBLE);
        let opts = SearchOptions::default().with_reopen_closed(true);
        let res = search(&g, Vertex(0), Vertex(3), &h, &opts);
        assert!(res.found);
        assert_eq!(res.cost, 6.0);
        assert_eq!(res.path, vec![Vertex(0), Vertex(1), Vertex(2), Vertex(3)]);
        assert_eq!(res.stats.reopened, 1);
        assert!(res.optimality_guaranteed);
    }

    #[test]
    fn closed_cap_evicts_highest_g() {
        let g = chain(6);
        let opts = SearchOptions::default().with_max_closed(2);
        let mut searcher = Searcher::new();
        let mut s = searcher.begin(&g, Vertex(0), Vertex(5), &Null, &opts);
        for _ in 0..3 {
            s.step();
        }
        // 0, 1, 2 were closed; 2 has the highest g and was evicted.
        assert!(s.is_closed(Vertex(0)));
        assert!(s.is_closed(Vertex(1)));
        assert!(!s.is_closed(Vertex(2)));
        let res = s.run();
        assert!(res.found);
        assert_eq!(res.cost, 5.0);
        assert_eq!(res.stats.evictions, 3);
        assert_eq!(res.nodes_explored, 6);
    }

    #[test]
    fn evicted_vertex_is_expanded_again_on_a_cheaper_path() {
        let (g, table) = inconsistent_trap();
        let h = |v: Vertex, _goal: Vertex| table[v.index()];
        let h = crate::Declared::new(h, HeuristicProperties::ADMISSIBLE);

        let uncapped = search(&g, Vertex(0), Vertex(3), &h, &SearchOptions::default());
        assert_eq!(uncapped.cost, 8.0);
        assert_eq!(uncapped.nodes_explored, 4);

        // 2 is closed at g = 4 and evicted at once; the route through 1 then
        // reaches it at g = 2 and expands it a second time.
        let opts = SearchOptions::default().with_max_closed(1);
        let res = search(&g, Vertex(0), Vertex(3), &h, &opts);
        assert!(res.found);
        assert_eq!(res.cost, 6.0);
        assert!(res.cost < uncapped.cost);
        assert_eq!(res.path, vec![Vertex(0), Vertex(1), Vertex(2), Vertex(3)]);
        assert_eq!(res.nodes_explored, 5);
        assert!(res.nodes_explored > g.vertex_count() as u64);
        assert_eq!(res.stats.reopened, 0);
        assert_eq!(res.stats.evictions, 3);
        assert!(!res.optimality_guaranteed);
    }

    #[test]
    fn searcher_reuse_matches_fresh_search() {
        let g = chain(8);
        let opts = SearchOptions::default();
        let mut searcher = Searcher::new();
        let first = searcher.search(&g, Vertex(0), Vertex(7), &Null, &opts);
        let second = searcher.search(&g, Vertex(2), Vertex(5), &Null, &opts);
        assert_eq!(first, search(&g, Vertex(0), Vertex(7), &Null, &opts));
        assert_eq!(second, search(&g, Vertex(2), Vertex(5), &Null, &opts));
        assert_eq!(second.path, vec![Vertex(2), Vertex(3), Vertex(4), Vertex(5)]);
    }

    #[test]
    fn dyn_heuristics_are_accepted() {
        let g = chain(3);
        let h: &dyn Heuristic = &Null;
        let res = search(&g, Vertex(0), Vertex(2), h, &SearchOptions::default());
        assert!(res.optimality_guaranteed);
        assert_eq!(res.cost, 2.0);
    }

    #[test]
    fn termination_display() {
        assert_eq!(Termination::NodeBudget.to_string(), "node budget exceeded");
        assert_eq!(Termination::Found.to_string(), "found");
    }
}
