//! Heuristic-guided shortest-path search over weighted graphs.
//!
//! This crate provides the search engine proper and its supporting pieces:
//!
//! - **A\*** search with a deterministic open set ([`search`], [`Searcher`])
//! - **Heuristics** behind the [`Heuristic`] capability trait: null,
//!   Manhattan, Euclidean, squared Euclidean, Chebyshev, diagonal and weighted
//! - **Dijkstra** distance maps ([`distances_from`], [`DistanceMap`])
//! - an offline **heuristic analyzer** ([`analyze_heuristic`]) checking
//!   admissibility and consistency against true distances
//! - a **grid adapter** ([`GridGraph`]) turning an obstacle grid into a
//!   [`Graph`] with 4- or 8-directional moves
//!
//! Graphs are shared read-only; every search owns its open set, g-score,
//! parent and closed tables. A [`Searcher`] keeps those tables between
//! queries so repeated searches do not reallocate after warm-up.
//!
//! ```
//! use wayfind_core::{Graph, Vertex};
//! use wayfind_paths::{Null, SearchOptions, search};
//!
//! let mut g = Graph::new(3);
//! g.add_edge(Vertex(0), Vertex(1), 1.0).unwrap();
//! g.add_edge(Vertex(1), Vertex(2), 2.5).unwrap();
//!
//! let res = search(&g, Vertex(0), Vertex(2), &Null, &SearchOptions::default());
//! assert!(res.found);
//! assert_eq!(res.path, vec![Vertex(0), Vertex(1), Vertex(2)]);
//! assert_eq!(res.cost, 3.5);
//! ```

mod analyze;
mod astar;
mod dijkstra;
mod distance;
mod grid;
mod heuristic;
mod node;
mod open_set;
mod options;
mod path;

pub use analyze::{HeuristicReport, TOLERANCE, analyze_heuristic};
pub use astar::{Search, SearchResult, SearchState, SearchStats, Searcher, Termination, search};
pub use dijkstra::{DistanceMap, distances_from};
pub use distance::{chebyshev, diagonal, euclidean, euclidean_squared, manhattan};
pub use grid::{DIAGONAL_COST, GridGraph, Movement, STRAIGHT_COST, build_grid_graph};
pub use heuristic::{
    Chebyshev, Declared, Diagonal, Euclidean, EuclideanSquared, Heuristic, HeuristicProperties,
    Manhattan, Null, Positions, Weighted,
};
pub use node::{PathNode, UNREACHABLE};
pub use open_set::{OpenEntry, OpenSet};
pub use options::SearchOptions;
pub use path::path_cost;
pub use wayfind_core::{Graph, GraphError, Point, Vertex};
