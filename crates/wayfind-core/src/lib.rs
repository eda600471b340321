//! **wayfind-core**: core types shared across the *wayfind* crates.
//!
//! This crate provides the foundational types the search engine operates
//! on: integer grid geometry, dense vertex identifiers, and an
//! immutable-after-construction weighted adjacency graph.

pub mod geom;
pub mod graph;
pub mod vertex;

pub use geom::{Point, Range, RangeIter};
pub use graph::{Edge, Graph, GraphError};
pub use vertex::Vertex;
