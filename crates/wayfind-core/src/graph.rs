//! Weighted directed adjacency graph.
//!
//! A [`Graph`] maps each dense [`Vertex`] to an ordered list of outgoing
//! [`Edge`]s. Edges are only ever added, never removed: when topology
//! changes the owner rebuilds the graph wholesale. Once built the graph is
//! read-only and may be shared by any number of concurrent searches.

use std::fmt;

use crate::vertex::Vertex;

/// An outgoing edge. The source vertex is implied by the adjacency list
/// the edge lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub to: Vertex,
    /// Non-negative, finite traversal cost.
    pub weight: f64,
}

/// Immutable-after-construction weighted adjacency structure.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    /// Create a graph with `vertex_count` vertices (ids `0..vertex_count`)
    /// and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Append a new isolated vertex and return its id.
    pub fn add_vertex(&mut self) -> Vertex {
        let v = Vertex(self.adjacency.len() as u32);
        self.adjacency.push(Vec::new());
        v
    }

    /// Add a directed edge `from → to`.
    ///
    /// Edges keep their insertion order in [`neighbors`](Self::neighbors).
    /// Parallel edges are allowed.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidVertex`] if either endpoint is not in the graph.
    /// - [`GraphError::NegativeWeight`] if `weight < 0`.
    /// - [`GraphError::NonFiniteWeight`] if `weight` is NaN or infinite.
    pub fn add_edge(&mut self, from: Vertex, to: Vertex, weight: f64) -> Result<(), GraphError> {
        for v in [from, to] {
            if !self.contains(v) {
                return Err(GraphError::InvalidVertex {
                    vertex: v,
                    vertex_count: self.vertex_count(),
                });
            }
        }
        if weight.is_nan() || weight.is_infinite() {
            return Err(GraphError::NonFiniteWeight { from, to, weight });
        }
        if weight < 0.0 {
            return Err(GraphError::NegativeWeight { from, to, weight });
        }
        self.adjacency[from.index()].push(Edge { to, weight });
        self.edge_count += 1;
        Ok(())
    }

    /// Add `a → b` and `b → a` with the same weight.
    ///
    /// # Errors
    ///
    /// Same as [`add_edge`](Self::add_edge). Nothing is added on error.
    pub fn add_undirected_edge(&mut self, a: Vertex, b: Vertex, weight: f64) -> Result<(), GraphError> {
        // Validate through the first insertion; the second cannot fail then.
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    /// Outgoing edges of `v` in insertion order. Empty for unknown vertices.
    #[inline]
    pub fn neighbors(&self, v: Vertex) -> &[Edge] {
        self.adjacency.get(v.index()).map_or(&[], Vec::as_slice)
    }

    /// Cheapest weight among the direct edges `from → to`, if any.
    pub fn edge_weight(&self, from: Vertex, to: Vertex) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .filter(|e| e.to == to)
            .map(|e| e.weight)
            .min_by(f64::total_cmp)
    }

    /// Whether `v` is a vertex of this graph.
    #[inline]
    pub fn contains(&self, v: Vertex) -> bool {
        v.index() < self.adjacency.len()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All vertex ids in ascending order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = Vertex> + '_ {
        (0..self.adjacency.len() as u32).map(Vertex)
    }

    /// All directed edges as `(from, edge)` pairs, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, &Edge)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, out)| out.iter().map(move |e| (Vertex(i as u32), e)))
    }
}

/// Errors raised while constructing a [`Graph`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge endpoint is not a vertex of the graph.
    InvalidVertex { vertex: Vertex, vertex_count: usize },
    /// Edge weights must be non-negative.
    NegativeWeight { from: Vertex, to: Vertex, weight: f64 },
    /// Edge weights must be finite numbers.
    NonFiniteWeight { from: Vertex, to: Vertex, weight: f64 },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidVertex {
                vertex,
                vertex_count,
            } => write!(
                f,
                "graph: vertex {vertex} out of range (graph has {vertex_count} vertices)"
            ),
            Self::NegativeWeight { from, to, weight } => {
                write!(f, "graph: edge {from} -> {to} has negative weight {weight}")
            }
            Self::NonFiniteWeight { from, to, weight } => {
                write!(f, "graph: edge {from} -> {to} has non-finite weight {weight}")
            }
        }
    }
}

impl std::error::Error for GraphError {}
