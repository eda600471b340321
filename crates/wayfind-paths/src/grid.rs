//! Grid-to-graph adapter.
//!
//! [`GridGraph`] turns a `width × height` obstacle grid into a [`Graph`]:
//! every open cell gets a dense vertex id in row-major order, and every pair
//! of adjacent open cells within the movement set gets an edge in each
//! direction. Straight steps cost [`STRAIGHT_COST`], diagonal steps
//! [`DIAGONAL_COST`].
//!
//! There is no incremental update. When obstacles change the whole graph is
//! rebuilt, which costs O(cells).

use std::collections::HashSet;

use wayfind_core::{Graph, GraphError, Point, Range, Vertex};

use crate::heuristic::Positions;

/// Cost of an orthogonal step.
pub const STRAIGHT_COST: f64 = 1.0;
/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Outgoing edges of a cell are added in this order (Y grows down):
/// N, NE, E, SE, S, SW, W, NW.
const OCTILE_DIRS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

const CARDINAL_DIRS: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

/// Which neighbours a cell connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// 4-directional.
    #[default]
    Cardinal,
    /// 8-directional, diagonals at √2.
    Octile,
}

impl Movement {
    /// Step offsets in edge insertion order.
    pub fn directions(self) -> &'static [Point] {
        match self {
            Self::Cardinal => &CARDINAL_DIRS,
            Self::Octile => &OCTILE_DIRS,
        }
    }
}

/// A weighted graph built from an obstacle grid, with the mapping between
/// cells and vertices.
#[derive(Debug, Clone)]
pub struct GridGraph {
    graph: Graph,
    range: Range,
    movement: Movement,
    /// Vertex of each cell in row-major order, `None` for blocked cells.
    vertex_of: Vec<Option<Vertex>>,
    /// Cell of each vertex.
    positions: Vec<Point>,
}

impl GridGraph {
    /// Build the graph for a `width × height` grid. Cells for which
    /// `is_blocked` returns `true` get no vertex.
    ///
    /// Non-positive dimensions give an empty graph.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from edge insertion. Edges produced here are
    /// always between valid vertices with positive weights, so this does not
    /// fail in practice.
    pub fn build(
        width: i32,
        height: i32,
        movement: Movement,
        is_blocked: impl Fn(Point) -> bool,
    ) -> Result<Self, GraphError> {
        let range = Range::with_size(width, height);
        let mut vertex_of = vec![None; range.len()];
        let mut positions = Vec::new();

        for (idx, p) in range.iter().enumerate() {
            if !is_blocked(p) {
                vertex_of[idx] = Some(Vertex(positions.len() as u32));
                positions.push(p);
            }
        }

        let mut graph = Graph::new(positions.len());
        for (i, &p) in positions.iter().enumerate() {
            let from = Vertex(i as u32);
            for &d in movement.directions() {
                let q = p + d;
                let Some(to) = range.index_of(q).and_then(|qi| vertex_of[qi]) else {
                    continue;
                };
                let weight = if p.is_diagonal_to(q) {
                    DIAGONAL_COST
                } else {
                    STRAIGHT_COST
                };
                graph.add_edge(from, to, weight)?;
            }
        }

        log::debug!(
            "grid {}x{} {:?}: {} open cells, {} edges",
            range.width(),
            range.height(),
            movement,
            positions.len(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            range,
            movement,
            vertex_of,
            positions,
        })
    }

    /// Rebuild the whole graph for a new obstacle layout, keeping size and
    /// movement. Vertex ids are reassigned. On error `self` is unchanged.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn rebuild(&mut self, is_blocked: impl Fn(Point) -> bool) -> Result<(), GraphError> {
        *self = Self::build(self.range.width(), self.range.height(), self.movement, is_blocked)?;
        Ok(())
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The grid rectangle, anchored at the origin.
    pub fn range(&self) -> Range {
        self.range
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    /// Number of open (vertex-carrying) cells.
    pub fn open_cells(&self) -> usize {
        self.positions.len()
    }

    /// Cell of vertex `v`.
    pub fn position_of(&self, v: Vertex) -> Option<Point> {
        self.positions.get(v.index()).copied()
    }

    /// Vertex at cell `p`, `None` if `p` is blocked or outside the grid.
    pub fn vertex_at(&self, p: Point) -> Option<Vertex> {
        self.range.index_of(p).and_then(|i| self.vertex_of[i])
    }

    /// Whether `p` is a blocked cell inside the grid.
    pub fn is_blocked(&self, p: Point) -> bool {
        self.range.contains(p) && self.vertex_at(p).is_none()
    }

    /// Map a vertex path to cells, skipping unknown vertices.
    pub fn path_points(&self, path: &[Vertex]) -> Vec<Point> {
        path.iter().filter_map(|&v| self.position_of(v)).collect()
    }
}

impl Positions for GridGraph {
    #[inline]
    fn position(&self, v: Vertex) -> Option<(f64, f64)> {
        self.position_of(v).map(Point::to_f64)
    }
}

/// Build a [`GridGraph`] from an explicit set of blocked cells. Blocked
/// cells outside the grid are ignored.
///
/// # Errors
///
/// See [`GridGraph::build`].
pub fn build_grid_graph(
    width: i32,
    height: i32,
    blocked: &HashSet<Point>,
    movement: Movement,
) -> Result<GridGraph, GraphError> {
    GridGraph::build(width, height, movement, |p| blocked.contains(&p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_ids_are_row_major() {
        let grid = GridGraph::build(3, 2, Movement::Cardinal, |_| false).unwrap();
        assert_eq!(grid.open_cells(), 6);
        assert_eq!(grid.vertex_at(Point::new(0, 0)), Some(Vertex(0)));
        assert_eq!(grid.vertex_at(Point::new(2, 0)), Some(Vertex(2)));
        assert_eq!(grid.vertex_at(Point::new(0, 1)), Some(Vertex(3)));
        assert_eq!(grid.position_of(Vertex(5)), Some(Point::new(2, 1)));
        assert_eq!(grid.vertex_at(Point::new(3, 0)), None);
        assert_eq!(grid.position_of(Vertex(6)), None);
    }

    #[test]
    fn blocked_cells_are_skipped_in_numbering() {
        let blocked: HashSet<_> = [Point::new(1, 0)].into_iter().collect();
        let grid = build_grid_graph(3, 1, &blocked, Movement::Cardinal).unwrap();
        assert_eq!(grid.open_cells(), 2);
        assert_eq!(grid.vertex_at(Point::new(1, 0)), None);
        assert_eq!(grid.vertex_at(Point::new(2, 0)), Some(Vertex(1)));
        assert!(grid.is_blocked(Point::new(1, 0)));
        assert!(!grid.is_blocked(Point::new(5, 0)));
        // The wall splits the row.
        assert!(grid.graph().neighbors(Vertex(0)).is_empty());
    }

    #[test]
    fn cardinal_edge_counts() {
        // 3x3 open grid: 12 undirected adjacencies.
        let grid = GridGraph::build(3, 3, Movement::Cardinal, |_| false).unwrap();
        assert_eq!(grid.graph().edge_count(), 24);
        let center = grid.vertex_at(Point::new(1, 1)).unwrap();
        assert_eq!(grid.graph().neighbors(center).len(), 4);
    }

    #[test]
    fn octile_edges_and_costs() {
        // 3x3 open grid: 12 straight + 8 diagonal undirected adjacencies.
        let grid = GridGraph::build(3, 3, Movement::Octile, |_| false).unwrap();
        assert_eq!(grid.graph().edge_count(), 40);
        let c = grid.vertex_at(Point::new(1, 1)).unwrap();
        let ne = grid.vertex_at(Point::new(2, 0)).unwrap();
        let e = grid.vertex_at(Point::new(2, 1)).unwrap();
        assert_eq!(grid.graph().edge_weight(c, ne), Some(DIAGONAL_COST));
        assert_eq!(grid.graph().edge_weight(c, e), Some(STRAIGHT_COST));
    }

    #[test]
    fn edges_follow_direction_order() {
        let grid = GridGraph::build(3, 3, Movement::Octile, |_| false).unwrap();
        let c = grid.vertex_at(Point::new(1, 1)).unwrap();
        let cells: Vec<_> = grid
            .graph()
            .neighbors(c)
            .iter()
            .map(|e| grid.position_of(e.to).unwrap())
            .collect();
        let expected: Vec<_> = OCTILE_DIRS.iter().map(|&d| Point::new(1, 1) + d).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn diagonals_may_pass_blocked_corners() {
        let blocked: HashSet<_> = [Point::new(1, 0), Point::new(0, 1)].into_iter().collect();
        let grid = build_grid_graph(2, 2, &blocked, Movement::Octile).unwrap();
        let a = grid.vertex_at(Point::new(0, 0)).unwrap();
        let b = grid.vertex_at(Point::new(1, 1)).unwrap();
        assert_eq!(grid.graph().edge_weight(a, b), Some(DIAGONAL_COST));
    }

    #[test]
    fn rebuild_replaces_topology() {
        let mut grid = GridGraph::build(3, 1, Movement::Cardinal, |_| false).unwrap();
        assert_eq!(grid.graph().edge_count(), 4);
        grid.rebuild(|p| p == Point::new(1, 0)).unwrap();
        assert_eq!(grid.open_cells(), 2);
        assert_eq!(grid.graph().edge_count(), 0);
        assert_eq!(grid.vertex_at(Point::new(2, 0)), Some(Vertex(1)));
        assert_eq!(grid.movement(), Movement::Cardinal);
        assert_eq!(grid.range(), Range::with_size(3, 1));
    }

    #[test]
    fn empty_dimensions_give_empty_graph() {
        let grid = GridGraph::build(0, 5, Movement::Octile, |_| false).unwrap();
        assert_eq!(grid.open_cells(), 0);
        assert_eq!(grid.graph().vertex_count(), 0);
    }

    #[test]
    fn grid_is_a_position_table() {
        let grid = GridGraph::build(4, 4, Movement::Cardinal, |_| false).unwrap();
        let v = grid.vertex_at(Point::new(3, 2)).unwrap();
        assert_eq!(grid.position(v), Some((3.0, 2.0)));
        let path = [Vertex(0), v];
        assert_eq!(grid.path_points(&path), vec![Point::new(0, 0), Point::new(3, 2)]);
    }
}
