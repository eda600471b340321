//! Shared model for the `gridroute` demo.
//!
//! Demonstrates: ASCII and seeded random obstacle maps, grid-to-graph
//! building, A* with a selectable heuristic, and the offline heuristic
//! analyzer.

use std::collections::HashSet;
use std::fmt;

use rand::{RngExt, SeedableRng};
use wayfind_paths::{
    Chebyshev, Diagonal, Euclidean, GraphError, GridGraph, Heuristic, Manhattan, Movement, Null,
    Point, SearchOptions, SearchResult, Weighted, build_grid_graph, search,
};

const WALL: char = '#';
const FLOOR: char = '.';
const START: char = 'S';
const GOAL: char = 'G';
const PATH: char = '*';

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while loading a map or preparing a query.
#[derive(Debug)]
pub enum DemoError {
    /// The map text has no rows.
    EmptyMap,
    /// A row is not as wide as the first one.
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A character outside `#.SG`.
    UnknownCell { ch: char, at: Point },
    /// `S` or `G` appears more than once.
    DuplicateMarker { ch: char },
    /// No start or goal was given and none could be inferred.
    MissingEndpoint(&'static str),
    /// The start or goal sits on a wall or outside the map.
    BlockedEndpoint(Point),
    /// A wall density that is not a number.
    InvalidDensity(f64),
    Graph(GraphError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMap => write!(f, "map: no rows"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "map: row {row} has {found} cells, expected {expected}"),
            Self::UnknownCell { ch, at } => write!(f, "map: unknown cell {ch:?} at {at}"),
            Self::DuplicateMarker { ch } => write!(f, "map: marker {ch:?} appears twice"),
            Self::MissingEndpoint(which) => write!(f, "map: no {which} given"),
            Self::BlockedEndpoint(p) => write!(f, "map: endpoint {p} is not an open cell"),
            Self::InvalidDensity(d) => write!(f, "map: wall density {d} is not a number"),
            Self::Graph(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for DemoError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

/// An obstacle map with optional start and goal markers.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleMap {
    pub width: i32,
    pub height: i32,
    pub blocked: HashSet<Point>,
    pub start: Option<Point>,
    pub goal: Option<Point>,
}

impl ObstacleMap {
    /// Parse a map drawn with `#` walls, `.` floor, and `S`/`G` markers.
    /// Blank lines are ignored; trailing whitespace is trimmed.
    pub fn parse(text: &str) -> Result<Self, DemoError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(DemoError::EmptyMap);
        };
        let width = first.chars().count();

        let mut map = Self {
            width: width as i32,
            height: rows.len() as i32,
            blocked: HashSet::new(),
            start: None,
            goal: None,
        };
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(DemoError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let at = Point::new(x as i32, y as i32);
                let marker = match ch {
                    WALL => {
                        map.blocked.insert(at);
                        continue;
                    }
                    FLOOR => continue,
                    START => &mut map.start,
                    GOAL => &mut map.goal,
                    _ => return Err(DemoError::UnknownCell { ch, at }),
                };
                if marker.replace(at).is_some() {
                    return Err(DemoError::DuplicateMarker { ch });
                }
            }
        }
        Ok(map)
    }

    /// A `width × height` map with roughly `density` of its cells walled,
    /// start in the top-left corner and goal in the bottom-right one.
    /// Densities outside `0..=1` are clamped; NaN is rejected.
    pub fn random(width: i32, height: i32, density: f64, seed: u64) -> Result<Self, DemoError> {
        if density.is_nan() {
            return Err(DemoError::InvalidDensity(density));
        }
        let density = density.clamp(0.0, 1.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let start = Point::new(0, 0);
        let goal = Point::new(width - 1, height - 1);
        let mut blocked = HashSet::new();
        for y in 0..height {
            for x in 0..width {
                let p = Point::new(x, y);
                if p != start && p != goal && rng.random_bool(density) {
                    blocked.insert(p);
                }
            }
        }
        Ok(Self {
            width,
            height,
            blocked,
            start: Some(start),
            goal: Some(goal),
        })
    }

    pub fn build(&self, movement: Movement) -> Result<GridGraph, DemoError> {
        Ok(build_grid_graph(self.width, self.height, &self.blocked, movement)?)
    }

    /// Draw the map with `path` overlaid.
    pub fn render(&self, path: &[Point]) -> String {
        let on_path: HashSet<Point> = path.iter().copied().collect();
        let (w, h) = (self.width.max(0) as usize, self.height.max(0) as usize);
        let mut out = String::with_capacity((w + 1) * h);
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                let ch = if Some(p) == self.start {
                    START
                } else if Some(p) == self.goal {
                    GOAL
                } else if self.blocked.contains(&p) {
                    WALL
                } else if on_path.contains(&p) {
                    PATH
                } else {
                    FLOOR
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Heuristics selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HeuristicKind {
    Null,
    Manhattan,
    Euclidean,
    Chebyshev,
    #[default]
    Octile,
}

impl HeuristicKind {
    /// The heuristic for `grid`'s movement and step costs, inflated by `weight`
    /// when it is not 1.
    pub fn over<'a>(self, grid: &'a GridGraph, weight: f64) -> Box<dyn Heuristic + Sync + 'a> {
        match self {
            Self::Null => weighted(Null, weight),
            Self::Manhattan => weighted(Manhattan::for_grid(grid), weight),
            Self::Euclidean => weighted(Euclidean::for_grid(grid), weight),
            Self::Chebyshev => weighted(Chebyshev::for_grid(grid), weight),
            Self::Octile => weighted(Diagonal::for_grid(grid), weight),
        }
    }
}

fn weighted<'a, H>(h: H, weight: f64) -> Box<dyn Heuristic + Sync + 'a>
where
    H: Heuristic + Sync + 'a,
{
    if weight == 1.0 {
        Box::new(h)
    } else {
        Box::new(Weighted::new(h, weight))
    }
}

/// A finished query on a map.
#[derive(Debug, Clone)]
pub struct Route {
    pub result: SearchResult,
    pub cells: Vec<Point>,
}

/// Search `map` from its start to its goal.
pub fn route(
    map: &ObstacleMap,
    grid: &GridGraph,
    heuristic: &(dyn Heuristic + Sync),
    options: &SearchOptions,
) -> Result<Route, DemoError> {
    let start = map.start.ok_or(DemoError::MissingEndpoint("start"))?;
    let goal = map.goal.ok_or(DemoError::MissingEndpoint("goal"))?;
    let s = grid.vertex_at(start).ok_or(DemoError::BlockedEndpoint(start))?;
    let g = grid.vertex_at(goal).ok_or(DemoError::BlockedEndpoint(goal))?;

    let result = search(grid.graph(), s, g, heuristic, options);
    let cells = grid.path_points(&result.path);
    Ok(Route { result, cells })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "
S..#....
.#.#.##.
.#...#..
.####.#.
......#G
";

    #[test]
    fn parse_markers_and_walls() {
        let map = ObstacleMap::parse(MAP).unwrap();
        assert_eq!((map.width, map.height), (8, 5));
        assert_eq!(map.start, Some(Point::new(0, 0)));
        assert_eq!(map.goal, Some(Point::new(7, 4)));
        assert!(map.blocked.contains(&Point::new(3, 0)));
        assert!(!map.blocked.contains(&Point::new(2, 0)));
    }

    #[test]
    fn parse_rejects_bad_maps() {
        assert!(matches!(ObstacleMap::parse("\n\n"), Err(DemoError::EmptyMap)));
        assert!(matches!(
            ObstacleMap::parse("...\n..\n"),
            Err(DemoError::RaggedRow { row: 1, expected: 3, found: 2 })
        ));
        assert!(matches!(
            ObstacleMap::parse("..x"),
            Err(DemoError::UnknownCell { ch: 'x', .. })
        ));
        assert!(matches!(
            ObstacleMap::parse("S.S"),
            Err(DemoError::DuplicateMarker { ch: 'S' })
        ));
    }

    #[test]
    fn render_roundtrips_without_path() {
        let map = ObstacleMap::parse(MAP).unwrap();
        assert_eq!(map.render(&[]).trim(), MAP.trim());
    }

    #[test]
    fn routes_through_the_maze() {
        let map = ObstacleMap::parse(MAP).unwrap();
        let grid = map.build(Movement::Cardinal).unwrap();
        let h = HeuristicKind::Manhattan.over(&grid, 1.0);
        let route = route(&map, &grid, h.as_ref(), &SearchOptions::default()).unwrap();
        assert!(route.result.found);
        assert_eq!(route.cells.first(), Some(&Point::new(0, 0)));
        assert_eq!(route.cells.last(), Some(&Point::new(7, 4)));
        assert!(route.cells.iter().all(|p| !map.blocked.contains(p)));
        assert_eq!(route.cells.len() as f64, route.result.cost + 1.0);

        let drawn = map.render(&route.cells);
        assert_eq!(drawn.matches(PATH).count(), route.cells.len() - 2);
    }

    #[test]
    fn every_heuristic_finds_the_same_cost_on_octile() {
        let map = ObstacleMap::random(16, 12, 0.25, 3).unwrap();
        let grid = map.build(Movement::Octile).unwrap();
        let opts = SearchOptions::default();
        let base = route(&map, &grid, &Null, &opts).unwrap();
        for kind in [HeuristicKind::Euclidean, HeuristicKind::Chebyshev, HeuristicKind::Octile] {
            let h = kind.over(&grid, 1.0);
            let r = route(&map, &grid, h.as_ref(), &opts).unwrap();
            assert_eq!(r.result.found, base.result.found);
            if base.result.found {
                assert!((r.result.cost - base.result.cost).abs() < 1e-9, "{kind:?}");
            }
        }
    }

    #[test]
    fn random_maps_are_seeded() {
        let a = ObstacleMap::random(10, 10, 0.3, 9).unwrap();
        let b = ObstacleMap::random(10, 10, 0.3, 9).unwrap();
        assert_eq!(a, b);
        assert!(!a.blocked.contains(&Point::new(0, 0)));
        assert!(!a.blocked.contains(&Point::new(9, 9)));
    }

    #[test]
    fn nan_density_is_rejected() {
        let err = ObstacleMap::random(4, 4, f64::NAN, 1).unwrap_err();
        assert!(matches!(err, DemoError::InvalidDensity(d) if d.is_nan()));
        let full = ObstacleMap::random(3, 3, 7.5, 1).unwrap();
        assert_eq!(full.blocked.len(), 7);
    }

    #[test]
    fn negative_dimensions_render_nothing() {
        let map = ObstacleMap::random(-3, 2, 0.2, 1).unwrap();
        assert!(map.blocked.is_empty());
        assert_eq!(map.render(&[]), "\n\n");
        let flat = ObstacleMap::random(4, -1, 0.2, 1).unwrap();
        assert_eq!(flat.render(&[]), "");
    }

    #[test]
    fn octile_routes_only_claim_optimality_for_octile_bounds() {
        let map = ObstacleMap::random(12, 12, 0.2, 5).unwrap();
        let grid = map.build(Movement::Octile).unwrap();
        let opts = SearchOptions::default();
        let manhattan = HeuristicKind::Manhattan.over(&grid, 1.0);
        let octile = HeuristicKind::Octile.over(&grid, 1.0);
        let m = route(&map, &grid, manhattan.as_ref(), &opts).unwrap();
        let o = route(&map, &grid, octile.as_ref(), &opts).unwrap();
        assert!(!m.result.optimality_guaranteed);
        assert_eq!(o.result.optimality_guaranteed, o.result.found);
    }

    #[test]
    fn blocked_endpoint_is_reported() {
        let mut map = ObstacleMap::parse("S#G").unwrap();
        map.goal = Some(Point::new(1, 0));
        let grid = map.build(Movement::Cardinal).unwrap();
        let err = route(&map, &grid, &Null, &SearchOptions::default()).unwrap_err();
        assert!(matches!(err, DemoError::BlockedEndpoint(p) if p == Point::new(1, 0)));
    }
}
