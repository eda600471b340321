//! The heuristic capability and the provided heuristics.
//!
//! A heuristic estimates the remaining cost from a vertex to the goal. Two
//! properties matter to the search core:
//!
//! - **admissible**: `h(n) ≤ true_cost(n, goal)` for every `n`. Required for
//!   the first goal expansion to carry the optimal cost.
//! - **consistent**: `h(n) ≤ w(n, n') + h(n')` for every edge. Guarantees a
//!   closed vertex never needs to be expanded again, which is what lets the
//!   search skip closed vertices unconditionally.
//!
//! Neither property is checked on the hot path. Every heuristic *declares*
//! what it guarantees via [`Heuristic::properties`], and the search trusts
//! the declaration when it reports optimality. A spatial heuristic built
//! from a bare position table declares nothing; its `for_grid` constructor
//! declares what holds for that grid's movement, and [`Declared`] attaches
//! guarantees verified offline by
//! [`analyze_heuristic`](crate::analyze_heuristic).

use wayfind_core::{Point, Vertex};

use crate::distance;
use crate::grid::{DIAGONAL_COST, GridGraph, Movement, STRAIGHT_COST};

/// Admissibility and consistency guarantees of a heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicProperties {
    pub admissible: bool,
    pub consistent: bool,
}

impl HeuristicProperties {
    /// Admissible and consistent.
    pub const CONSISTENT: Self = Self {
        admissible: true,
        consistent: true,
    };
    /// Admissible only.
    pub const ADMISSIBLE: Self = Self {
        admissible: true,
        consistent: false,
    };
    /// No guarantee.
    pub const UNKNOWN: Self = Self {
        admissible: false,
        consistent: false,
    };
}

/// Remaining-cost estimate used to guide the search.
///
/// Estimates must be non-negative. Any `Fn(Vertex, Vertex) -> f64` closure is
/// a heuristic with [`HeuristicProperties::UNKNOWN`] guarantees.
pub trait Heuristic {
    /// Estimated cost of the cheapest path from `from` to `to`.
    fn estimate(&self, from: Vertex, to: Vertex) -> f64;

    /// Guarantees this heuristic makes. Defaults to none.
    fn properties(&self) -> HeuristicProperties {
        HeuristicProperties::UNKNOWN
    }
}

impl<F> Heuristic for F
where
    F: Fn(Vertex, Vertex) -> f64,
{
    #[inline]
    fn estimate(&self, from: Vertex, to: Vertex) -> f64 {
        self(from, to)
    }
}

// ---------------------------------------------------------------------------
// Position tables
// ---------------------------------------------------------------------------

/// Lookup of vertex coordinates for spatial heuristics.
///
/// A heuristic owns or borrows its position table at construction time.
/// Vertices without a position get an estimate of zero, which never breaks
/// admissibility.
pub trait Positions {
    fn position(&self, v: Vertex) -> Option<(f64, f64)>;
}

impl Positions for [Point] {
    #[inline]
    fn position(&self, v: Vertex) -> Option<(f64, f64)> {
        self.get(v.index()).map(|p| p.to_f64())
    }
}

impl Positions for [(f64, f64)] {
    #[inline]
    fn position(&self, v: Vertex) -> Option<(f64, f64)> {
        self.get(v.index()).copied()
    }
}

impl Positions for Vec<Point> {
    #[inline]
    fn position(&self, v: Vertex) -> Option<(f64, f64)> {
        self.as_slice().position(v)
    }
}

impl Positions for Vec<(f64, f64)> {
    #[inline]
    fn position(&self, v: Vertex) -> Option<(f64, f64)> {
        self.as_slice().position(v)
    }
}

impl<P: Positions + ?Sized> Positions for &P {
    #[inline]
    fn position(&self, v: Vertex) -> Option<(f64, f64)> {
        (**self).position(v)
    }
}

#[inline]
fn metric<P: Positions>(
    positions: &P,
    from: Vertex,
    to: Vertex,
    f: impl Fn((f64, f64), (f64, f64)) -> f64,
) -> f64 {
    match (positions.position(from), positions.position(to)) {
        (Some(a), Some(b)) => f(a, b),
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Provided heuristics
// ---------------------------------------------------------------------------

/// The zero heuristic. Turns A* into Dijkstra. Consistent on every graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct Null;

impl Heuristic for Null {
    #[inline]
    fn estimate(&self, _from: Vertex, _to: Vertex) -> f64 {
        0.0
    }

    fn properties(&self) -> HeuristicProperties {
        HeuristicProperties::CONSISTENT
    }
}

/// Manhattan (L1) distance times `scale`.
///
/// Consistent on 4-directional grids where every step costs at least
/// `scale`. It overestimates diagonal moves, so on 8-directional grids it is
/// not admissible.
#[derive(Debug, Clone)]
pub struct Manhattan<P> {
    positions: P,
    scale: f64,
    properties: HeuristicProperties,
}

impl<P: Positions> Manhattan<P> {
    pub fn new(positions: P) -> Self {
        Self::with_scale(positions, 1.0)
    }

    pub fn with_scale(positions: P, scale: f64) -> Self {
        Self {
            positions,
            scale,
            properties: HeuristicProperties::UNKNOWN,
        }
    }
}

impl<'a> Manhattan<&'a GridGraph> {
    /// Consistent on a [`Movement::Cardinal`] grid, no guarantee on an
    /// octile one.
    pub fn for_grid(grid: &'a GridGraph) -> Self {
        let properties = match grid.movement() {
            Movement::Cardinal => HeuristicProperties::CONSISTENT,
            Movement::Octile => HeuristicProperties::UNKNOWN,
        };
        Self {
            positions: grid,
            scale: STRAIGHT_COST,
            properties,
        }
    }
}

impl<P: Positions> Heuristic for Manhattan<P> {
    #[inline]
    fn estimate(&self, from: Vertex, to: Vertex) -> f64 {
        self.scale * metric(&self.positions, from, to, distance::manhattan)
    }

    fn properties(&self) -> HeuristicProperties {
        self.properties
    }
}

/// Straight-line distance times `scale`.
///
/// Consistent whenever every edge costs at least `scale` times the
/// straight-line length between its endpoints (continuous space, road
/// networks, grids of any connectivity).
#[derive(Debug, Clone)]
pub struct Euclidean<P> {
    positions: P,
    scale: f64,
    properties: HeuristicProperties,
}

impl<P: Positions> Euclidean<P> {
    pub fn new(positions: P) -> Self {
        Self::with_scale(positions, 1.0)
    }

    pub fn with_scale(positions: P, scale: f64) -> Self {
        Self {
            positions,
            scale,
            properties: HeuristicProperties::UNKNOWN,
        }
    }
}

impl<'a> Euclidean<&'a GridGraph> {
    /// Consistent on grids of either movement.
    pub fn for_grid(grid: &'a GridGraph) -> Self {
        Self {
            positions: grid,
            scale: STRAIGHT_COST,
            properties: HeuristicProperties::CONSISTENT,
        }
    }
}

impl<P: Positions> Heuristic for Euclidean<P> {
    #[inline]
    fn estimate(&self, from: Vertex, to: Vertex) -> f64 {
        self.scale * metric(&self.positions, from, to, distance::euclidean)
    }

    fn properties(&self) -> HeuristicProperties {
        self.properties
    }
}

/// Squared straight-line distance times `scale`.
///
/// Skips the square root, but grows quadratically: against linear edge costs
/// it overestimates beyond unit distance, so it declares no guarantee. Only
/// use it where edge costs are themselves squared lengths, and never mix its
/// values with linear Euclidean estimates.
#[derive(Debug, Clone)]
pub struct EuclideanSquared<P> {
    positions: P,
    scale: f64,
}

impl<P: Positions> EuclideanSquared<P> {
    pub fn new(positions: P) -> Self {
        Self::with_scale(positions, 1.0)
    }

    pub fn with_scale(positions: P, scale: f64) -> Self {
        Self { positions, scale }
    }
}

impl<P: Positions> Heuristic for EuclideanSquared<P> {
    #[inline]
    fn estimate(&self, from: Vertex, to: Vertex) -> f64 {
        self.scale * metric(&self.positions, from, to, distance::euclidean_squared)
    }
}

/// Chebyshev (L∞) distance times `scale`.
///
/// Consistent on 8-directional grids where straight and diagonal steps both
/// cost at least `scale`, including octile grids with √2 diagonals (where it
/// is admissible but loose).
#[derive(Debug, Clone)]
pub struct Chebyshev<P> {
    positions: P,
    scale: f64,
    properties: HeuristicProperties,
}

impl<P: Positions> Chebyshev<P> {
    pub fn new(positions: P) -> Self {
        Self::with_scale(positions, 1.0)
    }

    pub fn with_scale(positions: P, scale: f64) -> Self {
        Self {
            positions,
            scale,
            properties: HeuristicProperties::UNKNOWN,
        }
    }
}

impl<'a> Chebyshev<&'a GridGraph> {
    /// Consistent on grids of either movement.
    pub fn for_grid(grid: &'a GridGraph) -> Self {
        Self {
            positions: grid,
            scale: STRAIGHT_COST,
            properties: HeuristicProperties::CONSISTENT,
        }
    }
}

impl<P: Positions> Heuristic for Chebyshev<P> {
    #[inline]
    fn estimate(&self, from: Vertex, to: Vertex) -> f64 {
        self.scale * metric(&self.positions, from, to, distance::chebyshev)
    }

    fn properties(&self) -> HeuristicProperties {
        self.properties
    }
}

/// Diagonal distance with explicit straight and diagonal step costs.
///
/// Exact on an obstacle-free 8-directional grid with those step costs, and
/// consistent on any such grid with obstacles.
#[derive(Debug, Clone)]
pub struct Diagonal<P> {
    positions: P,
    straight: f64,
    diagonal: f64,
    properties: HeuristicProperties,
}

impl<P: Positions> Diagonal<P> {
    pub fn new(positions: P, straight: f64, diagonal: f64) -> Self {
        Self {
            positions,
            straight,
            diagonal,
            properties: HeuristicProperties::UNKNOWN,
        }
    }

    /// Octile distance: straight steps cost 1, diagonal steps √2.
    pub fn octile(positions: P) -> Self {
        Self::new(positions, STRAIGHT_COST, DIAGONAL_COST)
    }
}

impl<'a> Diagonal<&'a GridGraph> {
    /// Octile distance over `grid`. Exact on an open octile grid and
    /// consistent on grids of either movement.
    pub fn for_grid(grid: &'a GridGraph) -> Self {
        Self {
            properties: HeuristicProperties::CONSISTENT,
            ..Self::octile(grid)
        }
    }
}

impl<P: Positions> Heuristic for Diagonal<P> {
    #[inline]
    fn estimate(&self, from: Vertex, to: Vertex) -> f64 {
        metric(&self.positions, from, to, |a, b| {
            distance::diagonal(a, b, self.straight, self.diagonal)
        })
    }

    fn properties(&self) -> HeuristicProperties {
        self.properties
    }
}

/// `weight · h_base`.
///
/// With `weight > 1` the estimate is deliberately inflated: the search
/// expands fewer vertices but may return a path costing up to `weight`
/// times the optimum. Callers using it must accept suboptimal results.
#[derive(Debug, Clone)]
pub struct Weighted<H> {
    base: H,
    weight: f64,
}

impl<H: Heuristic> Weighted<H> {
    pub fn new(base: H, weight: f64) -> Self {
        Self { base, weight }
    }

    /// The inflation factor.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl<H: Heuristic> Heuristic for Weighted<H> {
    #[inline]
    fn estimate(&self, from: Vertex, to: Vertex) -> f64 {
        self.weight * self.base.estimate(from, to)
    }

    fn properties(&self) -> HeuristicProperties {
        // Shrinking a heuristic keeps both guarantees; inflating drops them.
        if self.weight <= 1.0 {
            self.base.properties()
        } else {
            HeuristicProperties::UNKNOWN
        }
    }
}

/// Attaches caller-vouched properties to any heuristic.
///
/// Typically fed from an [`analyze_heuristic`](crate::analyze_heuristic)
/// report, or used to state guarantees for a closure.
#[derive(Debug, Clone)]
pub struct Declared<H> {
    inner: H,
    properties: HeuristicProperties,
}

impl<H: Heuristic> Declared<H> {
    pub fn new(inner: H, properties: HeuristicProperties) -> Self {
        Self { inner, properties }
    }
}

impl<H: Heuristic> Heuristic for Declared<H> {
    #[inline]
    fn estimate(&self, from: Vertex, to: Vertex) -> f64 {
        self.inner.estimate(from, to)
    }

    fn properties(&self) -> HeuristicProperties {
        self.properties
    }
}
