//! Plane distance metrics used by the spatial heuristics.

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).abs().max((a.1 - b.1).abs())
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    euclidean_squared(a, b).sqrt()
}

/// Squared Euclidean distance. Avoids the square root; only meaningful
/// when compared against other squared distances.
#[inline]
pub fn euclidean_squared(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

/// Diagonal distance on a grid where a straight step costs `straight` and a
/// diagonal step costs `diag`.
///
/// With `diag = √2 · straight` this is the octile distance; with
/// `diag = straight` it reduces to Chebyshev.
#[inline]
pub fn diagonal(a: (f64, f64), b: (f64, f64), straight: f64, diag: f64) -> f64 {
    let dx = (a.0 - b.0).abs();
    let dy = (a.1 - b.1).abs();
    straight * (dx + dy) + (diag - 2.0 * straight) * dx.min(dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn metrics_on_a_3_4_offset() {
        let a = (1.0, 1.0);
        let b = (4.0, 5.0);
        assert_eq!(manhattan(a, b), 7.0);
        assert_eq!(chebyshev(a, b), 4.0);
        assert_eq!(euclidean(a, b), 5.0);
        assert_eq!(euclidean_squared(a, b), 25.0);
    }

    #[test]
    fn octile_is_diagonal_with_sqrt2() {
        let d = diagonal((0.0, 0.0), (3.0, 5.0), 1.0, SQRT_2);
        assert!((d - (2.0 + 3.0 * SQRT_2)).abs() < 1e-12);
    }

    #[test]
    fn diagonal_with_unit_cost_is_chebyshev() {
        let a = (2.0, -1.0);
        let b = (-4.0, 3.0);
        assert_eq!(diagonal(a, b, 1.0, 1.0), chebyshev(a, b));
    }

    #[test]
    fn metrics_are_symmetric_and_zero_on_self() {
        let a = (0.5, 7.0);
        let b = (-2.0, 3.5);
        for f in [manhattan, chebyshev, euclidean, euclidean_squared] {
            assert_eq!(f(a, b), f(b, a));
            assert_eq!(f(a, a), 0.0);
        }
    }
}
