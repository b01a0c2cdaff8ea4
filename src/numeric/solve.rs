//! Two linear equations in two unknowns by Cramer's rule.
//!
//! A determinant at or below the zero tolerance yields the zero vector
//! rather than an error; callers that care must check [`Solve2x2::determinant`].
use num_traits::Float;

use super::lit;
use crate::Point;

/// Default zero tolerance for the determinant
pub const DEFAULT_ZERO_TOL: f64 = 0.00001;

/// A 2x2 system `[a11 a12; a21 a22] [x; y] = [b1; b2]`, with its determinant
/// computed once so several right-hand sides can be solved cheaply.
#[derive(Debug, Clone, Copy)]
pub struct Solve2x2<T> {
    a11: T,
    a12: T,
    a21: T,
    a22: T,
    determinant: T,
}

impl<T: Float> Solve2x2<T> {
    pub fn new(a11: T, a12: T, a21: T, a22: T) -> Self {
        Self {
            a11,
            a12,
            a21,
            a22,
            determinant: a11 * a22 - a12 * a21,
        }
    }

    #[inline]
    pub fn determinant(&self) -> T {
        self.determinant
    }

    /// Solve for the right-hand side `(b1, b2)`, reusing the stored determinant.
    ///
    /// Returns the zero point if `|det| <= zero_tol`.
    pub fn solve(&self, b1: T, b2: T, zero_tol: T) -> Point<T> {
        let det = self.determinant;
        if det.abs() <= zero_tol {
            log::debug!("2x2 system is singular within tolerance; returning zero solution");
            return Point::zero();
        }

        let x = (self.a22 * b1 - self.a12 * b2) / det;
        let y = (self.a11 * b2 - self.a21 * b1) / det;
        Point::new(x, y)
    }
}

/// Solve a single 2x2 system. See [`Solve2x2::solve`].
pub fn solve<T: Float>(a11: T, a12: T, a21: T, a22: T, b1: T, b2: T, zero_tol: T) -> Point<T> {
    Solve2x2::new(a11, a12, a21, a22).solve(b1, b2, zero_tol)
}

/// Solve a single 2x2 system with [`DEFAULT_ZERO_TOL`].
pub fn solve_default<T: Float>(a11: T, a12: T, a21: T, a22: T, b1: T, b2: T) -> Point<T> {
    solve(a11, a12, a21, a22, b1, b2, lit(DEFAULT_ZERO_TOL))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_solve() {
        // x + y = 3, x - y = 1
        let p = solve(1.0, 1.0, 1.0, -1.0, 3.0, 1.0, 1e-5);
        assert_eq!(p, Point::new(2.0, 1.0));

        // Negative determinant is still a valid system
        let s = Solve2x2::new(0.0, 1.0, 1.0, 0.0);
        assert_eq!(s.determinant(), -1.0);
        assert_eq!(s.solve(4.0, 5.0, 1e-5), Point::new(5.0, 4.0));
        assert_eq!(s.solve(-1.0, 2.0, 1e-5), Point::new(2.0, -1.0));
    }

    #[test]
    fn test_singular_system() {
        let p = solve(1.0, 2.0, 2.0, 4.0, 5.0, 10.0, 1e-5);
        assert_eq!(p, Point::new(0.0, 0.0));

        let p = solve_default(1.0_f32, 2.0, 2.0, 4.0 + 1e-6, 5.0, 10.0);
        assert_eq!(p, Point::zero());
    }
}
