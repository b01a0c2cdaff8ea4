//! Fixed-capacity coefficient holders for quadratic and cubic curves.
use num_traits::Float;

use super::PolyCoef;
use crate::Point;

/// Coefficient holder with room for exactly `N` coefficient pairs
/// (a polynomial of degree `N - 1`).
#[derive(Debug, Clone, Copy)]
pub struct Poly<T, const N: usize> {
    coefs: [Point<T>; N],
    count: usize,
}

/// Quadratic coefficients, `c0 + c1 t + c2 t^2`
pub type Quad<T> = Poly<T, 3>;

/// Cubic coefficients, `c0 + c1 t + c2 t^2 + c3 t^3`
pub type Cubic<T> = Poly<T, 4>;

impl<T: Float, const N: usize> Default for Poly<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float, const N: usize> Poly<T, N> {
    pub fn new() -> Self {
        Self {
            coefs: [Point::zero(); N],
            count: 0,
        }
    }

    /// Number of coefficient pairs supplied so far
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl<T: Float, const N: usize> PolyCoef<T> for Poly<T, N> {
    #[inline]
    fn degree(&self) -> usize {
        N - 1
    }

    fn reset(&mut self) {
        self.coefs = [Point::zero(); N];
        self.count = 0;
    }

    fn add_coef(&mut self, cx: T, cy: T) -> bool {
        if self.count >= N || !(cx.is_finite() && cy.is_finite()) {
            return false;
        }
        self.coefs[self.count] = Point::new(cx, cy);
        self.count += 1;
        true
    }

    fn coef(&self, i: usize) -> Option<Point<T>> {
        self.coefs.get(i).copied()
    }

    #[inline]
    fn coefs(&self) -> &[Point<T>] {
        &self.coefs
    }
}
