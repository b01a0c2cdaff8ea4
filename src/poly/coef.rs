//! Growable coefficient holder for polynomials of arbitrary degree.
use num_traits::Float;

use super::PolyCoef;
use crate::Point;

#[derive(Debug, Clone, Default)]
pub struct Coef<T> {
    coefs: Vec<Point<T>>,
}

impl<T: Float> Coef<T> {
    pub fn new() -> Self {
        Self { coefs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.coefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefs.is_empty()
    }
}

impl<T: Float> PolyCoef<T> for Coef<T> {
    fn degree(&self) -> usize {
        self.coefs.len().saturating_sub(1)
    }

    fn reset(&mut self) {
        self.coefs.clear();
    }

    fn add_coef(&mut self, cx: T, cy: T) -> bool {
        if !(cx.is_finite() && cy.is_finite()) {
            return false;
        }
        self.coefs.push(Point::new(cx, cy));
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
