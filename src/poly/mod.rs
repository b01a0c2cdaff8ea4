//! Holders for the coefficients of a planar parametric polynomial
//! `(x(t), y(t))`, stored in ascending power order and evaluated in
//! nested (Horner) form.
//!
//! Fixed-degree holders reject non-finite coefficients and coefficients
//! beyond their capacity without failing; any coefficient never supplied
//! evaluates as zero.
use num_traits::Float;

use crate::numeric::count;
use crate::Point;

pub mod coef;
pub mod fixed;

pub use coef::Coef;
pub use fixed::{Cubic, Poly, Quad};

/// Coefficients of a parametric polynomial in the power basis.
pub trait PolyCoef<T: Float> {
    /// Polynomial degree
    fn degree(&self) -> usize;

    /// Zero out all coefficients
    fn reset(&mut self);

    /// Append the next coefficient pair in ascending power order.
    ///
    /// Returns `false` and leaves the holder unchanged if either value is
    /// not finite or the holder is full.
    fn add_coef(&mut self, cx: T, cy: T) -> bool;

    /// Coefficient pair of power `i`, if in range
    fn coef(&self, i: usize) -> Option<Point<T>>;

    /// All coefficient pairs, ascending power
    fn coefs(&self) -> &[Point<T>];

    #[inline]
    fn x(&self, t: T) -> T {
        horner(self.coefs(), t).x
    }

    #[inline]
    fn y(&self, t: T) -> T {
        horner(self.coefs(), t).y
    }

    #[inline]
    fn point(&self, t: T) -> Point<T> {
        horner(self.coefs(), t)
    }

    #[inline]
    fn x_prime(&self, t: T) -> T {
        horner_prime(self.coefs(), t).x
    }

    #[inline]
    fn y_prime(&self, t: T) -> T {
        horner_prime(self.coefs(), t).y
    }

    /// Slope dy/dx of the curve at `t`, by the chain rule
    #[inline]
    fn slope(&self, t: T) -> T {
        let d = horner_prime(self.coefs(), t);
        d.y / d.x
    }

    /// Speed |B'(t)|, the arc-length integrand
    #[inline]
    fn speed(&self, t: T) -> T {
        let d = horner_prime(self.coefs(), t);
        d.x.hypot(d.y)
    }
}

/// Evaluate `c0 + t(c1 + t(c2 + ...))` for both coordinates.
#[inline]
pub(crate) fn horner<T: Float>(coefs: &[Point<T>], t: T) -> Point<T> {
    coefs
        .iter()
        .rev()
        .fold(Point::zero(), |acc, &c| acc * t + c)
}

/// Evaluate the derivative `c1 + t(2 c2 + t(3 c3 + ...))` for both coordinates.
#[inline]
pub(crate) fn horner_prime<T: Float>(coefs: &[Point<T>], t: T) -> Point<T> {
    coefs
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .fold(Point::zero(), |acc, (i, &c)| acc * t + c * count::<T>(i))
}
