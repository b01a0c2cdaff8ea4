//! Scalar numeric building blocks shared by the curve types:
//! binomial coefficients, Gauss-Legendre quadrature, root isolation
//! and refinement, and a 2x2 linear solve.

pub mod binomial;
pub mod gauss;
pub mod root;
pub mod solve;

pub use binomial::Binomial;
pub use root::{bisect, find_root, RootEstimate, RootOptions};
pub use solve::Solve2x2;

use num_traits::Float;

/// Convert an `f64` literal into the working float type.
#[inline]
pub(crate) fn lit<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}

/// Convert a count into the working float type.
#[inline]
pub(crate) fn count<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}

/// Real roots of `a t^2 + b t + c = 0`.
///
/// Falls back to the linear solution when the leading coefficient vanishes
/// relative to the others. A double root is reported once.
pub fn quadratic_roots<T: Float>(a: T, b: T, c: T) -> Vec<T> {
    let scale = b.abs() + c.abs();
    if a.abs() <= T::epsilon() * scale || a == T::zero() {
        if b == T::zero() {
            return vec![];
        }
        return vec![-c / b];
    }

    let disc = b * b - lit::<T>(4.0) * a * c;
    if disc < T::zero() {
        return vec![];
    }
    if disc == T::zero() {
        return vec![-b / (a + a)];
    }

    // Avoid cancellation between -b and the root of the discriminant
    let d = disc.sqrt();
    let q = -lit::<T>(0.5) * (b + b.signum() * d);
    let r0 = q / a;
    if q == T::zero() {
        return vec![r0];
    }
    let r1 = c / q;

    vec![r0, r1]
}
