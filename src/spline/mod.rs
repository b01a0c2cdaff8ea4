//! Natural cubic splines: a univariate `y(x)` spline, and a parametric
//! `(x(t), y(t))` spline built from two of them over a chord-length
//! parameter.
//!
//! Both keep their knots ordered at all times and compute second
//! derivatives lazily, on the first evaluation after a knot changes.

pub mod pspline3;
pub mod spline3;

pub use pspline3::PSpline3;
pub use spline3::Spline3;
