//! Numerics for planar parametric curves: Bezier curves of any order, natural and
//! parametric cubic splines, arc-length reparameterization, and nearest-point projection,
//! generic over `f32` and `f64`.
//!
//! Curves are long-lived and edited in place. Derived data (polynomial coefficients,
//! spline second derivatives, arc-length tables, flattening output) is computed lazily
//! on the first evaluation after an edit, which is why evaluation takes `&mut self`.
//! Every failure is returned as a [`CurveError`]; a rejected edit leaves the curve
//! unchanged.
//!
//! | Type                          | Control data           | Evaluation cost          |
//! |-------------------------------|------------------------|--------------------------|
//! | bezier::Bezier2               | 3 points               | O(1)                     |
//! | bezier::Bezier3               | 4 points               | O(1)                     |
//! | bezier::Bezier                | n + 1 points           | O(n)                     |
//! | spline::Spline3               | n knots, increasing x  | O(n) + O(n) per edit     |
//! | spline::PSpline3              | n knots, any order     | O(n) + O(n) per edit     |
//!
//! In arc-length mode a fixed-order Bezier additionally evaluates a small spline
//! mapping arc length to the native parameter before each evaluation.
//!
//! # Example: Quadratic Bezier Through Three Points
//! ```rust
//! use paramcurve::{Bezier2, Parametric, Point};
//!
//! let mut curve = Bezier2::new();
//! curve
//!     .interpolate(&[Point::new(0.0_f64, 0.0), Point::new(1.0, 2.0), Point::new(2.0, 0.0)])
//!     .unwrap();
//!
//! // The curve passes through the middle point at its chord-length parameter
//! let t = curve.param(1).unwrap();
//! let p = curve.point(t).unwrap();
//! assert!((p.y - 2.0).abs() < 1e-12);
//!
//! // Find where the curve crosses a vertical line
//! let crossings = curve.y_at_x(1.0).unwrap();
//! assert_eq!(crossings.len(), 1);
//! assert!((crossings[0].y - 2.0).abs() < 1e-12);
//! ```
//!
//! # Example: Natural Cubic Spline
//! ```rust
//! use paramcurve::Spline3;
//!
//! let mut spline = Spline3::new();
//! for (x, y) in [(0.0_f64, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)] {
//!     spline.add_knot(x, y).unwrap();
//! }
//! assert!((spline.eval(2.0).unwrap() - 0.0).abs() < 1e-9);
//! assert!((spline.eval(0.5).unwrap() - 0.75).abs() < 1e-9);
//! ```
//!
//! # Example: Arc-Length Parameterization and Closest Point
//! ```rust
//! use paramcurve::{Bezier3, ClosestPoint, Parameterization, Parametric, Point};
//!
//! let mut curve = Bezier3::from_points([
//!     Point::new(0.0_f64, 0.0),
//!     Point::new(0.0, 1.0),
//!     Point::new(3.0, 1.0),
//!     Point::new(3.0, 0.0),
//! ])
//! .unwrap();
//! let length = curve.arc_length().unwrap();
//!
//! // Half the arc length in, measured along the curve
//! curve.set_parameterization(Parameterization::ArcLength);
//! let halfway = curve.point(0.5).unwrap();
//! assert!((halfway.x - 1.5).abs() < 1e-6);
//!
//! // Projection works on the native parameter
//! let mut solver = ClosestPoint::new();
//! let t = solver.closest_point(&mut curve, Point::new(1.5, 2.0)).unwrap();
//! assert!((t - 0.5).abs() < 1e-9);
//! assert!(solver.min_distance().unwrap() < length);
//! ```
// Index loops over several parallel arrays read better than zipped iterators here
#![allow(clippy::needless_range_loop)]

pub mod bezier;
pub use bezier::{Bezier, Bezier2, Bezier3, Crossing};

pub mod closest;
pub use closest::{BezierCurve, ClosestPoint, ClosestPointOptions};

pub mod error;
pub use error::CurveError;

pub mod numeric;

pub mod parametric;
pub use parametric::{Parameterization, Parametric};

pub mod point;
pub use point::Point;

pub mod poly;
pub use poly::PolyCoef;

pub mod spline;
pub use spline::{PSpline3, Spline3};

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
