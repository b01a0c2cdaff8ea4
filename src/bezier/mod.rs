//! Bezier curves of fixed (quadratic, cubic) and arbitrary order.
//!
//! The fixed-order curves share a [`Segment`] core that owns the control
//! points, the power-basis coefficients derived from them, and the
//! arc-length table. Coefficients and table are marked stale by every
//! edit and recomputed on the next evaluation.
use num_traits::Float;

use crate::numeric::gauss::{self, MAX_POINTS};
use crate::numeric::quadratic_roots;
use crate::parametric::{clamp_unit, ArcLengthTable, Parameterization};
use crate::poly::{horner_prime, Poly, PolyCoef};
use crate::{CurveError, Point};

pub mod cubic;
pub mod general;
pub mod quadratic;

pub use cubic::Bezier3;
pub use general::Bezier;
pub use quadratic::Bezier2;

/// Relative residual below which a vertical line is taken to touch the curve
pub(crate) const TANGENT_TOL: f64 = 1e-9;

/// A point where a curve crosses a vertical line: the native parameter
/// of the crossing, and the curve's y value there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<T> {
    pub t: T,
    pub y: T,
}

/// Map from `N` control points to `N` power-basis coefficient pairs
pub type Basis<T, const N: usize> = fn(&[Point<T>; N]) -> [Point<T>; N];

/// Shared state of a Bezier segment with exactly `N` control points.
#[derive(Debug, Clone)]
pub struct Segment<T, const N: usize> {
    points: [Point<T>; N],
    count: usize,
    coef: Poly<T, N>,
    basis: Basis<T, N>,
    stale: bool,
    /// Bumped on every edit; derived caches compare against it
    generation: u64,
    param: Parameterization,
    table: ArcLengthTable<T>,
    length: Option<T>,
}

impl<T: Float, const N: usize> Segment<T, N> {
    pub(crate) fn new(basis: Basis<T, N>) -> Self {
        Self {
            points: [Point::zero(); N],
            count: 0,
            coef: Poly::new(),
            basis,
            stale: true,
            generation: 0,
            param: Parameterization::Uniform,
            table: ArcLengthTable::new(),
            length: None,
        }
    }

    /// Append a control point.
    ///
    /// # Errors
    /// * If the segment already holds `N` points
    /// * If either coordinate is not finite
    pub fn add_point(&mut self, x: T, y: T) -> Result<(), CurveError> {
        if self.count >= N {
            return Err(CurveError::PointLimitExceeded { limit: N });
        }
        let p = Point::new(x, y);
        if !p.is_finite() {
            return Err(CurveError::NonFiniteCoordinate);
        }

        self.points[self.count] = p;
        self.count += 1;
        self.touch();

        Ok(())
    }

    /// Replace control point `i`.
    ///
    /// # Errors
    /// * If `i` has not been added
    /// * If either coordinate is not finite
    pub fn move_point(&mut self, i: usize, x: T, y: T) -> Result<(), CurveError> {
        if i >= self.count {
            return Err(CurveError::IndexOutOfRange {
                index: i,
                len: self.count,
            });
        }
        let p = Point::new(x, y);
        if !p.is_finite() {
            return Err(CurveError::NonFiniteCoordinate);
        }

        self.points[i] = p;
        self.touch();

        Ok(())
    }

    /// Replace the full set of control points at once.
    pub(crate) fn set_points(&mut self, points: [Point<T>; N]) {
        self.points = points;
        self.count = N;
        self.touch();
    }

    pub fn control_point(&self, i: usize) -> Option<Point<T>> {
        self.control_points().get(i).copied()
    }

    /// Control points added so far
    pub fn control_points(&self) -> &[Point<T>] {
        &self.points[..self.count]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove all control points and invalidate every cache.
    pub fn reset(&mut self) {
        self.points = [Point::zero(); N];
        self.count = 0;
        self.coef.reset();
        self.touch();
    }

    /// Edit counter. Changes whenever the curve's shape may have changed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn parameterization(&self) -> Parameterization {
        self.param
    }

    pub fn set_parameterization(&mut self, param: Parameterization) {
        if param != self.param {
            self.param = param;
            self.table.invalidate();
        }
    }

    fn touch(&mut self) {
        self.stale = true;
        self.generation = self.generation.wrapping_add(1);
        self.table.invalidate();
        self.length = None;
    }

    /// Bring coefficients and, in arc-length mode, the table up to date.
    ///
    /// # Errors
    /// * If fewer than `N` control points are present
    pub(crate) fn prepare(&mut self) -> Result<&Poly<T, N>, CurveError> {
        if self.count < N {
            return Err(CurveError::InsufficientPoints {
                required: N,
                found: self.count,
            });
        }

        if self.stale {
            log::trace!("recomputing degree {} polynomial coefficients", N - 1);
            self.coef.reset();
            for c in (self.basis)(&self.points) {
                self.coef.add_coef(c.x, c.y);
            }
            self.stale = false;
        }

        if self.param == Parameterization::ArcLength && !self.table.is_valid() {
            let coef = &self.coef;
            self.table.build(|t| coef.speed(t))?;
        }

        Ok(&self.coef)
    }

    /// Native parameter for the caller's `t` under the current parameterization.
    pub(crate) fn native(&mut self, t: T) -> Result<T, CurveError> {
        self.prepare()?;
        let t = clamp_unit(t);
        Ok(match self.param {
            Parameterization::Uniform => t,
            Parameterization::ArcLength => self.table.native(t),
        })
    }

    /// Point on the curve at the caller's `t`
    pub fn eval(&mut self, t: T) -> Result<Point<T>, CurveError> {
        let u = self.native(t)?;
        Ok(self.coef.point(u))
    }

    /// Point on the curve at native parameter `t`
    pub fn position(&mut self, t: T) -> Result<Point<T>, CurveError> {
        Ok(self.prepare()?.point(clamp_unit(t)))
    }

    /// First derivative with respect to the native parameter
    pub fn deriv(&mut self, t: T) -> Result<Point<T>, CurveError> {
        let coef = self.prepare()?;
        Ok(horner_prime(coef.coefs(), clamp_unit(t)))
    }

    /// Length of the whole segment, cached until the next edit.
    pub fn arc_length(&mut self) -> Result<T, CurveError> {
        if let Some(len) = self.length {
            return Ok(len);
        }
        let len = self.arc_length_at(T::one())?;
        self.length = Some(len);

        Ok(len)
    }

    /// Length of the segment from native parameter 0 to `t`.
    pub fn arc_length_at(&mut self, t: T) -> Result<T, CurveError> {
        let coef = self.prepare()?;
        gauss::integrate(|u| coef.speed(u), T::zero(), clamp_unit(t), MAX_POINTS)
    }

    /// Native parameter at which `axis` of the curve is smallest (or largest,
    /// if `largest` is set), among the endpoints and interior stationary points.
    pub(crate) fn extremum(
        &mut self,
        axis: fn(Point<T>) -> T,
        largest: bool,
    ) -> Result<T, CurveError> {
        let coef = *self.prepare()?;
        let c = |i: usize| coef.coef(i).map(axis).unwrap_or_else(T::zero);
        let two = T::one() + T::one();
        let three = two + T::one();

        // Derivative has degree at most two for the fixed-order segments
        let stationary = quadratic_roots(three * c(3), two * c(2), c(1));
        let candidates = [T::zero(), T::one()]
            .into_iter()
            .chain(stationary.into_iter().filter(|t| *t > T::zero() && *t < T::one()));

        let mut best = (T::zero(), axis(coef.point(T::zero())));
        for t in candidates {
            let v = axis(coef.point(t));
            if (largest && v > best.1) || (!largest && v < best.1) {
                best = (t, v);
            }
        }

        Ok(best.0)
    }

    /// Split the control cage at native parameter `t`.
    ///
    /// # Errors
    /// * If fewer than `N` control points are present
    pub fn split(&self, t: T) -> Result<([Point<T>; N], [Point<T>; N]), CurveError> {
        if self.count < N {
            return Err(CurveError::InsufficientPoints {
                required: N,
                found: self.count,
            });
        }
        let (left, right) = de_casteljau(&self.points, clamp_unit(t));

        Ok((
            core::array::from_fn(|i| left[i]),
            core::array::from_fn(|i| right[i]),
        ))
    }
}

/// Split a Bezier control polygon of any order at `t`, returning the left
/// and right halves. Both start from the end nearest their own piece.
pub(crate) fn de_casteljau<T: Float>(
    points: &[Point<T>],
    t: T,
) -> (Vec<Point<T>>, Vec<Point<T>>) {
    let n = points.len();
    let mut work = points.to_vec();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);

    for level in 0..n {
        left.push(work[0]);
        right.push(work[n - 1 - level]);
        for i in 0..n - 1 - level {
            work[i] = work[i].lerp(work[i + 1], t);
        }
    }
    right.reverse();

    (left, right)
}

/// Keep the roots that fall in [0, 1] (allowing for rounding at the ends),
/// sorted, with near-duplicates merged.
pub(crate) fn unit_roots<T: Float>(roots: impl IntoIterator<Item = T>) -> Vec<T> {
    let tol = crate::numeric::lit::<T>(1e-9);
    let mut kept: Vec<T> = roots
        .into_iter()
        .filter(|t| t.is_finite() && *t >= -tol && *t <= T::one() + tol)
        .map(clamp_unit)
        .collect();
    kept.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
    kept.dedup_by(|a, b| (*a - *b).abs() <= tol);

    kept
}
