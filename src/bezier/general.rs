//! Bezier curve of arbitrary order.
//!
//! Evaluation either sums the Bernstein terms directly, weighting each by a
//! row of Pascal's triangle, or converts the control points to power-basis
//! coefficients once and evaluates those in nested form. The two agree up
//! to rounding; the coefficient form is cheaper for repeated evaluation and
//! the direct sum better conditioned for high orders.
use num_traits::Float;

use super::de_casteljau;
use crate::closest::BezierCurve;
use crate::numeric::{count, Binomial};
use crate::parametric::clamp_unit;
use crate::poly::{Coef, PolyCoef};
use crate::{CurveError, Point};

#[derive(Debug, Clone)]
pub struct Bezier<T> {
    points: Vec<Point<T>>,
    use_coef: bool,
    coef: Coef<T>,
    stale: bool,
    binomial: Binomial,
}

impl<T: Float> Default for Bezier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Bezier<T> {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            use_coef: false,
            coef: Coef::new(),
            stale: true,
            binomial: Binomial::new(),
        }
    }

    /// Build a curve from a sequence of control points.
    ///
    /// # Errors
    /// * If any coordinate is not finite
    pub fn from_points(points: &[Point<T>]) -> Result<Self, CurveError> {
        let mut curve = Self::new();
        for p in points {
            curve.add_control_point(p.x, p.y)?;
        }

        Ok(curve)
    }

    /// # Errors
    /// * If either coordinate is not finite
    pub fn add_control_point(&mut self, x: T, y: T) -> Result<(), CurveError> {
        let p = Point::new(x, y);
        if !p.is_finite() {
            return Err(CurveError::NonFiniteCoordinate);
        }
        self.points.push(p);
        self.stale = true;

        Ok(())
    }

    /// # Errors
    /// * If `i` is out of range
    /// * If either coordinate is not finite
    pub fn move_control_point(&mut self, i: usize, x: T, y: T) -> Result<(), CurveError> {
        let len = self.points.len();
        let p = Point::new(x, y);
        let slot = self
            .points
            .get_mut(i)
            .ok_or(CurveError::IndexOutOfRange { index: i, len })?;
        if !p.is_finite() {
            return Err(CurveError::NonFiniteCoordinate);
        }
        *slot = p;
        self.stale = true;

        Ok(())
    }

    pub fn control_point(&self, i: usize) -> Option<Point<T>> {
        self.points.get(i).copied()
    }

    pub fn control_points(&self) -> &[Point<T>] {
        &self.points
    }

    /// Curve order, one less than the number of control points
    pub fn degree(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.coef.reset();
        self.stale = true;
    }

    /// Evaluate through power-basis coefficients instead of the Bernstein sum
    pub fn set_use_coef(&mut self, use_coef: bool) {
        self.use_coef = use_coef;
    }

    pub fn use_coef(&self) -> bool {
        self.use_coef
    }

    /// # Errors
    /// * If fewer than two control points are present
    pub fn x(&mut self, t: T) -> Result<T, CurveError> {
        Ok(self.point(t)?.x)
    }

    /// # Errors
    /// * If fewer than two control points are present
    pub fn y(&mut self, t: T) -> Result<T, CurveError> {
        Ok(self.point(t)?.y)
    }

    /// Point on the curve at `t`, clamped to [0, 1].
    ///
    /// # Errors
    /// * If fewer than two control points are present
    /// * If the direct sum needs a binomial row too large to represent
    pub fn point(&mut self, t: T) -> Result<Point<T>, CurveError> {
        if self.points.len() < 2 {
            return Err(CurveError::InsufficientPoints {
                required: 2,
                found: self.points.len(),
            });
        }
        let t = clamp_unit(t);

        if self.use_coef {
            if self.stale {
                self.power_basis();
            }
            return Ok(self.coef.point(t));
        }

        let n = self.degree();
        let row = self.binomial.row(n)?;
        let u = T::one() - t;
        let sum = self
            .points
            .iter()
            .zip(row)
            .enumerate()
            .fold(Point::zero(), |acc, (i, (&p, &c))| {
                let c = T::from(c).unwrap_or_else(T::nan);
                let w = c * u.powi((n - i) as i32) * t.powi(i as i32);
                acc + p * w
            });

        Ok(sum)
    }

    /// Split at `t` into two curves of the same order covering [0, t] and [t, 1].
    ///
    /// # Errors
    /// * If fewer than two control points are present
    pub fn subdivide(&self, t: T) -> Result<(Self, Self), CurveError> {
        if self.points.len() < 2 {
            return Err(CurveError::InsufficientPoints {
                required: 2,
                found: self.points.len(),
            });
        }
        let (left, right) = de_casteljau(&self.points, clamp_unit(t));
        let build = |points: Vec<Point<T>>| Self {
            points,
            use_coef: self.use_coef,
            coef: Coef::new(),
            stale: true,
            binomial: Binomial::new(),
        };

        Ok((build(left), build(right)))
    }

    /// Power-basis coefficients of the curve,
    ///
    /// `c_j = n! / (n - j)! * sum_{i <= j} (-1)^(i + j) P_i / (i! (j - i)!)`
    fn power_basis(&mut self) {
        let n = self.degree();
        let fact: Vec<T> = core::iter::once(T::one())
            .chain((1..=n).scan(T::one(), |f, k| {
                *f = *f * count::<T>(k);
                Some(*f)
            }))
            .collect();

        self.coef.reset();
        for j in 0..=n {
            let sum = self.points[..=j]
                .iter()
                .enumerate()
                .fold(Point::zero(), |acc, (i, &p)| {
                    let w = (fact[i] * fact[j - i]).recip();
                    let w = if (i + j) % 2 == 0 { w } else { -w };
                    acc + p * w
                });
            let scale = fact[n] / fact[n - j];
            self.coef.add_coef(sum.x * scale, sum.y * scale);
        }
        self.stale = false;
        log::trace!("recomputed power basis for degree {n} curve");
    }
}

impl<T: Float> BezierCurve<T> for Bezier<T> {
    fn degree(&self) -> usize {
        self.degree()
    }

    fn control_point(&self, i: usize) -> Option<Point<T>> {
        self.control_point(i)
    }

    fn position(&mut self, t: T) -> Result<Point<T>, CurveError> {
        self.point(t)
    }
}
