//! Quadratic Bezier curve.
use num_traits::Float;

use super::{unit_roots, Crossing, Segment, TANGENT_TOL};
use crate::closest::BezierCurve;
use crate::numeric::{lit, quadratic_roots};
use crate::parametric::{Parameterization, Parametric};
use crate::poly::PolyCoef;
use crate::utils::chord_params;
use crate::{CurveError, Point};

/// Power-basis coefficients `c0 + c1 t + c2 t^2` of a quadratic cage
fn quadratic_basis<T: Float>(p: &[Point<T>; 3]) -> [Point<T>; 3] {
    let two = lit::<T>(2.0);
    [p[0], (p[1] - p[0]) * two, p[0] - p[1] * two + p[2]]
}

/// Quadratic Bezier curve with three control points.
#[derive(Debug, Clone)]
pub struct Bezier2<T> {
    seg: Segment<T, 3>,
    /// Parameter of the interior point from the last interpolation
    interp: Option<T>,
}

impl<T: Float> Default for Bezier2<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Bezier2<T> {
    pub fn new() -> Self {
        Self {
            seg: Segment::new(quadratic_basis),
            interp: None,
        }
    }

    /// Build a curve from its three control points.
    pub fn from_points(p0: Point<T>, p1: Point<T>, p2: Point<T>) -> Result<Self, CurveError> {
        let mut curve = Self::new();
        for p in [p0, p1, p2] {
            curve.add_control_point(p.x, p.y)?;
        }

        Ok(curve)
    }

    /// # Errors
    /// * If three points are already present
    /// * If either coordinate is not finite
    pub fn add_control_point(&mut self, x: T, y: T) -> Result<(), CurveError> {
        self.seg.add_point(x, y)?;
        self.interp = None;
        Ok(())
    }

    /// # Errors
    /// * If `i` is out of range
    /// * If either coordinate is not finite
    pub fn move_control_point(&mut self, i: usize, x: T, y: T) -> Result<(), CurveError> {
        self.seg.move_point(i, x, y)?;
        self.interp = None;
        Ok(())
    }

    pub fn control_point(&self, i: usize) -> Option<Point<T>> {
        self.seg.control_point(i)
    }

    pub fn control_points(&self) -> &[Point<T>] {
        self.seg.control_points()
    }

    pub fn len(&self) -> usize {
        self.seg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seg.is_empty()
    }

    pub fn reset(&mut self) {
        self.seg.reset();
        self.interp = None;
    }

    /// Changes whenever the curve's shape may have changed
    pub fn generation(&self) -> u64 {
        self.seg.generation()
    }

    /// dy/dx at native parameter `t`
    pub fn slope(&mut self, t: T) -> Result<T, CurveError> {
        let d = self.seg.deriv(t)?;
        Ok(d.y / d.x)
    }

    /// Fit the curve through three points.
    ///
    /// The middle point is placed at its chord-length parameter, and the
    /// middle control point solved for so the curve passes through it.
    ///
    /// # Errors
    /// * If `points` does not hold exactly three points
    /// * If any coordinate is not finite
    /// * If the middle point coincides with an end point
    pub fn interpolate(&mut self, points: &[Point<T>]) -> Result<(), CurveError> {
        let [p0, p1, p2] = <[Point<T>; 3]>::try_from(points).map_err(|_| {
            CurveError::WrongPointCount {
                expected: 3,
                found: points.len(),
            }
        })?;
        if !points.iter().all(Point::is_finite) {
            return Err(CurveError::NonFiniteCoordinate);
        }
        let t = chord_params(points)
            .map(|params| params[1])
            .ok_or(CurveError::DegenerateInterpolation)?;
        if t <= T::zero() || t >= T::one() {
            return Err(CurveError::DegenerateInterpolation);
        }

        let t1 = T::one() - t;
        let two = lit::<T>(2.0);
        let mid = (p1 - p0 * (t1 * t1) - p2 * (t * t)) * (T::one() / (two * t * t1));

        self.seg.set_points([p0, mid, p2]);
        self.interp = Some(t);

        Ok(())
    }

    /// Parameter assigned to an interpolated point by the last call to
    /// [`Bezier2::interpolate`]. Only the interior point, `seg == 1`, has one.
    pub fn param(&self, seg: usize) -> Option<T> {
        match seg {
            1 => self.interp,
            _ => None,
        }
    }

    /// Crossings of the curve with the vertical line at `x`.
    ///
    /// Returns zero, one or two crossings ordered by parameter; a tangent
    /// crossing is reported once. A NaN `x` has no crossings.
    ///
    /// # Errors
    /// * If fewer than three control points are present
    pub fn y_at_x(&mut self, x: T) -> Result<Vec<Crossing<T>>, CurveError> {
        let coef = *self.seg.prepare()?;
        if x.is_nan() {
            return Ok(vec![]);
        }

        let c = coef.coefs();
        let (a0, a1, a2) = (c[0].x - x, c[1].x, c[2].x);
        let tol = lit::<T>(TANGENT_TOL) * (a0.abs() + a1.abs() + a2.abs()).max(T::one());

        let lo = self.seg.extremum(|p| p.x, false)?;
        let hi = self.seg.extremum(|p| p.x, true)?;
        let (xmin, xmax) = (coef.point(lo).x, coef.point(hi).x);
        if x < xmin - tol || x > xmax + tol {
            return Ok(vec![]);
        }

        // At the vertex both roots coincide, but rounding can push the
        // discriminant either way
        let vertex = [lo, hi].into_iter().find(|&t| {
            t > T::zero() && t < T::one() && (a0 + t * (a1 + t * a2)).abs() <= tol
        });
        let roots = match vertex {
            Some(t) => vec![t],
            None => quadratic_roots(a2, a1, a0),
        };

        Ok(unit_roots(roots)
            .into_iter()
            .map(|t| Crossing {
                t,
                y: coef.point(t).y,
            })
            .collect())
    }

    /// Native parameter of the leftmost point of the curve
    pub fn t_at_min_x(&mut self) -> Result<T, CurveError> {
        self.seg.extremum(|p| p.x, false)
    }

    /// Native parameter of the rightmost point of the curve
    pub fn t_at_max_x(&mut self) -> Result<T, CurveError> {
        self.seg.extremum(|p| p.x, true)
    }

    /// Native parameter of the lowest point of the curve
    pub fn t_at_min_y(&mut self) -> Result<T, CurveError> {
        self.seg.extremum(|p| p.y, false)
    }

    /// Native parameter of the highest point of the curve
    pub fn t_at_max_y(&mut self) -> Result<T, CurveError> {
        self.seg.extremum(|p| p.y, true)
    }

    /// Split at native parameter `t` into two quadratics covering [0, t] and [t, 1].
    ///
    /// # Errors
    /// * If fewer than three control points are present
    pub fn subdivide(&self, t: T) -> Result<(Self, Self), CurveError> {
        let (left, right) = self.seg.split(t)?;
        let build = |cage: [Point<T>; 3]| {
            let mut curve = Self::new();
            curve.seg.set_points(cage);
            curve.seg.set_parameterization(self.seg.parameterization());
            curve
        };

        Ok((build(left), build(right)))
    }
}

impl<T: Float> Parametric<T> for Bezier2<T> {
    fn x(&mut self, t: T) -> Result<T, CurveError> {
        Ok(self.seg.eval(t)?.x)
    }

    fn y(&mut self, t: T) -> Result<T, CurveError> {
        Ok(self.seg.eval(t)?.y)
    }

    fn point(&mut self, t: T) -> Result<Point<T>, CurveError> {
        self.seg.eval(t)
    }

    fn x_prime(&mut self, t: T) -> Result<T, CurveError> {
        Ok(self.seg.deriv(t)?.x)
    }

    fn y_prime(&mut self, t: T) -> Result<T, CurveError> {
        Ok(self.seg.deriv(t)?.y)
    }

    fn arc_length(&mut self) -> Result<T, CurveError> {
        self.seg.arc_length()
    }

    fn arc_length_at(&mut self, t: T) -> Result<T, CurveError> {
        self.seg.arc_length_at(t)
    }

    fn parameterization(&self) -> Parameterization {
        self.seg.parameterization()
    }

    fn set_parameterization(&mut self, param: Parameterization) {
        self.seg.set_parameterization(param);
    }
}

impl<T: Float> BezierCurve<T> for Bezier2<T> {
    fn degree(&self) -> usize {
        2
    }

    fn control_point(&self, i: usize) -> Option<Point<T>> {
        self.seg.control_point(i)
    }

    fn position(&mut self, t: T) -> Result<Point<T>, CurveError> {
        self.seg.position(t)
    }
}
