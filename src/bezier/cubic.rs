//! Cubic Bezier curve, with progressive flattening into quadratic pieces.
use itertools::Itertools;
use num_traits::Float;

use super::{de_casteljau, unit_roots, Crossing, Segment, TANGENT_TOL};
use crate::closest::BezierCurve;
use crate::numeric::root::BISECT_LIMIT;
use crate::numeric::solve::DEFAULT_ZERO_TOL;
use crate::numeric::{bisect, find_root, lit, quadratic_roots, RootOptions, Solve2x2};
use crate::parametric::{Parameterization, Parametric};
use crate::poly::PolyCoef;
use crate::utils::chord_params;
use crate::{CurveError, Point};

/// Squared-distance tolerance for each flattening fit level, 1 through 10
pub const FIT_TOLERANCE: [f64; 10] = [4.0, 9.0, 16.0, 25.0, 36.0, 49.0, 64.0, 81.0, 121.0, 144.0];

/// Upper bound on the number of pieces produced by flattening
pub const MAX_FLATTEN_SEGMENTS: usize = 1024;

/// Iteration cap for refining a crossing
const CROSSING_MAX_ITER: usize = 50;

/// Convergence tolerance for refining a crossing
const CROSSING_TOL: f64 = 1e-7;

/// Power-basis coefficients `c0 + c1 t + c2 t^2 + c3 t^3` of a cubic cage
fn cubic_basis<T: Float>(p: &[Point<T>; 4]) -> [Point<T>; 4] {
    let three = lit::<T>(3.0);
    let c1 = (p[1] - p[0]) * three;
    let c2 = (p[2] - p[1]) * three - c1;
    let c3 = p[3] - p[0] - c1 - c2;
    [p[0], c1, c2, c3]
}

/// Quadratic pieces cached for one curve generation and fit level
#[derive(Debug, Clone)]
struct Flattening<T> {
    generation: u64,
    fit: u8,
    quads: Vec<[Point<T>; 3]>,
}

/// Cubic Bezier curve with four control points.
#[derive(Debug, Clone)]
pub struct Bezier3<T> {
    seg: Segment<T, 4>,
    /// Parameters of the two interior points from the last interpolation
    interp: Option<[T; 2]>,
    flat: Option<Flattening<T>>,
}

impl<T: Float> Default for Bezier3<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Bezier3<T> {
    pub fn new() -> Self {
        Self {
            seg: Segment::new(cubic_basis),
            interp: None,
            flat: None,
        }
    }

    /// Build a curve from its four control points.
    pub fn from_points(points: [Point<T>; 4]) -> Result<Self, CurveError> {
        let mut curve = Self::new();
        for p in points {
            curve.add_control_point(p.x, p.y)?;
        }

        Ok(curve)
    }

    /// # Errors
    /// * If four points are already present
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
        self.flat = None;
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

    /// Fit the curve through four points.
    ///
    /// The interior points are placed at their chord-length parameters `t1`
    /// and `t2`, and the two interior control points solved for together.
    ///
    /// # Errors
    /// * If `points` does not hold exactly four points
    /// * If any coordinate is not finite
    /// * If consecutive points coincide
    pub fn interpolate(&mut self, points: &[Point<T>]) -> Result<(), CurveError> {
        let [p0, p1, p2, p3] = <[Point<T>; 4]>::try_from(points).map_err(|_| {
            CurveError::WrongPointCount {
                expected: 4,
                found: points.len(),
            }
        })?;
        if !points.iter().all(Point::is_finite) {
            return Err(CurveError::NonFiniteCoordinate);
        }
        let params = chord_params(points).ok_or(CurveError::DegenerateInterpolation)?;
        let (t1, t2) = (params[1], params[2]);
        if !(T::zero() < t1 && t1 < t2 && t2 < T::one()) {
            return Err(CurveError::DegenerateInterpolation);
        }

        // Bernstein weights of the interior control points at t
        let three = lit::<T>(3.0);
        let weights = |t: T| {
            let u = T::one() - t;
            (three * t * u * u, three * t * t * u)
        };
        let rhs = |t: T, p: Point<T>| {
            let u = T::one() - t;
            p - p0 * (u * u * u) - p3 * (t * t * t)
        };
        let (a11, a12) = weights(t1);
        let (a21, a22) = weights(t2);
        let (b1, b2) = (rhs(t1, p1), rhs(t2, p2));

        let system = Solve2x2::new(a11, a12, a21, a22);
        let zero_tol = lit::<T>(DEFAULT_ZERO_TOL);
        if system.determinant().abs() <= zero_tol {
            return Err(CurveError::DegenerateInterpolation);
        }
        let xs = system.solve(b1.x, b2.x, zero_tol);
        let ys = system.solve(b1.y, b2.y, zero_tol);

        self.seg
            .set_points([p0, Point::new(xs.x, ys.x), Point::new(xs.y, ys.y), p3]);
        self.interp = Some([t1, t2]);

        Ok(())
    }

    /// Parameter assigned to an interpolated point by the last call to
    /// [`Bezier3::interpolate`]: `t1` for `seg == 1` and `t2` for `seg == 2`.
    pub fn param(&self, seg: usize) -> Option<T> {
        match seg {
            1 | 2 => self.interp.map(|t| t[seg - 1]),
            _ => None,
        }
    }

    /// Crossings of the curve with the vertical line at `x`, ordered by
    /// parameter.
    ///
    /// `x(t)` is split at its stationary points into monotone pieces. A piece
    /// whose ends straddle `x` holds one crossing, seeded by bisection and
    /// refined. A piece end whose residual is negligible for the size of the
    /// coefficients is itself a crossing, so a tangent crossing at an
    /// x-extremum is reported once. Refined roots with a large residual are
    /// dropped.
    ///
    /// # Errors
    /// * If fewer than four control points are present
    pub fn y_at_x(&mut self, x: T) -> Result<Vec<Crossing<T>>, CurveError> {
        let coef = *self.seg.prepare()?;
        if x.is_nan() {
            return Ok(vec![]);
        }

        let c = coef.coefs();
        let (a0, a1, a2, a3) = (c[0].x - x, c[1].x, c[2].x, c[3].x);
        let scale = (a0.abs() + a1.abs() + a2.abs() + a3.abs()).max(T::one());
        let f = |t: T| a0 + t * (a1 + t * (a2 + t * a3));

        // Stationary points of x(t); a single one when the cubic coefficient vanishes
        let stationary = quadratic_roots(lit::<T>(3.0) * a3, a2 + a2, a1)
            .into_iter()
            .filter(|&t| t > T::zero() && t < T::one());
        let mut ends = vec![T::zero(), T::one()];
        ends.extend(stationary);
        let ends = unit_roots(ends);

        let touch = lit::<T>(TANGENT_TOL) * scale;
        let values: Vec<T> = ends
            .iter()
            .map(|&t| match f(t) {
                v if v.abs() <= touch => T::zero(),
                v => v,
            })
            .collect();

        let mut roots: Vec<T> = ends
            .iter()
            .zip(&values)
            .filter(|(_, v)| **v == T::zero())
            .map(|(t, _)| *t)
            .collect();

        let opts = RootOptions {
            max_iter: CROSSING_MAX_ITER,
            tolerance: lit(CROSSING_TOL),
        };
        let pieces = ends.iter().copied().zip(values.iter().copied());
        for ((lo, flo), (hi, fhi)) in pieces.tuple_windows() {
            if flo == T::zero() || fhi == T::zero() || flo.signum() == fhi.signum() {
                continue;
            }
            let (lo, hi) = bisect(f, lo, hi, lit(BISECT_LIMIT)).unwrap_or((lo, hi));
            let r = match find_root(f, lo, hi, opts) {
                Ok(est) => est.root,
                Err(_) => continue,
            };
            // |x'(t)| <= 3 * scale on [0, 1]
            if f(r).abs() > lit::<T>(3.0 * CROSSING_TOL) * scale {
                log::debug!("rejecting crossing with large residual");
                continue;
            }
            roots.push(r);
        }

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

    /// Split at native parameter `t` into two cubics covering [0, t] and [t, 1].
    ///
    /// # Errors
    /// * If fewer than four control points are present
    pub fn subdivide(&self, t: T) -> Result<(Self, Self), CurveError> {
        let (left, right) = self.seg.split(t)?;
        let build = |cage: [Point<T>; 4]| {
            let mut curve = Self::new();
            curve.seg.set_points(cage);
            curve.seg.set_parameterization(self.seg.parameterization());
            curve
        };

        Ok((build(left), build(right)))
    }

    /// Approximate the curve by quadratic pieces.
    ///
    /// The control cage is halved repeatedly, at least once, until the
    /// midpoint of every piece's quadratic approximation lies within the
    /// squared distance [`FIT_TOLERANCE`]`[fit - 1]` of the cubic's midpoint.
    /// The result is cached until the curve changes or a different `fit` is
    /// requested.
    ///
    /// # Errors
    /// * If `fit` is not in 1..=10
    /// * If fewer than four control points are present
    pub fn flatten(&mut self, fit: u8) -> Result<&[[Point<T>; 3]], CurveError> {
        if !(1..=10).contains(&fit) {
            return Err(CurveError::InvalidFit { fit });
        }
        let generation = self.seg.generation();
        let cached = matches!(&self.flat, Some(f) if f.generation == generation && f.fit == fit);

        if !cached {
            let (left, right) = self.seg.split(lit(0.5))?;
            let tol = lit::<T>(FIT_TOLERANCE[usize::from(fit) - 1]);
            let mut cubics = vec![left, right];

            while cubics.iter().any(|c| midpoint_error(c) > tol) {
                if 2 * cubics.len() > MAX_FLATTEN_SEGMENTS {
                    log::warn!(
                        "flattening stopped at {} pieces before reaching fit {fit}",
                        cubics.len()
                    );
                    break;
                }
                cubics = cubics.iter().flat_map(halve).collect();
            }
            log::debug!("flattened cubic into {} quadratic pieces", cubics.len());

            let quads = cubics.iter().map(|c| [c[0], quad_control(c), c[3]]).collect();
            self.flat = Some(Flattening {
                generation,
                fit,
                quads,
            });
        }

        Ok(self
            .flat
            .as_ref()
            .map(|f| f.quads.as_slice())
            .unwrap_or_default())
    }
}

/// Split a cubic cage at its parameter midpoint.
fn halve<T: Float>(cage: &[Point<T>; 4]) -> [[Point<T>; 4]; 2] {
    let (left, right) = de_casteljau(cage, lit(0.5));
    [
        core::array::from_fn(|i| left[i]),
        core::array::from_fn(|i| right[i]),
    ]
}

/// Control point of the quadratic approximating a cubic cage: the
/// intersection of the end tangents, or the middle of the inner control
/// points when the tangents are parallel.
fn quad_control<T: Float>(c: &[Point<T>; 4]) -> Point<T> {
    let d0 = c[1] - c[0];
    let d3 = c[2] - c[3];
    let rhs = c[3] - c[0];
    let system = Solve2x2::new(d0.x, -d3.x, d0.y, -d3.y);
    let zero_tol = lit::<T>(DEFAULT_ZERO_TOL);
    if system.determinant().abs() <= zero_tol {
        return c[1].lerp(c[2], lit(0.5));
    }
    let s = system.solve(rhs.x, rhs.y, zero_tol);

    c[0] + d0 * s.x
}

/// Squared distance between the midpoints of a cubic and its quadratic
/// approximation.
fn midpoint_error<T: Float>(c: &[Point<T>; 4]) -> T {
    let q = quad_control(c);
    let d = c[0] + q * lit(4.0) - (c[1] + c[2]) * lit(3.0) + c[3];
    lit::<T>(0.015625) * d.dot(d)
}

impl<T: Float> Parametric<T> for Bezier3<T> {
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

impl<T: Float> BezierCurve<T> for Bezier3<T> {
    fn degree(&self) -> usize {
        3
    }

    fn control_point(&self, i: usize) -> Option<Point<T>> {
        self.seg.control_point(i)
    }

    fn position(&mut self, t: T) -> Result<Point<T>, CurveError> {
        self.seg.position(t)
    }
}
