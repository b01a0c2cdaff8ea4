//! Nearest point on a Bezier curve to a given point.
//!
//! The squared distance from `P` to the curve is stationary where
//! `(B(t) - P) . B'(t) = 0`. For a curve of degree `n` that product is a
//! polynomial of degree `2n - 1`, which is written directly in Bernstein
//! form. Its roots are isolated by counting sign changes of the control
//! polygon and subdividing, and taken from the polygon's x-intercept once it
//! is flat. The nearest of those roots and the two endpoints wins.
use num_traits::Float;

use crate::bezier::de_casteljau;
use crate::numeric::{count, lit, Binomial};
use crate::{CurveError, Point};

/// A Bezier curve the closest-point projection can operate on.
pub trait BezierCurve<T: Float> {
    /// Curve order, one less than the number of control points
    fn degree(&self) -> usize;

    fn control_point(&self, i: usize) -> Option<Point<T>>;

    /// Point on the curve at native parameter `t`
    fn position(&mut self, t: T) -> Result<Point<T>, CurveError>;
}

#[derive(Debug, Clone, Copy)]
pub struct ClosestPointOptions {
    /// Subdivision depth at which a root is taken as the midpoint of its interval
    pub max_depth: usize,
}

impl Default for ClosestPointOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Closest-point solver. Keeps its binomial rows and the last distance found
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct ClosestPoint<T> {
    opts: ClosestPointOptions,
    binomial: Binomial,
    min_distance: Option<T>,
}

impl<T: Float> ClosestPoint<T> {
    pub fn new() -> Self {
        Self::with_options(ClosestPointOptions::default())
    }

    pub fn with_options(opts: ClosestPointOptions) -> Self {
        Self {
            opts,
            binomial: Binomial::new(),
            min_distance: None,
        }
    }

    /// Distance from the curve to the point passed to the last successful
    /// [`ClosestPoint::closest_point`]
    pub fn min_distance(&self) -> Option<T> {
        self.min_distance
    }

    /// Native parameter of the point on `curve` nearest to `p`.
    ///
    /// # Errors
    /// * If the curve has fewer than two control points
    /// * If the curve's degree is too high for its binomial weights to be represented
    pub fn closest_point<C>(&mut self, curve: &mut C, p: Point<T>) -> Result<T, CurveError>
    where
        C: BezierCurve<T> + ?Sized,
    {
        let n = curve.degree();
        let required = (n + 1).max(2);
        let v = (0..required)
            .map(|i| {
                curve
                    .control_point(i)
                    .ok_or(CurveError::InsufficientPoints { required, found: i })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let w = self.distance_form(&v, p)?;
        let mut roots = Vec::new();
        self.find_roots(&w, 0, &mut roots);
        log::debug!("closest point: {} interior candidates", roots.len());

        let mut best = (T::zero(), curve.position(T::zero())?.distance_squared(p));
        for t in [T::one()].into_iter().chain(roots) {
            let d = curve.position(t)?.distance_squared(p);
            if d < best.1 {
                best = (t, d);
            }
        }
        self.min_distance = Some(best.1.sqrt());

        Ok(best.0)
    }

    /// Control polygon of `(B(t) - P) . B'(t)` in Bernstein form, with the
    /// x coordinates spaced evenly over [0, 1].
    fn distance_form(
        &mut self,
        v: &[Point<T>],
        p: Point<T>,
    ) -> Result<Vec<Point<T>>, CurveError> {
        let n = v.len() - 1;
        let deg = 2 * n - 1;
        let to_t = |c: u64| T::from(c).unwrap_or_else(T::nan);

        let row_n = self.binomial.row(n)?.to_vec();
        let row_d = self.binomial.row(n - 1)?.to_vec();
        let row_w = self.binomial.row(deg)?.to_vec();

        let c: Vec<Point<T>> = v.iter().map(|&q| q - p).collect();
        let d: Vec<Point<T>> = v
            .windows(2)
            .map(|q| (q[1] - q[0]) * count::<T>(n))
            .collect();

        let mut w: Vec<Point<T>> = (0..=deg)
            .map(|k| Point::new(count::<T>(k) / count::<T>(deg), T::zero()))
            .collect();
        for (j, dj) in d.iter().enumerate() {
            for (i, ci) in c.iter().enumerate() {
                let z = to_t(row_n[i]) * to_t(row_d[j]) / to_t(row_w[i + j]);
                w[i + j].y = w[i + j].y + dj.dot(*ci) * z;
            }
        }

        Ok(w)
    }

    fn find_roots(&self, w: &[Point<T>], depth: usize, out: &mut Vec<T>) {
        let crossings = w
            .windows(2)
            .filter(|q| is_negative(q[0].y) != is_negative(q[1].y))
            .count();
        if crossings == 0 {
            return;
        }

        let last = w.len() - 1;
        if depth >= self.opts.max_depth {
            out.push(lit::<T>(0.5) * (w[0].x + w[last].x));
            return;
        }
        if crossings == 1 && is_flat(w, self.flat_tolerance()) {
            out.push(x_intercept(w));
            return;
        }

        let (left, right) = de_casteljau(w, lit(0.5));
        self.find_roots(&left, depth + 1, out);
        self.find_roots(&right, depth + 1, out);
    }

    /// `2^-(max_depth + 1)`, but no finer than the float type resolves
    fn flat_tolerance(&self) -> T {
        let exp = i32::try_from(self.opts.max_depth)
            .unwrap_or(i32::MAX)
            .saturating_add(1);
        lit::<T>(0.5).powi(exp).max(T::epsilon())
    }
}

#[inline]
fn is_negative<T: Float>(v: T) -> bool {
    v < T::zero()
}

/// True if the control polygon lies within `tol` of its chord, measured
/// along the x axis where the chord crosses it.
fn is_flat<T: Float>(w: &[Point<T>], tol: T) -> bool {
    let (first, last) = (w[0], w[w.len() - 1]);
    let a = first.y - last.y;
    let b = last.x - first.x;
    let c = first.x * last.y - last.x * first.y;
    if a == T::zero() {
        return false;
    }

    let (mut above, mut below) = (T::zero(), T::zero());
    for q in &w[1..w.len() - 1] {
        let dist = a * q.x + b * q.y + c;
        if dist > above {
            above = dist;
        } else if dist < below {
            below = dist;
        }
    }

    (above - below).abs() / a.abs() < tol
}

/// Where the chord of the control polygon crosses y = 0
fn x_intercept<T: Float>(w: &[Point<T>]) -> T {
    let (first, last) = (w[0], w[w.len() - 1]);
    let dy = last.y - first.y;
    if dy == T::zero() {
        return lit::<T>(0.5) * (first.x + last.x);
    }

    first.x - (last.x - first.x) * first.y / dy
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bezier::{Bezier, Bezier2, Bezier3};
    use crate::parametric::Parametric;
    use crate::testing::{random_points, rng_fixed_seed};
    use crate::utils::linspace;
    use approx::assert_relative_eq;

    /// Smallest distance from `p` to a dense sampling of the curve
    fn brute_force<C: BezierCurve<f64>>(curve: &mut C, p: Point<f64>) -> f64 {
        linspace(0.0, 1.0, 20_001)
            .into_iter()
            .map(|t| curve.position(t).unwrap().distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_quadratic_apex() {
        let mut curve = Bezier2::from_points(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        )
        .unwrap();
        let p = Point::new(1.0, 0.0);

        let mut solver = ClosestPoint::new();
        assert_eq!(solver.min_distance(), None);
        let t = solver.closest_point(&mut curve, p).unwrap();
        assert!((0.0..=1.0).contains(&t));
        assert_relative_eq!(t, 0.5, epsilon = 1e-9);

        let d = solver.min_distance().unwrap();
        assert_relative_eq!(d, 0.5, epsilon = 1e-9);
        assert!(d <= p.distance(Point::new(0.0, 0.0)));
        assert!(d <= p.distance(Point::new(2.0, 0.0)));
    }

    #[test]
    fn test_point_on_curve() {
        let mut curve = Bezier3::from_points([
            Point::new(0.0, 0.0),
            Point::new(1.0, 3.0),
            Point::new(4.0, 3.0),
            Point::new(5.0, -1.0),
        ])
        .unwrap();
        let p = curve.point(0.3).unwrap();

        let mut solver = ClosestPoint::new();
        let t = solver.closest_point(&mut curve, p).unwrap();
        assert_relative_eq!(t, 0.3, epsilon = 1e-6);
        assert!(solver.min_distance().unwrap() < 1e-6);
    }

    #[test]
    fn test_endpoint_wins() {
        let mut curve = Bezier3::from_points([
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(3.0, 0.0),
        ])
        .unwrap();

        let mut solver = ClosestPoint::new();
        assert_eq!(
            solver.closest_point(&mut curve, Point::new(-2.0, -1.0)).unwrap(),
            0.0
        );
        assert_eq!(
            solver.closest_point(&mut curve, Point::new(5.0, -1.0)).unwrap(),
            1.0
        );
        assert_relative_eq!(solver.min_distance().unwrap(), 5.0_f64.sqrt());
    }

    #[test]
    fn test_random_cubics() {
        let mut rng = rng_fixed_seed();
        let mut solver = ClosestPoint::new();
        for _ in 0..20 {
            let cage = random_points(&mut rng, 5, 4.0);
            let mut curve = Bezier3::from_points([cage[0], cage[1], cage[2], cage[3]]).unwrap();
            let p = cage[4];

            let t = solver.closest_point(&mut curve, p).unwrap();
            assert!((0.0..=1.0).contains(&t));
            let d = solver.min_distance().unwrap();
            assert!(d <= brute_force(&mut curve, p) + 1e-9);
        }
    }

    #[test]
    fn test_high_order() {
        let mut rng = rng_fixed_seed();
        let points = random_points(&mut rng, 7, 2.0);
        let mut curve = Bezier::from_points(&points[..6]).unwrap();
        let p = points[6];

        let mut solver = ClosestPoint::with_options(ClosestPointOptions { max_depth: 40 });
        solver.closest_point(&mut curve, p).unwrap();
        let d = solver.min_distance().unwrap();
        assert!(d <= brute_force(&mut curve, p) + 1e-9);
    }

    #[test]
    fn test_needs_two_points() {
        let mut curve = Bezier::<f64>::new();
        let mut solver = ClosestPoint::new();
        assert!(matches!(
            solver.closest_point(&mut curve, Point::zero()),
            Err(CurveError::InsufficientPoints { required: 2, .. })
        ));

        let mut partial = Bezier3::<f64>::new();
        partial.add_control_point(0.0, 0.0).unwrap();
        assert_eq!(
            solver.closest_point(&mut partial, Point::zero()),
            Err(CurveError::InsufficientPoints {
                required: 4,
                found: 1
            })
        );
        assert_eq!(solver.min_distance(), None);
    }
}
