//! Natural cubic spline interpolation of `y(x)` through knots with
//! strictly increasing x.
//!
//! The second derivatives at the interior knots come from one
//! forward-elimination / back-substitution sweep of the tridiagonal
//! system, with the natural boundary condition `z_0 = z_n = 0`.
use num_traits::Float;

use crate::numeric::lit;
use crate::{CurveError, Point};

/// Natural cubic spline through an ordered set of knots.
///
/// Outside the knot range, the first and last segments are extrapolated.
#[derive(Debug, Clone, Default)]
pub struct Spline3<T> {
    /// Knot abscissae, strictly increasing
    t: Vec<T>,
    /// Knot ordinates
    y: Vec<T>,
    /// Second derivative at each knot
    z: Vec<T>,
    /// Width of each interval
    h: Vec<T>,
    stale: bool,
}

impl<T: Float> Spline3<T> {
    pub fn new() -> Self {
        Self {
            t: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
            h: Vec::new(),
            stale: true,
        }
    }

    /// Insert a knot at its sorted position.
    ///
    /// # Errors
    /// * If either coordinate is not finite
    /// * If a knot already exists at `x`
    pub fn add_knot(&mut self, x: T, y: T) -> Result<(), CurveError> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(CurveError::NonFiniteCoordinate);
        }
        let mut at = self.t.len();
        for (i, &ti) in self.t.iter().enumerate() {
            if ti == x {
                return Err(CurveError::DuplicateKnot);
            }
            if ti > x {
                at = i;
                break;
            }
        }

        self.t.insert(at, x);
        self.y.insert(at, y);
        self.stale = true;

        Ok(())
    }

    /// Remove the knot at index `i`, returning it.
    ///
    /// # Errors
    /// * If `i` is out of range
    pub fn remove_knot_at(&mut self, i: usize) -> Result<Point<T>, CurveError> {
        self.check_index(i)?;
        let x = self.t.remove(i);
        let y = self.y.remove(i);
        self.stale = true;

        Ok(Point::new(x, y))
    }

    /// Remove the knot whose abscissa is exactly `x`, returning its ordinate.
    ///
    /// # Errors
    /// * If there is no knot at `x`
    pub fn remove_knot_at_x(&mut self, x: T) -> Result<T, CurveError> {
        let i = self
            .t
            .iter()
            .position(|&ti| ti == x)
            .ok_or(CurveError::NoKnotAt {
                x: x.to_f64().unwrap_or(f64::NAN),
            })?;

        Ok(self.remove_knot_at(i)?.y)
    }

    /// Move knot `i` to `(x, y)`.
    ///
    /// # Errors
    /// * If `i` is out of range
    /// * If either coordinate is not finite
    /// * If `x` would not lie strictly between the neighbouring knots
    pub fn move_knot(&mut self, i: usize, x: T, y: T) -> Result<(), CurveError> {
        self.check_index(i)?;
        if !(x.is_finite() && y.is_finite()) {
            return Err(CurveError::NonFiniteCoordinate);
        }
        let below = i > 0 && x <= self.t[i - 1];
        let above = i + 1 < self.t.len() && x >= self.t[i + 1];
        if below || above {
            return Err(CurveError::KnotOrder { index: i });
        }

        self.t[i] = x;
        self.y[i] = y;
        self.stale = true;

        Ok(())
    }

    pub fn clear(&mut self) {
        self.t.clear();
        self.y.clear();
        self.z.clear();
        self.h.clear();
        self.stale = true;
    }

    pub fn knot_count(&self) -> usize {
        self.t.len()
    }

    /// Knots in increasing x order
    pub fn knots(&self) -> impl Iterator<Item = Point<T>> + '_ {
        self.t
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| Point::new(x, y))
    }

    /// Spline value at `x`.
    ///
    /// A single knot gives a constant spline.
    ///
    /// # Errors
    /// * If there are no knots
    pub fn eval(&mut self, x: T) -> Result<T, CurveError> {
        self.prepare()?;
        Ok(self.value(x))
    }

    /// First derivative of the spline at `x`.
    ///
    /// # Errors
    /// * If there are no knots
    pub fn eval_deriv(&mut self, x: T) -> Result<T, CurveError> {
        self.prepare()?;
        Ok(self.slope(x))
    }

    /// Recompute second derivatives if any knot changed since the last call.
    pub(crate) fn prepare(&mut self) -> Result<(), CurveError> {
        if self.t.is_empty() {
            return Err(CurveError::InsufficientPoints {
                required: 1,
                found: 0,
            });
        }
        if self.stale {
            self.solve_curvature();
            self.stale = false;
        }

        Ok(())
    }

    /// Replace all knots with already-sorted abscissae and matching ordinates.
    pub(crate) fn assign_sorted(&mut self, t: &[T], y: impl IntoIterator<Item = T>) {
        self.t.clear();
        self.t.extend_from_slice(t);
        self.y.clear();
        self.y.extend(y);
        self.stale = true;
    }

    /// Value at `x`; `prepare` must have succeeded since the last change.
    pub(crate) fn value(&self, x: T) -> T {
        if self.t.len() == 1 {
            return self.y[0];
        }
        let (i, delta) = self.locate(x);
        let h = self.h[i];
        let (z0, z1) = (self.z[i], self.z[i + 1]);
        let six = lit::<T>(6.0);

        let b = (self.y[i + 1] - self.y[i]) / h - h * (z1 + z0 + z0) / six;
        let q = lit::<T>(0.5) * z0 + delta * (z1 - z0) / (six * h);

        self.y[i] + delta * (b + delta * q)
    }

    /// Slope at `x`; `prepare` must have succeeded since the last change.
    pub(crate) fn slope(&self, x: T) -> T {
        if self.t.len() == 1 {
            return T::zero();
        }
        let (i, delta) = self.locate(x);
        let h = self.h[i];
        let (z0, z1) = (self.z[i], self.z[i + 1]);

        let b = (self.y[i + 1] - self.y[i]) / h - h * (z1 + z0 + z0) / lit::<T>(6.0);

        b + z0 * delta + (z1 - z0) * delta * delta / (h + h)
    }

    /// Index of the interval containing `x`, and the offset into it.
    #[inline]
    fn locate(&self, x: T) -> (usize, T) {
        let n = self.t.len();
        let i = (0..n - 1).rev().find(|&j| x >= self.t[j]).unwrap_or(0);

        (i, x - self.t[i])
    }

    fn check_index(&self, i: usize) -> Result<(), CurveError> {
        if i >= self.t.len() {
            return Err(CurveError::IndexOutOfRange {
                index: i,
                len: self.t.len(),
            });
        }
        Ok(())
    }

    fn solve_curvature(&mut self) {
        let n = self.t.len();
        self.h.clear();
        self.h.extend(self.t.windows(2).map(|w| w[1] - w[0]));
        self.z.clear();
        self.z.resize(n, T::zero());
        if n < 3 {
            return;
        }

        log::debug!("solving natural spline second derivatives for {n} knots");

        let six = lit::<T>(6.0);
        let two = lit::<T>(2.0);
        let h = &self.h;
        let b: Vec<T> = (0..n - 1)
            .map(|i| (self.y[i + 1] - self.y[i]) / h[i])
            .collect();

        // Forward elimination; index 0 is unused
        let mut u = vec![T::zero(); n - 1];
        let mut v = vec![T::zero(); n - 1];
        u[1] = two * (h[0] + h[1]);
        v[1] = six * (b[1] - b[0]);
        for i in 2..n - 1 {
            u[i] = two * (h[i] + h[i - 1]) - h[i - 1] * h[i - 1] / u[i - 1];
            v[i] = six * (b[i] - b[i - 1]) - h[i - 1] * v[i - 1] / u[i - 1];
        }

        // Back substitution
        for i in (1..n - 1).rev() {
            self.z[i] = (v[i] - h[i] * self.z[i + 1]) / u[i];
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn zigzag() -> Spline3<f64> {
        let mut s = Spline3::new();
        // Insert out of order to exercise sorted insertion
        for (x, y) in [(2.0, 0.0), (0.0, 0.0), (3.0, 1.0), (1.0, 1.0)] {
            s.add_knot(x, y).unwrap();
        }
        s
    }

    #[test]
    fn test_exact_at_knots() {
        let mut s = zigzag();
        let xs: Vec<f64> = s.knots().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);

        for (x, y) in [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)] {
            assert!((s.eval(x).unwrap() - y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_natural_spline_values() {
        // z = [0, -4, 4, 0] for these knots
        let mut s = zigzag();
        assert_relative_eq!(s.eval(0.5).unwrap(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(s.eval(1.5).unwrap(), 0.5, epsilon = 1e-12);

        // First derivative is continuous across a knot
        let left = s.eval_deriv(1.0 - 1e-9).unwrap();
        let right = s.eval_deriv(1.0).unwrap();
        assert_relative_eq!(left, right, epsilon = 1e-6);
        assert_relative_eq!(right, -1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_small_knot_counts() {
        let mut s = Spline3::<f64>::new();
        assert!(matches!(
            s.eval(0.0),
            Err(CurveError::InsufficientPoints { .. })
        ));

        s.add_knot(1.0, 3.0).unwrap();
        assert_eq!(s.eval(-5.0).unwrap(), 3.0);
        assert_eq!(s.eval_deriv(2.0).unwrap(), 0.0);

        // Two knots give a straight line, extrapolated on both sides
        s.add_knot(2.0, 5.0).unwrap();
        assert_relative_eq!(s.eval(1.5).unwrap(), 4.0);
        assert_relative_eq!(s.eval(3.0).unwrap(), 7.0);
        assert_relative_eq!(s.eval(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_knot_edits() {
        let mut s = zigzag();
        assert_eq!(s.add_knot(1.0, 7.0), Err(CurveError::DuplicateKnot));
        assert_eq!(
            s.add_knot(f64::NAN, 0.0),
            Err(CurveError::NonFiniteCoordinate)
        );
        assert_eq!(s.knot_count(), 4);

        // Moving past a neighbour is rejected and leaves the knot alone
        assert_eq!(
            s.move_knot(1, 2.5, 0.0),
            Err(CurveError::KnotOrder { index: 1 })
        );
        assert_eq!(s.knots().nth(1), Some(Point::new(1.0, 1.0)));

        s.move_knot(1, 1.5, 2.0).unwrap();
        assert!((s.eval(1.5).unwrap() - 2.0).abs() < 1e-12);

        assert_eq!(s.remove_knot_at_x(1.5), Ok(2.0));
        assert_eq!(s.remove_knot_at_x(1.5), Err(CurveError::NoKnotAt { x: 1.5 }));
        assert_eq!(s.remove_knot_at(0), Ok(Point::new(0.0, 0.0)));
        assert!(s.remove_knot_at(5).is_err());
        assert_eq!(s.knot_count(), 2);

        s.clear();
        assert!(s.eval(0.0).is_err());
    }
}
