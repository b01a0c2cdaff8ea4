//! Parametric natural cubic spline through an ordered sequence of points.
//!
//! Each coordinate is a [`Spline3`] over the normalized chord-length
//! parameter, so the curve passes through knot `i` at the cumulative
//! distance along the polyline to that knot, divided by the total.
use num_traits::Float;

use super::Spline3;
use crate::numeric::gauss::{self, MAX_POINTS};
use crate::parametric::clamp_unit;
use crate::{CurveError, Point};

#[derive(Debug, Clone, Default)]
pub struct PSpline3<T> {
    knots: Vec<Point<T>>,
    /// Distance between consecutive knots
    chords: Vec<T>,
    /// Sum of `chords`
    total: T,
    /// Normalized chord-length parameter of each knot
    params: Vec<T>,
    sx: Spline3<T>,
    sy: Spline3<T>,
}

impl<T: Float> PSpline3<T> {
    pub fn new() -> Self {
        Self {
            knots: Vec::new(),
            chords: Vec::new(),
            total: T::zero(),
            params: Vec::new(),
            sx: Spline3::new(),
            sy: Spline3::new(),
        }
    }

    /// Append a knot to the end of the curve.
    ///
    /// # Errors
    /// * If either coordinate is not finite
    /// * If the knot coincides with the current last knot
    pub fn add_knot(&mut self, x: T, y: T) -> Result<(), CurveError> {
        let p = Point::new(x, y);
        if !p.is_finite() {
            return Err(CurveError::NonFiniteCoordinate);
        }
        if let Some(&last) = self.knots.last() {
            let d = last.distance(p);
            if d == T::zero() {
                return Err(CurveError::DuplicateKnot);
            }
            self.chords.push(d);
            self.total = self.total + d;
        }
        self.knots.push(p);
        self.update_params();

        Ok(())
    }

    /// Remove knot `i`, returning it.
    ///
    /// # Errors
    /// * If `i` is out of range
    /// * If removing an interior knot would leave its neighbours coincident
    pub fn remove_knot_at(&mut self, i: usize) -> Result<Point<T>, CurveError> {
        self.check_index(i)?;
        let n = self.knots.len();

        if i == 0 {
            if !self.chords.is_empty() {
                self.chords.remove(0);
            }
        } else if i == n - 1 {
            self.chords.pop();
        } else {
            let bridged = self.knots[i - 1].distance(self.knots[i + 1]);
            if bridged == T::zero() {
                return Err(CurveError::DuplicateKnot);
            }
            self.chords.remove(i);
            self.chords[i - 1] = bridged;
        }

        let p = self.knots.remove(i);
        self.total = self.chords.iter().fold(T::zero(), |acc, &d| acc + d);
        self.update_params();

        Ok(p)
    }

    /// Move knot `i` to `(x, y)`.
    ///
    /// Only the one or two chords touching the knot are re-measured.
    ///
    /// # Errors
    /// * If `i` is out of range
    /// * If either coordinate is not finite
    /// * If the knot would coincide with a neighbour
    pub fn move_knot(&mut self, i: usize, x: T, y: T) -> Result<(), CurveError> {
        self.check_index(i)?;
        let p = Point::new(x, y);
        if !p.is_finite() {
            return Err(CurveError::NonFiniteCoordinate);
        }

        let before = (i > 0).then(|| self.knots[i - 1].distance(p));
        let after = self.knots.get(i + 1).map(|q| q.distance(p));
        if before == Some(T::zero()) || after == Some(T::zero()) {
            return Err(CurveError::DuplicateKnot);
        }

        if let Some(d) = before {
            self.total = self.total - self.chords[i - 1] + d;
            self.chords[i - 1] = d;
        }
        if let Some(d) = after {
            self.total = self.total - self.chords[i] + d;
            self.chords[i] = d;
        }
        self.knots[i] = p;
        self.update_params();

        Ok(())
    }

    pub fn reset(&mut self) {
        self.knots.clear();
        self.chords.clear();
        self.params.clear();
        self.total = T::zero();
        self.sx.clear();
        self.sy.clear();
    }

    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }

    pub fn knots(&self) -> &[Point<T>] {
        &self.knots
    }

    /// Normalized chord-length parameter of each knot
    pub fn params(&self) -> &[T] {
        &self.params
    }

    /// Total length of the polyline through the knots
    pub fn chord_length(&self) -> T {
        self.total
    }

    /// # Errors
    /// * If there are no knots
    pub fn x(&mut self, t: T) -> Result<T, CurveError> {
        self.sx.eval(clamp_unit(t))
    }

    /// # Errors
    /// * If there are no knots
    pub fn y(&mut self, t: T) -> Result<T, CurveError> {
        self.sy.eval(clamp_unit(t))
    }

    /// # Errors
    /// * If there are no knots
    pub fn point(&mut self, t: T) -> Result<Point<T>, CurveError> {
        Ok(Point::new(self.x(t)?, self.y(t)?))
    }

    /// Length of the spline curve from t = 0 to t = 1.
    ///
    /// # Errors
    /// * If there are no knots
    pub fn arc_length(&mut self) -> Result<T, CurveError> {
        self.arc_length_at(T::one())
    }

    /// Length of the spline curve from t = 0 to `t`, integrating the speed
    /// separately over each knot interval.
    ///
    /// # Errors
    /// * If there are no knots
    pub fn arc_length_at(&mut self, t: T) -> Result<T, CurveError> {
        self.sx.prepare()?;
        self.sy.prepare()?;
        let t = clamp_unit(t);
        if t.is_nan() {
            return Err(CurveError::InvalidInterval);
        }

        let (sx, sy) = (&self.sx, &self.sy);
        let speed = |u: T| sx.slope(u).hypot(sy.slope(u));

        let mut len = T::zero();
        for w in self.params.windows(2) {
            let (lo, hi) = (w[0], w[1]);
            if lo >= t {
                break;
            }
            len = len + gauss::integrate(speed, lo, hi.min(t), MAX_POINTS)?;
        }

        Ok(len)
    }

    fn check_index(&self, i: usize) -> Result<(), CurveError> {
        if i >= self.knots.len() {
            return Err(CurveError::IndexOutOfRange {
                index: i,
                len: self.knots.len(),
            });
        }
        Ok(())
    }

    /// Re-accumulate the knot parameters from the chord lengths and hand
    /// them to both coordinate splines.
    fn update_params(&mut self) {
        self.params.clear();
        if !self.knots.is_empty() {
            self.params.push(T::zero());
        }
        let mut dist = T::zero();
        for &d in &self.chords {
            dist = dist + d;
            self.params.push(dist / self.total);
        }
        // Pin the end so rounding in the running total cannot leave it short of one
        if !self.chords.is_empty() {
            if let Some(last) = self.params.last_mut() {
                *last = T::one();
            }
        }

        self.sx.assign_sorted(&self.params, self.knots.iter().map(|p| p.x));
        self.sy.assign_sorted(&self.params, self.knots.iter().map(|p| p.y));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{random_points, rng_fixed_seed};
    use approx::assert_relative_eq;

    fn from_points(points: &[Point<f64>]) -> PSpline3<f64> {
        let mut s = PSpline3::new();
        for p in points {
            s.add_knot(p.x, p.y).unwrap();
        }
        s
    }

    #[test]
    fn test_passes_through_knots() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 0.0),
        ];
        let mut s = from_points(&points);
        assert_eq!(s.chord_length(), 10.0);
        assert_eq!(s.params(), &[0.0, 0.5, 1.0]);

        for (p, t) in points.iter().zip([0.0, 0.5, 1.0]) {
            let q = s.point(t).unwrap();
            assert_relative_eq!(q.x, p.x, epsilon = 1e-12);
            assert_relative_eq!(q.y, p.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parameter_clamping() {
        let mut s = from_points(&[
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 0.0),
        ]);
        assert_eq!(s.point(-1.0).unwrap(), s.point(0.0).unwrap());
        assert_eq!(s.point(2.0).unwrap(), s.point(1.0).unwrap());

        // NaN passes through instead of snapping to an end
        assert!(s.x(f64::NAN).unwrap().is_nan());
        assert!(s.y(f64::NAN).unwrap().is_nan());
        assert_eq!(s.arc_length_at(f64::NAN), Err(CurveError::InvalidInterval));
    }

    #[test]
    fn test_local_move_matches_rebuild() {
        let mut rng = rng_fixed_seed();
        let mut points = random_points(&mut rng, 7, 10.0);
        let mut s = from_points(&points);

        for (i, dest) in [(0, (0.5, -2.0)), (3, (4.0, 4.0)), (6, (-1.0, 9.0))] {
            s.move_knot(i, dest.0, dest.1).unwrap();
            points[i] = Point::new(dest.0, dest.1);
            let mut rebuilt = from_points(&points);

            assert_relative_eq!(s.chord_length(), rebuilt.chord_length(), epsilon = 1e-12);
            for (a, b) in s.params().iter().zip(rebuilt.params()) {
                assert_relative_eq!(*a, *b, epsilon = 1e-12);
            }
            for t in crate::utils::linspace(0.0, 1.0, 11) {
                let (p, q) = (s.point(t).unwrap(), rebuilt.point(t).unwrap());
                assert_relative_eq!(p.x, q.x, epsilon = 1e-9);
                assert_relative_eq!(p.y, q.y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_arc_length_of_straight_line() {
        // Collinear, evenly spaced knots give a straight spline
        let mut s = from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ]);
        let len = s.arc_length().unwrap();
        assert_relative_eq!(len, 8.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(s.arc_length_at(0.25).unwrap(), 0.25 * len, epsilon = 1e-12);
        assert_eq!(s.arc_length_at(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_rejected_edits_leave_state() {
        let mut s = from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(s.add_knot(0.0, 0.0), Err(CurveError::DuplicateKnot));
        assert_eq!(s.move_knot(1, 0.0, 0.0), Err(CurveError::DuplicateKnot));
        // Removing the middle knot would leave two coincident knots
        assert_eq!(s.remove_knot_at(1), Err(CurveError::DuplicateKnot));
        assert_eq!(s.knot_count(), 3);
        assert_eq!(s.chord_length(), 2.0);

        assert_eq!(s.remove_knot_at(2), Ok(Point::new(0.0, 0.0)));
        assert_eq!(s.chord_length(), 1.0);
        assert_eq!(s.params(), &[0.0, 1.0]);

        s.reset();
        assert!(s.x(0.5).is_err());
        assert_eq!(
            s.arc_length(),
            Err(CurveError::InsufficientPoints {
                required: 1,
                found: 0
            })
        );
    }
}
