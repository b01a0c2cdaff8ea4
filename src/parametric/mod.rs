//! Parameterization of single-segment curves.
//!
//! Under [`Parameterization::Uniform`] the caller's `t` is the curve's native
//! polynomial parameter. Under [`Parameterization::ArcLength`] the caller's
//! value is read as a normalized arc length `s` in [0, 1] and mapped to the
//! native parameter through an [`ArcLengthTable`] before evaluation, so that
//! equal steps in `s` cover roughly equal distances along the curve.
use num_traits::Float;

use crate::numeric::gauss::{self, MAX_POINTS};
use crate::numeric::count;
use crate::spline::Spline3;
use crate::{CurveError, Point};

/// How a curve interprets the parameter passed to its evaluation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parameterization {
    /// Native polynomial parameter
    #[default]
    Uniform,
    /// Normalized arc length
    ArcLength,
}

/// Table mapping normalized arc length to the native curve parameter,
/// stored as a natural cubic spline through sampled `(s, t)` pairs.
#[derive(Debug, Clone, Default)]
pub struct ArcLengthTable<T> {
    spline: Spline3<T>,
    valid: bool,
}

impl<T: Float> ArcLengthTable<T> {
    /// Number of equal parameter intervals sampled
    pub const SAMPLES: usize = 10;

    pub fn new() -> Self {
        Self {
            spline: Spline3::new(),
            valid: false,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Rebuild the table from the curve's speed `|B'(t)|`.
    ///
    /// The cumulative length is sampled at t = 0.1, 0.2, ..., 1.0 and
    /// normalized by the total. A curve of zero length gets the identity
    /// mapping.
    ///
    /// # Errors
    /// * If the speed cannot be integrated over the unit interval
    pub fn build<F>(&mut self, mut speed: F) -> Result<(), CurveError>
    where
        F: FnMut(T) -> T,
    {
        let n = count::<T>(Self::SAMPLES);
        let mut cumulative = Vec::with_capacity(Self::SAMPLES);
        let mut total = T::zero();
        for i in 0..Self::SAMPLES {
            let lo = count::<T>(i) / n;
            let hi = count::<T>(i + 1) / n;
            total = total + gauss::integrate(&mut speed, lo, hi, MAX_POINTS)?;
            cumulative.push(total);
        }

        self.spline.clear();
        self.spline.add_knot(T::zero(), T::zero())?;
        if total > T::zero() && total.is_finite() {
            for (i, &len) in cumulative.iter().enumerate() {
                let t = count::<T>(i + 1) / n;
                // A stationary stretch of the curve repeats an arc length; keep the first
                match self.spline.add_knot(len / total, t) {
                    Ok(()) | Err(CurveError::DuplicateKnot) => {}
                    Err(e) => return Err(e),
                }
            }
        } else {
            self.spline.add_knot(T::one(), T::one())?;
        }

        log::debug!("rebuilt arc-length table, total length {:?}", total.to_f64());
        self.valid = true;

        Ok(())
    }

    /// Native parameter at normalized arc length `s`, clamped to [0, 1].
    ///
    /// Returns `s` unchanged if the table has not been built.
    pub fn native(&mut self, s: T) -> T {
        if !self.valid {
            return s;
        }
        match self.spline.eval(s) {
            Ok(t) => t.max(T::zero()).min(T::one()),
            Err(_) => s,
        }
    }

    /// Sampled `(s, t)` pairs of the table
    pub fn samples(&self) -> impl Iterator<Item = Point<T>> + '_ {
        self.spline.knots()
    }
}

/// A planar curve evaluated through a selectable [`Parameterization`].
///
/// Evaluation takes `&mut self` because coefficients and the arc-length table
/// are computed lazily on first use after a change.
pub trait Parametric<T: Float> {
    fn x(&mut self, t: T) -> Result<T, CurveError>;

    fn y(&mut self, t: T) -> Result<T, CurveError>;

    fn point(&mut self, t: T) -> Result<Point<T>, CurveError> {
        Ok(Point::new(self.x(t)?, self.y(t)?))
    }

    /// dx/dt at the native parameter `t`
    fn x_prime(&mut self, t: T) -> Result<T, CurveError>;

    /// dy/dt at the native parameter `t`
    fn y_prime(&mut self, t: T) -> Result<T, CurveError>;

    /// Length of the whole curve
    fn arc_length(&mut self) -> Result<T, CurveError>;

    /// Length of the curve from native parameter 0 to `t`
    fn arc_length_at(&mut self, t: T) -> Result<T, CurveError>;

    fn parameterization(&self) -> Parameterization;

    fn set_parameterization(&mut self, param: Parameterization);
}

/// Clamp a parameter into [0, 1].
#[inline]
pub(crate) fn clamp_unit<T: Float>(t: T) -> T {
    if t.is_nan() {
        return t;
    }
    t.max(T::zero()).min(T::one())
}
