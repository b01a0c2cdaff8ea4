//! Root isolation by bisection and refinement by Crenshaw's TWBRF method.
//!
//! Both entry points share one failure contract: an interval that shows
//! no sign change yields [`CurveError::NoSignChange`].
use num_traits::Float;

use super::lit;
use crate::CurveError;

/// Width below which bisection stops looking for a sign change
pub const BISECT_LIMIT: f64 = 0.05;

/// Iteration and tolerance settings for [`find_root`].
#[derive(Debug, Clone, Copy)]
pub struct RootOptions<T> {
    /// Maximum number of refinement iterations
    pub max_iter: usize,
    /// Convergence tolerance on consecutive estimates
    pub tolerance: T,
}

impl<T: Float> Default for RootOptions<T> {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tolerance: lit(1e-6),
        }
    }
}

/// Outcome of root refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootEstimate<T> {
    pub root: T,
    pub iterations: usize,
    /// False if the iteration cap was reached before the tolerance was met
    pub converged: bool,
}

/// Narrow `[left, right]` to a sub-interval whose endpoints bracket a sign change.
///
/// Halves recursively until a sign change is found or the interval is no wider
/// than `limit`. When several sub-intervals bracket a root, the rightmost one
/// is returned.
///
/// # Errors
/// * If no sub-interval of width above `limit` shows a sign change
pub fn bisect<T, F>(mut f: F, left: T, right: T, limit: T) -> Result<(T, T), CurveError>
where
    T: Float,
    F: FnMut(T) -> T,
{
    bisect_inner(&mut f, left, right, limit).ok_or(CurveError::NoSignChange)
}

fn bisect_inner<T, F>(f: &mut F, left: T, right: T, limit: T) -> Option<(T, T)>
where
    T: Float,
    F: FnMut(T) -> T,
{
    if (right - left).abs() <= limit {
        return None;
    }

    if f(left) * f(right) <= T::zero() {
        return Some((left, right));
    }

    let middle = lit::<T>(0.5) * (left + right);
    bisect_inner(f, middle, right, limit).or_else(|| bisect_inner(f, left, middle, limit))
}

/// Refine a simple root of `f` isolated in `[x0, x2]`.
///
/// Combines bisection with inverse quadratic extrapolation. Terminates on an
/// exact zero, when consecutive estimates agree within the tolerance, or at
/// the iteration cap, in which case the best estimate is returned with
/// `converged` unset.
///
/// # Errors
/// * If `f(x0)` and `f(x2)` have the same sign
pub fn find_root<T, F>(
    mut f: F,
    x0: T,
    x2: T,
    opts: RootOptions<T>,
) -> Result<RootEstimate<T>, CurveError>
where
    T: Float,
    F: FnMut(T) -> T,
{
    let done = |root: T, iterations: usize| {
        Ok(RootEstimate {
            root,
            iterations,
            converged: true,
        })
    };
    let eps = opts.tolerance;
    let two = lit::<T>(2.0);
    let half = lit::<T>(0.5);

    let mut y0 = f(x0);
    if y0 == T::zero() {
        return done(x0, 0);
    }
    let mut y2 = f(x2);
    if y2 == T::zero() {
        return done(x2, 0);
    }
    if y2 * y0 > T::zero() {
        return Err(CurveError::NoSignChange);
    }

    let (mut x0, mut x2) = (x0, x2);
    let mut xmlast = x0;
    let mut x1 = x0;
    for i in 1..=opts.max_iter {
        x1 = half * (x2 + x0);
        let y1 = f(x1);
        if y1 == T::zero() || (x1 - x0).abs() < eps {
            return done(x1, i);
        }

        // Keep x0 on the opposite side of the root from x1
        if y1 * y0 > T::zero() {
            core::mem::swap(&mut x0, &mut x2);
            core::mem::swap(&mut y0, &mut y2);
        }

        let y10 = y1 - y0;
        let y21 = y2 - y1;
        let y20 = y2 - y0;
        if y2 * y20 < two * y1 * y10 {
            x2 = x1;
            y2 = y1;
        } else {
            let b = (x1 - x0) / y10;
            let c = (y10 - y21) / (y21 * y20);
            let xm = x0 - b * y0 * (T::one() - c * y1);
            let ym = f(xm);
            if ym == T::zero() || (xm - xmlast).abs() < eps {
                return done(xm, i);
            }

            xmlast = xm;
            if ym * y0 < T::zero() {
                x2 = xm;
                y2 = ym;
            } else {
                x0 = xm;
                y0 = ym;
                x2 = x1;
                y2 = y1;
            }
        }
    }

    log::warn!(
        "root refinement stopped at iteration cap {} before reaching tolerance",
        opts.max_iter
    );
    Ok(RootEstimate {
        root: x1,
        iterations: opts.max_iter,
        converged: false,
    })
}
