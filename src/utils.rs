//! Convenience methods for sampling parameter ranges and measuring polylines.
use itertools::Itertools;
use num_traits::Float;

use crate::Point;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let dx: T = (stop - start) / T::from(n - 1).unwrap_or_else(T::nan);
            (0..n)
                .map(|i| start + T::from(i).unwrap_or_else(T::nan) * dx)
                .collect()
        }
    }
}

/// Straight-line distance between each consecutive pair of points,
/// one entry per segment of the polyline.
pub fn chord_lengths<T: Float>(points: &[Point<T>]) -> Vec<T> {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.distance(*b))
        .collect()
}

/// Chord-length parameterization of a polyline: the cumulative distance
/// to each point, normalized to [0, 1].
///
/// Returns `None` if the polyline has zero total length.
pub fn chord_params<T: Float>(points: &[Point<T>]) -> Option<Vec<T>> {
    let d = chord_lengths(points);
    let total = d.iter().fold(T::zero(), |acc, &x| acc + x);
    if total <= T::zero() || !total.is_finite() {
        return None;
    }

    let mut params = Vec::with_capacity(points.len());
    params.push(T::zero());
    let mut dist = T::zero();
    for x in d {
        dist = dist + x;
        params.push(dist / total);
    }

    Some(params)
}
