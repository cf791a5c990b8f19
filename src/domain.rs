//! Mapping reference nodes onto batches of sub-intervals.
//!
//! Interval batches are handled in a flattened layout: `[2, d, m]`, where
//! the leading axis holds the lower and upper endpoint, `d` is the
//! flattened domain shape (geometry of one endpoint) and `m` is the number
//! of pending intervals. Mapped evaluation points come out as `[d, m, n]`
//! with `n` reference nodes per interval.

use ndarray::{Array1, Array2, Array3};

/// Affinely map reference nodes from [-1, 1] into every interval.
///
/// `points[p, j, i] = lower[p, j] * (1 - x_i) / 2 + upper[p, j] * (1 + x_i) / 2`.
pub fn map_to_intervals(intervals: &Array3<f64>, nodes: &[f64]) -> Array3<f64> {
    let (_, d, m) = intervals.dim();
    Array3::from_shape_fn((d, m, nodes.len()), |(p, j, i)| {
        let x = nodes[i];
        0.5 * (intervals[(0, p, j)] * (1.0 - x) + intervals[(1, p, j)] * (1.0 + x))
    })
}

/// Length of every interval: Euclidean norm of `upper - lower` over the
/// domain axis.
pub fn interval_lengths(intervals: &Array3<f64>) -> Array1<f64> {
    let (_, d, m) = intervals.dim();
    Array1::from_shape_fn(m, |j| {
        let mut sum = 0.0;
        for p in 0..d {
            let diff = intervals[(1, p, j)] - intervals[(0, p, j)];
            sum += diff * diff;
        }
        sum.sqrt()
    })
}

/// Componentwise midpoint of every interval.
pub fn midpoints(intervals: &Array3<f64>) -> Array2<f64> {
    let (_, d, m) = intervals.dim();
    Array2::from_shape_fn((d, m), |(p, j)| {
        0.5 * (intervals[(0, p, j)] + intervals[(1, p, j)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_interval(a: f64, b: f64) -> Array3<f64> {
        Array3::from_shape_vec((2, 1, 1), vec![a, b]).unwrap()
    }

    #[test]
    fn test_map_endpoints() {
        let intervals = single_interval(3.0, 5.0);
        let points = map_to_intervals(&intervals, &[-1.0, 0.0, 1.0]);
        assert_eq!(points.dim(), (1, 1, 3));
        assert!((points[(0, 0, 0)] - 3.0).abs() < 1e-15);
        assert!((points[(0, 0, 1)] - 4.0).abs() < 1e-15);
        assert!((points[(0, 0, 2)] - 5.0).abs() < 1e-15);
    }

    #[test]
    fn test_map_batch() {
        // Two intervals [0, 1] and [2, 6], scalar domain.
        let intervals = Array3::from_shape_vec((2, 1, 2), vec![0.0, 2.0, 1.0, 6.0]).unwrap();
        let points = map_to_intervals(&intervals, &[0.0]);
        assert!((points[(0, 0, 0)] - 0.5).abs() < 1e-15);
        assert!((points[(0, 1, 0)] - 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_lengths_scalar_and_euclidean() {
        let intervals = single_interval(1.0, 4.0);
        let lengths = interval_lengths(&intervals);
        assert!((lengths[0] - 3.0).abs() < 1e-15);

        // One interval between the 2-D endpoints (0, 0) and (3, 4).
        let intervals = Array3::from_shape_vec((2, 2, 1), vec![0.0, 0.0, 3.0, 4.0]).unwrap();
        let lengths = interval_lengths(&intervals);
        assert!((lengths[0] - 5.0).abs() < 1e-15);
    }

    #[test]
    fn test_midpoints() {
        let intervals = single_interval(-1.0, 3.0);
        let mids = midpoints(&intervals);
        assert!((mids[(0, 0)] - 1.0).abs() < 1e-15);
    }
}
