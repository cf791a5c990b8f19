//! Per-interval error estimation from the embedded rule pair.
//!
//! One buffer of raw integrand values feeds both estimates: the Kronrod
//! sum reads every node, the Gauss sum gathers the interleaved subset
//! through the rule's index array. The error statistic follows the
//! QUADPACK-style heuristic: an absolute-deviation integral damped by the
//! scaled difference of the two estimates. It is a decision statistic for
//! the subdivision controller, not a certified bound.

use ndarray::{Array1, Array2, Array3};

use crate::rule::GaussKronrodRule;

/// Compute per-interval values and error estimates.
///
/// `fx` holds the raw integrand values, shaped `[r, m, n]` (flattened
/// range x pending intervals x nodes); `lengths` the interval lengths,
/// shaped `[m]`. Returns `(values, errors)`, each `[r, m]`, where `values`
/// is the Kronrod estimate and `errors` is nonnegative.
///
/// For every component c and interval j of length L:
///
/// ```text
/// V_K = L/2 * sum(w_K * f)            V_L = L/2 * sum(w_G * f[gauss])
/// avg = V_K / L                       I~  = L/2 * sum(w_K * |f - avg|)
/// err = I~ * min(1, (200 * |V_K - V_L| / I~)^1.5)
/// ```
///
/// with `err = I~` when `|I~|` is at machine-epsilon level (guards the
/// division), and clamped below by the rounding noise of the weighted
/// sums, `50 * eps * L/2 * sum(w_K * |f|)`, so that a bitwise agreement
/// of the two estimates on a locally linear integrand does not report a
/// certified zero. Zero-length intervals yield zero value and zero error.
pub fn gauss_kronrod_estimate(
    fx: &Array3<f64>,
    rule: &GaussKronrodRule,
    lengths: &Array1<f64>,
) -> (Array2<f64>, Array2<f64>) {
    let (r, m, _) = fx.dim();
    let mut values = Array2::zeros((r, m));
    let mut errors = Array2::zeros((r, m));

    for j in 0..m {
        let length = lengths[j];
        if length == 0.0 {
            continue;
        }
        let half = length / 2.0;

        for c in 0..r {
            let mut val_kronrod = 0.0;
            for (i, w) in rule.kronrod_weights.iter().enumerate() {
                val_kronrod += w * fx[(c, j, i)];
            }
            val_kronrod *= half;

            let mut val_gauss = 0.0;
            for (w, &idx) in rule.gauss_weights.iter().zip(&rule.gauss_indices) {
                val_gauss += w * fx[(c, j, idx)];
            }
            val_gauss *= half;

            let average = val_kronrod / length;
            let mut i_tilde = 0.0;
            let mut resabs = 0.0;
            for (i, w) in rule.kronrod_weights.iter().enumerate() {
                i_tilde += w * (fx[(c, j, i)] - average).abs();
                resabs += w * fx[(c, j, i)].abs();
            }
            i_tilde *= half;
            resabs *= half;

            values[(c, j)] = val_kronrod;
            errors[(c, j)] = kronrod_error(i_tilde, (val_kronrod - val_gauss).abs(), resabs);
        }
    }

    (values, errors)
}

/// Damped error statistic for one interval and component.
///
/// `i_tilde` is the absolute-deviation integral, `diff` the magnitude of
/// the Kronrod/Gauss difference and `resabs` the integral of `|f|` under
/// the Kronrod weights. The damping can hit exactly zero when the two
/// estimates agree bitwise (any locally linear integrand), so the result
/// is floored at the rounding noise of `resabs` whenever that magnitude
/// is safely above the underflow threshold.
pub(crate) fn kronrod_error(i_tilde: f64, diff: f64, resabs: f64) -> f64 {
    let mut error = if i_tilde.abs() <= f64::EPSILON {
        i_tilde
    } else {
        i_tilde * (200.0 * diff / i_tilde).powf(1.5).min(1.0)
    };
    if resabs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * resabs);
    }
    error
}
