//! Adaptive subdivision controller.
//!
//! Drives the embedded Gauss-Kronrod rule pair over a worklist of pending
//! intervals: evaluate every pending interval, accept the ones whose local
//! error fits into their share of the remaining tolerance budget, bisect
//! the rest, repeat. Acceptance is at-most-once and irrevocable; each
//! round produces a fresh worklist and the accumulated value and error
//! only ever grow.
//!
//! Interval batches stay vectorized across a round: the integrand is
//! called once per round with every pending interval's mapped nodes, and
//! the per-problem accumulators are updated by a plain sum, so a round
//! boundary is the only synchronization point.

use log::debug;
use ndarray::{Array2, Array3, ArrayD, IxDyn};

use crate::domain::{interval_lengths, map_to_intervals, midpoints};
use crate::error::{Limit, QuadError, QuadResult};
use crate::estimate::gauss_kronrod_estimate;
use crate::rule::GaussKronrodRule;
use crate::shape::{infer_shapes, ProblemShapes};

/// How the absolute and relative criteria are combined when both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CriteriaCombinator {
    /// Every active criterion must hold (default).
    #[default]
    All,
    /// At least one active criterion must hold.
    Any,
}

/// Options for adaptive quadrature.
#[derive(Debug, Clone)]
pub struct AdaptiveOptions {
    /// Absolute tolerance (default: `Some(1e-10)`). At least one of
    /// `eps_abs` / `eps_rel` must be present.
    pub eps_abs: Option<f64>,
    /// Relative tolerance (default: `Some(1e-10)`), checked against the
    /// tentative total: accepted value plus the current round's candidates.
    pub eps_rel: Option<f64>,
    /// How active criteria combine (default: all must hold).
    pub combinator: CriteriaCombinator,
    /// Gauss order k of the embedded pair; the Kronrod rule has 2k+1
    /// nodes (default: 7).
    pub rule_order: usize,
    /// Bisection stops once a child would be shorter than this
    /// (default: 0.0, never).
    pub min_interval_length: f64,
    /// Hard cap on the pending worklist size (default: 1024).
    pub max_subintervals: usize,
    /// Explicit domain shape; inferred from the shapes when absent.
    pub domain_shape: Option<Vec<usize>>,
    /// Explicit range shape; inferred from the shapes when absent.
    pub range_shape: Option<Vec<usize>>,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            eps_abs: Some(1e-10),
            eps_rel: Some(1e-10),
            combinator: CriteriaCombinator::All,
            rule_order: 7,
            min_interval_length: 0.0,
            max_subintervals: 1024,
            domain_shape: None,
            range_shape: None,
        }
    }
}

/// Result of an adaptive integration.
#[derive(Debug, Clone)]
pub struct AdaptiveResult {
    /// Integral values, shaped range-shape x interval-set-shape.
    pub value: ArrayD<f64>,
    /// Accumulated heuristic error estimates, same shape as `value`.
    pub error: ArrayD<f64>,
    /// Number of integrand point evaluations.
    pub neval: usize,
    /// Number of bisections performed.
    pub subdivisions: usize,
}

/// Result of a scalar [`quad`] call.
#[derive(Debug, Clone)]
pub struct ScalarQuadResult {
    /// Computed integral value.
    pub value: f64,
    /// Heuristic absolute error estimate.
    pub error: f64,
    /// Number of integrand point evaluations.
    pub neval: usize,
    /// Number of bisections performed.
    pub subdivisions: usize,
}

/// Pending intervals, flattened to `[2, d, m]`, each tagged with the
/// original batched problem it descends from.
struct Worklist {
    intervals: Array3<f64>,
    origins: Vec<usize>,
}

impl Worklist {
    fn len(&self) -> usize {
        self.origins.len()
    }

    fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Integrate a (possibly vector-valued) function over a batch of
/// intervals, adaptively refining until every interval's local error fits
/// its share of the tolerance budget.
///
/// `intervals` is shaped `[2] ++ domain-shape ++ set-shape` with finite
/// bounds; `f` maps evaluation points shaped
/// `domain-shape ++ batch ++ [nodes]` to values shaped
/// `range-shape ++ batch ++ [nodes]`, where the batch part changes across
/// rounds. `f` must be pure: it is re-invoked once per round.
///
/// # Example
///
/// ```
/// use ndarray::{ArrayD, IxDyn};
///
/// // Batch of three intervals [0,1], [1,2], [2,3].
/// let intervals = ArrayD::from_shape_vec(
///     IxDyn(&[2, 3]),
///     vec![0.0, 1.0, 2.0, 1.0, 2.0, 3.0],
/// )
/// .unwrap();
/// let result = adaquad::integrate_adaptive(
///     |x: &ArrayD<f64>| x.mapv(f64::sin),
///     &intervals,
///     &Default::default(),
/// )
/// .unwrap();
/// let exact = 1.0_f64.cos() - 2.0_f64.cos();
/// assert!((result.value[[1]] - exact).abs() < 1e-9);
/// ```
pub fn integrate_adaptive<F>(
    f: F,
    intervals: &ArrayD<f64>,
    options: &AdaptiveOptions,
) -> QuadResult<AdaptiveResult>
where
    F: Fn(&ArrayD<f64>) -> ArrayD<f64>,
{
    validate_options(options)?;
    let rule = GaussKronrodRule::new(options.rule_order)?;
    let n = rule.num_nodes();

    let interval_shape = intervals.shape().to_vec();
    if interval_shape.first() != Some(&2) {
        return Err(QuadError::ShapeMismatch {
            expected: "[2, ...]".to_string(),
            actual: interval_shape,
            context: "interval array".to_string(),
        });
    }
    if intervals.iter().any(|v| !v.is_finite()) {
        return Err(QuadError::InvalidParameter {
            parameter: "intervals".to_string(),
            message: "all bounds must be finite".to_string(),
        });
    }

    // Trial evaluation on the caller's own layout; the observed output
    // shape drives the shape inference.
    let trailing = &interval_shape[1..];
    let flat: usize = trailing.iter().product();
    let trial_intervals = reshape3(intervals.iter().copied().collect(), (2, 1, flat))?;
    let trial_points3 = map_to_intervals(&trial_intervals, &rule.nodes);
    let mut trial_shape = trailing.to_vec();
    trial_shape.push(n);
    let trial_points = reshape_dyn(trial_points3.iter().copied().collect(), &trial_shape)?;
    let fx = f(&trial_points);
    let mut neval = trial_points.len();

    let shapes = infer_shapes(
        &interval_shape,
        fx.shape(),
        n,
        options.domain_shape.as_deref(),
        options.range_shape.as_deref(),
    )?;
    let d: usize = shapes.domain.iter().product();
    let m0: usize = shapes.set.iter().product();
    let r: usize = shapes.range.iter().product();

    let mut work = Worklist {
        intervals: reshape3(intervals.iter().copied().collect(), (2, d, m0))?,
        origins: (0..m0).collect(),
    };
    let total_lengths = interval_lengths(&work.intervals).to_vec();

    let mut pending_fx = Some(reshape3(fx.iter().copied().collect(), (r, m0, n))?);
    let mut acc_value = Array2::<f64>::zeros((r, m0));
    let mut acc_error = Array2::<f64>::zeros((r, m0));
    let mut acc_length = vec![0.0; m0];
    let mut subdivisions = 0usize;
    let mut round = 0usize;

    while !work.is_empty() {
        round += 1;
        let m = work.len();
        let lengths = interval_lengths(&work.intervals);

        let fx3 = match pending_fx.take() {
            Some(first_round) => first_round,
            None => {
                let points3 = map_to_intervals(&work.intervals, &rule.nodes);
                let mut points_shape = shapes.domain.clone();
                points_shape.push(m);
                points_shape.push(n);
                let points = reshape_dyn(points3.iter().copied().collect(), &points_shape)?;
                let out = f(&points);
                neval += points.len();

                let mut expected = shapes.range.clone();
                expected.push(m);
                expected.push(n);
                if out.shape() != expected.as_slice() {
                    return Err(QuadError::ShapeMismatch {
                        expected: format!("{:?}", expected),
                        actual: out.shape().to_vec(),
                        context: "integrand output".to_string(),
                    });
                }
                reshape3(out.iter().copied().collect(), (r, m, n))?
            }
        };

        let (values, errors) = gauss_kronrod_estimate(&fx3, &rule, &lengths);

        // Per-problem pending length and tentative totals; the relative
        // criterion cannot use the final total, which is not known yet.
        let mut pending_length = vec![0.0; m0];
        for (j, &o) in work.origins.iter().enumerate() {
            pending_length[o] += lengths[j];
        }
        let mut tentative = acc_value.clone();
        for (j, &o) in work.origins.iter().enumerate() {
            for c in 0..r {
                tentative[(c, o)] += values[(c, j)];
            }
        }

        // Classify: an interval is accepted when its local error fits its
        // length-proportional share of the remaining allowance, for the
        // combination of active criteria, in every range component.
        let mut rejected = Vec::new();
        for j in 0..m {
            let o = work.origins[j];
            let tau = if pending_length[o] > 0.0 {
                lengths[j] / pending_length[o]
            } else {
                1.0
            };
            let abs_ok = options.eps_abs.map(|eps| {
                (0..r).all(|c| errors[(c, j)] <= tau * (eps - acc_error[(c, o)]).max(0.0))
            });
            let rel_ok = options.eps_rel.map(|eps| {
                (0..r).all(|c| {
                    let budget = eps * tentative[(c, o)].abs() - acc_error[(c, o)];
                    errors[(c, j)] <= tau * budget.max(0.0)
                })
            });
            let accept = match options.combinator {
                CriteriaCombinator::All => abs_ok.unwrap_or(true) && rel_ok.unwrap_or(true),
                CriteriaCombinator::Any => abs_ok.unwrap_or(false) || rel_ok.unwrap_or(false),
            };
            if accept {
                for c in 0..r {
                    acc_value[(c, o)] += values[(c, j)];
                    acc_error[(c, o)] += errors[(c, j)];
                }
                acc_length[o] += lengths[j];
            } else {
                rejected.push(j);
            }
        }

        debug!(
            "round {}: {} pending, {} accepted, {} to split",
            round,
            m,
            m - rejected.len(),
            rejected.len()
        );

        if rejected.is_empty() {
            break;
        }

        let new_m = 2 * rejected.len();
        if new_m > options.max_subintervals {
            return Err(unreachable_error(
                Limit::MaxSubintervals(options.max_subintervals),
                &acc_value,
                &acc_error,
                &shapes,
                options,
            ));
        }
        for &j in &rejected {
            if lengths[j] / 2.0 < options.min_interval_length {
                return Err(unreachable_error(
                    Limit::MinIntervalLength(options.min_interval_length),
                    &acc_value,
                    &acc_error,
                    &shapes,
                    options,
                ));
            }
        }

        let mids = midpoints(&work.intervals);
        let mut children = Array3::zeros((2, d, new_m));
        let mut child_origins = Vec::with_capacity(new_m);
        for (idx, &j) in rejected.iter().enumerate() {
            for p in 0..d {
                children[(0, p, 2 * idx)] = work.intervals[(0, p, j)];
                children[(1, p, 2 * idx)] = mids[(p, j)];
                children[(0, p, 2 * idx + 1)] = mids[(p, j)];
                children[(1, p, 2 * idx + 1)] = work.intervals[(1, p, j)];
            }
            child_origins.push(work.origins[j]);
            child_origins.push(work.origins[j]);
        }
        subdivisions += rejected.len();
        work = Worklist {
            intervals: children,
            origins: child_origins,
        };

        check_measure_conservation(&work, &acc_length, &total_lengths);
    }

    let value = reshape_dyn(acc_value.iter().copied().collect(), &result_shape(&shapes))?;
    let error = reshape_dyn(acc_error.iter().copied().collect(), &result_shape(&shapes))?;
    Ok(AdaptiveResult {
        value,
        error,
        neval,
        subdivisions,
    })
}

/// Adaptive quadrature of a scalar function over [a, b].
///
/// Convenience front end for [`integrate_adaptive`] on a single
/// non-batched scalar problem.
///
/// # Example
///
/// ```
/// // Integrate sin(x) from 0 to pi.
/// let result = adaquad::quad(|x| x.sin(), 0.0, std::f64::consts::PI, &Default::default()).unwrap();
/// assert!((result.value - 2.0).abs() < 1e-9);
/// assert!(result.error < 1e-9);
/// ```
pub fn quad<F>(f: F, a: f64, b: f64, options: &AdaptiveOptions) -> QuadResult<ScalarQuadResult>
where
    F: Fn(f64) -> f64,
{
    let intervals = reshape_dyn(vec![a, b], &[2])?;
    let result = integrate_adaptive(|x: &ArrayD<f64>| x.mapv(|v| f(v)), &intervals, options)?;
    Ok(ScalarQuadResult {
        value: result.value.iter().copied().next().unwrap_or(0.0),
        error: result.error.iter().copied().next().unwrap_or(0.0),
        neval: result.neval,
        subdivisions: result.subdivisions,
    })
}

fn validate_options(options: &AdaptiveOptions) -> QuadResult<()> {
    if options.eps_abs.is_none() && options.eps_rel.is_none() {
        return Err(QuadError::InvalidParameter {
            parameter: "eps_abs/eps_rel".to_string(),
            message: "at least one tolerance must be given".to_string(),
        });
    }
    for (name, eps) in [("eps_abs", options.eps_abs), ("eps_rel", options.eps_rel)] {
        if let Some(eps) = eps {
            if eps <= 0.0 || !eps.is_finite() {
                return Err(QuadError::InvalidParameter {
                    parameter: name.to_string(),
                    message: "must be positive and finite".to_string(),
                });
            }
        }
    }
    if options.min_interval_length < 0.0 || !options.min_interval_length.is_finite() {
        return Err(QuadError::InvalidParameter {
            parameter: "min_interval_length".to_string(),
            message: "must be nonnegative and finite".to_string(),
        });
    }
    if options.max_subintervals == 0 {
        return Err(QuadError::InvalidParameter {
            parameter: "max_subintervals".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn result_shape(shapes: &ProblemShapes) -> Vec<usize> {
    let mut shape = shapes.range.clone();
    shape.extend_from_slice(&shapes.set);
    shape
}

fn unreachable_error(
    limit: Limit,
    acc_value: &Array2<f64>,
    acc_error: &Array2<f64>,
    shapes: &ProblemShapes,
    options: &AdaptiveOptions,
) -> QuadError {
    let shape = result_shape(shapes);
    let value = ArrayD::from_shape_vec(IxDyn(&shape), acc_value.iter().copied().collect())
        .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&shape)));
    let error = ArrayD::from_shape_vec(IxDyn(&shape), acc_error.iter().copied().collect())
        .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&shape)));
    QuadError::ToleranceUnreachable {
        value,
        error,
        limit,
        eps_abs: options.eps_abs,
        eps_rel: options.eps_rel,
    }
}

fn reshape3(data: Vec<f64>, dim: (usize, usize, usize)) -> QuadResult<Array3<f64>> {
    Array3::from_shape_vec(dim, data).map_err(|e| QuadError::NumericalError {
        message: e.to_string(),
    })
}

fn reshape_dyn(data: Vec<f64>, shape: &[usize]) -> QuadResult<ArrayD<f64>> {
    ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|e| QuadError::NumericalError {
        message: e.to_string(),
    })
}

fn check_measure_conservation(work: &Worklist, acc_length: &[f64], total_lengths: &[f64]) {
    let child_lengths = interval_lengths(&work.intervals);
    let mut pending = vec![0.0; total_lengths.len()];
    for (j, &o) in work.origins.iter().enumerate() {
        pending[o] += child_lengths[j];
    }
    for (o, total) in total_lengths.iter().enumerate() {
        let sum = acc_length[o] + pending[o];
        debug_assert!(
            (sum - total).abs() <= 1e-9 * total.max(1.0),
            "measure not conserved for problem {}: {} vs {}",
            o,
            sum,
            total
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Axis;
    use std::f64::consts::{LN_2, PI};

    fn abs_only(eps: f64) -> AdaptiveOptions {
        AdaptiveOptions {
            eps_abs: Some(eps),
            eps_rel: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_sin_over_pi() {
        // Scenario: integral of sin over [0, pi] is 2.
        let result = quad(|x| x.sin(), 0.0, PI, &abs_only(1e-10)).unwrap();
        assert!(
            (result.value - 2.0).abs() < 1e-10,
            "value = {}",
            result.value
        );
        assert!(result.error < 1e-10);
        assert!(result.neval >= 15);
    }

    #[test]
    fn test_reciprocal_gives_ln2() {
        let result = quad(|x| 1.0 / x, 1.0, 2.0, &abs_only(1e-12)).unwrap();
        assert!(
            (result.value - LN_2).abs() < 1e-11,
            "value = {}",
            result.value
        );
        assert!(result.error <= 1e-12);
    }

    #[test]
    fn test_polynomial_converges_in_first_round() {
        // The embedded pair handles degree 15 without any subdivision.
        let result = quad(|x| x.powi(15), 0.0, 1.0, &abs_only(1e-4)).unwrap();
        assert_eq!(result.subdivisions, 0);
        assert!((result.value - 1.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_singular_derivative_subdivides() {
        let result = quad(|x| x.sqrt(), 0.0, 1.0, &abs_only(1e-10)).unwrap();
        assert!(
            (result.value - 2.0 / 3.0).abs() < 1e-9,
            "value = {}",
            result.value
        );
        assert!(result.subdivisions > 0);
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let options = abs_only(1e-10);
        let intervals = ArrayD::from_shape_vec(
            IxDyn(&[2, 3]),
            vec![0.0, 1.0, 2.0, 1.0, 2.0, 3.0],
        )
        .unwrap();
        let batch =
            integrate_adaptive(|x: &ArrayD<f64>| x.mapv(f64::sin), &intervals, &options).unwrap();
        assert_eq!(batch.value.shape(), &[3]);

        for (i, (a, b)) in [(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)].iter().enumerate() {
            let single = quad(|x| x.sin(), *a, *b, &options).unwrap();
            assert!(
                (batch.value[[i]] - single.value).abs() < 1e-14,
                "interval {}: {} vs {}",
                i,
                batch.value[[i]],
                single.value
            );
            assert!((batch.error[[i]] - single.error).abs() < 1e-14);
            let exact = a.cos() - b.cos();
            assert!((batch.value[[i]] - exact).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vector_valued_integrand() {
        let options = abs_only(1e-10);
        let intervals =
            ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![0.0, 1.0, 1.0, 2.0]).unwrap();
        let f = |x: &ArrayD<f64>| {
            let sin = x.mapv(f64::sin);
            let cos = x.mapv(f64::cos);
            ndarray::stack(Axis(0), &[sin.view(), cos.view()]).unwrap()
        };
        let result = integrate_adaptive(f, &intervals, &options).unwrap();
        assert_eq!(result.value.shape(), &[2, 2]);

        for (i, (a, b)) in [(0.0_f64, 1.0_f64), (1.0, 2.0)].iter().enumerate() {
            assert!((result.value[[0, i]] - (a.cos() - b.cos())).abs() < 1e-9);
            assert!((result.value[[1, i]] - (b.sin() - a.sin())).abs() < 1e-9);
        }
    }

    #[test]
    fn test_kinked_integrand_hits_subinterval_limit() {
        // The kink sits off every bisection point, so the containing
        // interval keeps a genuine local error and the worklist grows
        // past the cap.
        let options = AdaptiveOptions {
            eps_abs: Some(1e-300),
            eps_rel: None,
            max_subintervals: 10,
            ..Default::default()
        };
        let err = quad(|x| (x - 0.4).abs(), 0.0, 1.0, &options).unwrap_err();
        match err {
            QuadError::ToleranceUnreachable { limit, value, .. } => {
                assert_eq!(limit, Limit::MaxSubintervals(10));
                // The partial accumulator travels with the error.
                assert_eq!(value.ndim(), 0);
            }
            other => panic!("expected ToleranceUnreachable, got {:?}", other),
        }
    }

    #[test]
    fn test_kink_on_bisection_point_hits_subinterval_limit() {
        // Bisection lands exactly on the kink, leaving only linear pieces
        // on which the two embedded estimates agree bitwise. The rounding
        // floor keeps every local error nonzero, so an impossible
        // tolerance must still trip the cap instead of converging.
        let options = AdaptiveOptions {
            eps_abs: Some(1e-300),
            eps_rel: None,
            max_subintervals: 10,
            ..Default::default()
        };
        let err = quad(|x| (x - 0.5).abs(), 0.0, 1.0, &options).unwrap_err();
        match err {
            QuadError::ToleranceUnreachable { limit, .. } => {
                assert_eq!(limit, Limit::MaxSubintervals(10));
            }
            other => panic!("expected ToleranceUnreachable, got {:?}", other),
        }
    }

    #[test]
    fn test_min_interval_length_limit() {
        let options = AdaptiveOptions {
            eps_abs: Some(1e-300),
            eps_rel: None,
            min_interval_length: 0.3,
            ..Default::default()
        };
        let err = quad(|x| (x - 0.4).abs(), 0.0, 1.0, &options).unwrap_err();
        match err {
            QuadError::ToleranceUnreachable { limit, .. } => {
                assert_eq!(limit, Limit::MinIntervalLength(0.3));
            }
            other => panic!("expected ToleranceUnreachable, got {:?}", other),
        }
    }

    #[test]
    fn test_relative_only_tolerance() {
        let options = AdaptiveOptions {
            eps_abs: None,
            eps_rel: Some(1e-10),
            ..Default::default()
        };
        let result = quad(|x| x.sin(), 0.0, PI, &options).unwrap();
        assert!((result.value - 2.0).abs() < 1e-9);
        // A disabled absolute criterion must not relax the relative one.
        assert!(result.error <= 1e-10 * result.value.abs());
    }

    #[test]
    fn test_absolute_only_tolerance_is_not_relaxed() {
        let result = quad(|x| x.exp(), 0.0, 1.0, &abs_only(1e-12)).unwrap();
        assert!(result.error <= 1e-12);
        assert!((result.value - (std::f64::consts::E - 1.0)).abs() < 1e-11);
    }

    #[test]
    fn test_any_combinator_accepts_on_either_criterion() {
        // eps_abs alone is hopeless here; the relative criterion carries.
        let options = AdaptiveOptions {
            eps_abs: Some(1e-300),
            eps_rel: Some(1e-8),
            combinator: CriteriaCombinator::Any,
            max_subintervals: 100_000,
            ..Default::default()
        };
        let result = quad(|x| x.sin(), 0.0, PI, &options).unwrap();
        assert!((result.value - 2.0).abs() < 1e-7);
    }

    #[test]
    fn test_missing_tolerances_is_configuration_error() {
        let options = AdaptiveOptions {
            eps_abs: None,
            eps_rel: None,
            ..Default::default()
        };
        let err = quad(|x| x, 0.0, 1.0, &options).unwrap_err();
        assert!(matches!(err, QuadError::InvalidParameter { .. }));
    }

    #[test]
    fn test_invalid_rule_order() {
        let options = AdaptiveOptions {
            rule_order: 0,
            ..Default::default()
        };
        let err = quad(|x| x, 0.0, 1.0, &options).unwrap_err();
        assert!(matches!(err, QuadError::InvalidParameter { .. }));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let err = quad(|x| x.exp(), 0.0, f64::INFINITY, &abs_only(1e-8)).unwrap_err();
        assert!(matches!(err, QuadError::InvalidParameter { .. }));
    }

    #[test]
    fn test_shape_mismatch_on_bad_output() {
        // Output drops the node axis entirely.
        let intervals = ArrayD::from_shape_vec(IxDyn(&[2]), vec![0.0, 1.0]).unwrap();
        let err = integrate_adaptive(
            |_: &ArrayD<f64>| ArrayD::zeros(IxDyn(&[3])),
            &intervals,
            &abs_only(1e-8),
        )
        .unwrap_err();
        assert!(matches!(err, QuadError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_higher_rule_order() {
        let options = AdaptiveOptions {
            rule_order: 10,
            eps_abs: Some(1e-12),
            eps_rel: None,
            ..Default::default()
        };
        let result = quad(|x| x.sin(), 0.0, PI, &options).unwrap();
        assert!((result.value - 2.0).abs() < 1e-11);
    }

    #[test]
    fn test_oscillatory_integrand() {
        let result = quad(|x| (10.0 * x).sin(), 0.0, PI, &abs_only(1e-10)).unwrap();
        // Exact: (1 - cos(10 pi)) / 10 = 0.
        assert!(result.value.abs() < 1e-9, "value = {}", result.value);
    }
}
