//! Error types for adaptive quadrature.

use std::fmt;

use ndarray::ArrayD;

/// Result type for quadrature operations.
pub type QuadResult<T> = Result<T, QuadError>;

/// The limit that stopped an adaptive run before the tolerances were met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    /// The pending worklist would have grown past this many subintervals.
    MaxSubintervals(usize),
    /// A bisection would have produced a subinterval shorter than this.
    MinIntervalLength(f64),
}

/// Errors that can occur during adaptive quadrature.
#[derive(Debug, Clone)]
pub enum QuadError {
    /// Invalid parameter value (missing tolerances, zero rule order, ...).
    InvalidParameter { parameter: String, message: String },

    /// Integrand output incompatible with the declared or inferred shapes.
    ShapeMismatch {
        expected: String,
        actual: Vec<usize>,
        context: String,
    },

    /// The adaptive loop hit a hard limit before reaching the tolerances.
    ///
    /// Carries the accepted value and error accumulated so far, shaped
    /// range-shape x interval-set-shape, so the caller can inspect how far
    /// the run got. The partial value is never returned as a success.
    ToleranceUnreachable {
        value: ArrayD<f64>,
        error: ArrayD<f64>,
        limit: Limit,
        eps_abs: Option<f64>,
        eps_rel: Option<f64>,
    },

    /// Numerical computation failed (e.g. rule construction breakdown).
    NumericalError { message: String },
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { parameter, message } => {
                write!(f, "Invalid parameter '{}': {}", parameter, message)
            }
            Self::ShapeMismatch {
                expected,
                actual,
                context,
            } => {
                write!(
                    f,
                    "{}: shape mismatch, expected {} but got {:?}",
                    context, expected, actual
                )
            }
            Self::ToleranceUnreachable {
                limit,
                eps_abs,
                eps_rel,
                ..
            } => {
                match limit {
                    Limit::MaxSubintervals(n) => {
                        write!(f, "tolerances not reachable within {} subintervals", n)?;
                    }
                    Limit::MinIntervalLength(l) => {
                        write!(
                            f,
                            "tolerances not reachable above minimum interval length {:.2e}",
                            l
                        )?;
                    }
                }
                if let Some(eps) = eps_abs {
                    write!(f, " (eps_abs = {:.2e})", eps)?;
                }
                if let Some(eps) = eps_rel {
                    write!(f, " (eps_rel = {:.2e})", eps)?;
                }
                Ok(())
            }
            Self::NumericalError { message } => {
                write!(f, "Numerical error: {}", message)
            }
        }
    }
}

impl std::error::Error for QuadError {}
