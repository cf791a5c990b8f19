//! Adaptive Gauss-Kronrod quadrature over batched interval sets.
//!
//! Computes definite integrals of user-supplied functions to a requested
//! tolerance, automatically bisecting the intervals where the integrand is
//! hard to approximate. Integrands may be vector-valued and many
//! independent interval problems can be batched into a single vectorized
//! call.
//!
//! # Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`rule`] | Embedded Gauss-Legendre / Gauss-Kronrod rule pairs |
//! | [`domain`] | Affine mapping of reference nodes onto interval batches |
//! | [`shape`] | Domain / range / interval-set shape partitioning |
//! | [`estimate`] | Per-interval value and error estimation |
//! | [`adaptive`] | The subdivision controller and public entry points |
//!
//! # Choosing an entry point
//!
//! - **Scalar integral over [a, b]**: use [`quad`]
//! - **Batched or vector-valued problems**: use [`integrate_adaptive`]
//! - **Fixed-order, no adaptivity**: use [`GaussKronrodRule::integrate`]
//!
//! All bounds must be finite; map semi-infinite or infinite ranges onto a
//! finite interval before integrating.
//!
//! # Example
//!
//! ```
//! use adaquad::{quad, AdaptiveOptions};
//!
//! let options = AdaptiveOptions {
//!     eps_abs: Some(1e-10),
//!     eps_rel: None,
//!     ..Default::default()
//! };
//! let result = quad(|x| 1.0 / x, 1.0, 2.0, &options).unwrap();
//! assert!((result.value - std::f64::consts::LN_2).abs() < 1e-10);
//! ```

pub mod adaptive;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod rule;
pub mod shape;

pub use adaptive::{
    integrate_adaptive, quad, AdaptiveOptions, AdaptiveResult, CriteriaCombinator,
    ScalarQuadResult,
};
pub use error::{Limit, QuadError, QuadResult};
pub use estimate::gauss_kronrod_estimate;
pub use rule::GaussKronrodRule;
pub use shape::{infer_shapes, ProblemShapes};
