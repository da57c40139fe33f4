//! # u-discrete
//!
//! Binomial and hypergeometric distributions with step-by-step derivations.
//!
//! Every probability and moment this crate returns carries the ordered list
//! of intermediate steps that produced it, so a teaching front end can show
//! the working next to the answer. The crate performs no I/O and holds no
//! global state.
//!
//! ## Modules
//!
//! - [`combinatorics`]: factorials and binomial coefficients as `f64`
//! - [`model`]: 5% rule, model selection, finite population correction
//! - [`binomial`]: binomial pmf, ranges, full distribution, moments
//! - [`hypergeometric`]: hypergeometric pmf, ranges, full distribution, moments
//! - [`classify`]: skewness and kurtosis labels
//! - [`analysis`]: one-call pipeline from raw inputs to a full report
//! - [`frequency`]: value counts for deriving `N` and `M` from a column
//! - [`sampling`]: seeded simulation from a computed distribution
//! - [`stats`]: compensated sums and streaming moments
//! - [`trace`], [`result`]: derivation steps and result types
//!
//! ## Quick start
//!
//! ```
//! use u_discrete::binomial::Binomial;
//!
//! let model = Binomial::new(10, 0.5).unwrap();
//! let result = model.pmf(5).unwrap();
//! assert!((result.probability - 0.24609375).abs() < 1e-12);
//! assert_eq!(result.derivation.len(), 4);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Traceable results**: each value ships with its derivation
//! - **Numerical stability**: Kahan summation for normalization checks,
//!   Welford updates for simulated moments
//! - **Property-based testing**: distribution invariants verified via proptest

pub mod analysis;
pub mod binomial;
pub mod classify;
pub mod combinatorics;
pub mod error;
pub mod frequency;
pub mod hypergeometric;
pub mod model;
pub mod result;
pub mod sampling;
pub mod stats;
pub mod trace;

pub use error::{DistributionError, Result};
