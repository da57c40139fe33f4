//! Model selection.
//!
//! Sampling without replacement from a population of size `N` behaves
//! approximately like independent trials when the sample is small relative
//! to the population. The textbook rule of thumb treats the population as
//! infinite when `n/N ≤ 0.05`.
//!
//! | Population `N` | `n/N` | Successes `M` | Model |
//! |---|---|---|---|
//! | absent | any | any | [`Model::InfiniteBinomial`] |
//! | present | ≤ 0.05 | any | [`Model::InfiniteBinomial`] |
//! | present | > 0.05 | present | [`Model::Hypergeometric`] |
//! | present | > 0.05 | absent | [`Model::FiniteBinomial`] |

use serde::{Deserialize, Serialize};

use crate::error::{DistributionError, Result};
use crate::trace::Derivation;

/// Largest sample fraction `n/N` for which the population is treated as
/// infinite (inclusive).
pub const INFINITE_POPULATION_THRESHOLD: f64 = 0.05;

/// Which engine and moment formulas apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    /// Independent trials, no correction.
    InfiniteBinomial,
    /// Binomial pmf with the finite-population correction on the variance.
    FiniteBinomial,
    /// Exact sampling without replacement.
    Hypergeometric,
}

impl Model {
    pub fn is_binomial(self) -> bool {
        !matches!(self, Self::Hypergeometric)
    }
}

/// Whether a sample of `sample` items may be treated as independent trials.
///
/// `true` if `population` is absent, else `sample / population ≤ 0.05`.
///
/// # Examples
/// ```
/// use u_discrete::model::is_infinite_population;
/// assert!(is_infinite_population(10, None));
/// assert!(is_infinite_population(5, Some(100)));   // exactly 5 %
/// assert!(!is_infinite_population(6, Some(100)));
/// ```
pub fn is_infinite_population(sample: u32, population: Option<u32>) -> bool {
    match population {
        None => true,
        Some(population) => f64::from(sample) / f64::from(population) <= INFINITE_POPULATION_THRESHOLD,
    }
}

/// Picks the model for a sample of `sample` items.
///
/// # Examples
/// ```
/// use u_discrete::model::{select_model, Model};
/// assert_eq!(select_model(10, None, None), Model::InfiniteBinomial);
/// assert_eq!(select_model(10, Some(50), Some(20)), Model::Hypergeometric);
/// assert_eq!(select_model(10, Some(50), None), Model::FiniteBinomial);
/// assert_eq!(select_model(10, Some(1000), Some(20)), Model::InfiniteBinomial);
/// ```
pub fn select_model(sample: u32, population: Option<u32>, successes: Option<u32>) -> Model {
    let model = if is_infinite_population(sample, population) {
        Model::InfiniteBinomial
    } else if successes.is_some() {
        Model::Hypergeometric
    } else {
        Model::FiniteBinomial
    };
    log::debug!(
        "model selection: n={sample}, N={population:?}, M={successes:?} -> {model:?}"
    );
    model
}

/// Finite-population correction factor `(N − n)/(N − 1)`.
///
/// # Errors
/// Returns [`DistributionError::Domain`] if `N ≤ n` (factor non-positive) or
/// `N ≤ 1` (zero denominator).
///
/// # Examples
/// ```
/// use u_discrete::model::correction_factor;
/// let f = correction_factor(10, 50).unwrap();
/// assert!((f - 40.0 / 49.0).abs() < 1e-15);
/// assert!(correction_factor(10, 10).is_err());
/// ```
pub fn correction_factor(sample: u32, population: u32) -> Result<f64> {
    if population <= 1 {
        return Err(DistributionError::domain(format!(
            "correction factor (N-n)/(N-1) needs N > 1, got N={population}"
        )));
    }
    if population <= sample {
        return Err(DistributionError::domain(format!(
            "correction factor (N-n)/(N-1) needs N > n, got N={population}, n={sample}"
        )));
    }
    Ok(f64::from(population - sample) / f64::from(population - 1))
}

/// [`correction_factor`] as a one-step derivation.
pub(crate) fn correction_factor_derivation(sample: u32, population: u32) -> Result<(f64, Derivation)> {
    let factor = correction_factor(sample, population)?;
    let derivation = Derivation::builder()
        .step(
            "Correction factor",
            "(N - n) / (N - 1)",
            factor,
            format!("({population} - {sample}) / ({population} - 1) = {factor}"),
        )
        .build();
    Ok((factor, derivation))
}
