//! One-shot analysis pipeline.
//!
//! Takes the raw inputs a calculator form collects, selects the model and
//! computes everything a results page shows: the full distribution, the
//! point (and optional range) probability, and the moment set.
//!
//! # Examples
//!
//! ```
//! use u_discrete::analysis::{analyze, Analysis, AnalysisRequest};
//!
//! let request = AnalysisRequest::binomial(10, 0.5, 5).with_range_to(6);
//! let Analysis::Binomial(report) = analyze(&request).unwrap() else {
//!     panic!("expected a binomial analysis");
//! };
//! assert!((report.point.probability - 0.246094).abs() < 1e-6);
//! assert!((report.range.unwrap().probability() - 0.451172).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::binomial::Binomial;
use crate::error::{DistributionError, Result};
use crate::hypergeometric::Hypergeometric;
use crate::model::{correction_factor_derivation, select_model, Model};
use crate::result::{
    DistributionParameters, DistributionResult, FullDistribution, MomentResult, RangeProbability,
};

/// Inputs of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Sample size / number of trials `n`.
    pub sample: u32,
    /// Per-trial success probability. Estimated as `M/N` when absent.
    pub p: Option<f64>,
    /// Population size `N`.
    pub population: Option<u32>,
    /// Successes in the population `M`.
    pub successes: Option<u32>,
    /// Outcome queried, and lower bound of the range.
    pub k: u32,
    /// Upper bound of the range query, if any. A bound below `k` skips the
    /// range query; the point result is still computed.
    pub k2: Option<u32>,
}

impl AnalysisRequest {
    /// Binomial request over an infinite population.
    pub fn binomial(sample: u32, p: f64, k: u32) -> Self {
        Self {
            sample,
            p: Some(p),
            population: None,
            successes: None,
            k,
            k2: None,
        }
    }

    /// Request drawn from a known population with `successes` successes.
    ///
    /// The model depends on the sample fraction: hypergeometric above 5 %,
    /// binomial with `p = M/N` otherwise.
    pub fn from_population(population: u32, successes: u32, sample: u32, k: u32) -> Self {
        Self {
            sample,
            p: None,
            population: Some(population),
            successes: Some(successes),
            k,
            k2: None,
        }
    }

    pub fn with_population(mut self, population: u32) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_range_to(mut self, k2: u32) -> Self {
        self.k2 = Some(k2);
        self
    }
}

/// Everything computed for a binomial model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinomialReport {
    pub model: Model,
    pub parameters: DistributionParameters,
    pub distribution: FullDistribution,
    pub point: DistributionResult,
    pub range: Option<RangeProbability>,
    pub mean: MomentResult,
    pub variance: MomentResult,
    pub std_dev: MomentResult,
    /// `(N−n)/(N−1)`, for [`Model::FiniteBinomial`] only.
    pub correction_factor: Option<MomentResult>,
    /// `None` when undefined (`n·p·(1−p) = 0`).
    pub skewness: Option<MomentResult>,
    /// `None` when undefined (`n·p·(1−p) = 0`).
    pub kurtosis: Option<MomentResult>,
}

/// Everything computed for a hypergeometric model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypergeometricReport {
    pub parameters: DistributionParameters,
    pub distribution: FullDistribution,
    pub point: DistributionResult,
    pub range: Option<RangeProbability>,
    pub mean: MomentResult,
    pub variance: MomentResult,
    pub std_dev: MomentResult,
    /// `None` when the closed form has a zero denominator.
    pub skewness: Option<MomentResult>,
    pub kurtosis: MomentResult,
}

/// Result of [`analyze`], tagged by model family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Analysis {
    Binomial(BinomialReport),
    Hypergeometric(HypergeometricReport),
}

impl Analysis {
    pub fn model(&self) -> Model {
        match self {
            Self::Binomial(r) => r.model,
            Self::Hypergeometric(_) => Model::Hypergeometric,
        }
    }

    pub fn distribution(&self) -> &FullDistribution {
        match self {
            Self::Binomial(r) => &r.distribution,
            Self::Hypergeometric(r) => &r.distribution,
        }
    }

    pub fn point(&self) -> &DistributionResult {
        match self {
            Self::Binomial(r) => &r.point,
            Self::Hypergeometric(r) => &r.point,
        }
    }
}

/// Runs the full pipeline for one request.
///
/// # Errors
/// Any validation error from the selected engine, plus
/// [`DistributionError::Range`] when the model needs a parameter the
/// request does not carry (`M` for hypergeometric, `p` or `N`/`M` for
/// binomial), or when `n > N`.
pub fn analyze(request: &AnalysisRequest) -> Result<Analysis> {
    if let Some(population) = request.population {
        if request.sample > population {
            return Err(DistributionError::range(format!(
                "sample size n must be between 0 and N={population}, got n={}",
                request.sample
            )));
        }
    }
    let model = select_model(request.sample, request.population, request.successes);
    log::debug!("analyzing {request:?} with {model:?}");
    match model {
        Model::Hypergeometric => analyze_hypergeometric(request).map(Analysis::Hypergeometric),
        Model::InfiniteBinomial | Model::FiniteBinomial => {
            analyze_binomial(request, model).map(Analysis::Binomial)
        }
    }
}

fn analyze_binomial(request: &AnalysisRequest, model: Model) -> Result<BinomialReport> {
    let p = resolve_p(request)?;
    let mut engine = Binomial::new(request.sample, p)?;
    if let Some(population) = request.population {
        engine = engine.with_population(population);
    }

    let distribution = engine.full_distribution()?;
    let point = engine.pmf(request.k)?;
    let range = range_upper_bound(request)
        .map(|k2| engine.range_probability(request.k, k2))
        .transpose()?;
    let correction_factor = match (model, request.population) {
        (Model::FiniteBinomial, Some(population)) => {
            let (factor, derivation) = correction_factor_derivation(request.sample, population)?;
            Some(MomentResult::plain(factor, derivation))
        }
        _ => None,
    };

    Ok(BinomialReport {
        model,
        parameters: engine.parameters(),
        distribution,
        point,
        range,
        mean: engine.mean(),
        variance: engine.variance()?,
        std_dev: engine.std_dev()?,
        correction_factor,
        skewness: defined(engine.skewness())?,
        kurtosis: defined(engine.kurtosis())?,
    })
}

fn analyze_hypergeometric(request: &AnalysisRequest) -> Result<HypergeometricReport> {
    let (Some(population), Some(successes)) = (request.population, request.successes) else {
        return Err(DistributionError::range(
            "the hypergeometric model needs the population size N and successes M",
        ));
    };
    let engine = Hypergeometric::new(population, successes, request.sample)?;

    let distribution = engine.full_distribution()?;
    let point = engine.pmf(request.k)?;
    let range = range_upper_bound(request)
        .map(|k2| engine.range_probability(request.k, k2))
        .transpose()?;

    Ok(HypergeometricReport {
        parameters: engine.parameters(),
        distribution,
        point,
        range,
        mean: engine.mean(),
        variance: engine.variance()?,
        std_dev: engine.std_dev()?,
        skewness: defined(engine.skewness())?,
        kurtosis: engine.kurtosis(),
    })
}

/// `k2` when it forms a non-inverted range with `k`.
fn range_upper_bound(request: &AnalysisRequest) -> Option<u32> {
    let k2 = request.k2.filter(|&k2| k2 >= request.k);
    if k2.is_none() && request.k2.is_some() {
        log::debug!("range [{}, {:?}] is inverted; skipping it", request.k, request.k2);
    }
    k2
}

/// Explicit `p`, else `M/N`.
fn resolve_p(request: &AnalysisRequest) -> Result<f64> {
    match (request.p, request.population, request.successes) {
        (Some(p), _, _) => Ok(p),
        (None, Some(population), Some(successes)) if population > 0 => {
            if successes > population {
                return Err(DistributionError::range(format!(
                    "M must be between 0 and N={population}, got M={successes}"
                )));
            }
            Ok(f64::from(successes) / f64::from(population))
        }
        _ => Err(DistributionError::range(
            "the binomial model needs p, or population counts N and M to estimate it",
        )),
    }
}

/// Maps an undefined moment to `None`; other errors propagate.
fn defined(result: Result<MomentResult>) -> Result<Option<MomentResult>> {
    match result {
        Ok(moment) => Ok(Some(moment)),
        Err(DistributionError::Domain(reason)) => {
            log::debug!("moment undefined: {reason}");
            Ok(None)
        }
        Err(other) => Err(other),
    }
}
