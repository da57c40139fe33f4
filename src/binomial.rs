//! Binomial distribution engine.
//!
//! # Mathematical Definition
//! - PMF: P(X = k) = C(n, k)·p^k·(1−p)^(n−k), k ∈ [0, n]
//! - Mean: n·p
//! - Variance: n·p·(1−p), times (N−n)/(N−1) for a finite population
//! - Skewness: (1−2p) / √(n·p·(1−p))
//! - Excess kurtosis: (1 − 6p(1−p)) / (n·p·(1−p))
//!
//! The finite-population correction applies when a population size `N` is
//! attached and the sample exceeds 5 % of it (see
//! [`is_infinite_population`]).
//!
//! # Examples
//!
//! ```
//! use u_discrete::binomial::Binomial;
//!
//! let b = Binomial::new(10, 0.5).unwrap();
//! let r = b.pmf(5).unwrap();
//! assert!((r.probability - 0.246094).abs() < 1e-6);
//! assert_eq!(r.derivation.len(), 4);
//! assert_eq!(b.mean().value, 5.0);
//! ```

use crate::classify::{classify_kurtosis, classify_skewness, Classification};
use crate::combinatorics::{
    binomial_coefficient, ensure_finite_factorial, factorial, finite_coefficient, FactorialTable,
};
use crate::error::{DistributionError, Result};
use crate::model::{correction_factor_derivation, is_infinite_population};
use crate::result::{
    DistributionParameters, DistributionResult, Event, FullDistribution, MomentResult,
    ProbabilityMassPoint, RangeProbability,
};
use crate::trace::Derivation;

/// Binomial experiment: `n` trials with success probability `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    trials: u32,
    p: f64,
    population: Option<u32>,
}

impl Binomial {
    /// Creates a binomial model over an infinite population.
    ///
    /// # Errors
    /// Returns [`DistributionError::Range`] if `p` is not a finite value in
    /// `[0, 1]`.
    pub fn new(trials: u32, p: f64) -> Result<Self> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(DistributionError::range(format!(
                "probability must be between 0 and 1, got p={p}"
            )));
        }
        Ok(Self {
            trials,
            p,
            population: None,
        })
    }

    /// Attaches the size `N` of the population the trials are drawn from.
    ///
    /// Validity of `N` against `n` is checked when the correction factor is
    /// needed.
    pub fn with_population(mut self, population: u32) -> Self {
        self.population = Some(population);
        self
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn population(&self) -> Option<u32> {
        self.population
    }

    /// `1 − p`.
    pub fn q(&self) -> f64 {
        1.0 - self.p
    }

    pub fn parameters(&self) -> DistributionParameters {
        DistributionParameters::Binomial {
            trials: self.trials,
            p: self.p,
            population: self.population,
        }
    }

    /// Whether the finite-population correction applies to the variance.
    pub fn is_finite_population(&self) -> bool {
        !is_infinite_population(self.trials, self.population)
    }

    // ------------------------------------------------------------------
    // Probabilities
    // ------------------------------------------------------------------

    /// `P(X = k)` with a four-step derivation: coefficient, success power,
    /// failure power, product.
    ///
    /// # Errors
    /// - [`DistributionError::Range`] if `k > n`.
    /// - [`DistributionError::Domain`] if `n > 170` (`C(n, k)` overflows).
    pub fn pmf(&self, k: u32) -> Result<DistributionResult> {
        let n = self.trials;
        if k > n {
            return Err(DistributionError::range(format!(
                "k must be between 0 and n={n}, got k={k}"
            )));
        }
        ensure_finite_factorial(n, "n")?;
        let (n_i, k_i) = (i64::from(n), i64::from(k));
        let coefficient = finite_coefficient(binomial_coefficient(n_i, k_i)?, &format!("C({n}, {k})"))?;
        let (p, q) = (self.p, self.q());
        let success = p.powf(f64::from(k));
        let failure = q.powf(f64::from(n - k));
        let probability = coefficient * success * failure;

        let derivation = Derivation::builder()
            .step(
                "Binomial coefficient C(n, k)",
                format!("C({n}, {k}) = {n}! / ({k}! × {}!)", n - k),
                coefficient,
                format!(
                    "{n}! = {}, {k}! = {}, {}! = {}",
                    factorial(n_i)?,
                    factorial(k_i)?,
                    n - k,
                    factorial(n_i - k_i)?
                ),
            )
            .step(
                "Success probability raised to k",
                format!("p^k = {p}^{k}"),
                success,
                format!("{p} raised to {k}"),
            )
            .step(
                "Failure probability raised to (n - k)",
                format!("(1 - p)^(n - k) = {q}^{}", n - k),
                failure,
                format!("{q} raised to {}", n - k),
            )
            .step(
                "Final probability",
                format!("P(X = {k}) = C({n}, {k}) × p^{k} × (1 - p)^{}", n - k),
                probability,
                format!("{coefficient} × {success} × {failure}"),
            )
            .build();

        Ok(DistributionResult {
            probability,
            event: Event::Exactly(k),
            parameters: self.parameters(),
            derivation,
        })
    }

    /// pmf for every `k` in `0..=n`, ascending.
    ///
    /// Factorials are computed once; each probability is bit-identical to
    /// [`pmf`](Self::pmf) at the same `k`.
    ///
    /// # Errors
    /// [`DistributionError::Domain`] if a coefficient overflows (`n > 170`).
    pub fn full_distribution(&self) -> Result<FullDistribution> {
        let n = self.trials;
        ensure_finite_factorial(n, "n")?;
        let table = FactorialTable::up_to(n);
        let (p, q) = (self.p, self.q());
        let mut points = Vec::with_capacity(n as usize + 1);
        for k in 0..=n {
            let coefficient = table
                .coefficient(n, k)
                .ok_or_else(|| DistributionError::range(format!("C({n}, {k}) outside table")))?;
            let coefficient = finite_coefficient(coefficient, &format!("C({n}, {k})"))?;
            let probability = coefficient * p.powf(f64::from(k)) * q.powf(f64::from(n - k));
            points.push(ProbabilityMassPoint::new(k, probability));
        }
        Ok(FullDistribution::new(self.parameters(), points))
    }

    /// `P(k1 ≤ X ≤ k2)`, the pmf at `k1`, and per-`k` details.
    ///
    /// # Errors
    /// - [`DistributionError::Ordering`] if `k1 > k2`.
    /// - [`DistributionError::Range`] if `k2 > n`.
    /// - [`DistributionError::Domain`] if `n > 170`.
    pub fn range_probability(&self, k1: u32, k2: u32) -> Result<RangeProbability> {
        if k1 > k2 {
            return Err(DistributionError::ordering(format!(
                "k1 must not exceed k2, got k1={k1}, k2={k2}"
            )));
        }
        if k2 > self.trials {
            return Err(DistributionError::range(format!(
                "k must be between 0 and n={}, got k2={k2}",
                self.trials
            )));
        }
        ensure_finite_factorial(self.trials, "n")?;
        let points = (k1..=k2).map(|k| self.pmf(k)).collect::<Result<Vec<_>>>()?;
        RangeProbability::from_points(self.parameters(), k1, k2, points)
            .ok_or_else(|| DistributionError::ordering("empty range"))
    }

    // ------------------------------------------------------------------
    // Moments
    // ------------------------------------------------------------------

    /// `E(X) = n·p`, regardless of population size.
    pub fn mean(&self) -> MomentResult {
        let (n, p) = (self.trials, self.p);
        let mean = f64::from(n) * p;
        let derivation = Derivation::builder()
            .step(
                "Mean of the binomial distribution",
                "E(X) = n × p",
                mean,
                format!("{n} × {p} = {mean}"),
            )
            .build();
        MomentResult::plain(mean, derivation)
    }

    /// Variance, corrected for a finite population when it applies.
    ///
    /// # Errors
    /// [`DistributionError::Domain`] in the finite case if `N ≤ n` or
    /// `N = 1`.
    pub fn variance(&self) -> Result<MomentResult> {
        match self.population {
            Some(population) if self.is_finite_population() => self.finite_variance(population),
            _ => Ok(self.infinite_variance()),
        }
    }

    /// Standard deviation, corrected for a finite population when it
    /// applies.
    pub fn std_dev(&self) -> Result<MomentResult> {
        Ok(sqrt_of(self.variance()?))
    }

    /// `Var(X) = n·p·(1−p)`, ignoring any attached population.
    pub fn infinite_variance(&self) -> MomentResult {
        let (n, p, q) = (self.trials, self.p, self.q());
        let variance = f64::from(n) * p * q;
        let derivation = Derivation::builder()
            .step(
                "Variance",
                "Var(X) = n × p × (1 - p)",
                variance,
                format!("{n} × {p} × {q} = {variance}"),
            )
            .build();
        MomentResult::plain(variance, derivation)
    }

    /// `n·p·(1−p)·(N−n)/(N−1)` for an explicit population size, whether or
    /// not the 5 % rule would apply it.
    ///
    /// # Errors
    /// [`DistributionError::Domain`] if `N ≤ n` or `N ≤ 1`.
    pub fn finite_variance(&self, population: u32) -> Result<MomentResult> {
        let (factor, factor_steps) = correction_factor_derivation(self.trials, population)?;
        let infinite = self.infinite_variance();
        let variance = infinite.value * factor;
        let derivation = Derivation::builder()
            .step(
                "Variance (infinite population)",
                "Var(X) = n × p × (1 - p)",
                infinite.value,
                format!("{} × {} × {} = {}", self.trials, self.p, self.q(), infinite.value),
            )
            .extend(&factor_steps)
            .step(
                "Variance (finite population)",
                "Var(X)_finite = Var(X) × factor",
                variance,
                format!("{} × {factor} = {variance}", infinite.value),
            )
            .build();
        Ok(MomentResult::plain(variance, derivation))
    }

    /// Square root of [`finite_variance`](Self::finite_variance).
    pub fn finite_std_dev(&self, population: u32) -> Result<MomentResult> {
        Ok(sqrt_of(self.finite_variance(population)?))
    }

    /// `(1−2p) / √(n·p·(1−p))`, classified.
    ///
    /// # Errors
    /// [`DistributionError::Domain`] if `n·p·(1−p) = 0` (degenerate
    /// distribution).
    pub fn skewness(&self) -> Result<MomentResult> {
        let npq = self.nonzero_npq("skewness")?;
        let p = self.p;
        let skewness = (1.0 - 2.0 * p) / npq.sqrt();
        let derivation = Derivation::builder()
            .step(
                "Skewness",
                "γ = (1 - 2p) / √(n × p × (1 - p))",
                skewness,
                format!("(1 - 2 × {p}) / √{npq} = {skewness}"),
            )
            .build();
        Ok(MomentResult::classified(
            skewness,
            Classification::Skewness(classify_skewness(skewness)),
            derivation,
        ))
    }

    /// `(1 − 6p(1−p)) / (n·p·(1−p))`, classified.
    ///
    /// # Errors
    /// [`DistributionError::Domain`] if `n·p·(1−p) = 0`.
    pub fn kurtosis(&self) -> Result<MomentResult> {
        let npq = self.nonzero_npq("kurtosis")?;
        let (p, q) = (self.p, self.q());
        let kurtosis = (1.0 - 6.0 * p * q) / npq;
        let derivation = Derivation::builder()
            .step(
                "Kurtosis",
                "κ = (1 - 6p(1 - p)) / (n × p × (1 - p))",
                kurtosis,
                format!("(1 - 6 × {p} × {q}) / {npq} = {kurtosis}"),
            )
            .build();
        Ok(MomentResult::classified(
            kurtosis,
            Classification::Kurtosis(classify_kurtosis(kurtosis)),
            derivation,
        ))
    }

    fn nonzero_npq(&self, what: &str) -> Result<f64> {
        let npq = f64::from(self.trials) * self.p * self.q();
        if npq == 0.0 {
            return Err(DistributionError::domain(format!(
                "{what} is undefined when n·p·(1-p) = 0 (n={}, p={})",
                self.trials, self.p
            )));
        }
        Ok(npq)
    }
}

impl TryFrom<DistributionParameters> for Binomial {
    type Error = DistributionError;

    /// Rebuilds the engine from serialized parameters, re-validating `p`.
    ///
    /// # Errors
    /// [`DistributionError::Range`] for hypergeometric parameters or an
    /// invalid `p`.
    fn try_from(parameters: DistributionParameters) -> Result<Self> {
        match parameters {
            DistributionParameters::Binomial {
                trials,
                p,
                population,
            } => {
                let model = Self::new(trials, p)?;
                Ok(match population {
                    Some(population) => model.with_population(population),
                    None => model,
                })
            }
            DistributionParameters::Hypergeometric { .. } => Err(DistributionError::range(
                "expected binomial parameters, got hypergeometric",
            )),
        }
    }
}

/// Appends a square-root step to a variance result.
pub(crate) fn sqrt_of(variance: MomentResult) -> MomentResult {
    let std_dev = variance.value.sqrt();
    let derivation = Derivation::builder()
        .extend(&variance.derivation)
        .step(
            "Standard deviation",
            "σ = √Var(X)",
            std_dev,
            format!("√{} = {std_dev}", variance.value),
        )
        .build();
    MomentResult::plain(std_dev, derivation)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{KurtosisClass, SkewnessClass};

    fn coin10() -> Binomial {
        Binomial::new(10, 0.5).unwrap()
    }

    #[test]
    fn test_invalid_probability() {
        assert!(Binomial::new(10, 1.5).unwrap_err().is_range());
        assert!(Binomial::new(10, -0.1).unwrap_err().is_range());
        assert!(Binomial::new(10, f64::NAN).unwrap_err().is_range());
        assert!(Binomial::new(10, 0.0).is_ok());
        assert!(Binomial::new(10, 1.0).is_ok());
    }

    #[test]
    fn test_pmf_scenario_a() {
        let r = coin10().pmf(5).unwrap();
        assert!((r.probability - 0.246094).abs() < 1e-6);
        assert_eq!(r.probability, 252.0 / 1024.0);
        assert_eq!(r.event, Event::Exactly(5));
    }

    #[test]
    fn test_pmf_has_four_ordered_steps() {
        let r = coin10().pmf(3).unwrap();
        let steps = r.derivation.steps();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].result(), 120.0);
        assert_eq!(steps[1].result(), 0.125);
        assert_eq!(steps[2].result(), 0.5_f64.powi(7));
        assert_eq!(steps[3].result(), r.probability);
        assert_eq!(steps[0].formula(), "C(10, 3) = 10! / (3! × 7!)");
    }

    #[test]
    fn test_pmf_k_out_of_range() {
        assert!(coin10().pmf(11).unwrap_err().is_range());
    }

    #[test]
    fn test_pmf_degenerate_p() {
        let zero = Binomial::new(4, 0.0).unwrap();
        assert_eq!(zero.pmf(0).unwrap().probability, 1.0);
        assert_eq!(zero.pmf(1).unwrap().probability, 0.0);
        let one = Binomial::new(4, 1.0).unwrap();
        assert_eq!(one.pmf(4).unwrap().probability, 1.0);
        assert_eq!(one.pmf(3).unwrap().probability, 0.0);
    }

    #[test]
    fn test_pmf_overflow_is_domain_error() {
        let b = Binomial::new(200, 0.5).unwrap();
        assert!(b.pmf(100).unwrap_err().is_domain());
        assert!(b.full_distribution().unwrap_err().is_domain());
    }

    #[test]
    fn test_huge_trials_fail_before_any_work() {
        let b = Binomial::new(u32::MAX, 0.5).unwrap();
        assert!(b.pmf(1).unwrap_err().is_domain());
        assert!(b.full_distribution().unwrap_err().is_domain());
        assert!(b.range_probability(0, 3).unwrap_err().is_domain());
        // the first overflowing n
        let b = Binomial::new(171, 0.5).unwrap();
        assert!(b.pmf(0).unwrap_err().is_domain());
        assert!(Binomial::new(170, 0.5).unwrap().full_distribution().is_ok());
    }

    #[test]
    fn test_full_distribution_matches_pmf_bitwise() {
        let b = Binomial::new(37, 0.3).unwrap();
        let full = b.full_distribution().unwrap();
        assert_eq!(full.len(), 38);
        for point in &full {
            let single = b.pmf(point.k).unwrap().probability;
            assert_eq!(point.probability.to_bits(), single.to_bits(), "k={}", point.k);
        }
    }

    #[test]
    fn test_full_distribution_sums_to_one() {
        let full = coin10().full_distribution().unwrap();
        assert!(full.is_normalized(1e-9));
        assert_eq!(full.support(), Some(0..=10));
        assert_eq!(full.mode(), Some(5));
    }

    #[test]
    fn test_zero_trials() {
        let b = Binomial::new(0, 0.4).unwrap();
        let full = b.full_distribution().unwrap();
        assert_eq!(full.len(), 1);
        assert_eq!(full.points()[0].probability, 1.0);
        assert!(b.skewness().unwrap_err().is_domain());
    }

    #[test]
    fn test_range_scenario_d() {
        let b = coin10();
        let r = b.range_probability(4, 6).unwrap();
        assert!((r.probability() - 0.656250).abs() < 1e-6);
        let sum = b.pmf(4).unwrap().probability
            + b.pmf(5).unwrap().probability
            + b.pmf(6).unwrap().probability;
        assert_eq!(r.probability(), sum);
        assert_eq!(r.at_lower.probability, b.pmf(4).unwrap().probability);
        assert_eq!(r.details.iter().map(|d| d.k).collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(r.total.event, Event::Between(4, 6));
    }

    #[test]
    fn test_range_errors() {
        let b = coin10();
        assert!(b.range_probability(6, 4).unwrap_err().is_ordering());
        assert!(b.range_probability(8, 11).unwrap_err().is_range());
    }

    #[test]
    fn test_single_point_range() {
        let b = coin10();
        let r = b.range_probability(5, 5).unwrap();
        assert_eq!(r.probability(), b.pmf(5).unwrap().probability);
        assert_eq!(r.details.len(), 1);
    }

    #[test]
    fn test_moments_scenario_a() {
        let b = coin10();
        assert_eq!(b.mean().value, 5.0);
        assert_eq!(b.variance().unwrap().value, 2.5);
        let sd = b.std_dev().unwrap();
        assert!((sd.value - 1.581139).abs() < 1e-6);
        assert_eq!(sd.derivation.names(), vec!["Variance", "Standard deviation"]);
    }

    #[test]
    fn test_finite_correction_scenario_b() {
        let b = coin10().with_population(50);
        assert!(b.is_finite_population());
        let var = b.variance().unwrap();
        assert!((var.value - 2.040816).abs() < 1e-6);
        assert_eq!(var.derivation.len(), 3);
        assert!((var.derivation.steps()[1].result() - 0.816327).abs() < 1e-6);
        let sd = b.std_dev().unwrap();
        assert!((sd.value - (100.0_f64 / 49.0).sqrt()).abs() < 1e-12);
        assert!((sd.value - 1.428571).abs() < 1e-6);
        assert_eq!(sd.derivation.len(), 4);
        // mean ignores the population
        assert_eq!(b.mean().value, 5.0);
    }

    #[test]
    fn test_small_sample_skips_correction() {
        let b = coin10().with_population(200);
        assert!(!b.is_finite_population());
        assert_eq!(b.variance().unwrap().value, 2.5);
    }

    #[test]
    fn test_finite_variance_domain_errors() {
        let b = coin10();
        assert!(b.finite_variance(10).unwrap_err().is_domain());
        assert!(b.finite_variance(9).unwrap_err().is_domain());
        let single = Binomial::new(0, 0.5).unwrap();
        assert!(single.finite_variance(1).unwrap_err().is_domain());
        // N <= n through the 5 % rule path
        assert!(coin10().with_population(10).variance().unwrap_err().is_domain());
    }

    #[test]
    fn test_shape_moments() {
        let b = coin10();
        let s = b.skewness().unwrap();
        assert_eq!(s.value, 0.0);
        assert_eq!(s.classification, Some(Classification::Skewness(SkewnessClass::Symmetric)));
        let k = b.kurtosis().unwrap();
        assert!((k.value + 0.2).abs() < 1e-12);
        assert_eq!(k.classification, Some(Classification::Kurtosis(KurtosisClass::Platykurtic)));
    }

    #[test]
    fn test_shape_moments_skewed() {
        let b = Binomial::new(20, 0.3).unwrap();
        let s = b.skewness().unwrap();
        assert!((s.value - 0.195180).abs() < 1e-6);
        assert_eq!(s.classification, Some(Classification::Skewness(SkewnessClass::Positive)));
        let k = b.kurtosis().unwrap();
        assert!((k.value + 0.061905).abs() < 1e-6);
        assert_eq!(k.classification, Some(Classification::Kurtosis(KurtosisClass::Mesokurtic)));
    }

    #[test]
    fn test_shape_moments_undefined_at_degenerate_p() {
        let b = Binomial::new(10, 1.0).unwrap();
        assert!(b.skewness().unwrap_err().is_domain());
        assert!(b.kurtosis().unwrap_err().is_domain());
    }

    #[test]
    fn test_closed_forms_match_pmf_moments() {
        let b = Binomial::new(25, 0.35).unwrap();
        let m = b.full_distribution().unwrap().moments().unwrap();
        assert!((m.mean - b.mean().value).abs() < 1e-10);
        assert!((m.variance - b.variance().unwrap().value).abs() < 1e-10);
        assert!((m.skewness.unwrap() - b.skewness().unwrap().value).abs() < 1e-9);
        assert!((m.excess_kurtosis.unwrap() - b.kurtosis().unwrap().value).abs() < 1e-9);
    }

    #[test]
    fn test_rebuild_from_parameters() {
        let b = coin10().with_population(50);
        let json = serde_json::to_string(&b.parameters()).unwrap();
        let parameters: DistributionParameters = serde_json::from_str(&json).unwrap();
        let rebuilt = Binomial::try_from(parameters).unwrap();
        assert_eq!(rebuilt, b);
        assert_eq!(rebuilt.pmf(5).unwrap(), b.pmf(5).unwrap());
    }

    #[test]
    fn test_rebuild_rejects_foreign_or_invalid_parameters() {
        let foreign = DistributionParameters::Hypergeometric {
            population: 20,
            successes: 8,
            sample: 5,
        };
        assert!(Binomial::try_from(foreign).unwrap_err().is_range());
        let invalid = DistributionParameters::Binomial {
            trials: 10,
            p: 1.5,
            population: None,
        };
        assert!(Binomial::try_from(invalid).unwrap_err().is_range());
    }

    #[test]
    fn test_idempotent() {
        let b = Binomial::new(17, 0.42).unwrap().with_population(60);
        assert_eq!(b.pmf(7).unwrap(), b.pmf(7).unwrap());
        assert_eq!(b.full_distribution().unwrap(), b.full_distribution().unwrap());
        assert_eq!(b.std_dev().unwrap(), b.std_dev().unwrap());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn full_distribution_sums_to_one(n in 0_u32..=100, p in 0.0_f64..=1.0) {
            let full = Binomial::new(n, p).unwrap().full_distribution().unwrap();
            prop_assert_eq!(full.len(), n as usize + 1);
            let total = full.total_probability();
            prop_assert!((total - 1.0).abs() < 1e-9, "n={n}, p={p}: total={total}");
        }

        #[test]
        fn range_equals_sum_of_points(
            n in 1_u32..=60,
            p in 0.0_f64..=1.0,
            a in 0.0_f64..=1.0,
            b in 0.0_f64..=1.0,
        ) {
            let model = Binomial::new(n, p).unwrap();
            let x = (a * f64::from(n)).floor() as u32;
            let y = (b * f64::from(n)).floor() as u32;
            let (k1, k2) = (x.min(y), x.max(y));
            let range = model.range_probability(k1, k2).unwrap();
            let mut sum = 0.0;
            for k in k1..=k2 {
                sum += model.pmf(k).unwrap().probability;
            }
            prop_assert_eq!(range.probability(), sum);
        }

        #[test]
        fn finite_correction_law(n in 1_u32..=100, p in 0.0_f64..=1.0, extra in 1_u32..100_000) {
            let model = Binomial::new(n, p).unwrap();
            let population = n + extra;
            let finite = model.finite_variance(population).unwrap().value;
            let expected = model.infinite_variance().value
                * f64::from(population - n) / f64::from(population - 1);
            prop_assert!((finite - expected).abs() <= 1e-12 * (1.0 + expected));
            prop_assert!(finite <= model.infinite_variance().value + 1e-12);
        }

        #[test]
        fn finite_variance_converges(n in 1_u32..=100, p in 0.01_f64..=0.99) {
            let model = Binomial::new(n, p).unwrap();
            let infinite = model.infinite_variance().value;
            let huge = model.finite_variance(u32::MAX).unwrap().value;
            prop_assert!((huge - infinite).abs() < 1e-6 * infinite);
        }
    }
}
