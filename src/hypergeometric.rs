//! Hypergeometric distribution engine.
//!
//! `n` draws without replacement from a population of `N` elements of which
//! `M` are successes.
//!
//! # Mathematical Definition
//! - PMF: P(X = k) = C(M, k)·C(N−M, n−k) / C(N, n)
//! - Support: k ∈ [max(0, n−(N−M)), min(n, M)]
//! - Mean: n·M/N
//! - Variance: n·p·q·(N−n)/(N−1) with p = M/N, q = (N−M)/N
//!
//! # Shape moments
//!
//! Skewness and kurtosis use the closed forms documented on
//! [`Hypergeometric::skewness`] and [`Hypergeometric::kurtosis`]. They are
//! kept exactly as published in the calculator this engine serves and have
//! not been reconciled with the textbook expressions; compare against
//! [`FullDistribution::moments`] when the distinction matters.
//!
//! # Examples
//!
//! ```
//! use u_discrete::hypergeometric::Hypergeometric;
//!
//! let h = Hypergeometric::new(20, 8, 5).unwrap();
//! let r = h.pmf(2).unwrap();
//! assert!((r.probability - 6160.0 / 15504.0).abs() < 1e-15);
//! assert_eq!(h.support(), 0..=5);
//! assert_eq!(h.mean().value, 2.0);
//! ```

use std::ops::RangeInclusive;

use crate::binomial::sqrt_of;
use crate::classify::{classify_kurtosis, classify_skewness, Classification};
use crate::combinatorics::{
    binomial_coefficient, ensure_finite_factorial, factorial, finite_coefficient, FactorialTable,
};
use crate::error::{DistributionError, Result};
use crate::result::{
    DistributionParameters, DistributionResult, Event, FullDistribution, MomentResult,
    ProbabilityMassPoint, RangeProbability,
};
use crate::trace::{Derivation, DerivationBuilder};

/// Hypergeometric experiment over a population of `N` with `M` successes,
/// drawing `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypergeometric {
    population: u32,
    successes: u32,
    sample: u32,
}

impl Hypergeometric {
    /// Creates the model.
    ///
    /// # Errors
    /// Returns [`DistributionError::Range`] if `N = 0`, `M > N` or `n > N`.
    pub fn new(population: u32, successes: u32, sample: u32) -> Result<Self> {
        if population == 0 {
            return Err(DistributionError::range("population size N must be at least 1"));
        }
        if successes > population {
            return Err(DistributionError::range(format!(
                "M must be between 0 and N={population}, got M={successes}"
            )));
        }
        if sample > population {
            return Err(DistributionError::range(format!(
                "n must be between 0 and N={population}, got n={sample}"
            )));
        }
        Ok(Self {
            population,
            successes,
            sample,
        })
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn successes(&self) -> u32 {
        self.successes
    }

    pub fn sample(&self) -> u32 {
        self.sample
    }

    pub fn parameters(&self) -> DistributionParameters {
        DistributionParameters::Hypergeometric {
            population: self.population,
            successes: self.successes,
            sample: self.sample,
        }
    }

    /// Outcomes with non-zero probability: `max(0, n−(N−M))..=min(n, M)`.
    pub fn support(&self) -> RangeInclusive<u32> {
        let failures = self.population - self.successes;
        let k_min = self.sample.saturating_sub(failures);
        let k_max = self.sample.min(self.successes);
        k_min..=k_max
    }

    /// Success fraction `p = M/N`.
    pub fn p(&self) -> f64 {
        f64::from(self.successes) / f64::from(self.population)
    }

    /// Failure fraction `q = (N−M)/N`.
    pub fn q(&self) -> f64 {
        f64::from(self.population - self.successes) / f64::from(self.population)
    }

    // ------------------------------------------------------------------
    // Probabilities
    // ------------------------------------------------------------------

    /// `P(X = k)` with a four-step derivation: `C(M, k)`, `C(N−M, n−k)`,
    /// `C(N, n)`, quotient.
    ///
    /// # Errors
    /// - [`DistributionError::Range`] if `k > M`, `k > n`, or `n−k > N−M`.
    /// - [`DistributionError::Domain`] if `N > 170` (`C(N, n)` overflows).
    pub fn pmf(&self, k: u32) -> Result<DistributionResult> {
        let (big_n, m, n) = (self.population, self.successes, self.sample);
        if k > m {
            return Err(DistributionError::range(format!(
                "k must be between 0 and M={m}, got k={k}"
            )));
        }
        if k > n {
            return Err(DistributionError::range(format!(
                "k must be between 0 and n={n}, got k={k}"
            )));
        }
        if n - k > big_n - m {
            return Err(DistributionError::range(format!(
                "not enough non-success elements in the population: n-k={} exceeds N-M={}",
                n - k,
                big_n - m
            )));
        }

        ensure_finite_factorial(big_n, "N")?;

        let failures = big_n - m;
        let c_success = coefficient(m, k)?;
        let c_failure = coefficient(failures, n - k)?;
        let c_total = coefficient(big_n, n)?;
        let probability = (c_success * c_failure) / c_total;

        let derivation = Derivation::builder()
            .step(
                "Coefficient C(M, k)",
                format!("C({m}, {k}) = {m}! / ({k}! × {}!)", m - k),
                c_success,
                factorial_note(m, k)?,
            )
            .step(
                "Coefficient C(N - M, n - k)",
                format!(
                    "C({failures}, {}) = {failures}! / ({}! × {}!)",
                    n - k,
                    n - k,
                    failures - (n - k)
                ),
                c_failure,
                factorial_note(failures, n - k)?,
            )
            .step(
                "Coefficient C(N, n)",
                format!("C({big_n}, {n}) = {big_n}! / ({n}! × {}!)", big_n - n),
                c_total,
                factorial_note(big_n, n)?,
            )
            .step(
                "Final probability",
                format!(
                    "P(X = {k}) = [C({m}, {k}) × C({failures}, {})] / C({big_n}, {n})",
                    n - k
                ),
                probability,
                format!("({c_success} × {c_failure}) / {c_total} = {probability}"),
            )
            .build();

        Ok(DistributionResult {
            probability,
            event: Event::Exactly(k),
            parameters: self.parameters(),
            derivation,
        })
    }

    /// pmf over [`support`](Self::support), ascending.
    ///
    /// Each probability is bit-identical to [`pmf`](Self::pmf) at the same
    /// `k`.
    ///
    /// # Errors
    /// [`DistributionError::Domain`] if a coefficient overflows (`N > 170`).
    pub fn full_distribution(&self) -> Result<FullDistribution> {
        let (big_n, m, n) = (self.population, self.successes, self.sample);
        ensure_finite_factorial(big_n, "N")?;
        let table = FactorialTable::up_to(big_n);
        let lookup = |a: u32, b: u32| {
            let c = table
                .coefficient(a, b)
                .ok_or_else(|| DistributionError::range(format!("C({a}, {b}) outside table")))?;
            finite_coefficient(c, &format!("C({a}, {b})"))
        };
        let c_total = lookup(big_n, n)?;
        let support = self.support();
        let mut points = Vec::with_capacity(support.clone().count());
        for k in support {
            let probability = (lookup(m, k)? * lookup(big_n - m, n - k)?) / c_total;
            points.push(ProbabilityMassPoint::new(k, probability));
        }
        Ok(FullDistribution::new(self.parameters(), points))
    }

    /// `P(k1 ≤ X ≤ k2)`, the pmf at `k1`, and per-`k` details.
    ///
    /// # Errors
    /// - [`DistributionError::Ordering`] if `k1 > k2` or either bound lies
    ///   outside the support.
    /// - [`DistributionError::Domain`] if `N > 170`.
    pub fn range_probability(&self, k1: u32, k2: u32) -> Result<RangeProbability> {
        if k1 > k2 {
            return Err(DistributionError::ordering(format!(
                "k1 must not exceed k2, got k1={k1}, k2={k2}"
            )));
        }
        let support = self.support();
        if k1 < *support.start() || k2 > *support.end() {
            return Err(DistributionError::ordering(format!(
                "k must be between {} and {}, got [{k1}, {k2}]",
                support.start(),
                support.end()
            )));
        }
        ensure_finite_factorial(self.population, "N")?;
        let points = (k1..=k2).map(|k| self.pmf(k)).collect::<Result<Vec<_>>>()?;
        RangeProbability::from_points(self.parameters(), k1, k2, points)
            .ok_or_else(|| DistributionError::ordering("empty range"))
    }

    // ------------------------------------------------------------------
    // Moments
    // ------------------------------------------------------------------

    /// `E(X) = n·(M/N)`.
    pub fn mean(&self) -> MomentResult {
        let (big_n, m, n) = (self.population, self.successes, self.sample);
        let mean = f64::from(n) * (f64::from(m) / f64::from(big_n));
        let derivation = Derivation::builder()
            .step(
                "Mean of the hypergeometric distribution",
                "E(X) = n × (M / N)",
                mean,
                format!("{n} × ({m} / {big_n}) = {mean:.6}"),
            )
            .build();
        MomentResult::plain(mean, derivation)
    }

    /// `Var(X) = n·p·q·(N−n)/(N−1)`.
    ///
    /// # Errors
    /// [`DistributionError::Domain`] if `N = 1`.
    pub fn variance(&self) -> Result<MomentResult> {
        let (variance, derivation) = self.variance_steps()?;
        Ok(MomentResult::plain(variance, derivation.build()))
    }

    /// `σ = √Var(X)`, following the variance steps.
    ///
    /// # Errors
    /// [`DistributionError::Domain`] if `N = 1`.
    pub fn std_dev(&self) -> Result<MomentResult> {
        Ok(sqrt_of(self.variance()?))
    }

    /// `γ = (N−2M)·√(N−1) / [(N−2)·√(n·p·q·(N−n))]`, classified.
    ///
    /// # Errors
    /// [`DistributionError::Domain`] when the denominator is zero: `N = 2`,
    /// `n ∈ {0, N}` or `M ∈ {0, N}`.
    pub fn skewness(&self) -> Result<MomentResult> {
        let (big_n, m, n) = self.as_f64();
        let (p, q) = (self.p(), self.q());
        let numerator = (big_n - 2.0 * m) * (big_n - 1.0).sqrt();
        let denominator = (big_n - 2.0) * (n * p * q * (big_n - n)).sqrt();
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(DistributionError::domain(format!(
                "skewness is undefined for N={}, M={}, n={} (zero denominator)",
                self.population, self.successes, self.sample
            )));
        }
        let skewness = numerator / denominator;
        let derivation = Derivation::builder()
            .step(
                "Hypergeometric skewness",
                "γ = (N - 2M) × √(N - 1) / ((N - 2) × √(n × p × q × (N - n)))",
                skewness,
                format!(
                    "({big_n} - 2×{m}) × √({big_n} - 1) / (({big_n} - 2) × √({n} × {p:.6} × {q:.6} × ({big_n} - {n}))) = {skewness:.6}"
                ),
            )
            .build();
        Ok(MomentResult::classified(
            skewness,
            Classification::Skewness(classify_skewness(skewness)),
            derivation,
        ))
    }

    /// Kurtosis from the closed form
    ///
    /// ```text
    /// κ = (N−1)·[N²(N−1) + N(N+1)(6n−6) − 18n(N−n) − 6M(N−M)(N−2n)]
    ///     / [n·p·q·(N−2)·(N−3)·(N−n)·Var(X)]
    /// ```
    ///
    /// Total: when the denominator is exactly zero (`n = 0`, `n = N`,
    /// `M ∈ {0, N}`, `N ∈ {2, 3}`) the result is `0` and the derivation
    /// records the degenerate case explicitly.
    pub fn kurtosis(&self) -> MomentResult {
        let (big_n, m, n) = self.as_f64();
        let (p, q) = (self.p(), self.q());
        let numerator = (big_n - 1.0)
            * (big_n * big_n * (big_n - 1.0) + big_n * (big_n + 1.0) * (6.0 * n - 6.0)
                - 18.0 * n * (big_n - n)
                - 6.0 * m * (big_n - m) * (big_n - 2.0 * n));
        // Checked before Var(X), which is itself undefined for N = 1.
        let base = n * p * q * (big_n - 2.0) * (big_n - 3.0) * (big_n - n);

        if base == 0.0 {
            log::debug!(
                "hypergeometric kurtosis denominator is zero (N={}, M={}, n={}); reporting 0",
                self.population,
                self.successes,
                self.sample
            );
            let derivation = Derivation::builder()
                .step(
                    "Degenerate denominator",
                    "n × p × q × (N - 2) × (N - 3) × (N - n) = 0",
                    0.0,
                    "The closed form is undefined for these parameters; kurtosis is reported as 0",
                )
                .build();
            return MomentResult::classified(
                0.0,
                Classification::Kurtosis(classify_kurtosis(0.0)),
                derivation,
            );
        }

        let factor = (big_n - n) / (big_n - 1.0);
        let variance = n * p * q * factor;
        let denominator = base * variance;
        let kurtosis = numerator / denominator;
        let derivation = Derivation::builder()
            .step(
                "Hypergeometric kurtosis",
                "κ = (N - 1)·[N²(N - 1) + N(N + 1)(6n - 6) - 18n(N - n) - 6M(N - M)(N - 2n)] / [n·p·q·(N - 2)(N - 3)(N - n)·Var(X)]",
                kurtosis,
                format!("{numerator} / {denominator} = {kurtosis:.6}"),
            )
            .build();
        MomentResult::classified(
            kurtosis,
            Classification::Kurtosis(classify_kurtosis(kurtosis)),
            derivation,
        )
    }

    fn as_f64(&self) -> (f64, f64, f64) {
        (
            f64::from(self.population),
            f64::from(self.successes),
            f64::from(self.sample),
        )
    }

    fn variance_steps(&self) -> Result<(f64, DerivationBuilder)> {
        if self.population == 1 {
            return Err(DistributionError::domain(
                "variance is undefined for N=1: finiteness factor (N-n)/(N-1) divides by zero",
            ));
        }
        let (big_n, m, n) = (self.population, self.successes, self.sample);
        let (p, q) = (self.p(), self.q());
        let factor = f64::from(big_n - n) / f64::from(big_n - 1);
        let variance = f64::from(n) * p * q * factor;
        let steps = Derivation::builder()
            .step(
                "Probability of success",
                "p = M / N",
                p,
                format!("{m} / {big_n} = {p:.6}"),
            )
            .step(
                "Probability of failure",
                "q = (N - M) / N",
                q,
                format!("({big_n} - {m}) / {big_n} = {q:.6}"),
            )
            .step(
                "Finiteness factor",
                "factor = (N - n) / (N - 1)",
                factor,
                format!("({big_n} - {n}) / ({big_n} - 1) = {factor:.6}"),
            )
            .step(
                "Variance",
                "Var(X) = n × p × q × factor",
                variance,
                format!("{n} × {p:.6} × {q:.6} × {factor:.6} = {variance:.6}"),
            );
        Ok((variance, steps))
    }
}

impl TryFrom<DistributionParameters> for Hypergeometric {
    type Error = DistributionError;

    /// Rebuilds the engine from serialized parameters, re-validating them.
    ///
    /// # Errors
    /// [`DistributionError::Range`] for binomial parameters or when
    /// [`Hypergeometric::new`] rejects the counts.
    fn try_from(parameters: DistributionParameters) -> Result<Self> {
        match parameters {
            DistributionParameters::Hypergeometric {
                population,
                successes,
                sample,
            } => Self::new(population, successes, sample),
            DistributionParameters::Binomial { .. } => Err(DistributionError::range(
                "expected hypergeometric parameters, got binomial",
            )),
        }
    }
}

fn coefficient(n: u32, k: u32) -> Result<f64> {
    let value = binomial_coefficient(i64::from(n), i64::from(k))?;
    finite_coefficient(value, &format!("C({n}, {k})"))
}

fn factorial_note(n: u32, k: u32) -> Result<String> {
    let (n_i, k_i) = (i64::from(n), i64::from(k));
    Ok(format!(
        "{n}! = {}, {k}! = {}, {}! = {}",
        factorial(n_i)?,
        factorial(k_i)?,
        n - k,
        factorial(n_i - k_i)?
    ))
}

// ============================================================================
// Tests
// ============================================================================
