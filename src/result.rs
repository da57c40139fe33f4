//! Parameter and result values.
//!
//! Everything here is created fresh per query, immutable once returned,
//! and owned by the caller. All types serialize with `serde` so a
//! presentation layer can ship them as-is.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::stats::{kahan_sum, CompensatedSum};
use crate::trace::Derivation;

/// Default tolerance for [`FullDistribution::is_normalized`].
pub const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// Parameters of one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum DistributionParameters {
    /// `n` independent trials with success probability `p`, optionally drawn
    /// from a population of size `N`.
    Binomial {
        trials: u32,
        p: f64,
        population: Option<u32>,
    },
    /// `n` draws without replacement from `N` elements, `M` of them
    /// successes.
    Hypergeometric {
        population: u32,
        successes: u32,
        sample: u32,
    },
}

impl DistributionParameters {
    /// Number of trials / draws `n`.
    pub fn sample_size(&self) -> u32 {
        match *self {
            Self::Binomial { trials, .. } => trials,
            Self::Hypergeometric { sample, .. } => sample,
        }
    }
}

/// The event a [`DistributionResult`] measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// `X = k`
    Exactly(u32),
    /// `k1 ≤ X ≤ k2`
    Between(u32, u32),
}

/// Probability of one outcome `k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityMassPoint {
    pub k: u32,
    pub probability: f64,
    /// `probability × 100`.
    pub percentage: f64,
}

impl ProbabilityMassPoint {
    pub fn new(k: u32, probability: f64) -> Self {
        Self {
            k,
            probability,
            percentage: probability * 100.0,
        }
    }
}

// ============================================================================
// Full distribution
// ============================================================================

/// The pmf over the whole support, ordered by ascending `k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullDistribution {
    parameters: DistributionParameters,
    points: Vec<ProbabilityMassPoint>,
}

/// Moments computed directly from a pmf, independent of any closed form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmfMoments {
    pub mean: f64,
    pub variance: f64,
    /// `None` when the variance is zero.
    pub skewness: Option<f64>,
    /// Excess kurtosis `μ₄/σ⁴ − 3`; `None` when the variance is zero.
    pub excess_kurtosis: Option<f64>,
}

impl FullDistribution {
    /// `points` must be sorted by ascending, contiguous `k`.
    pub(crate) fn new(parameters: DistributionParameters, points: Vec<ProbabilityMassPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[1].k == w[0].k + 1));
        Self { parameters, points }
    }

    pub fn parameters(&self) -> &DistributionParameters {
        &self.parameters
    }

    pub fn points(&self) -> &[ProbabilityMassPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbabilityMassPoint> {
        self.points.iter()
    }

    /// Smallest and largest `k` covered, or `None` when empty.
    pub fn support(&self) -> Option<RangeInclusive<u32>> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some(first.k..=last.k)
    }

    /// Point for outcome `k`, or `None` outside the support.
    pub fn get(&self, k: u32) -> Option<&ProbabilityMassPoint> {
        let first = self.points.first()?.k;
        let offset = k.checked_sub(first)?;
        self.points.get(offset as usize)
    }

    /// Compensated sum of all probabilities.
    pub fn total_probability(&self) -> f64 {
        let probs: Vec<f64> = self.points.iter().map(|p| p.probability).collect();
        kahan_sum(&probs)
    }

    /// Whether the probabilities sum to one within `tol`.
    pub fn is_normalized(&self, tol: f64) -> bool {
        (self.total_probability() - 1.0).abs() <= tol
    }

    /// Most probable outcome. Ties resolve to the smallest `k`.
    pub fn mode(&self) -> Option<u32> {
        let mut best: Option<&ProbabilityMassPoint> = None;
        for point in &self.points {
            let better = match best {
                None => true,
                Some(b) => point.probability > b.probability,
            };
            if better {
                best = Some(point);
            }
        }
        best.map(|p| p.k)
    }

    /// Cumulative probabilities `P(X ≤ k)` aligned with [`points`](Self::points).
    pub fn cumulative(&self) -> Vec<f64> {
        let mut acc = CompensatedSum::new();
        self.points
            .iter()
            .map(|p| {
                acc.add(p.probability);
                acc.total()
            })
            .collect()
    }

    /// Mean, variance, skewness and excess kurtosis computed from the pmf.
    ///
    /// Useful to validate closed-form moment formulas against the
    /// distribution they describe. Returns `None` when empty.
    pub fn moments(&self) -> Option<PmfMoments> {
        if self.points.is_empty() {
            return None;
        }
        let weighted = |f: &dyn Fn(f64) -> f64| {
            let terms: Vec<f64> = self
                .points
                .iter()
                .map(|p| f(f64::from(p.k)) * p.probability)
                .collect();
            kahan_sum(&terms)
        };
        let mean = weighted(&|k| k);
        let variance = weighted(&|k| (k - mean).powi(2));
        let (skewness, excess_kurtosis) = if variance > 0.0 {
            let m3 = weighted(&|k| (k - mean).powi(3));
            let m4 = weighted(&|k| (k - mean).powi(4));
            (
                Some(m3 / variance.powf(1.5)),
                Some(m4 / (variance * variance) - 3.0),
            )
        } else {
            (None, None)
        };
        Some(PmfMoments {
            mean,
            variance,
            skewness,
            excess_kurtosis,
        })
    }
}

impl<'a> IntoIterator for &'a FullDistribution {
    type Item = &'a ProbabilityMassPoint;
    type IntoIter = std::slice::Iter<'a, ProbabilityMassPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

// ============================================================================
// Query results
// ============================================================================

/// Probability of a point or range event, with its derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub probability: f64,
    pub event: Event,
    pub parameters: DistributionParameters,
    pub derivation: Derivation,
}

impl DistributionResult {
    pub fn percentage(&self) -> f64 {
        self.probability * 100.0
    }
}

/// Result of a range query `P(k1 ≤ X ≤ k2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeProbability {
    /// The range sum.
    pub total: DistributionResult,
    /// `P(X = k1)`, shown next to the range sum.
    pub at_lower: DistributionResult,
    /// One point per `k` in `[k1, k2]`, ascending.
    pub details: Vec<ProbabilityMassPoint>,
}

impl RangeProbability {
    pub fn probability(&self) -> f64 {
        self.total.probability
    }

    /// Builds the range result from point results for `k1..=k2`.
    ///
    /// The sum is taken left to right in ascending `k`, so it equals adding
    /// the individual point queries in the same order.
    pub(crate) fn from_points(
        parameters: DistributionParameters,
        k1: u32,
        k2: u32,
        points: Vec<DistributionResult>,
    ) -> Option<Self> {
        let at_lower = points.first()?.clone();
        let mut total = 0.0;
        let mut details = Vec::with_capacity(points.len());
        for (k, point) in (k1..=k2).zip(&points) {
            total += point.probability;
            details.push(ProbabilityMassPoint::new(k, point.probability));
        }
        let terms: Vec<String> = details
            .iter()
            .map(|d| format!("{:.6}", d.probability))
            .collect();
        let derivation = Derivation::builder()
            .step(
                "Range probability",
                format!("P({k1} ≤ X ≤ {k2}) = Σ P(X = k) for k = {k1}..{k2}"),
                total,
                format!("{} = {total}", terms.join(" + ")),
            )
            .build();
        Some(Self {
            total: DistributionResult {
                probability: total,
                event: Event::Between(k1, k2),
                parameters,
                derivation,
            },
            at_lower,
            details,
        })
    }
}

/// Value of a moment, with an optional shape classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentResult {
    pub value: f64,
    pub classification: Option<Classification>,
    pub derivation: Derivation,
}

impl MomentResult {
    pub(crate) fn plain(value: f64, derivation: Derivation) -> Self {
        Self {
            value,
            classification: None,
            derivation,
        }
    }

    pub(crate) fn classified(value: f64, classification: Classification, derivation: Derivation) -> Self {
        Self {
            value,
            classification: Some(classification),
            derivation,
        }
    }
}
