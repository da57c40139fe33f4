//! Simulated draws from a computed distribution.
//!
//! Builds a cumulative table over a [`FullDistribution`] and samples
//! outcomes `k` by binary search, so a class can compare an empirical
//! sample with the theoretical pmf and moments.
//!
//! # Reproducibility
//!
//! Use [`create_rng`] with a fixed seed. `SmallRng` is deterministic for a
//! given seed on the same platform.
//!
//! # Examples
//!
//! ```
//! use u_discrete::binomial::Binomial;
//! use u_discrete::sampling::{create_rng, OutcomeSampler};
//!
//! let dist = Binomial::new(10, 0.5).unwrap().full_distribution().unwrap();
//! let sampler = OutcomeSampler::new(&dist).unwrap();
//! let mut rng = create_rng(7);
//! let draws = sampler.simulate(1_000, &mut rng);
//! assert_eq!(draws.len(), 1_000);
//! assert!(draws.iter().all(|&k| k <= 10));
//! ```

use rand::Rng;

use crate::result::FullDistribution;
use crate::stats::MomentAccumulator;

/// Creates a fast, seeded random number generator.
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Samples outcomes of a [`FullDistribution`].
///
/// # Complexity
/// - Construction: O(n)
/// - Sampling: O(log n)
#[derive(Debug, Clone)]
pub struct OutcomeSampler {
    outcomes: Vec<u32>,
    cumulative: Vec<f64>,
    total: f64,
}

impl OutcomeSampler {
    /// Builds the cumulative table.
    ///
    /// # Returns
    /// `None` if the distribution is empty or carries no positive mass.
    pub fn new(distribution: &FullDistribution) -> Option<Self> {
        let mut outcomes = Vec::with_capacity(distribution.len());
        let mut cumulative = Vec::with_capacity(distribution.len());
        let mut total = 0.0;
        for point in distribution {
            if point.probability > 0.0 {
                total += point.probability;
            }
            outcomes.push(point.k);
            cumulative.push(total);
        }
        if total <= 0.0 || !total.is_finite() {
            return None;
        }
        Some(Self {
            outcomes,
            cumulative,
            total,
        })
    }

    /// Draws one outcome.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        let threshold = rng.random_range(0.0..self.total);
        // first index whose cumulative mass exceeds the threshold
        let idx = self.cumulative.partition_point(|&c| c <= threshold);
        self.outcomes[idx.min(self.outcomes.len() - 1)]
    }

    /// Draws `draws` outcomes.
    pub fn simulate<R: Rng>(&self, draws: usize, rng: &mut R) -> Vec<u32> {
        (0..draws).map(|_| self.sample(rng)).collect()
    }

    /// Draws `draws` outcomes and summarises them.
    pub fn simulate_moments<R: Rng>(&self, draws: usize, rng: &mut R) -> MomentAccumulator {
        (0..draws).map(|_| f64::from(self.sample(rng))).collect()
    }

    /// Number of outcomes in the table.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binomial::Binomial;
    use crate::hypergeometric::Hypergeometric;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let a: Vec<f64> = (0..10).map(|_| rng1.random()).collect();
        let b: Vec<f64> = (0..10).map(|_| rng2.random()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_point_mass_always_sampled() {
        let dist = Binomial::new(6, 1.0).unwrap().full_distribution().unwrap();
        let sampler = OutcomeSampler::new(&dist).unwrap();
        let mut rng = create_rng(1);
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut rng), 6);
        }
    }

    #[test]
    fn test_outcomes_stay_in_support() {
        let dist = Hypergeometric::new(10, 8, 5).unwrap().full_distribution().unwrap();
        let sampler = OutcomeSampler::new(&dist).unwrap();
        assert_eq!(sampler.len(), 3);
        let mut rng = create_rng(3);
        assert!(sampler.simulate(500, &mut rng).iter().all(|k| (3..=5).contains(k)));
    }

    #[test]
    fn test_simulated_moments_approach_theory() {
        let model = Binomial::new(20, 0.3).unwrap();
        let dist = model.full_distribution().unwrap();
        let sampler = OutcomeSampler::new(&dist).unwrap();
        let mut rng = create_rng(2024);
        let acc = sampler.simulate_moments(50_000, &mut rng);
        assert_eq!(acc.count(), 50_000);
        assert!((acc.mean().unwrap() - model.mean().value).abs() < 0.05);
        assert!((acc.variance().unwrap() - model.variance().unwrap().value).abs() < 0.1);
    }

    #[test]
    fn test_simulate_is_reproducible() {
        let dist = Binomial::new(12, 0.4).unwrap().full_distribution().unwrap();
        let sampler = OutcomeSampler::new(&dist).unwrap();
        let a = sampler.simulate(100, &mut create_rng(9));
        let b = sampler.simulate(100, &mut create_rng(9));
        assert_eq!(a, b);
    }
}
