//! Factorial and binomial-coefficient primitives.
//!
//! Both engines share this kernel. Values are plain `f64` products, so
//! `n!` overflows to `+∞` for `n ≥ 171`. The kernel does not clamp: callers
//! must treat a non-finite coefficient as an error, never as a probability
//! component (see [`finite_coefficient`]).
//!
//! # Memoization
//!
//! A full-distribution sweep needs `C(n, k)` for every `k` in the support.
//! Recomputing factorials per call is O(n) each, O(n²) per sweep.
//! [`FactorialTable`] computes `0!..=n!` once with the same running product
//! as [`factorial`], so both paths produce bit-identical coefficients.

use crate::error::{DistributionError, Result};

/// Largest `n` whose factorial is finite in `f64`.
pub const MAX_FINITE_FACTORIAL: i64 = 170;

/// Computes `n!` as a floating-point product `1·2·…·n`.
///
/// # Errors
/// Returns [`DistributionError::Domain`] if `n < 0`.
///
/// # Examples
/// ```
/// use u_discrete::combinatorics::factorial;
/// assert_eq!(factorial(0).unwrap(), 1.0);
/// assert_eq!(factorial(5).unwrap(), 120.0);
/// assert!(factorial(171).unwrap().is_infinite());
/// assert!(factorial(-1).is_err());
/// ```
pub fn factorial(n: i64) -> Result<f64> {
    if n < 0 {
        return Err(DistributionError::domain(format!(
            "factorial is undefined for negative numbers, got {n}"
        )));
    }
    let mut product = 1.0_f64;
    for i in 2..=n {
        product *= i as f64;
    }
    Ok(product)
}

/// Computes the binomial coefficient `C(n, k) = n! / (k!·(n−k)!)`.
///
/// # Errors
/// Returns [`DistributionError::Range`] unless `0 ≤ k ≤ n`.
///
/// # Examples
/// ```
/// use u_discrete::combinatorics::binomial_coefficient;
/// assert_eq!(binomial_coefficient(10, 5).unwrap(), 252.0);
/// assert_eq!(binomial_coefficient(7, 0).unwrap(), 1.0);
/// assert!(binomial_coefficient(3, 4).is_err());
/// ```
pub fn binomial_coefficient(n: i64, k: i64) -> Result<f64> {
    if k < 0 || k > n {
        return Err(DistributionError::range(format!(
            "C(n, k) requires 0 <= k <= n, got n={n}, k={k}"
        )));
    }
    let numerator = factorial(n)?;
    let denominator = factorial(k)? * factorial(n - k)?;
    Ok(numerator / denominator)
}

/// Rejects an overflowed coefficient.
///
/// `label` names the coefficient in the error message, e.g. `"C(200, 3)"`.
pub(crate) fn finite_coefficient(value: f64, label: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistributionError::domain(format!(
            "{label} overflows f64 (factorial arguments must not exceed {MAX_FINITE_FACTORIAL})"
        )))
    }
}

/// Rejects a factorial argument whose value is known to overflow.
///
/// Engines call this before building a table or trace, so a huge `n` fails
/// in O(1) instead of after an O(n) product or allocation.
pub(crate) fn ensure_finite_factorial(n: u32, label: &str) -> Result<()> {
    if i64::from(n) > MAX_FINITE_FACTORIAL {
        return Err(DistributionError::domain(format!(
            "{label}={n} exceeds {MAX_FINITE_FACTORIAL}: factorials overflow f64"
        )));
    }
    Ok(())
}

// ============================================================================
// Memoized factorials
// ============================================================================

/// Pre-computed factorials `0!, 1!, …, n!`.
///
/// Built with the same left-to-right running product as [`factorial`], so
/// `table.factorial(i) == factorial(i)` bit for bit.
///
/// # Complexity
/// - Construction: O(n)
/// - Lookup / coefficient: O(1)
///
/// # Examples
/// ```
/// use u_discrete::combinatorics::{binomial_coefficient, FactorialTable};
/// let table = FactorialTable::up_to(20);
/// assert_eq!(table.coefficient(20, 7), Some(binomial_coefficient(20, 7).unwrap()));
/// assert_eq!(table.coefficient(21, 1), None);
/// ```
#[derive(Debug, Clone)]
pub struct FactorialTable {
    values: Vec<f64>,
}

impl FactorialTable {
    /// Builds the table for arguments `0..=n`.
    pub fn up_to(n: u32) -> Self {
        let mut values = Vec::with_capacity(n as usize + 1);
        values.push(1.0);
        let mut product = 1.0_f64;
        for i in 1..=n {
            if i >= 2 {
                product *= f64::from(i);
            }
            values.push(product);
        }
        Self { values }
    }

    /// Largest argument covered by the table.
    pub fn max_argument(&self) -> u32 {
        // the table always holds at least 0!
        (self.values.len() - 1) as u32
    }

    /// Returns `n!`, or `None` if `n` exceeds the table.
    pub fn factorial(&self, n: u32) -> Option<f64> {
        self.values.get(n as usize).copied()
    }

    /// Returns `C(n, k)`, or `None` if `k > n` or `n` exceeds the table.
    pub fn coefficient(&self, n: u32, k: u32) -> Option<f64> {
        if k > n {
            return None;
        }
        let numerator = self.factorial(n)?;
        let denominator = self.factorial(k)? * self.factorial(n - k)?;
        Some(numerator / denominator)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial_small_values() {
        assert_eq!(factorial(0).unwrap(), 1.0);
        assert_eq!(factorial(1).unwrap(), 1.0);
        assert_eq!(factorial(2).unwrap(), 2.0);
        assert_eq!(factorial(10).unwrap(), 3_628_800.0);
    }

    #[test]
    fn test_factorial_negative_is_domain_error() {
        let err = factorial(-3).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_factorial_overflow_boundary() {
        assert!(factorial(MAX_FINITE_FACTORIAL).unwrap().is_finite());
        assert!(factorial(MAX_FINITE_FACTORIAL + 1).unwrap().is_infinite());
    }

    #[test]
    fn test_coefficient_known_values() {
        assert_eq!(binomial_coefficient(8, 2).unwrap(), 28.0);
        assert_eq!(binomial_coefficient(12, 3).unwrap(), 220.0);
        assert_eq!(binomial_coefficient(20, 5).unwrap(), 15504.0);
    }

    #[test]
    fn test_coefficient_range_errors() {
        assert!(binomial_coefficient(5, 6).unwrap_err().is_range());
        assert!(binomial_coefficient(5, -1).unwrap_err().is_range());
    }

    #[test]
    fn test_coefficient_negative_n_is_range_error() {
        // k <= n fails first for any k >= 0
        assert!(binomial_coefficient(-2, 0).unwrap_err().is_range());
    }

    #[test]
    fn test_coefficient_overflow_is_not_finite() {
        let c = binomial_coefficient(200, 3).unwrap();
        assert!(!c.is_finite());
        assert!(finite_coefficient(c, "C(200, 3)").unwrap_err().is_domain());
    }

    #[test]
    fn test_ensure_finite_factorial_boundary() {
        assert!(ensure_finite_factorial(170, "n").is_ok());
        assert!(ensure_finite_factorial(171, "n").unwrap_err().is_domain());
        assert!(ensure_finite_factorial(u32::MAX, "N").unwrap_err().is_domain());
    }

    #[test]
    fn test_table_matches_kernel_bitwise() {
        let table = FactorialTable::up_to(170);
        for i in 0..=170_u32 {
            assert_eq!(
                table.factorial(i).unwrap().to_bits(),
                factorial(i64::from(i)).unwrap().to_bits(),
                "{i}!"
            );
        }
        for k in 0..=100_u32 {
            assert_eq!(
                table.coefficient(100, k).unwrap().to_bits(),
                binomial_coefficient(100, i64::from(k)).unwrap().to_bits()
            );
        }
    }

    #[test]
    fn test_table_bounds() {
        let table = FactorialTable::up_to(0);
        assert_eq!(table.max_argument(), 0);
        assert_eq!(table.factorial(0), Some(1.0));
        assert_eq!(table.factorial(1), None);
        assert_eq!(table.coefficient(0, 0), Some(1.0));
        assert_eq!(table.coefficient(3, 4), None);
    }
}
