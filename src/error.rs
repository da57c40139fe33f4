//! Error types for distribution computations.
//!
//! Every failure is raised at the first violated precondition, before any
//! derivation is built. There are no partial results.

use thiserror::Error;

/// Errors raised by the combinatorics kernel and the distribution engines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// Mathematically undefined input: negative factorial argument,
    /// non-positive correction denominator, factorial overflow, zero
    /// variance in a moment ratio.
    #[error("domain error: {0}")]
    Domain(String),

    /// A parameter lies outside its valid interval.
    #[error("range error: {0}")]
    Range(String),

    /// An inverted range query, or range bounds outside the support.
    #[error("ordering error: {0}")]
    Ordering(String),
}

impl DistributionError {
    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    pub(crate) fn ordering(msg: impl Into<String>) -> Self {
        Self::Ordering(msg.into())
    }

    /// Returns `true` for [`DistributionError::Domain`].
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Returns `true` for [`DistributionError::Range`].
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range(_))
    }

    /// Returns `true` for [`DistributionError::Ordering`].
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::Ordering(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DistributionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            DistributionError::domain("x").to_string(),
            "domain error: x"
        );
        assert_eq!(DistributionError::range("y").to_string(), "range error: y");
        assert_eq!(
            DistributionError::ordering("z").to_string(),
            "ordering error: z"
        );
    }

    #[test]
    fn test_kind_predicates() {
        assert!(DistributionError::domain("a").is_domain());
        assert!(DistributionError::range("a").is_range());
        assert!(DistributionError::ordering("a").is_ordering());
        assert!(!DistributionError::range("a").is_domain());
    }
}
