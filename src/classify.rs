//! Skewness and kurtosis labels shared by both engines.
//!
//! | Measure | Condition | Class |
//! |---|---|---|
//! | skewness γ | \|γ\| < 0.05 | [`SkewnessClass::Symmetric`] |
//! | | γ < 0 | [`SkewnessClass::Negative`] |
//! | | otherwise | [`SkewnessClass::Positive`] |
//! | kurtosis κ | κ < −0.1 | [`KurtosisClass::Platykurtic`] |
//! | | \|κ\| ≤ 0.1 | [`KurtosisClass::Mesokurtic`] |
//! | | otherwise | [`KurtosisClass::Leptokurtic`] |
//!
//! Thresholds are fixed. Boundary values fall on the side the comparison
//! operators above dictate: `γ = ±0.05` is skewed, `κ = ±0.1` is
//! mesokurtic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Half-width of the "symmetric" skewness band (exclusive).
pub const SKEWNESS_THRESHOLD: f64 = 0.05;

/// Half-width of the "mesokurtic" kurtosis band (inclusive).
pub const KURTOSIS_THRESHOLD: f64 = 0.1;

/// Direction of asymmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkewnessClass {
    /// Neutral skew: symmetric distribution.
    Symmetric,
    /// Negative skew: longer left tail.
    Negative,
    /// Positive skew: longer right tail.
    Positive,
}

impl SkewnessClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Symmetric => "Neutral skew (symmetric distribution)",
            Self::Negative => "Negative skew (left-skewed)",
            Self::Positive => "Positive skew (right-skewed)",
        }
    }
}

/// Tail weight relative to the normal baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KurtosisClass {
    /// Flattened curve, negative kurtosis.
    Platykurtic,
    /// Normal-like bell, kurtosis near zero.
    Mesokurtic,
    /// Peaked curve, positive kurtosis.
    Leptokurtic,
}

impl KurtosisClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Platykurtic => "Platykurtic (flattened curve, negative kurtosis)",
            Self::Mesokurtic => "Mesokurtic (bell curve, kurtosis near zero)",
            Self::Leptokurtic => "Leptokurtic (peaked curve, positive kurtosis)",
        }
    }
}

/// Classification attached to a shape moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Skewness(SkewnessClass),
    Kurtosis(KurtosisClass),
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Self::Skewness(c) => c.label(),
            Self::Kurtosis(c) => c.label(),
        }
    }
}

impl fmt::Display for SkewnessClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for KurtosisClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a skewness value.
///
/// # Examples
/// ```
/// use u_discrete::classify::{classify_skewness, SkewnessClass};
/// assert_eq!(classify_skewness(0.0), SkewnessClass::Symmetric);
/// assert_eq!(classify_skewness(-0.3), SkewnessClass::Negative);
/// assert_eq!(classify_skewness(0.05), SkewnessClass::Positive);
/// ```
pub fn classify_skewness(gamma: f64) -> SkewnessClass {
    if gamma.abs() < SKEWNESS_THRESHOLD {
        SkewnessClass::Symmetric
    } else if gamma < 0.0 {
        SkewnessClass::Negative
    } else {
        SkewnessClass::Positive
    }
}

/// Classifies a kurtosis value.
///
/// # Examples
/// ```
/// use u_discrete::classify::{classify_kurtosis, KurtosisClass};
/// assert_eq!(classify_kurtosis(-0.2), KurtosisClass::Platykurtic);
/// assert_eq!(classify_kurtosis(0.1), KurtosisClass::Mesokurtic);
/// assert_eq!(classify_kurtosis(3.0), KurtosisClass::Leptokurtic);
/// ```
pub fn classify_kurtosis(kappa: f64) -> KurtosisClass {
    if kappa < -KURTOSIS_THRESHOLD {
        KurtosisClass::Platykurtic
    } else if kappa.abs() <= KURTOSIS_THRESHOLD {
        KurtosisClass::Mesokurtic
    } else {
        KurtosisClass::Leptokurtic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skewness_boundaries() {
        assert_eq!(classify_skewness(0.049_999), SkewnessClass::Symmetric);
        assert_eq!(classify_skewness(-0.049_999), SkewnessClass::Symmetric);
        // |γ| < 0.05 is strict
        assert_eq!(classify_skewness(0.05), SkewnessClass::Positive);
        assert_eq!(classify_skewness(-0.05), SkewnessClass::Negative);
    }

    #[test]
    fn test_kurtosis_boundaries() {
        // |κ| <= 0.1 is inclusive on both ends
        assert_eq!(classify_kurtosis(0.1), KurtosisClass::Mesokurtic);
        assert_eq!(classify_kurtosis(-0.1), KurtosisClass::Mesokurtic);
        assert_eq!(classify_kurtosis(0.100_001), KurtosisClass::Leptokurtic);
        assert_eq!(classify_kurtosis(-0.100_001), KurtosisClass::Platykurtic);
        assert_eq!(classify_kurtosis(0.0), KurtosisClass::Mesokurtic);
    }

    #[test]
    fn test_nan_falls_through_to_last_branch() {
        assert_eq!(classify_skewness(f64::NAN), SkewnessClass::Positive);
        assert_eq!(classify_kurtosis(f64::NAN), KurtosisClass::Leptokurtic);
    }

    #[test]
    fn test_labels_and_display() {
        let c = Classification::Kurtosis(KurtosisClass::Mesokurtic);
        assert_eq!(c.to_string(), KurtosisClass::Mesokurtic.label());
        assert!(SkewnessClass::Negative.label().contains("left"));
        assert_eq!(
            Classification::Skewness(SkewnessClass::Positive).label(),
            SkewnessClass::Positive.to_string()
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn skewness_class_is_odd(g in 0.0_f64..10.0) {
            let expected = match classify_skewness(g) {
                SkewnessClass::Positive => SkewnessClass::Negative,
                other => other,
            };
            prop_assert_eq!(classify_skewness(-g), expected);
        }

        #[test]
        fn kurtosis_class_is_monotonic(a in -5.0_f64..5.0, b in -5.0_f64..5.0) {
            let rank = |c: KurtosisClass| match c {
                KurtosisClass::Platykurtic => 0,
                KurtosisClass::Mesokurtic => 1,
                KurtosisClass::Leptokurtic => 2,
            };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(classify_kurtosis(lo)) <= rank(classify_kurtosis(hi)));
        }
    }
}
