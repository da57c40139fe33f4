//! Frequency tabulation of observed values.
//!
//! Turns a column of already-parsed cells into counts per distinct value,
//! from which a population size `N` and a success count `M` follow once a
//! success value is chosen. Reading files is the caller's business.
//!
//! # Examples
//!
//! ```
//! use u_discrete::frequency::FrequencyTable;
//!
//! let table = FrequencyTable::from_values(["yes", "no", "yes", "", "yes"]);
//! assert_eq!(table.total(), 5);
//! assert_eq!(table.count("yes"), 3);
//! assert_eq!(table.count("N/A"), 1);
//!
//! let counts = table.population_counts("yes").unwrap();
//! assert_eq!((counts.population, counts.successes), (5, 3));
//! assert!((counts.success_rate() - 0.6).abs() < 1e-15);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DistributionError, Result};

/// Label under which empty cells are counted.
pub const MISSING_LABEL: &str = "N/A";

/// Counts per distinct value, ordered by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    counts: BTreeMap<String, u32>,
    total: u32,
}

/// Population size and success count derived from a [`FrequencyTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub population: u32,
    pub successes: u32,
}

impl PopulationCounts {
    /// Estimated per-trial success probability `M/N`.
    pub fn success_rate(&self) -> f64 {
        f64::from(self.successes) / f64::from(self.population)
    }
}

impl FrequencyTable {
    /// Tabulates `values`. Empty cells count as [`MISSING_LABEL`].
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for value in values {
            table.record(value.as_ref());
        }
        table
    }

    /// Adds one observation, keyed by its raw text.
    ///
    /// No normalization is applied: `" ok"` and `"ok"` are distinct values
    /// and a whitespace-only cell is a value of its own. Only the empty
    /// string counts as [`MISSING_LABEL`].
    pub fn record(&mut self, value: &str) {
        let key = if value.is_empty() { MISSING_LABEL } else { value };
        *self.counts.entry(key.to_owned()).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of observations (`N`).
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of `value`; `0` if never seen.
    pub fn count(&self, value: &str) -> u32 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// `(value, count)` pairs in value order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Share of observations equal to `value`, or `None` when empty.
    pub fn relative_frequency(&self, value: &str) -> Option<f64> {
        (self.total > 0).then(|| f64::from(self.count(value)) / f64::from(self.total))
    }

    /// Treats `success` as the success value: `N` = all observations,
    /// `M` = occurrences of `success`.
    ///
    /// # Errors
    /// [`DistributionError::Range`] if the table is empty.
    pub fn population_counts(&self, success: &str) -> Result<PopulationCounts> {
        if self.total == 0 {
            return Err(DistributionError::range(
                "cannot derive a population from an empty column",
            ));
        }
        Ok(PopulationCounts {
            population: self.total,
            successes: self.count(success),
        })
    }
}
