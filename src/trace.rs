//! Step-by-step derivation traces.
//!
//! Every probability and moment result carries a [`Derivation`]: an
//! ordered, append-only list of named steps documenting how the final value
//! was computed. The sequence is built once through [`DerivationBuilder`]
//! and is read-only afterwards.
//!
//! # Examples
//!
//! ```
//! use u_discrete::trace::Derivation;
//!
//! let d = Derivation::builder()
//!     .step("Mean", "E(X) = n × p", 5.0, "10 × 0.5 = 5")
//!     .build();
//! assert_eq!(d.len(), 1);
//! assert_eq!(d.final_result(), Some(5.0));
//! ```

use serde::{Deserialize, Serialize};

/// One named, explained intermediate result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationStep {
    name: String,
    formula: String,
    result: f64,
    explanation: String,
}

impl DerivationStep {
    pub fn new(
        name: impl Into<String>,
        formula: impl Into<String>,
        result: f64,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            formula: formula.into(),
            result,
            explanation: explanation.into(),
        }
    }

    /// Short title, e.g. `"Binomial coefficient C(n, k)"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Symbolic formula with the concrete arguments substituted.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    /// The arithmetic behind [`result`](Self::result).
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Ordered, immutable sequence of [`DerivationStep`]s.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Derivation {
    steps: Vec<DerivationStep>,
}

impl Derivation {
    pub fn builder() -> DerivationBuilder {
        DerivationBuilder::default()
    }

    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DerivationStep> {
        self.steps.iter()
    }

    pub fn last(&self) -> Option<&DerivationStep> {
        self.steps.last()
    }

    /// Result of the last step: the value this derivation documents.
    pub fn final_result(&self) -> Option<f64> {
        self.last().map(DerivationStep::result)
    }

    /// Step names in order.
    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(DerivationStep::name).collect()
    }
}

impl<'a> IntoIterator for &'a Derivation {
    type Item = &'a DerivationStep;
    type IntoIter = std::slice::Iter<'a, DerivationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Append-only builder for a [`Derivation`].
#[derive(Debug, Default)]
pub struct DerivationBuilder {
    steps: Vec<DerivationStep>,
}

impl DerivationBuilder {
    /// Appends a step.
    pub fn step(
        mut self,
        name: impl Into<String>,
        formula: impl Into<String>,
        result: f64,
        explanation: impl Into<String>,
    ) -> Self {
        self.steps
            .push(DerivationStep::new(name, formula, result, explanation));
        self
    }

    /// Appends every step of an existing derivation, preserving order.
    pub fn extend(mut self, prior: &Derivation) -> Self {
        self.steps.extend(prior.steps.iter().cloned());
        self
    }

    pub fn build(self) -> Derivation {
        Derivation { steps: self.steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let d = Derivation::builder()
            .step("a", "f_a", 1.0, "one")
            .step("b", "f_b", 2.0, "two")
            .step("c", "f_c", 3.0, "three")
            .build();
        assert_eq!(d.names(), vec!["a", "b", "c"]);
        assert_eq!(d.final_result(), Some(3.0));
        assert_eq!(d.steps()[1].formula(), "f_b");
        assert_eq!(d.steps()[1].explanation(), "two");
    }

    #[test]
    fn test_extend_prepends_prior_chain() {
        let variance = Derivation::builder()
            .step("Variance", "n·p·q", 2.5, "")
            .build();
        let sd = Derivation::builder()
            .extend(&variance)
            .step("Standard deviation", "√Var", 2.5_f64.sqrt(), "")
            .build();
        assert_eq!(sd.len(), 2);
        assert_eq!(sd.steps()[0], variance.steps()[0]);
        // the source chain is untouched
        assert_eq!(variance.len(), 1);
    }

    #[test]
    fn test_empty_derivation() {
        let d = Derivation::builder().build();
        assert!(d.is_empty());
        assert_eq!(d.final_result(), None);
        assert_eq!(d.iter().count(), 0);
    }

    #[test]
    fn test_serializes_as_step_list() {
        let d = Derivation::builder().step("x", "y", 0.5, "z").build();
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "x");
        assert_eq!(json[0]["result"], 0.5);
    }
}
