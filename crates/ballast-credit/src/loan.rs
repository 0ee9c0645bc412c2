//! Scored loans and input checks.

use ballast_core::validation;
use ballast_core::{BallastError, BallastResult};
use serde::{Deserialize, Serialize};

/// A loan with a model-predicted default probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLoan {
    /// Loan identifier.
    pub id: String,
    /// Model features, kept for reporting.
    #[serde(default)]
    pub features: Vec<f64>,
    /// Predicted probability of default, in `[0, 1]`.
    pub predicted_probability: f64,
    /// Observed outcome: `true` if the loan defaulted.
    #[serde(default)]
    pub actual_label: Option<bool>,
    /// Principal amount.
    #[serde(default)]
    pub loan_amount: Option<f64>,
}

impl ScoredLoan {
    /// Creates an unlabelled loan.
    #[must_use]
    pub fn new(id: impl Into<String>, predicted_probability: f64) -> Self {
        Self {
            id: id.into(),
            features: Vec::new(),
            predicted_probability,
            actual_label: None,
            loan_amount: None,
        }
    }

    /// Sets the observed outcome.
    #[must_use]
    pub fn with_label(mut self, defaulted: bool) -> Self {
        self.actual_label = Some(defaulted);
        self
    }

    /// Sets the principal amount.
    #[must_use]
    pub fn with_loan_amount(mut self, amount: f64) -> Self {
        self.loan_amount = Some(amount);
        self
    }

    /// Sets the feature vector.
    #[must_use]
    pub fn with_features(mut self, features: Vec<f64>) -> Self {
        self.features = features;
        self
    }

    /// Whether the loan is predicted to default at `threshold`.
    #[must_use]
    pub fn predicted_default(&self, threshold: f64) -> bool {
        self.predicted_probability >= threshold
    }

    fn require_label(&self) -> BallastResult<bool> {
        self.actual_label.ok_or_else(|| {
            BallastError::invalid_input(
                "actual_label",
                format!("loan '{}' has no observed outcome", self.id),
            )
        })
    }
}

/// Checks the set is non-empty and every probability lies in `[0, 1]`.
pub fn validate_scores(loans: &[ScoredLoan]) -> BallastResult<()> {
    if loans.is_empty() {
        return Err(BallastError::invalid_input(
            "loans",
            "at least one scored loan is required",
        ));
    }
    for loan in loans {
        validation::unit_interval("predicted_probability", loan.predicted_probability)?;
    }
    Ok(())
}

/// Checks scores and returns the labels, failing on the first unlabelled loan.
pub fn labels(loans: &[ScoredLoan]) -> BallastResult<Vec<bool>> {
    validate_scores(loans)?;
    loans.iter().map(ScoredLoan::require_label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let loan = ScoredLoan::new("L-1", 0.35)
            .with_label(true)
            .with_loan_amount(12_000.0)
            .with_features(vec![0.1, 0.2]);
        assert!(loan.predicted_default(0.3));
        assert!(!loan.predicted_default(0.4));
        assert!(loan.predicted_default(0.35));
        assert_eq!(loan.features.len(), 2);
    }

    #[test]
    fn test_labels() {
        let loans = vec![
            ScoredLoan::new("a", 0.2).with_label(false),
            ScoredLoan::new("b", 0.8).with_label(true),
        ];
        assert_eq!(labels(&loans).unwrap(), vec![false, true]);

        let missing = vec![ScoredLoan::new("a", 0.2)];
        let err = labels(&missing).unwrap_err();
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_validate_scores() {
        assert!(validate_scores(&[]).is_err());
        assert!(validate_scores(&[ScoredLoan::new("x", 1.2)]).is_err());
        assert!(validate_scores(&[ScoredLoan::new("x", f64::NAN)]).is_err());
        assert!(validate_scores(&[ScoredLoan::new("x", 1.0)]).is_ok());
    }

    #[test]
    fn test_deserialize_minimal() {
        let loan: ScoredLoan =
            serde_json::from_str(r#"{"id": "L-9", "predicted_probability": 0.42}"#).unwrap();
        assert!(loan.actual_label.is_none());
        assert!(loan.features.is_empty());
    }
}
