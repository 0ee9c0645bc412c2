//! Confusion matrix and the classification metrics derived from it.
//!
//! "Positive" means predicted default, i.e. the loan is rejected.

use ballast_core::{BallastResult, MetricValue};
use serde::{Deserialize, Serialize};

use crate::loan::{self, ScoredLoan};

/// Counts of each prediction outcome at one threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Defaults correctly rejected.
    pub true_positives: u64,
    /// Good loans wrongly rejected.
    pub false_positives: u64,
    /// Good loans correctly approved.
    pub true_negatives: u64,
    /// Defaults wrongly approved.
    pub false_negatives: u64,
}

impl ConfusionMatrix {
    /// Tallies a labelled book at `threshold` (`p >= threshold` is positive).
    pub fn from_loans(loans: &[ScoredLoan], threshold: f64) -> BallastResult<Self> {
        let labels = loan::labels(loans)?;
        Ok(Self::tally(loans, &labels, threshold))
    }

    pub(crate) fn tally(loans: &[ScoredLoan], labels: &[bool], threshold: f64) -> Self {
        let mut matrix = Self::default();
        for (loan, &actual) in loans.iter().zip(labels) {
            matrix.record(loan.predicted_default(threshold), actual);
        }
        matrix
    }

    /// Adds one observation.
    pub fn record(&mut self, predicted: bool, actual: bool) {
        match (predicted, actual) {
            (true, true) => self.true_positives += 1,
            (true, false) => self.false_positives += 1,
            (false, false) => self.true_negatives += 1,
            (false, true) => self.false_negatives += 1,
        }
    }

    /// Total observations.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Loans predicted to default.
    #[must_use]
    pub fn predicted_positive(&self) -> u64 {
        self.true_positives + self.false_positives
    }

    /// Loans that actually defaulted.
    #[must_use]
    pub fn actual_positive(&self) -> u64 {
        self.true_positives + self.false_negatives
    }

    /// Share of correct predictions; zero for an empty matrix.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_positives + self.true_negatives) as f64 / total as f64
    }

    /// TP / (TP + FP); not applicable when nothing is predicted positive.
    #[must_use]
    pub fn precision(&self) -> MetricValue {
        MetricValue::fraction(self.true_positives as f64, self.predicted_positive() as f64)
    }

    /// TP / (TP + FN); not applicable when the book has no defaults.
    #[must_use]
    pub fn recall(&self) -> MetricValue {
        MetricValue::fraction(self.true_positives as f64, self.actual_positive() as f64)
    }

    /// TN / (TN + FP); not applicable when the book has no good loans.
    #[must_use]
    pub fn specificity(&self) -> MetricValue {
        MetricValue::fraction(
            self.true_negatives as f64,
            (self.true_negatives + self.false_positives) as f64,
        )
    }

    /// Harmonic mean of precision and recall.
    ///
    /// Not applicable if either input is; zero when both are zero.
    #[must_use]
    pub fn f1(&self) -> MetricValue {
        match (self.precision(), self.recall()) {
            (MetricValue::Value(p), MetricValue::Value(r)) => {
                if p + r == 0.0 {
                    MetricValue::Value(0.0)
                } else {
                    MetricValue::Value(2.0 * p * r / (p + r))
                }
            }
            _ => MetricValue::NotApplicable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn matrix(tp: u64, fp: u64, tn: u64, fn_: u64) -> ConfusionMatrix {
        ConfusionMatrix {
            true_positives: tp,
            false_positives: fp,
            true_negatives: tn,
            false_negatives: fn_,
        }
    }

    #[test]
    fn test_metrics() {
        let m = matrix(30, 10, 50, 10);
        assert_relative_eq!(m.accuracy(), 0.8);
        assert_relative_eq!(m.precision().value().unwrap(), 0.75);
        assert_relative_eq!(m.recall().value().unwrap(), 0.75);
        assert_relative_eq!(m.f1().value().unwrap(), 0.75);
        assert_relative_eq!(m.specificity().value().unwrap(), 50.0 / 60.0);
    }

    #[test]
    fn test_no_predicted_positives() {
        let m = matrix(0, 0, 80, 20);
        assert_eq!(m.precision(), MetricValue::NotApplicable);
        assert_relative_eq!(m.recall().value().unwrap(), 0.0);
        assert_eq!(m.f1(), MetricValue::NotApplicable);
    }

    #[test]
    fn test_zero_precision_and_recall() {
        let m = matrix(0, 5, 5, 5);
        assert_relative_eq!(m.f1().value().unwrap(), 0.0);
    }

    #[test]
    fn test_from_loans_threshold_inclusive() {
        let loans = vec![
            ScoredLoan::new("a", 0.5).with_label(true),
            ScoredLoan::new("b", 0.49).with_label(false),
            ScoredLoan::new("c", 0.8).with_label(false),
            ScoredLoan::new("d", 0.1).with_label(true),
        ];
        let m = ConfusionMatrix::from_loans(&loans, 0.5).unwrap();
        assert_eq!(m, matrix(1, 1, 1, 1));
        assert_eq!(m.total(), 4);
    }

    #[test]
    fn test_unlabelled_rejected() {
        let loans = vec![ScoredLoan::new("a", 0.5)];
        assert!(ConfusionMatrix::from_loans(&loans, 0.5).is_err());
    }
}
