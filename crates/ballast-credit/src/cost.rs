//! Misclassification cost model.
//!
//! A missed default (false negative) loses a share of the principal; a
//! wrongly rejected good loan (false positive) forgoes the margin it would
//! have earned. Costs are accumulated in [`Decimal`] so sweeps over large
//! books compare exactly.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ballast_core::validation;
use ballast_core::{BallastError, BallastResult};

use crate::loan::ScoredLoan;

/// Fallback average principal when the book carries no loan amounts.
pub const DEFAULT_AVG_LOAN_AMOUNT: f64 = 10_000.0;

fn default_bad_loss_rate() -> f64 {
    0.7
}

fn default_opportunity_cost_rate() -> f64 {
    0.1
}

fn default_avg_loan_amount() -> f64 {
    DEFAULT_AVG_LOAN_AMOUNT
}

/// Per-error cost weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Share of principal lost on an approved loan that defaults.
    #[serde(default = "default_bad_loss_rate")]
    pub bad_loss_rate: f64,
    /// Share of principal forgone on a rejected good loan.
    #[serde(default = "default_opportunity_cost_rate")]
    pub opportunity_cost_rate: f64,
    /// Principal used to price each error.
    #[serde(default = "default_avg_loan_amount")]
    pub avg_loan_amount: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            bad_loss_rate: default_bad_loss_rate(),
            opportunity_cost_rate: default_opportunity_cost_rate(),
            avg_loan_amount: default_avg_loan_amount(),
        }
    }
}

impl CostModel {
    /// Creates a cost model, validating each weight.
    pub fn new(
        bad_loss_rate: f64,
        opportunity_cost_rate: f64,
        avg_loan_amount: f64,
    ) -> BallastResult<Self> {
        let model = Self {
            bad_loss_rate,
            opportunity_cost_rate,
            avg_loan_amount,
        };
        model.validate()?;
        Ok(model)
    }

    /// Checks the rates lie in `[0, 1]` and the amount is positive and
    /// representable as a [`Decimal`].
    pub fn validate(&self) -> BallastResult<()> {
        validation::unit_interval("bad_loss_rate", self.bad_loss_rate)?;
        validation::unit_interval("opportunity_cost_rate", self.opportunity_cost_rate)?;
        validation::positive("avg_loan_amount", self.avg_loan_amount)?;
        to_decimal("avg_loan_amount", self.avg_loan_amount)?;
        Ok(())
    }

    /// Replaces the average principal with the mean of the amounts the
    /// book carries. Loans without an amount are skipped.
    ///
    /// The model is returned unchanged when no loan carries an amount.
    #[must_use]
    pub fn with_average_from(mut self, loans: &[ScoredLoan]) -> Self {
        let amounts: Vec<f64> = loans
            .iter()
            .filter_map(|l| l.loan_amount)
            .filter(|a| a.is_finite())
            .collect();
        if !amounts.is_empty() {
            self.avg_loan_amount = amounts.iter().sum::<f64>() / amounts.len() as f64;
        }
        self
    }

    /// Cost of `false_positives` rejected good loans and `false_negatives`
    /// approved defaults.
    ///
    /// Fails with `InvalidInput` when a weight is not representable as a
    /// [`Decimal`] or the total overflows it.
    pub fn cost(&self, false_positives: u64, false_negatives: u64) -> BallastResult<Decimal> {
        let avg = to_decimal("avg_loan_amount", self.avg_loan_amount)?;
        let bad_loss = to_decimal("bad_loss_rate", self.bad_loss_rate)?;
        let opportunity = to_decimal("opportunity_cost_rate", self.opportunity_cost_rate)?;
        let missed = weighted(false_negatives, avg, bad_loss);
        let forgone = weighted(false_positives, avg, opportunity);
        missed
            .zip(forgone)
            .and_then(|(m, f)| m.checked_add(f))
            .ok_or_else(|| {
                BallastError::invalid_input(
                    "avg_loan_amount",
                    format!("misclassification cost overflows at {}", self.avg_loan_amount),
                )
            })
    }
}

fn weighted(count: u64, avg: Decimal, rate: Decimal) -> Option<Decimal> {
    Decimal::from(count).checked_mul(avg)?.checked_mul(rate)
}

fn to_decimal(field: &str, value: f64) -> BallastResult<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| {
        BallastError::invalid_input(field, format!("{value} is not representable as a decimal"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_weights() {
        let model = CostModel::default();
        assert_eq!(model.cost(3, 2).unwrap(), dec!(17000));
        assert_eq!(model.cost(0, 0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_huge_average_amount_is_an_error() {
        // beyond Decimal's range: rejected up front instead of pricing at zero
        assert!(CostModel::new(0.7, 0.1, 1e30).is_err());

        // representable, but the product overflows
        let model = CostModel::new(0.7, 0.1, 5e28).unwrap();
        assert!(model.cost(1, 1).is_ok());
        let err = model.cost(0, 2).unwrap_err();
        assert!(err.to_string().contains("avg_loan_amount"));
        assert!(model.cost(0, 0).unwrap().is_zero());
    }

    #[test]
    fn test_average_from_book() {
        let loans = vec![
            ScoredLoan::new("a", 0.1).with_loan_amount(5_000.0),
            ScoredLoan::new("b", 0.9).with_loan_amount(15_000.0),
            ScoredLoan::new("c", 0.4),
        ];
        let model = CostModel::default().with_average_from(&loans);
        assert_relative_eq!(model.avg_loan_amount, 10_000.0);

        let unpriced = CostModel::default().with_average_from(&[ScoredLoan::new("x", 0.3)]);
        assert_relative_eq!(unpriced.avg_loan_amount, DEFAULT_AVG_LOAN_AMOUNT);
    }

    #[test]
    fn test_validation() {
        assert!(CostModel::new(0.7, 0.1, 10_000.0).is_ok());
        assert!(CostModel::new(1.7, 0.1, 10_000.0).is_err());
        assert!(CostModel::new(0.7, 0.1, 0.0).is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let model: CostModel = serde_json::from_str(r#"{"bad_loss_rate": 0.9}"#).unwrap();
        assert_relative_eq!(model.bad_loss_rate, 0.9);
        assert_relative_eq!(model.opportunity_cost_rate, 0.1);
        assert_relative_eq!(model.avg_loan_amount, 10_000.0);
    }
}
