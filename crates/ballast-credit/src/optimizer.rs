//! Cost-weighted threshold optimization.

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Serialize;

use ballast_core::validation;
use ballast_core::{BallastResult, MetricValue};

use crate::confusion::ConfusionMatrix;
use crate::cost::CostModel;
use crate::grid::ThresholdGrid;
use crate::loan::{self, ScoredLoan};

/// Metrics and cost at one threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdSweepRow {
    /// Decision threshold; loans scoring at or above it are rejected.
    pub threshold: f64,
    /// Outcome counts.
    #[serde(flatten)]
    pub matrix: ConfusionMatrix,
    /// Share of correct decisions.
    pub accuracy: f64,
    /// Precision of the default prediction.
    pub precision: MetricValue,
    /// Recall of the default prediction.
    pub recall: MetricValue,
    /// F1 score.
    pub f1: MetricValue,
    /// Share of good loans approved.
    pub specificity: MetricValue,
    /// Estimated cost of the misclassifications.
    pub estimated_cost: Decimal,
}

impl ThresholdSweepRow {
    fn evaluate(
        loans: &[ScoredLoan],
        labels: &[bool],
        threshold: f64,
        cost: &CostModel,
    ) -> BallastResult<Self> {
        let matrix = ConfusionMatrix::tally(loans, labels, threshold);
        Ok(Self {
            threshold,
            accuracy: matrix.accuracy(),
            precision: matrix.precision(),
            recall: matrix.recall(),
            f1: matrix.f1(),
            specificity: matrix.specificity(),
            estimated_cost: cost.cost(matrix.false_positives, matrix.false_negatives)?,
            matrix,
        })
    }
}

/// Result of sweeping a threshold grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdSweep {
    rows: Vec<ThresholdSweepRow>,
    best_index: usize,
}

impl ThresholdSweep {
    /// One row per grid point, ascending by threshold.
    #[must_use]
    pub fn rows(&self) -> &[ThresholdSweepRow] {
        &self.rows
    }

    /// The cheapest row; the lowest threshold wins ties.
    #[must_use]
    pub fn best(&self) -> &ThresholdSweepRow {
        &self.rows[self.best_index]
    }

    /// Threshold of [`best`](Self::best).
    #[must_use]
    pub fn best_threshold(&self) -> f64 {
        self.best().threshold
    }
}

/// A single-threshold decision report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdEvaluation {
    /// Metrics and cost.
    pub row: ThresholdSweepRow,
    /// Loans scoring below the threshold.
    pub approved: usize,
    /// Loans scoring at or above the threshold.
    pub rejected: usize,
}

impl ThresholdEvaluation {
    /// Approved share of the book, in percent.
    #[must_use]
    pub fn approval_rate_pct(&self) -> f64 {
        let total = self.approved + self.rejected;
        if total == 0 {
            return 0.0;
        }
        self.approved as f64 / total as f64 * 100.0
    }
}

/// Picks the decision threshold that minimizes expected cost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdOptimizer {
    grid: ThresholdGrid,
    cost_model: CostModel,
}

impl ThresholdOptimizer {
    /// Optimizer over the default grid and cost model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the threshold grid.
    #[must_use]
    pub fn with_grid(mut self, grid: ThresholdGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the cost model.
    #[must_use]
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// The threshold grid.
    #[must_use]
    pub fn grid(&self) -> &ThresholdGrid {
        &self.grid
    }

    /// The cost model.
    #[must_use]
    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Evaluates every grid point against a labelled book.
    ///
    /// Grid points are independent; with the `parallel` feature they are
    /// evaluated on the rayon pool. Row order is the grid order either way.
    pub fn sweep(&self, loans: &[ScoredLoan]) -> BallastResult<ThresholdSweep> {
        self.cost_model.validate()?;
        let labels = loan::labels(loans)?;
        let cost = &self.cost_model;

        #[cfg(feature = "parallel")]
        let rows: Vec<ThresholdSweepRow> = {
            use rayon::prelude::*;
            self.grid
                .points()
                .par_iter()
                .map(|&t| ThresholdSweepRow::evaluate(loans, &labels, t, cost))
                .collect::<BallastResult<_>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<ThresholdSweepRow> = self
            .grid
            .points()
            .iter()
            .map(|&t| ThresholdSweepRow::evaluate(loans, &labels, t, cost))
            .collect::<BallastResult<_>>()?;

        let mut best_index = 0;
        for (i, row) in rows.iter().enumerate().skip(1) {
            if row.estimated_cost < rows[best_index].estimated_cost {
                best_index = i;
            }
        }

        if rows.iter().all(|r| !r.precision.is_applicable()) {
            warn!(
                "no loan scores at or above any threshold in [{}, {}]; precision is undefined across the grid",
                self.grid.min(),
                rows[rows.len() - 1].threshold
            );
        }
        debug!(
            "swept {} thresholds over {} loans; best threshold {} costs {}",
            rows.len(),
            loans.len(),
            rows[best_index].threshold,
            rows[best_index].estimated_cost
        );

        Ok(ThresholdSweep { rows, best_index })
    }

    /// Evaluates a single threshold, which need not lie on the grid.
    pub fn evaluate_at(
        &self,
        loans: &[ScoredLoan],
        threshold: f64,
    ) -> BallastResult<ThresholdEvaluation> {
        validation::unit_interval("threshold", threshold)?;
        self.cost_model.validate()?;
        let labels = loan::labels(loans)?;
        let row = ThresholdSweepRow::evaluate(loans, &labels, threshold, &self.cost_model)?;
        let rejected = loans.iter().filter(|l| l.predicted_default(threshold)).count();
        Ok(ThresholdEvaluation {
            row,
            approved: loans.len() - rejected,
            rejected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn book() -> Vec<ScoredLoan> {
        vec![
            ScoredLoan::new("g1", 0.05).with_label(false),
            ScoredLoan::new("g2", 0.15).with_label(false),
            ScoredLoan::new("g3", 0.25).with_label(false),
            ScoredLoan::new("g4", 0.55).with_label(false),
            ScoredLoan::new("b1", 0.45).with_label(true),
            ScoredLoan::new("b2", 0.65).with_label(true),
            ScoredLoan::new("b3", 0.85).with_label(true),
            ScoredLoan::new("b4", 0.95).with_label(true),
        ]
    }

    #[test]
    fn test_sweep_rows_follow_grid() {
        let sweep = ThresholdOptimizer::new().sweep(&book()).unwrap();
        assert_eq!(sweep.rows().len(), 9);
        let first = &sweep.rows()[0];
        assert_relative_eq!(first.threshold, 0.1);
        // everything but g1 is rejected at 0.1
        assert_eq!(first.matrix.true_positives, 4);
        assert_eq!(first.matrix.false_positives, 3);
        assert_eq!(first.estimated_cost, dec!(3000));
    }

    #[test]
    fn test_best_threshold() {
        let sweep = ThresholdOptimizer::new().sweep(&book()).unwrap();
        // 0.3 and 0.4 both leave one false positive (g4) and no misses
        let best = sweep.best();
        assert_relative_eq!(best.threshold, 0.3, epsilon = 1e-12);
        assert_eq!(best.matrix.false_negatives, 0);
        assert_eq!(best.estimated_cost, dec!(1000));
        assert_relative_eq!(sweep.best_threshold(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_ties_pick_lowest_threshold() {
        let loans = vec![
            ScoredLoan::new("a", 0.0).with_label(false),
            ScoredLoan::new("b", 1.0).with_label(true),
        ];
        let sweep = ThresholdOptimizer::new().sweep(&loans).unwrap();
        assert!(sweep.rows().iter().all(|r| r.estimated_cost.is_zero()));
        assert_relative_eq!(sweep.best_threshold(), 0.1);
    }

    #[test]
    fn test_precision_undefined_everywhere() {
        let loans = vec![
            ScoredLoan::new("a", 0.01).with_label(true),
            ScoredLoan::new("b", 0.02).with_label(false),
        ];
        let sweep = ThresholdOptimizer::new().sweep(&loans).unwrap();
        assert!(sweep.rows().iter().all(|r| r.precision == MetricValue::NotApplicable));
        assert!(sweep.rows().iter().all(|r| r.f1 == MetricValue::NotApplicable));
        assert_eq!(sweep.best().estimated_cost, dec!(7000));
    }

    #[test]
    fn test_custom_cost_model() {
        let optimizer = ThresholdOptimizer::new()
            .with_cost_model(CostModel::new(0.9, 0.1, 20_000.0).unwrap())
            .with_grid(ThresholdGrid::from_values(vec![0.5]).unwrap());
        let sweep = optimizer.sweep(&book()).unwrap();
        // at 0.5: g4 rejected (FP), b1 approved (FN)
        assert_eq!(sweep.best().estimated_cost, dec!(20000));
    }

    #[test]
    fn test_evaluate_at() {
        let eval = ThresholdOptimizer::new().evaluate_at(&book(), 0.5).unwrap();
        assert_eq!(eval.rejected, 4);
        assert_eq!(eval.approved, 4);
        assert_relative_eq!(eval.approval_rate_pct(), 50.0);
        assert_relative_eq!(eval.row.accuracy, 0.75);
        // g4 is the only good loan rejected at 0.5
        assert_eq!(eval.row.specificity, MetricValue::Value(0.75));
        assert!(ThresholdOptimizer::new().evaluate_at(&book(), 1.5).is_err());
    }

    #[test]
    fn test_sweep_surfaces_cost_overflow() {
        let mut cost_model = CostModel::default();
        cost_model.avg_loan_amount = 5e28;
        let optimizer = ThresholdOptimizer::new().with_cost_model(cost_model);
        assert!(optimizer.sweep(&book()).is_err());
        assert!(optimizer.evaluate_at(&book(), 0.1).is_err());
        assert!(optimizer.evaluate_at(&book(), 0.5).is_ok());

        cost_model.avg_loan_amount = 1e30;
        let optimizer = ThresholdOptimizer::new().with_cost_model(cost_model);
        assert!(optimizer.sweep(&book()).is_err());
    }

    #[test]
    fn test_sweep_rejects_bad_books() {
        let optimizer = ThresholdOptimizer::new();
        assert!(optimizer.sweep(&[]).is_err());
        assert!(optimizer.sweep(&[ScoredLoan::new("x", 0.3)]).is_err());
        assert!(optimizer
            .sweep(&[ScoredLoan::new("x", -0.3).with_label(true)])
            .is_err());
    }

    #[test]
    fn test_row_serializes_flat() {
        let sweep = ThresholdOptimizer::new().sweep(&book()).unwrap();
        let json = serde_json::to_value(sweep.best()).unwrap();
        assert_eq!(json["false_positives"], 1);
        assert!(json.get("specificity").is_some());
        assert!(json.get("matrix").is_none());
    }
}
