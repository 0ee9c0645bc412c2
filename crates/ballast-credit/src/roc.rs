//! Ranking quality of the scores: ROC curve, AUC and log loss.

use ballast_core::{BallastError, BallastResult};
use serde::{Deserialize, Serialize};

use crate::loan::{self, ScoredLoan};

/// Probabilities are clipped to `[EPS, 1 - EPS]` before taking logs.
pub const LOG_LOSS_EPS: f64 = 1e-15;

/// One point on the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    /// Score cut-off for this point; `None` for the origin, where nothing is
    /// predicted positive.
    pub threshold: Option<f64>,
    /// False positive rate.
    pub fpr: f64,
    /// True positive rate.
    pub tpr: f64,
}

/// ROC curve with its area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    /// Points ordered by descending threshold, from (0, 0) to (1, 1).
    pub points: Vec<RocPoint>,
    /// Area under the curve.
    pub auc: f64,
}

/// Builds the ROC curve of a labelled book.
///
/// One point is emitted per distinct score. The book must contain at least
/// one default and one good loan.
pub fn roc_curve(loans: &[ScoredLoan]) -> BallastResult<RocCurve> {
    let labels = loan::labels(loans)?;
    let positives = labels.iter().filter(|&&l| l).count();
    let negatives = labels.len() - positives;
    if positives == 0 {
        return Err(BallastError::undefined_metric("roc_curve", "book has no defaults"));
    }
    if negatives == 0 {
        return Err(BallastError::undefined_metric("roc_curve", "book has no good loans"));
    }

    let mut scored: Vec<(f64, bool)> = loans
        .iter()
        .map(|l| l.predicted_probability)
        .zip(labels)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut points = vec![RocPoint {
        threshold: None,
        fpr: 0.0,
        tpr: 0.0,
    }];
    let (mut tp, mut fp) = (0usize, 0usize);
    for (i, &(score, actual)) in scored.iter().enumerate() {
        if actual {
            tp += 1;
        } else {
            fp += 1;
        }
        let last_of_score = scored.get(i + 1).map_or(true, |next| next.0 != score);
        if last_of_score {
            points.push(RocPoint {
                threshold: Some(score),
                fpr: fp as f64 / negatives as f64,
                tpr: tp as f64 / positives as f64,
            });
        }
    }

    let auc = auc(&points);
    Ok(RocCurve { points, auc })
}

/// Trapezoidal area under a curve ordered by non-decreasing `fpr`.
#[must_use]
pub fn auc(points: &[RocPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1].fpr - w[0].fpr) * (w[1].tpr + w[0].tpr) / 2.0)
        .sum()
}

/// Mean binary cross-entropy of the scores against the labels.
pub fn log_loss(loans: &[ScoredLoan]) -> BallastResult<f64> {
    let labels = loan::labels(loans)?;
    let total: f64 = loans
        .iter()
        .zip(&labels)
        .map(|(loan, &actual)| {
            let p = loan.predicted_probability.clamp(LOG_LOSS_EPS, 1.0 - LOG_LOSS_EPS);
            if actual {
                -p.ln()
            } else {
                -(1.0 - p).ln()
            }
        })
        .sum();
    Ok(total / loans.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn labelled(scores: &[(f64, bool)]) -> Vec<ScoredLoan> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &(p, y))| ScoredLoan::new(format!("L{i}"), p).with_label(y))
            .collect()
    }

    #[test]
    fn test_roc_auc() {
        let loans = labelled(&[(0.1, false), (0.4, false), (0.35, true), (0.8, true)]);
        let curve = roc_curve(&loans).unwrap();
        assert_eq!(curve.points.len(), 5);
        assert_eq!(curve.points[0].threshold, None);
        let last = curve.points.last().unwrap();
        assert_relative_eq!(last.fpr, 1.0);
        assert_relative_eq!(last.tpr, 1.0);
        assert_relative_eq!(curve.auc, 0.75);
    }

    #[test]
    fn test_perfect_and_tied_scores() {
        let perfect = labelled(&[(0.1, false), (0.2, false), (0.7, true), (0.9, true)]);
        assert_relative_eq!(roc_curve(&perfect).unwrap().auc, 1.0);

        let tied = labelled(&[(0.5, false), (0.5, true)]);
        let curve = roc_curve(&tied).unwrap();
        assert_eq!(curve.points.len(), 2);
        assert_relative_eq!(curve.auc, 0.5);
    }

    #[test]
    fn test_single_class_rejected() {
        let loans = labelled(&[(0.1, false), (0.4, false)]);
        assert!(matches!(
            roc_curve(&loans),
            Err(BallastError::UndefinedMetric { .. })
        ));
    }

    #[test]
    fn test_log_loss() {
        let loans = labelled(&[(0.8, true), (0.2, false)]);
        assert_relative_eq!(log_loss(&loans).unwrap(), -(0.8f64.ln()), epsilon = 1e-12);

        let confident_miss = labelled(&[(0.0, true)]);
        let loss = log_loss(&confident_miss).unwrap();
        assert!(loss.is_finite());
        assert_relative_eq!(loss, -(LOG_LOSS_EPS.ln()), epsilon = 1e-9);
    }
}
