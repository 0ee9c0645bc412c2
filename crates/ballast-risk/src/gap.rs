//! Repricing gap analysis.
//!
//! The repricing gap of a time bucket is rate-sensitive assets minus
//! rate-sensitive liabilities repricing in that bucket. A positive total gap
//! means net interest margin rises with rates.

use ballast_core::{BallastError, BallastResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard repricing bucket labels.
pub const STANDARD_BUCKETS: [&str; 4] = ["0-3m", "3-6m", "6-12m", "1-2y"];

/// An amount repricing in a labelled time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketAmount {
    /// Bucket label, e.g. `"0-3m"`.
    pub label: String,
    /// Amount repricing in the bucket.
    pub amount: f64,
}

impl BucketAmount {
    /// Creates a bucket amount.
    #[must_use]
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Builds bucket amounts over [`STANDARD_BUCKETS`].
#[must_use]
pub fn standard_buckets(amounts: [f64; 4]) -> Vec<BucketAmount> {
    STANDARD_BUCKETS
        .iter()
        .zip(amounts)
        .map(|(label, amount)| BucketAmount::new(*label, amount))
        .collect()
}

/// Sign of a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GapType {
    /// More assets than liabilities reprice.
    Positive,
    /// More liabilities than assets reprice.
    Negative,
    /// Assets and liabilities are matched.
    Neutral,
}

impl GapType {
    /// Classifies a gap amount.
    #[must_use]
    pub fn classify(gap: f64) -> Self {
        if gap > 0.0 {
            GapType::Positive
        } else if gap < 0.0 {
            GapType::Negative
        } else {
            GapType::Neutral
        }
    }

    /// Whether margin improves for a rate move in the given direction.
    ///
    /// Returns `None` when either the gap or the move is zero.
    #[must_use]
    pub fn benefits_from(&self, delta_rate_pct: f64) -> Option<bool> {
        match self {
            GapType::Neutral => None,
            _ if delta_rate_pct == 0.0 => None,
            GapType::Positive => Some(delta_rate_pct > 0.0),
            GapType::Negative => Some(delta_rate_pct < 0.0),
        }
    }
}

impl fmt::Display for GapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GapType::Positive => "Positive",
            GapType::Negative => "Negative",
            GapType::Neutral => "Neutral",
        };
        write!(f, "{name}")
    }
}

/// Gap for a single bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketGap {
    /// Bucket label.
    pub label: String,
    /// Rate-sensitive assets.
    pub assets: f64,
    /// Rate-sensitive liabilities.
    pub liabilities: f64,
    /// `assets - liabilities`.
    pub gap: f64,
    /// Running sum of gaps up to and including this bucket.
    pub cumulative_gap: f64,
}

/// Per-bucket repricing gaps with totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    /// Bucket gaps, in input order.
    pub buckets: Vec<BucketGap>,
    /// Sum of all bucket gaps.
    pub total_gap: f64,
    /// Classification of the total gap.
    pub gap_type: GapType,
}

impl GapReport {
    /// Net interest margin impact of a parallel move, see [`margin_impact`].
    #[must_use]
    pub fn margin_impact(&self, delta_rate_pct: f64) -> MarginImpact {
        margin_impact(self, delta_rate_pct)
    }
}

/// Net interest margin impact of a rate move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginImpact {
    /// Rate move in percentage points.
    pub delta_rate_pct: f64,
    /// `(label, gap × Δ / 100)` per bucket.
    pub by_bucket: Vec<(String, f64)>,
    /// Sum over buckets.
    pub total: f64,
}

/// Computes per-bucket repricing gaps.
///
/// Both sides must list the same bucket labels in the same order.
pub fn repricing_gap(
    assets: &[BucketAmount],
    liabilities: &[BucketAmount],
) -> BallastResult<GapReport> {
    if assets.is_empty() {
        return Err(BallastError::invalid_input(
            "assets",
            "at least one bucket is required",
        ));
    }
    if assets.len() != liabilities.len() {
        return Err(BallastError::invalid_input(
            "liabilities",
            format!(
                "expected {} buckets, got {}",
                assets.len(),
                liabilities.len()
            ),
        ));
    }

    let mut cumulative = 0.0;
    let mut buckets = Vec::with_capacity(assets.len());
    for (a, l) in assets.iter().zip(liabilities) {
        if a.label != l.label {
            return Err(BallastError::invalid_input(
                "liabilities",
                format!("bucket '{}' does not match asset bucket '{}'", l.label, a.label),
            ));
        }
        let gap = a.amount - l.amount;
        cumulative += gap;
        buckets.push(BucketGap {
            label: a.label.clone(),
            assets: a.amount,
            liabilities: l.amount,
            gap,
            cumulative_gap: cumulative,
        });
    }

    debug!("repricing gap over {} buckets: total {cumulative:.4}", buckets.len());

    Ok(GapReport {
        buckets,
        total_gap: cumulative,
        gap_type: GapType::classify(cumulative),
    })
}

/// Net interest margin impact `gap × Δ / 100` per bucket.
#[must_use]
pub fn margin_impact(report: &GapReport, delta_rate_pct: f64) -> MarginImpact {
    let by_bucket: Vec<(String, f64)> = report
        .buckets
        .iter()
        .map(|b| (b.label.clone(), b.gap * delta_rate_pct / 100.0))
        .collect();
    let total = by_bucket.iter().map(|(_, v)| v).sum();
    MarginImpact {
        delta_rate_pct,
        by_bucket,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> GapReport {
        let assets = standard_buckets([150.0, 100.0, 200.0, 300.0]);
        let liabilities = standard_buckets([250.0, 150.0, 150.0, 100.0]);
        repricing_gap(&assets, &liabilities).unwrap()
    }

    #[test]
    fn test_bucket_gaps() {
        let report = sample();
        let gaps: Vec<f64> = report.buckets.iter().map(|b| b.gap).collect();
        assert_eq!(gaps, vec![-100.0, -50.0, 50.0, 200.0]);
        assert_relative_eq!(report.buckets[1].cumulative_gap, -150.0);
        assert_relative_eq!(report.total_gap, 100.0);
        assert_eq!(report.gap_type, GapType::Positive);
    }

    #[test]
    fn test_margin_impact() {
        let impact = sample().margin_impact(2.0);
        assert_relative_eq!(impact.by_bucket[0].1, -2.0);
        assert_relative_eq!(impact.by_bucket[3].1, 4.0);
        assert_relative_eq!(impact.total, 2.0);
    }

    #[test]
    fn test_mismatched_buckets() {
        let assets = standard_buckets([1.0, 2.0, 3.0, 4.0]);
        let mut liabilities = standard_buckets([1.0, 2.0, 3.0, 4.0]);
        liabilities[2].label = "6-9m".to_string();
        assert!(matches!(
            repricing_gap(&assets, &liabilities),
            Err(BallastError::InvalidInput { .. })
        ));
        assert!(repricing_gap(&assets, &liabilities[..3]).is_err());
        assert!(repricing_gap(&[], &[]).is_err());
    }

    #[test]
    fn test_gap_direction() {
        assert_eq!(GapType::Positive.benefits_from(1.0), Some(true));
        assert_eq!(GapType::Negative.benefits_from(1.0), Some(false));
        assert_eq!(GapType::Negative.benefits_from(-0.5), Some(true));
        assert_eq!(GapType::Neutral.benefits_from(1.0), None);
        assert_eq!(GapType::Positive.benefits_from(0.0), None);
    }
}
