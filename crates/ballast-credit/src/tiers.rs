//! Risk tiers by predicted default probability.

use serde::{Deserialize, Serialize};
use std::fmt;

use ballast_core::{BallastResult, MetricValue};

use crate::loan::{self, ScoredLoan};

/// Five equal-width probability bands, upper bound inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    /// `p <= 0.2`
    VeryLow,
    /// `0.2 < p <= 0.4`
    Low,
    /// `0.4 < p <= 0.6`
    Moderate,
    /// `0.6 < p <= 0.8`
    High,
    /// `p > 0.8`
    VeryHigh,
}

impl RiskTier {
    /// All tiers, lowest risk first.
    pub const ALL: [RiskTier; 5] = [
        RiskTier::VeryLow,
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::VeryHigh,
    ];

    /// Tier of a default probability.
    #[must_use]
    pub fn classify(probability: f64) -> Self {
        if probability <= 0.2 {
            RiskTier::VeryLow
        } else if probability <= 0.4 {
            RiskTier::Low
        } else if probability <= 0.6 {
            RiskTier::Moderate
        } else if probability <= 0.8 {
            RiskTier::High
        } else {
            RiskTier::VeryHigh
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskTier::VeryLow => "Very low",
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::VeryHigh => "Very high",
        };
        write!(f, "{name}")
    }
}

/// Loans in one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSummary {
    /// The tier.
    pub tier: RiskTier,
    /// Number of loans.
    pub count: usize,
    /// Observed default rate among labelled loans in the tier.
    pub observed_default_rate: MetricValue,
}

/// Counts the book per tier. Every tier is listed, including empty ones.
pub fn tier_summary(loans: &[ScoredLoan]) -> BallastResult<Vec<TierSummary>> {
    loan::validate_scores(loans)?;
    let mut counts = [(0usize, 0usize, 0usize); 5];
    for loan in loans {
        let slot = &mut counts[RiskTier::classify(loan.predicted_probability) as usize];
        slot.0 += 1;
        if let Some(defaulted) = loan.actual_label {
            slot.1 += 1;
            slot.2 += usize::from(defaulted);
        }
    }
    Ok(RiskTier::ALL
        .iter()
        .zip(counts)
        .map(|(&tier, (count, labelled, defaults))| TierSummary {
            tier,
            count,
            observed_default_rate: MetricValue::fraction(defaults as f64, labelled as f64),
        })
        .collect())
}
