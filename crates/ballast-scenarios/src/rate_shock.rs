//! Rate-shock stress on a bucketed bond portfolio.
//!
//! Each bucket loses `value × duration × bps / 10000`. Losses are compared to
//! capital to grade solvency.

use ballast_core::validation::{self, PERCENT_TOLERANCE};
use ballast_core::{BallastError, BallastResult};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::scenario::{RateBucket, StressScenario};

/// Market value and duration held in one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketHolding {
    /// Rate bucket.
    pub bucket: RateBucket,
    /// Market value.
    pub value: f64,
    /// Modified duration in years.
    pub duration: f64,
}

impl BucketHolding {
    /// Creates a holding.
    #[must_use]
    pub fn new(bucket: RateBucket, value: f64, duration: f64) -> Self {
        Self {
            bucket,
            value,
            duration,
        }
    }
}

/// Splits a portfolio value across buckets by percentage weight.
///
/// Weights must sum to 100.
pub fn holdings_from_weights(
    total_value: f64,
    weights: &[(RateBucket, f64, f64)],
) -> BallastResult<Vec<BucketHolding>> {
    validation::positive("total_value", total_value)?;
    let sum: f64 = weights.iter().map(|(_, w, _)| w).sum();
    if (sum - 100.0).abs() > PERCENT_TOLERANCE {
        return Err(BallastError::invalid_input(
            "weights",
            format!("bucket weights must sum to 100, got {sum}"),
        ));
    }
    weights
        .iter()
        .map(|(bucket, weight, duration)| {
            validation::percentage("weight", *weight)?;
            Ok(BucketHolding::new(
                bucket.clone(),
                total_value * weight / 100.0,
                *duration,
            ))
        })
        .collect()
}

/// Solvency grade after a rate shock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolvencyStatus {
    /// Losses exhaust capital.
    Insolvent,
    /// Losses take at least half of capital.
    HighRisk,
    /// Losses take at least a quarter of capital.
    ModerateRisk,
    /// Losses below a quarter of capital.
    LowRisk,
}

impl SolvencyStatus {
    /// Grades remaining capital and impact percentage.
    #[must_use]
    pub fn grade(remaining_capital: f64, impact_pct: f64) -> Self {
        if remaining_capital <= 0.0 {
            SolvencyStatus::Insolvent
        } else if impact_pct >= 50.0 {
            SolvencyStatus::HighRisk
        } else if impact_pct >= 25.0 {
            SolvencyStatus::ModerateRisk
        } else {
            SolvencyStatus::LowRisk
        }
    }
}

impl std::fmt::Display for SolvencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SolvencyStatus::Insolvent => "Insolvent",
            SolvencyStatus::HighRisk => "High risk",
            SolvencyStatus::ModerateRisk => "Moderate risk",
            SolvencyStatus::LowRisk => "Low risk",
        };
        write!(f, "{name}")
    }
}

/// Loss on one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateShockLine {
    /// Rate bucket.
    pub bucket: RateBucket,
    /// Market value before the shock.
    pub value: f64,
    /// Modified duration in years.
    pub duration: f64,
    /// Applied shock in basis points.
    pub shock_bps: f64,
    /// Loss as a percentage of value.
    pub loss_pct: f64,
    /// Loss in currency.
    pub loss: f64,
}

/// Portfolio losses against capital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateShockReport {
    /// Scenario name.
    pub scenario_name: String,
    /// Per-bucket losses.
    pub lines: Vec<RateShockLine>,
    /// Total portfolio value.
    pub total_value: f64,
    /// Total loss.
    pub total_loss: f64,
    /// Capital before the shock.
    pub capital: f64,
    /// `capital - total_loss`.
    pub remaining_capital: f64,
    /// Total loss as a percentage of capital.
    pub capital_impact_pct: f64,
    /// Solvency grade.
    pub status: SolvencyStatus,
}

/// Applies the scenario's bucket shocks to the holdings.
///
/// A bucket with no shock in the scenario takes 0 bps.
pub fn apply_rate_shock(
    holdings: &[BucketHolding],
    scenario: &StressScenario,
    capital: f64,
) -> BallastResult<RateShockReport> {
    validation::positive("capital", capital)?;

    let lines: Vec<RateShockLine> = holdings
        .iter()
        .map(|h| {
            let shock_bps = scenario.rate_shock_bps(&h.bucket);
            let loss_fraction = h.duration * shock_bps / 10_000.0;
            RateShockLine {
                bucket: h.bucket.clone(),
                value: h.value,
                duration: h.duration,
                shock_bps,
                loss_pct: loss_fraction * 100.0,
                loss: h.value * loss_fraction,
            }
        })
        .collect();

    let total_value = lines.iter().map(|l| l.value).sum();
    let total_loss: f64 = lines.iter().map(|l| l.loss).sum();
    let remaining_capital = capital - total_loss;
    let capital_impact_pct = total_loss / capital * 100.0;

    debug!(
        "rate shock '{}': loss {total_loss:.2} on capital {capital:.2} ({capital_impact_pct:.1}%)",
        scenario.name
    );

    Ok(RateShockReport {
        scenario_name: scenario.name.clone(),
        lines,
        total_value,
        total_loss,
        capital,
        remaining_capital,
        capital_impact_pct,
        status: SolvencyStatus::grade(remaining_capital, capital_impact_pct),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioPreset;
    use approx::assert_relative_eq;

    fn sample_holdings() -> Vec<BucketHolding> {
        holdings_from_weights(
            1000.0,
            &[
                (RateBucket::Short, 20.0, 1.0),
                (RateBucket::Medium, 30.0, 3.5),
                (RateBucket::Long, 50.0, 7.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_parallel_200() {
        let report = apply_rate_shock(
            &sample_holdings(),
            &ScenarioPreset::ParallelUp200.scenario(),
            100.0,
        )
        .unwrap();
        // 200×0.02 + 300×0.07 + 500×0.14
        assert_relative_eq!(report.total_loss, 95.0, epsilon = 1e-9);
        assert_relative_eq!(report.lines[2].loss_pct, 14.0, epsilon = 1e-9);
        assert_relative_eq!(report.remaining_capital, 5.0, epsilon = 1e-9);
        assert_relative_eq!(report.capital_impact_pct, 95.0, epsilon = 1e-9);
        assert_eq!(report.status, SolvencyStatus::HighRisk);
        assert_relative_eq!(report.total_value, 1000.0);
    }

    #[test]
    fn test_long_end_worse_than_short_end() {
        let holdings = sample_holdings();
        let short = apply_rate_shock(&holdings, &ScenarioPreset::ShortEndShock.scenario(), 100.0)
            .unwrap();
        let long = apply_rate_shock(&holdings, &ScenarioPreset::LongEndShock.scenario(), 100.0)
            .unwrap();
        assert!(long.total_loss > short.total_loss);
        assert_eq!(long.status, SolvencyStatus::Insolvent);
    }

    #[test]
    fn test_missing_bucket_is_unshocked() {
        let holdings = vec![BucketHolding::new(RateBucket::Custom("MBS".into()), 500.0, 6.0)];
        let report =
            apply_rate_shock(&holdings, &ScenarioPreset::ParallelUp400.scenario(), 50.0).unwrap();
        assert_relative_eq!(report.total_loss, 0.0);
        assert_eq!(report.status, SolvencyStatus::LowRisk);
    }

    #[test]
    fn test_weights_must_sum_to_100() {
        let err = holdings_from_weights(1000.0, &[(RateBucket::Short, 60.0, 1.0)]);
        assert!(err.is_err());
        assert!(apply_rate_shock(&sample_holdings(), &StressScenario::custom("x"), 0.0).is_err());
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(SolvencyStatus::grade(10.0, 25.0), SolvencyStatus::ModerateRisk);
        assert_eq!(SolvencyStatus::grade(10.0, 24.9), SolvencyStatus::LowRisk);
        assert_eq!(SolvencyStatus::grade(0.0, 100.0), SolvencyStatus::Insolvent);
    }
}
