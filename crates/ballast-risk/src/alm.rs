//! Duration gap and asset-liability management.
//!
//! ## Formula
//!
//! ```text
//! DGAP = D_A - (L / A) × D_L
//! ΔE  ≈ DGAP × A × Δbps / 10000
//! ```
//!
//! A positive duration gap means equity loses value when rates rise.

use ballast_core::{BallastResult, MetricValue};
use ballast_core::validation;
use log::debug;
use serde::{Deserialize, Serialize};

/// Duration gap `D_A - (L/A) × D_L`.
pub fn duration_gap(
    assets: f64,
    asset_duration: f64,
    liabilities: f64,
    liability_duration: f64,
) -> BallastResult<f64> {
    validation::positive("assets", assets)?;
    validation::non_negative("liabilities", liabilities)?;
    Ok(asset_duration - (liabilities / assets) * liability_duration)
}

/// Equity value change for a rate move of `bps`: `DGAP × A × bps / 10000`.
///
/// Positive values are losses for a rate rise.
#[must_use]
pub fn equity_sensitivity(duration_gap: f64, assets: f64, bps: f64) -> f64 {
    duration_gap * assets * bps / 10_000.0
}

/// Effective asset duration with a hedge overlay, `(A × D_A + H × D_H) / A`.
pub fn hedged_asset_duration(
    assets: f64,
    asset_duration: f64,
    hedge_notional: f64,
    hedge_duration: f64,
) -> BallastResult<f64> {
    validation::positive("assets", assets)?;
    validation::non_negative("hedge_notional", hedge_notional)?;
    if hedge_notional == 0.0 {
        return Ok(asset_duration);
    }
    Ok((assets * asset_duration + hedge_notional * hedge_duration) / assets)
}

/// Balance sheet for duration-gap analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlmPosition {
    /// Total assets.
    pub assets: f64,
    /// Average asset duration in years.
    pub asset_duration: f64,
    /// Total liabilities.
    pub liabilities: f64,
    /// Average liability duration in years.
    pub liability_duration: f64,
}

impl AlmPosition {
    /// Equity, `assets - liabilities`.
    #[must_use]
    pub fn equity(&self) -> f64 {
        self.assets - self.liabilities
    }

    /// Duration gap of the position.
    pub fn duration_gap(&self) -> BallastResult<f64> {
        duration_gap(
            self.assets,
            self.asset_duration,
            self.liabilities,
            self.liability_duration,
        )
    }
}

/// A restructuring of the position's durations, optionally with a hedge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AlmStrategy {
    /// New asset duration, if changed.
    pub asset_duration: Option<f64>,
    /// New liability duration, if changed.
    pub liability_duration: Option<f64>,
    /// Hedge notional in currency.
    pub hedge_notional: f64,
    /// Effective hedge duration (negative for a payer swap).
    pub hedge_duration: f64,
}

/// How far a duration gap sits from matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GapAssessment {
    /// Gap above one year, equity loses when rates rise.
    SignificantPositive,
    /// Gap below minus one year, equity loses when rates fall.
    SignificantNegative,
    /// Gap within one year of zero.
    NearMatched,
}

impl GapAssessment {
    /// Classifies a duration gap in years.
    #[must_use]
    pub fn classify(gap: f64) -> Self {
        if gap > 1.0 {
            GapAssessment::SignificantPositive
        } else if gap < -1.0 {
            GapAssessment::SignificantNegative
        } else {
            GapAssessment::NearMatched
        }
    }
}

/// Before/after comparison of a strategy under a rate move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlmComparison {
    /// Rate move in basis points.
    pub rate_move_bps: f64,
    /// Starting equity.
    pub equity: f64,
    /// Duration gap before the strategy.
    pub gap_before: f64,
    /// Duration gap after the strategy.
    pub gap_after: f64,
    /// Effective asset duration after the strategy, hedge included.
    pub adjusted_asset_duration: f64,
    /// Equity impact before the strategy.
    pub impact_before: f64,
    /// Equity impact after the strategy.
    pub impact_after: f64,
    /// Equity after the move, without the strategy.
    pub equity_after_before: f64,
    /// Equity after the move, with the strategy.
    pub equity_after_strategy: f64,
    /// `impact_before - impact_after`.
    pub reduction: f64,
    /// Reduction as a percentage of the unhedged impact.
    pub reduction_pct: MetricValue,
    /// Assessment of the resulting gap.
    pub assessment: GapAssessment,
}

/// Compares the position before and after `strategy` for a move of `bps`.
pub fn compare_strategy(
    position: &AlmPosition,
    strategy: &AlmStrategy,
    bps: f64,
) -> BallastResult<AlmComparison> {
    let gap_before = position.duration_gap()?;

    let new_asset_duration = strategy.asset_duration.unwrap_or(position.asset_duration);
    let new_liability_duration = strategy
        .liability_duration
        .unwrap_or(position.liability_duration);
    let adjusted = hedged_asset_duration(
        position.assets,
        new_asset_duration,
        strategy.hedge_notional,
        strategy.hedge_duration,
    )?;
    let gap_after = duration_gap(
        position.assets,
        adjusted,
        position.liabilities,
        new_liability_duration,
    )?;

    let impact_before = equity_sensitivity(gap_before, position.assets, bps);
    let impact_after = equity_sensitivity(gap_after, position.assets, bps);
    let reduction = impact_before - impact_after;
    let equity = position.equity();

    debug!("duration gap {gap_before:.4} -> {gap_after:.4} under {bps} bps");

    Ok(AlmComparison {
        rate_move_bps: bps,
        equity,
        gap_before,
        gap_after,
        adjusted_asset_duration: adjusted,
        impact_before,
        impact_after,
        equity_after_before: equity - impact_before,
        equity_after_strategy: equity - impact_after,
        reduction,
        reduction_pct: MetricValue::fraction(reduction * 100.0, impact_before.abs()),
        assessment: GapAssessment::classify(gap_after),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn svb_like() -> AlmPosition {
        AlmPosition {
            assets: 1000.0,
            asset_duration: 5.0,
            liabilities: 900.0,
            liability_duration: 1.0,
        }
    }

    #[test]
    fn test_duration_gap() {
        assert_relative_eq!(svb_like().duration_gap().unwrap(), 4.1, epsilon = 1e-12);
        assert!(duration_gap(0.0, 5.0, 900.0, 1.0).is_err());
    }

    #[test]
    fn test_equity_sensitivity() {
        // 4.1 × 1000 × 100bp = 41
        assert_relative_eq!(equity_sensitivity(4.1, 1000.0, 100.0), 41.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hedged_duration() {
        let d = hedged_asset_duration(1000.0, 5.0, 500.0, -5.0).unwrap();
        assert_relative_eq!(d, 2.5);
        assert_relative_eq!(hedged_asset_duration(1000.0, 5.0, 0.0, -5.0).unwrap(), 5.0);
    }

    #[test]
    fn test_hedge_strategy_reduces_impact() {
        let strategy = AlmStrategy {
            hedge_notional: 500.0,
            hedge_duration: -5.0,
            ..AlmStrategy::default()
        };
        let cmp = compare_strategy(&svb_like(), &strategy, 100.0).unwrap();
        assert_relative_eq!(cmp.gap_after, 1.6, epsilon = 1e-12);
        assert_relative_eq!(cmp.impact_before, 41.0, epsilon = 1e-9);
        assert_relative_eq!(cmp.impact_after, 16.0, epsilon = 1e-9);
        assert_relative_eq!(cmp.reduction_pct.value().unwrap(), 25.0 / 41.0 * 100.0, epsilon = 1e-9);
        assert_eq!(cmp.assessment, GapAssessment::SignificantPositive);
        assert_relative_eq!(cmp.equity_after_strategy, 84.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_move_reduction_not_applicable() {
        let cmp = compare_strategy(&svb_like(), &AlmStrategy::default(), 0.0).unwrap();
        assert_eq!(cmp.reduction_pct, MetricValue::NotApplicable);
        assert_eq!(cmp.assessment, GapAssessment::SignificantPositive);
    }
}
