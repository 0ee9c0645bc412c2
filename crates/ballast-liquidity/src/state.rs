//! Daily state machine for a liquidity run.
//!
//! ## Daily update
//!
//! ```text
//! p          = min(1, d/H × stress/10)
//! retail'    = retail × min(50, 5·stress)/100 × p / H
//! wholesale' = wholesale × min(90, 9·stress)/100 × p / (H/2)
//! liquid     = max(0, liquid - retail' - wholesale')
//! ```
//!
//! Wholesale funding runs about twice as fast as retail. Illiquid assets are
//! never sold to cover outflows within the horizon.

use ballast_core::validation;
use ballast_core::{BalanceSheetSnapshot, BallastError, BallastResult};
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cap on the share of retail deposits that can run, in percent.
pub const MAX_RETAIL_RUN_PCT: f64 = 50.0;

/// Cap on the share of wholesale funding that can run, in percent.
pub const MAX_WHOLESALE_RUN_PCT: f64 = 90.0;

/// Longest horizon a run accepts: ten years of days.
pub const MAX_HORIZON_DAYS: u32 = 3650;

/// Phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    /// Still running; holds the last completed day.
    Running(u32),
    /// The horizon completed without failure.
    Survived,
    /// Liquid assets were exhausted on this day.
    Failed(u32),
}

impl RunPhase {
    /// Returns true once the run cannot advance.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunPhase::Running(_))
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Running(day) => write!(f, "running (day {day})"),
            RunPhase::Survived => write!(f, "survived"),
            RunPhase::Failed(day) => write!(f, "failed on day {day}"),
        }
    }
}

/// Flows of a single simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayFlows {
    /// Day index, starting at 1.
    pub day: u32,
    /// Run intensity for the day, in `[0, 1]`.
    pub run_probability: f64,
    /// Retail deposits withdrawn.
    pub retail_outflow: f64,
    /// Wholesale funding withdrawn.
    pub wholesale_outflow: f64,
    /// Outflows not covered by liquid assets.
    pub net_shortfall: f64,
}

impl DayFlows {
    /// Total outflow for the day.
    #[must_use]
    pub fn total_outflow(&self) -> f64 {
        self.retail_outflow + self.wholesale_outflow
    }
}

/// State of one liquidity run. Owned by a single run and advanced one day at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    day: u32,
    horizon_days: u32,
    stress_level: f64,
    retail_remaining_pct: f64,
    wholesale_remaining_pct: f64,
    liquid_assets_remaining_pct: f64,
    illiquid_assets_pct: f64,
    cumulative_outflow_pct: f64,
    failed_on_day: Option<u32>,
    phase: RunPhase,
}

impl SimulationState {
    /// Creates the day-0 state.
    pub fn new(
        snapshot: &BalanceSheetSnapshot,
        horizon_days: u32,
        stress_level: f64,
    ) -> BallastResult<Self> {
        validation::non_negative("stress_level", stress_level)?;
        if horizon_days == 0 || horizon_days > MAX_HORIZON_DAYS {
            return Err(BallastError::invalid_input(
                "horizon_days",
                format!("must be between 1 and {MAX_HORIZON_DAYS} days, got {horizon_days}"),
            ));
        }
        Ok(Self {
            day: 0,
            horizon_days,
            stress_level,
            retail_remaining_pct: snapshot.retail_deposits_pct(),
            wholesale_remaining_pct: snapshot.wholesale_funding_pct(),
            liquid_assets_remaining_pct: snapshot.liquid_assets_pct(),
            illiquid_assets_pct: snapshot.illiquid_assets_pct(),
            cumulative_outflow_pct: 0.0,
            failed_on_day: None,
            phase: RunPhase::Running(0),
        })
    }

    /// Advances one day.
    ///
    /// Fails with [`BallastError::SimulationFinished`] once the run is terminal.
    pub fn step(&mut self) -> BallastResult<DayFlows> {
        if self.phase.is_terminal() {
            return Err(BallastError::simulation_finished(self.phase));
        }

        let day = self.day + 1;
        let horizon = f64::from(self.horizon_days);
        let stress = self.stress_level;

        let run_probability = (f64::from(day) / horizon * (stress / 10.0)).min(1.0);
        let retail_impact = (stress * 5.0).min(MAX_RETAIL_RUN_PCT) / 100.0;
        let wholesale_impact = (stress * 9.0).min(MAX_WHOLESALE_RUN_PCT) / 100.0;

        let retail_outflow = self.retail_remaining_pct * retail_impact * run_probability / horizon;
        let wholesale_outflow =
            self.wholesale_remaining_pct * wholesale_impact * run_probability / (horizon / 2.0);
        let total = retail_outflow + wholesale_outflow;

        self.retail_remaining_pct = (self.retail_remaining_pct - retail_outflow).max(0.0);
        self.wholesale_remaining_pct = (self.wholesale_remaining_pct - wholesale_outflow).max(0.0);

        let uncovered = self.liquid_assets_remaining_pct - total;
        self.liquid_assets_remaining_pct = uncovered.max(0.0);
        let net_shortfall = self.liquid_assets_remaining_pct - uncovered;

        self.cumulative_outflow_pct += total;
        self.day = day;

        self.phase = if self.liquid_assets_remaining_pct <= 0.0 && total > 0.0 {
            self.failed_on_day = Some(day);
            RunPhase::Failed(day)
        } else if day >= self.horizon_days {
            RunPhase::Survived
        } else {
            RunPhase::Running(day)
        };

        trace!(
            "day {day}: outflow {total:.4}, liquid {:.4}, {}",
            self.liquid_assets_remaining_pct,
            self.phase
        );

        Ok(DayFlows {
            day,
            run_probability,
            retail_outflow,
            wholesale_outflow,
            net_shortfall,
        })
    }

    /// Last completed day (0 before the first step).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Horizon in days.
    #[must_use]
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Stress level driving the run.
    #[must_use]
    pub fn stress_level(&self) -> f64 {
        self.stress_level
    }

    /// Remaining retail deposits.
    #[must_use]
    pub fn retail_remaining_pct(&self) -> f64 {
        self.retail_remaining_pct
    }

    /// Remaining wholesale funding.
    #[must_use]
    pub fn wholesale_remaining_pct(&self) -> f64 {
        self.wholesale_remaining_pct
    }

    /// Remaining liquid assets.
    #[must_use]
    pub fn liquid_assets_remaining_pct(&self) -> f64 {
        self.liquid_assets_remaining_pct
    }

    /// Illiquid assets, constant over the run.
    #[must_use]
    pub fn illiquid_assets_pct(&self) -> f64 {
        self.illiquid_assets_pct
    }

    /// Total outflows so far.
    #[must_use]
    pub fn cumulative_outflow_pct(&self) -> f64 {
        self.cumulative_outflow_pct
    }

    /// Day of failure, if the run failed.
    #[must_use]
    pub fn failed_on_day(&self) -> Option<u32> {
        self.failed_on_day
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn northern_rock() -> BalanceSheetSnapshot {
        BalanceSheetSnapshot::new(15.0, 77.0).unwrap()
    }

    #[test]
    fn test_horizon_bounds() {
        assert!(SimulationState::new(&northern_rock(), 0, 8.0).is_err());
        assert!(SimulationState::new(&northern_rock(), MAX_HORIZON_DAYS, 8.0).is_ok());
        let err = SimulationState::new(&northern_rock(), u32::MAX, 8.0).unwrap_err();
        assert!(err.to_string().contains("horizon_days"));
    }

    #[test]
    fn test_first_day_flows() {
        let mut state = SimulationState::new(&northern_rock(), 30, 8.0).unwrap();
        let flows = state.step().unwrap();

        let p = 1.0 / 30.0 * 0.8;
        assert_relative_eq!(flows.run_probability, p, epsilon = 1e-15);
        assert_relative_eq!(flows.retail_outflow, 23.0 * 0.4 * p / 30.0, epsilon = 1e-12);
        assert_relative_eq!(flows.wholesale_outflow, 77.0 * 0.72 * p / 15.0, epsilon = 1e-12);
        assert_relative_eq!(flows.net_shortfall, 0.0);
        assert_eq!(state.phase(), RunPhase::Running(1));
        assert_relative_eq!(
            state.liquid_assets_remaining_pct(),
            15.0 - flows.total_outflow(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_step_after_terminal() {
        let mut state = SimulationState::new(&northern_rock(), 2, 0.0).unwrap();
        state.step().unwrap();
        state.step().unwrap();
        assert_eq!(state.phase(), RunPhase::Survived);
        assert!(matches!(
            state.step(),
            Err(BallastError::SimulationFinished { .. })
        ));
    }

    #[test]
    fn test_zero_liquidity_fails_on_first_outflow() {
        let snapshot = BalanceSheetSnapshot::new(0.0, 50.0).unwrap();
        let mut state = SimulationState::new(&snapshot, 30, 1.0).unwrap();
        let flows = state.step().unwrap();
        assert!(flows.net_shortfall > 0.0);
        assert_eq!(state.phase(), RunPhase::Failed(1));
        assert_eq!(state.failed_on_day(), Some(1));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(SimulationState::new(&northern_rock(), 0, 5.0).is_err());
        assert!(SimulationState::new(&northern_rock(), 30, -1.0).is_err());
        assert!(SimulationState::new(&northern_rock(), 30, f64::NAN).is_err());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RunPhase::Failed(17).to_string(), "failed on day 17");
        assert!(RunPhase::Survived.is_terminal());
        assert!(!RunPhase::Running(3).is_terminal());
    }
}
