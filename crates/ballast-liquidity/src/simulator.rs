//! Runs a liquidity simulation to completion.

use ballast_core::{BalanceSheetSnapshot, BallastResult, Ratio};
use ballast_risk::RatioFactors;
use ballast_scenarios::StressScenario;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::state::{DayFlows, RunPhase, SimulationState};

/// One row of a run's trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Day index; day 0 is the starting balance sheet.
    pub day: u32,
    /// Run intensity for the day.
    pub run_probability: f64,
    /// Retail deposits withdrawn that day.
    pub retail_outflow: f64,
    /// Wholesale funding withdrawn that day.
    pub wholesale_outflow: f64,
    /// Remaining retail deposits.
    pub retail_deposits_pct: f64,
    /// Remaining wholesale funding.
    pub wholesale_funding_pct: f64,
    /// Remaining liquid assets.
    pub liquid_assets_pct: f64,
    /// Illiquid assets (constant).
    pub illiquid_assets_pct: f64,
    /// Outflows not covered by liquid assets.
    pub net_shortfall: f64,
    /// LCR of the remaining balance sheet.
    pub lcr: Ratio,
}

impl DayRecord {
    fn capture(state: &SimulationState, flows: Option<&DayFlows>, factors: &RatioFactors) -> Self {
        let retail = state.retail_remaining_pct();
        let wholesale = state.wholesale_remaining_pct();
        let liquid = state.liquid_assets_remaining_pct();
        Self {
            day: state.day(),
            run_probability: flows.map_or(0.0, |f| f.run_probability),
            retail_outflow: flows.map_or(0.0, |f| f.retail_outflow),
            wholesale_outflow: flows.map_or(0.0, |f| f.wholesale_outflow),
            retail_deposits_pct: retail,
            wholesale_funding_pct: wholesale,
            liquid_assets_pct: liquid,
            illiquid_assets_pct: state.illiquid_assets_pct(),
            net_shortfall: flows.map_or(0.0, |f| f.net_shortfall),
            lcr: factors.lcr(liquid, retail, wholesale),
        }
    }

    /// Total outflow for the day.
    #[must_use]
    pub fn total_outflow(&self) -> f64 {
        self.retail_outflow + self.wholesale_outflow
    }
}

/// Full result of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Scenario that set the horizon.
    pub scenario_name: String,
    /// Terminal phase.
    pub phase: RunPhase,
    /// Records for day 0 through the last simulated day.
    pub trajectory: Vec<DayRecord>,
    /// State after the last step.
    pub final_state: SimulationState,
}

impl RunOutcome {
    /// Day of failure, if the run failed.
    #[must_use]
    pub fn failed_on_day(&self) -> Option<u32> {
        match self.phase {
            RunPhase::Failed(day) => Some(day),
            _ => None,
        }
    }

    /// Returns true if the run reached the horizon.
    #[must_use]
    pub fn survived(&self) -> bool {
        self.phase == RunPhase::Survived
    }

    /// Lowest LCR seen over the trajectory.
    #[must_use]
    pub fn min_lcr(&self) -> Option<f64> {
        self.trajectory
            .iter()
            .filter_map(|r| r.lcr.as_option())
            .min_by(f64::total_cmp)
    }
}

/// Failure day for one stress level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressPoint {
    /// Stress level.
    pub stress_level: f64,
    /// Terminal phase of the run.
    pub phase: RunPhase,
}

impl StressPoint {
    /// Day of failure, if any.
    #[must_use]
    pub fn failed_on_day(&self) -> Option<u32> {
        match self.phase {
            RunPhase::Failed(day) => Some(day),
            _ => None,
        }
    }
}

/// Drives [`SimulationState`] over a scenario's horizon.
///
/// # Example
///
/// ```rust
/// use ballast_core::BalanceSheetSnapshot;
/// use ballast_liquidity::{RunPhase, RunSimulator};
/// use ballast_scenarios::ScenarioPreset;
///
/// let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
/// let scenario = ScenarioPreset::ModerateRun.scenario();
/// let outcome = RunSimulator::new().run(&snapshot, &scenario, 8.0).unwrap();
/// assert_eq!(outcome.phase, RunPhase::Failed(17));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunSimulator {
    factors: RatioFactors,
}

impl RunSimulator {
    /// Creates a simulator with default ratio factors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the factors used for the daily LCR.
    #[must_use]
    pub fn with_factors(mut self, factors: RatioFactors) -> Self {
        self.factors = factors;
        self
    }

    /// Runs over the scenario's horizon.
    ///
    /// Only `horizon_days` is taken from the scenario; the run itself models
    /// the outflows.
    pub fn run(
        &self,
        snapshot: &BalanceSheetSnapshot,
        scenario: &StressScenario,
        stress_level: f64,
    ) -> BallastResult<RunOutcome> {
        scenario.validate()?;
        self.run_named(&scenario.name, snapshot, scenario.horizon_days, stress_level)
    }

    /// Runs over an explicit horizon.
    pub fn run_horizon(
        &self,
        snapshot: &BalanceSheetSnapshot,
        horizon_days: u32,
        stress_level: f64,
    ) -> BallastResult<RunOutcome> {
        self.run_named("Custom", snapshot, horizon_days, stress_level)
    }

    fn run_named(
        &self,
        name: &str,
        snapshot: &BalanceSheetSnapshot,
        horizon_days: u32,
        stress_level: f64,
    ) -> BallastResult<RunOutcome> {
        let mut state = SimulationState::new(snapshot, horizon_days, stress_level)?;
        let mut trajectory = Vec::with_capacity(horizon_days as usize + 1);
        trajectory.push(DayRecord::capture(&state, None, &self.factors));

        while !state.phase().is_terminal() {
            let flows = state.step()?;
            trajectory.push(DayRecord::capture(&state, Some(&flows), &self.factors));
        }

        debug!(
            "run '{name}' at stress {stress_level}: {} after {} days",
            state.phase(),
            state.day()
        );

        Ok(RunOutcome {
            scenario_name: name.to_string(),
            phase: state.phase(),
            trajectory,
            final_state: state,
        })
    }

    /// Terminal phase for each stress level, in input order.
    ///
    /// Runs are independent; with the `parallel` feature they execute on the
    /// rayon pool.
    pub fn stress_profile(
        &self,
        snapshot: &BalanceSheetSnapshot,
        horizon_days: u32,
        levels: &[f64],
    ) -> BallastResult<Vec<StressPoint>> {
        let point = |&stress_level: &f64| -> BallastResult<StressPoint> {
            let mut state = SimulationState::new(snapshot, horizon_days, stress_level)?;
            while !state.phase().is_terminal() {
                state.step()?;
            }
            Ok(StressPoint {
                stress_level,
                phase: state.phase(),
            })
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            levels.par_iter().map(point).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            levels.iter().map(point).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_core::BallastError;
    use ballast_scenarios::ScenarioPreset;

    fn northern_rock() -> BalanceSheetSnapshot {
        BalanceSheetSnapshot::new(15.0, 77.0).unwrap()
    }

    #[test]
    fn test_northern_rock_fails_day_17() {
        let outcome = RunSimulator::new()
            .run(&northern_rock(), &ScenarioPreset::ModerateRun.scenario(), 8.0)
            .unwrap();
        assert_eq!(outcome.phase, RunPhase::Failed(17));
        assert_eq!(outcome.failed_on_day(), Some(17));
        assert_eq!(outcome.trajectory.len(), 18);
        assert_eq!(outcome.trajectory[0].day, 0);
        assert_eq!(outcome.trajectory[17].liquid_assets_pct, 0.0);
        assert!(outcome.trajectory[17].net_shortfall > 0.0);
        assert_eq!(outcome.final_state.failed_on_day(), Some(17));
    }

    #[test]
    fn test_oversized_horizon_is_rejected() {
        let err = RunSimulator::new()
            .run_horizon(&northern_rock(), u32::MAX, 8.0)
            .unwrap_err();
        assert!(matches!(err, BallastError::InvalidInput { .. }));
    }

    #[test]
    fn test_outcome_serializes_trajectory() {
        let outcome = RunSimulator::new()
            .run(&northern_rock(), &ScenarioPreset::ModerateRun.scenario(), 8.0)
            .unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["phase"]["Failed"], 17);
        assert_eq!(json["trajectory"].as_array().unwrap().len(), 18);

        let back: RunOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back.phase, outcome.phase);
        assert_eq!(back.failed_on_day(), Some(17));
        assert_eq!(back.trajectory[17].day, 17);
    }

    #[test]
    fn test_zero_stress_survives() {
        let outcome = RunSimulator::new()
            .run_horizon(&northern_rock(), 30, 0.0)
            .unwrap();
        assert!(outcome.survived());
        assert_eq!(outcome.trajectory.len(), 31);
        assert!(outcome.trajectory.iter().all(|r| r.total_outflow() == 0.0));
        assert_eq!(outcome.final_state.liquid_assets_remaining_pct(), 15.0);
    }

    #[test]
    fn test_illiquid_constant() {
        let outcome = RunSimulator::new()
            .run_horizon(&northern_rock(), 30, 10.0)
            .unwrap();
        assert!(outcome
            .trajectory
            .iter()
            .all(|r| r.illiquid_assets_pct == 85.0));
    }

    #[test]
    fn test_day_zero_lcr() {
        let outcome = RunSimulator::new()
            .run_horizon(&northern_rock(), 30, 3.0)
            .unwrap();
        assert_eq!(outcome.trajectory[0].lcr, Ratio::Defined(50.0));
        assert!(outcome.min_lcr().unwrap() < 50.0);
    }

    #[test]
    fn test_stress_profile() {
        let levels: Vec<f64> = (0..=10).map(f64::from).collect();
        let profile = RunSimulator::new()
            .stress_profile(&northern_rock(), 30, &levels)
            .unwrap();
        let days: Vec<Option<u32>> = profile.iter().map(StressPoint::failed_on_day).collect();
        assert_eq!(
            days,
            vec![
                None,
                None,
                None,
                None,
                None,
                Some(28),
                Some(23),
                Some(20),
                Some(17),
                Some(16),
                Some(14)
            ]
        );
    }

    #[test]
    fn test_invalid_horizon() {
        let scenario = StressScenario::custom("x").with_horizon_days(0);
        assert!(RunSimulator::new().run(&northern_rock(), &scenario, 5.0).is_err());
        assert!(RunSimulator::new()
            .stress_profile(&northern_rock(), 30, &[1.0, -2.0])
            .is_err());
    }
}
