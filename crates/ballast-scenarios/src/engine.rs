//! Applies funding shocks to a balance sheet snapshot.
//!
//! ## Formula
//!
//! ```text
//! liquid'    = liquid × (1 - haircut / 100)
//! retail'    = retail × (1 - retail_outflow / 100)
//! wholesale' = wholesale × (1 - wholesale_outflow / 100)
//! ```
//!
//! Post-shock LCR and NSFR come from [`RatioFactors`]. The NSFR denominator is
//! the pre-shock illiquid share, which a 30-day shock does not change.

use ballast_core::{BalanceSheetSnapshot, BallastResult, Ratio};
use ballast_risk::RatioFactors;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::scenario::{standard, StressScenario};

fn default_min_lcr_pct() -> f64 {
    70.0
}

fn default_true() -> bool {
    true
}

/// Rule deciding whether a post-shock balance sheet survives.
///
/// The default requires LCR ≥ 70% and positive liquid assets. A ratio with no
/// remaining funding (undefined LCR) has no outflows to cover and passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPolicy {
    /// Minimum post-shock LCR in percent.
    #[serde(default = "default_min_lcr_pct")]
    pub min_lcr_pct: f64,
    /// Whether liquid assets must stay strictly positive.
    #[serde(default = "default_true")]
    pub require_positive_liquid: bool,
    /// Whether an undefined LCR passes the ratio test.
    #[serde(default = "default_true")]
    pub undefined_lcr_passes: bool,
}

impl Default for SurvivalPolicy {
    fn default() -> Self {
        Self {
            min_lcr_pct: default_min_lcr_pct(),
            require_positive_liquid: true,
            undefined_lcr_passes: true,
        }
    }
}

impl SurvivalPolicy {
    /// Creates a policy with the given LCR floor and the default liquid rule.
    #[must_use]
    pub fn with_min_lcr(min_lcr_pct: f64) -> Self {
        Self {
            min_lcr_pct,
            ..Self::default()
        }
    }

    /// Evaluates the policy.
    #[must_use]
    pub fn survives(&self, lcr: Ratio, liquid_assets: f64) -> bool {
        let ratio_ok = match lcr {
            Ratio::Defined(v) => v >= self.min_lcr_pct,
            Ratio::Undefined => self.undefined_lcr_passes,
        };
        let liquid_ok = !self.require_positive_liquid || liquid_assets > 0.0;
        ratio_ok && liquid_ok
    }
}

/// Post-shock balance sheet and ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub scenario_name: String,
    /// Liquid assets after the haircut.
    pub liquid_assets_pct: f64,
    /// Illiquid assets (unchanged).
    pub illiquid_assets_pct: f64,
    /// Retail deposits after outflows.
    pub retail_deposits_pct: f64,
    /// Wholesale funding after outflows.
    pub wholesale_funding_pct: f64,
    /// Post-shock LCR.
    pub lcr: Ratio,
    /// Post-shock NSFR.
    pub nsfr: Ratio,
    /// Whether the survival policy passed.
    pub survived: bool,
}

/// Outcomes of a batch of scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// One outcome per scenario, in input order.
    pub outcomes: Vec<ScenarioOutcome>,
    /// Number of scenarios the balance sheet failed.
    pub failed_count: usize,
}

impl ScenarioSummary {
    /// Number of scenarios survived.
    #[must_use]
    pub fn survived_count(&self) -> usize {
        self.outcomes.len() - self.failed_count
    }

    /// Returns true if every scenario was survived.
    #[must_use]
    pub fn all_survived(&self) -> bool {
        self.failed_count == 0
    }
}

/// Applies stress scenarios to snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioEngine {
    factors: RatioFactors,
    policy: SurvivalPolicy,
}

impl ScenarioEngine {
    /// Creates an engine with default factors and policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ratio factors.
    #[must_use]
    pub fn with_factors(mut self, factors: RatioFactors) -> Self {
        self.factors = factors;
        self
    }

    /// Sets the survival policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SurvivalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Ratio factors in use.
    #[must_use]
    pub fn factors(&self) -> &RatioFactors {
        &self.factors
    }

    /// Survival policy in use.
    #[must_use]
    pub fn policy(&self) -> &SurvivalPolicy {
        &self.policy
    }

    /// Applies one scenario.
    pub fn apply(
        &self,
        snapshot: &BalanceSheetSnapshot,
        scenario: &StressScenario,
    ) -> BallastResult<ScenarioOutcome> {
        scenario.validate()?;

        let liquid = snapshot.liquid_assets_pct() * (1.0 - scenario.hqla_haircut_pct / 100.0);
        let retail = snapshot.retail_deposits_pct() * (1.0 - scenario.retail_outflow_pct / 100.0);
        let wholesale =
            snapshot.wholesale_funding_pct() * (1.0 - scenario.wholesale_outflow_pct / 100.0);
        let illiquid = snapshot.illiquid_assets_pct();

        let lcr = self.factors.lcr(liquid, retail, wholesale);
        let nsfr = self.factors.nsfr(retail, wholesale, illiquid);
        let survived = self.policy.survives(lcr, liquid);

        trace!(
            "scenario '{}': liquid {liquid:.2}, LCR {lcr}, NSFR {nsfr}, survived {survived}",
            scenario.name
        );

        Ok(ScenarioOutcome {
            scenario_name: scenario.name.clone(),
            liquid_assets_pct: liquid,
            illiquid_assets_pct: illiquid,
            retail_deposits_pct: retail,
            wholesale_funding_pct: wholesale,
            lcr,
            nsfr,
            survived,
        })
    }

    /// Applies each scenario in order.
    pub fn apply_all(
        &self,
        snapshot: &BalanceSheetSnapshot,
        scenarios: &[StressScenario],
    ) -> BallastResult<ScenarioSummary> {
        let outcomes = scenarios
            .iter()
            .map(|s| self.apply(snapshot, s))
            .collect::<BallastResult<Vec<_>>>()?;
        let failed_count = outcomes.iter().filter(|o| !o.survived).count();

        debug!(
            "applied {} scenarios, {failed_count} failed",
            outcomes.len()
        );

        Ok(ScenarioSummary {
            outcomes,
            failed_count,
        })
    }

    /// Applies the three funding-run presets.
    pub fn apply_standard(&self, snapshot: &BalanceSheetSnapshot) -> BallastResult<ScenarioSummary> {
        self.apply_all(snapshot, &standard::liquidity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioPreset;
    use approx::assert_relative_eq;

    #[test]
    fn test_northern_rock_moderate_run() {
        let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
        let outcome = ScenarioEngine::new()
            .apply(&snapshot, &ScenarioPreset::ModerateRun.scenario())
            .unwrap();

        assert_relative_eq!(outcome.liquid_assets_pct, 12.0, epsilon = 1e-12);
        assert_relative_eq!(outcome.retail_deposits_pct, 19.55, epsilon = 1e-12);
        assert_relative_eq!(outcome.wholesale_funding_pct, 50.05, epsilon = 1e-12);
        // 12 / (69.6 × 0.3)
        assert_relative_eq!(
            outcome.lcr.value().unwrap(),
            12.0 / 20.88 * 100.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            outcome.nsfr.value().unwrap(),
            (19.55 + 25.025) / 85.0 * 100.0,
            epsilon = 1e-9
        );
        assert!(!outcome.survived);
    }

    #[test]
    fn test_liquid_bank_survives() {
        let snapshot = BalanceSheetSnapshot::new(40.0, 20.0).unwrap();
        let summary = ScenarioEngine::new().apply_standard(&snapshot).unwrap();
        assert_eq!(summary.outcomes.len(), 3);
        // Moderate run: 32 / ((68 + 13) × 0.3) = 131.7%
        assert!(summary.outcomes[0].survived);
        // Systemic shock: 16 / ((60 + 4) × 0.3) = 83.3%
        assert!(summary.outcomes[2].survived);
        assert!(summary.all_survived());
    }

    #[test]
    fn test_failed_count() {
        let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
        let summary = ScenarioEngine::new().apply_standard(&snapshot).unwrap();
        assert_eq!(summary.failed_count, 3);
        assert_eq!(summary.survived_count(), 0);
    }

    #[test]
    fn test_undefined_lcr_policy() {
        // Every unit of funding runs off: LCR has no denominator.
        let snapshot = BalanceSheetSnapshot::new(30.0, 50.0).unwrap();
        let wipeout = StressScenario::custom("Total run").with_funding_outflows(100.0, 100.0);

        let outcome = ScenarioEngine::new().apply(&snapshot, &wipeout).unwrap();
        assert_eq!(outcome.lcr, Ratio::Undefined);
        assert!(outcome.survived);

        let strict = SurvivalPolicy {
            undefined_lcr_passes: false,
            ..SurvivalPolicy::default()
        };
        let outcome = ScenarioEngine::new()
            .with_policy(strict)
            .apply(&snapshot, &wipeout)
            .unwrap();
        assert!(!outcome.survived);
    }

    #[test]
    fn test_zero_liquid_fails() {
        let policy = SurvivalPolicy::default();
        assert!(!policy.survives(Ratio::Defined(500.0), 0.0));
        assert!(policy.survives(Ratio::Defined(70.0), 1.0));
        assert!(!SurvivalPolicy::with_min_lcr(100.0).survives(Ratio::Defined(99.9), 1.0));
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let snapshot = BalanceSheetSnapshot::new(30.0, 50.0).unwrap();
        let bad = StressScenario::custom("bad").with_haircut(150.0);
        assert!(ScenarioEngine::new().apply(&snapshot, &bad).is_err());
    }
}
