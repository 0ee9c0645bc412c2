//! # Ballast
//!
//! Banking risk analytics: interest-rate risk, liquidity ratios, stress
//! scenarios, bank-run simulation and credit decision thresholds.
//!
//! This crate re-exports the workspace members under one roof:
//!
//! - [`core`]: Balance-sheet snapshots, bonds, ratios and errors
//! - [`risk`]: Duration, DV01, repricing gap, LCR/NSFR and ALM
//! - [`scenarios`]: Stress presets, the scenario engine, rate and funding shocks
//! - [`liquidity`]: Day-by-day bank-run simulation
//! - [`credit`]: Cost-weighted threshold optimization for scored loans
//! - [`config`]: Named policies loaded from TOML or JSON
//!
//! ## Example
//!
//! ```rust
//! use ballast::prelude::*;
//!
//! let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
//! let policy = PolicyConfig::named("STANDARD").unwrap();
//!
//! let summary = policy.engine().apply_standard(&snapshot).unwrap();
//! assert_eq!(summary.outcomes.len(), 3);
//!
//! let run = RunSimulator::new()
//!     .with_factors(policy.ratio_factors)
//!     .run_horizon(&snapshot, policy.simulation.horizon_days, 8.0)
//!     .unwrap();
//! assert_eq!(run.failed_on_day(), Some(17));
//! ```

#![warn(missing_docs)]

pub use ballast_config as config;
pub use ballast_core as core;
pub use ballast_credit as credit;
pub use ballast_liquidity as liquidity;
pub use ballast_risk as risk;
pub use ballast_scenarios as scenarios;

pub use ballast_core::{BallastError, BallastResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ballast_config::{ConfigManager, PolicyConfig};
    pub use ballast_core::prelude::*;
    pub use ballast_credit::{CostModel, ScoredLoan, ThresholdGrid, ThresholdOptimizer};
    pub use ballast_liquidity::{RunPhase, RunSimulator, SimulationState};
    pub use ballast_risk::{analyze_bond, repricing_gap, snapshot_lcr, snapshot_nsfr, RatioFactors};
    pub use ballast_scenarios::{ScenarioEngine, ScenarioPreset, StressScenario, SurvivalPolicy};
}
