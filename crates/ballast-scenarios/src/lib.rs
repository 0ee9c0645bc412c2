//! # Ballast Scenarios
//!
//! Stress scenarios and their application to bank balance sheets.
//!
//! - **Scenarios**: A closed catalog of presets plus custom scenarios
//! - **Engine**: Post-shock liquidity, LCR, NSFR and survival
//! - **Rate shocks**: Duration-based losses on a bucketed portfolio
//! - **Funding**: Absolute-terms outflow stress with survival horizon
//!
//! ## Example
//!
//! ```rust
//! use ballast_core::BalanceSheetSnapshot;
//! use ballast_scenarios::prelude::*;
//!
//! let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
//! let summary = ScenarioEngine::new().apply_standard(&snapshot).unwrap();
//! assert_eq!(summary.failed_count, 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

pub mod engine;
pub mod funding;
pub mod rate_shock;
pub mod scenario;

pub use ballast_core::{BallastError, BallastResult};

pub use engine::{ScenarioEngine, ScenarioOutcome, ScenarioSummary, SurvivalPolicy};
pub use funding::{apply_funding_shock, FundingProfile, FundingShock, FundingStressResult};
pub use rate_shock::{
    apply_rate_shock, holdings_from_weights, BucketHolding, RateShockLine, RateShockReport,
    SolvencyStatus,
};
pub use scenario::{
    standard, BucketShock, RateBucket, ScenarioKind, ScenarioPreset, StressScenario,
    DEFAULT_HORIZON_DAYS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::*;
    pub use crate::funding::{apply_funding_shock, presets, FundingProfile, FundingShock};
    pub use crate::rate_shock::*;
    pub use crate::scenario::*;
}
