//! # Ballast Credit
//!
//! Decision analytics for scored loan books.
//!
//! A model assigns each loan a probability of default. A loan is rejected
//! when its score is at or above the decision threshold. This crate finds
//! the threshold that minimizes the expected cost of wrong decisions, where
//! an approved default costs far more than a rejected good loan.
//!
//! - [`ThresholdOptimizer`]: Sweeps a [`ThresholdGrid`] under a [`CostModel`]
//! - [`ConfusionMatrix`]: Counts and metrics at one threshold
//! - [`roc_curve`] and [`log_loss`]: Ranking quality of the scores
//! - [`tier_summary`]: Book composition by [`RiskTier`]
//!
//! ## Example
//!
//! ```rust
//! use ballast_credit::prelude::*;
//!
//! let loans = vec![
//!     ScoredLoan::new("a", 0.05).with_label(false),
//!     ScoredLoan::new("b", 0.72).with_label(true),
//! ];
//! let sweep = ThresholdOptimizer::new().sweep(&loans).unwrap();
//! assert!(sweep.best().estimated_cost.is_zero());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod confusion;
pub mod cost;
pub mod grid;
pub mod loan;
pub mod optimizer;
pub mod roc;
pub mod tiers;

pub use ballast_core::{BallastError, BallastResult, MetricValue};
pub use confusion::ConfusionMatrix;
pub use cost::{CostModel, DEFAULT_AVG_LOAN_AMOUNT};
pub use grid::ThresholdGrid;
pub use loan::ScoredLoan;
pub use optimizer::{ThresholdEvaluation, ThresholdOptimizer, ThresholdSweep, ThresholdSweepRow};
pub use roc::{auc, log_loss, roc_curve, RocCurve, RocPoint};
pub use tiers::{tier_summary, RiskTier, TierSummary};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::confusion::ConfusionMatrix;
    pub use crate::cost::CostModel;
    pub use crate::grid::ThresholdGrid;
    pub use crate::loan::ScoredLoan;
    pub use crate::optimizer::{ThresholdOptimizer, ThresholdSweep, ThresholdSweepRow};
    pub use crate::roc::{log_loss, roc_curve};
    pub use crate::tiers::RiskTier;
    pub use ballast_core::{BallastError, BallastResult, MetricValue};
}
