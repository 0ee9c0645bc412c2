//! # Ballast Risk
//!
//! Pure risk metrics for banking books.
//!
//! - **Duration**: Bond price, Macaulay and modified duration
//! - **Sensitivity**: First-order price change and DV01
//! - **Gap**: Repricing gap by time bucket and margin impact
//! - **Ratios**: LCR, NSFR and a balance-sheet liquidity score
//! - **ALM**: Duration gap and hedging strategies
//!
//! ## Example
//!
//! ```rust
//! use ballast_core::{BondParameters, PaymentFrequency};
//! use ballast_risk::prelude::*;
//!
//! let bond = BondParameters::new(1000.0, 5.0, PaymentFrequency::Annual, 5.0, 6.0).unwrap();
//! let result = analyze_bond(&bond).unwrap();
//! let value = dv01(result.modified_duration_years, result.price).unwrap();
//! assert!(value.as_f64() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

pub mod alm;
pub mod duration;
pub mod dv01;
pub mod gap;
pub mod ratios;
pub mod sensitivity;

pub use ballast_core::{BallastError, BallastResult};

pub use alm::{
    compare_strategy, duration_gap, equity_sensitivity, hedged_asset_duration, AlmComparison,
    AlmPosition, AlmStrategy, GapAssessment,
};
pub use duration::{analyze_bond, bond_price, macaulay_duration, modified_duration, DurationResult};
pub use dv01::{dv01, dv01_impact, dv01_impact_pct, Dv01};
pub use gap::{
    margin_impact, repricing_gap, standard_buckets, BucketAmount, BucketGap, GapReport, GapType,
    MarginImpact, STANDARD_BUCKETS,
};
pub use ratios::{
    lcr, liquidity_risk_score, nsfr, snapshot_lcr, snapshot_nsfr, RatioFactors,
};
pub use sensitivity::{price_sensitivity, price_yield_profile, PricePoint, STANDARD_RATE_MOVES};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::alm::*;
    pub use crate::duration::*;
    pub use crate::dv01::*;
    pub use crate::gap::*;
    pub use crate::ratios::*;
    pub use crate::sensitivity::*;
    pub use ballast_core::{BallastError, BallastResult, Ratio};
}
