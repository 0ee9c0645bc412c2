//! # Ballast Core
//!
//! Core types, errors, and sentinels for the Ballast banking risk analytics library.
//!
//! - **Types**: `BondParameters`, `BalanceSheetSnapshot`, `CashflowSchedule`
//! - **Sentinels**: `Ratio` and `MetricValue` for zero-denominator results
//! - **Errors**: `BallastError` and the `BallastResult` alias
//!
//! ## Example
//!
//! ```rust
//! use ballast_core::prelude::*;
//!
//! let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
//! assert_eq!(snapshot.retail_deposits_pct(), 23.0);
//!
//! assert_eq!(Ratio::percent(10.0, 0.0), Ratio::Undefined);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod types;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{BallastError, BallastResult};
    pub use crate::types::{
        BalanceSheetSnapshot, BondParameters, Cashflow, CashflowKind, CashflowSchedule,
        MetricValue, PaymentFrequency, Ratio,
    };
}

pub use error::{BallastError, BallastResult};
pub use types::{BalanceSheetSnapshot, BondParameters, MetricValue, PaymentFrequency, Ratio};
