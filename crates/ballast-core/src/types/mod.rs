//! Domain types for banking risk analytics.
//!
//! - [`BondParameters`]: Plain fixed-rate bond
//! - [`CashflowSchedule`]: Ordered coupon and principal flows
//! - [`PaymentFrequency`]: Coupon frequency
//! - [`BalanceSheetSnapshot`]: Asset and funding composition in percent
//! - [`Ratio`] / [`MetricValue`]: Results that may have a zero denominator

mod balance_sheet;
mod bond;
mod cashflow;
mod frequency;
mod ratio;

pub use balance_sheet::BalanceSheetSnapshot;
pub use bond::BondParameters;
pub use cashflow::{Cashflow, CashflowKind, CashflowSchedule};
pub use frequency::PaymentFrequency;
pub use ratio::{MetricValue, Ratio};
