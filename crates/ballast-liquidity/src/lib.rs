//! # Ballast Liquidity
//!
//! Discrete-time simulation of a bank run.
//!
//! Each day a growing share of retail deposits and wholesale funding is
//! withdrawn and paid out of liquid assets. The run fails on the first day
//! liquid assets are exhausted, and survives if the horizon completes.
//!
//! - [`SimulationState`]: The daily state machine, steppable by hand
//! - [`RunSimulator`]: Runs to completion and records the trajectory
//! - [`RunSimulator::stress_profile`]: Failure day across stress levels
//!
//! Runs are deterministic: the same inputs always give the same outcome.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

pub mod simulator;
pub mod state;

pub use ballast_core::{BallastError, BallastResult};
pub use simulator::{DayRecord, RunOutcome, RunSimulator, StressPoint};
pub use state::{
    DayFlows, RunPhase, SimulationState, MAX_HORIZON_DAYS, MAX_RETAIL_RUN_PCT,
    MAX_WHOLESALE_RUN_PCT,
};
