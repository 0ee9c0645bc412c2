//! Ballast Configuration Layer
//!
//! Policy settings for the Ballast analytics. Survival floors, run-off
//! factors and credit cost weights are configuration, not domain truths,
//! so they live here rather than as constants in the analytics crates.
//!
//! # Features
//!
//! - **Policies**: [`PolicyConfig`] bundles every tunable with serde defaults
//! - **File loading**: TOML or JSON, chosen by extension
//! - **Validation**: [`Validate`] reports every violation at once
//! - **Registry**: [`ConfigManager`] shares named policies across threads
//!
//! # Example
//!
//! ```rust
//! use ballast_config::{ConfigManager, PolicyConfig};
//!
//! let manager = ConfigManager::new();
//! let policy = manager.get("CONSERVATIVE").unwrap();
//! assert_eq!(policy.survival.min_lcr_pct, 100.0);
//!
//! let engine = policy.engine();
//! let optimizer = policy.optimizer().unwrap();
//! assert_eq!(optimizer.grid().len(), 9);
//! # let _ = engine;
//! ```
//!
//! # Standard Policies
//!
//! - `STANDARD` - LCR floor 70%, bad-loss rate 0.7
//! - `CONSERVATIVE` - LCR floor 100%, bad-loss rate 0.9

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod manager;
mod policy;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use manager::ConfigManager;
pub use policy::{GridParams, PolicyConfig, SimulationDefaults, CONSERVATIVE, STANDARD};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::manager::ConfigManager;
    pub use crate::policy::{GridParams, PolicyConfig, SimulationDefaults};
}
