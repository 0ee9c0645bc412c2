//! CLI command implementations.

pub mod alm;
pub mod bond;
pub mod config;
pub mod funding;
pub mod gap;
pub mod ratios;
pub mod rates;
pub mod run;
pub mod scenario;
pub mod threshold;

pub use alm::AlmArgs;
pub use bond::BondArgs;
pub use config::ConfigArgs;
pub use funding::FundingArgs;
pub use gap::GapArgs;
pub use rates::RatesArgs;
pub use ratios::RatiosArgs;
pub use run::RunArgs;
pub use scenario::ScenarioArgs;
pub use threshold::ThresholdArgs;

use std::path::Path;

use ballast_config::{ConfigManager, PolicyConfig};
use ballast_core::BalanceSheetSnapshot;

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Settings shared by every command.
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Active policy.
    pub policy: PolicyConfig,
}

/// Loads the policy file if given, otherwise looks the name up.
pub fn resolve_policy(name: &str, path: Option<&Path>) -> CliResult<PolicyConfig> {
    if let Some(path) = path {
        let policy = PolicyConfig::from_path(path)?;
        tracing::info!(path = %path.display(), name = %policy.name, "loaded policy file");
        return Ok(policy);
    }
    Ok(ConfigManager::new().get(name)?)
}

/// Builds a snapshot from the two balance-sheet percentages.
pub fn snapshot(liquid_pct: f64, wholesale_pct: f64) -> CliResult<BalanceSheetSnapshot> {
    Ok(BalanceSheetSnapshot::new(liquid_pct, wholesale_pct)?)
}
