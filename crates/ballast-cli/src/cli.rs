//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    AlmArgs, BondArgs, ConfigArgs, FundingArgs, GapArgs, RatesArgs, RatiosArgs, RunArgs,
    ScenarioArgs, ThresholdArgs,
};

/// Ballast - Banking risk analytics CLI
#[derive(Parser)]
#[command(name = "ballast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Named policy (STANDARD, CONSERVATIVE)
    #[arg(long, global = true, env = "BALLAST_POLICY", default_value = "STANDARD")]
    pub policy: String,

    /// Policy file (.toml or .json); overrides --policy
    #[arg(short, long, global = true, env = "BALLAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a bond and compute its duration and DV01
    Bond(BondArgs),

    /// Repricing gap across maturity buckets
    Gap(GapArgs),

    /// LCR, NSFR and liquidity risk score of a balance sheet
    Ratios(RatiosArgs),

    /// Duration gap and hedging strategy comparison
    Alm(AlmArgs),

    /// Apply stress scenarios to a balance sheet
    Scenario(ScenarioArgs),

    /// Apply rate-shock scenarios to a bond portfolio
    Rates(RatesArgs),

    /// Apply funding shocks to a detailed funding profile
    Funding(FundingArgs),

    /// Simulate a bank run day by day
    Run(RunArgs),

    /// Find the cost-minimizing credit decision threshold
    Threshold(ThresholdArgs),

    /// Inspect and validate policies
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
