//! Ballast CLI - Command-line interface for banking risk analytics.
//!
//! # Usage
//!
//! ```bash
//! # Duration and DV01 of a bond
//! ballast bond --face 1000 --coupon 5 --maturity 5 --market-rate 6
//!
//! # Apply the funding-run scenarios to a balance sheet
//! ballast scenario --liquid 15 --wholesale 77
//!
//! # Simulate a bank run
//! ballast run --liquid 15 --wholesale 77 --stress 8
//!
//! # Pick a credit decision threshold
//! ballast threshold --loans scored.json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let policy = commands::resolve_policy(&cli.policy, cli.config.as_deref())?;
    tracing::debug!(policy = %policy.name, "resolved policy");
    let ctx = Context {
        format: cli.format,
        policy,
    };

    match cli.command {
        Commands::Bond(args) => commands::bond::execute(args, &ctx)?,
        Commands::Gap(args) => commands::gap::execute(args, &ctx)?,
        Commands::Ratios(args) => commands::ratios::execute(args, &ctx)?,
        Commands::Alm(args) => commands::alm::execute(args, &ctx)?,
        Commands::Scenario(args) => commands::scenario::execute(args, &ctx)?,
        Commands::Rates(args) => commands::rates::execute(args, &ctx)?,
        Commands::Funding(args) => commands::funding::execute(args, &ctx)?,
        Commands::Run(args) => commands::run::execute(args, &ctx)?,
        Commands::Threshold(args) => commands::threshold::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level from `warn`.
/// Library `log` records are bridged into the subscriber.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
