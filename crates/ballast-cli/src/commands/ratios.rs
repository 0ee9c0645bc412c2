//! Ratios command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use ballast_core::Ratio;
use ballast_risk::{liquidity_risk_score, snapshot_lcr, snapshot_nsfr};

use crate::commands::{snapshot, Context};
use crate::output::{emit, format_pct, format_ratio, print_verdict, KeyValue};

/// Arguments for the ratios command.
#[derive(Args, Debug)]
pub struct RatiosArgs {
    /// Liquid assets as a percentage of total assets
    #[arg(long)]
    pub liquid: f64,

    /// Wholesale funding as a percentage of total funding
    #[arg(long)]
    pub wholesale: f64,
}

#[derive(Debug, Serialize)]
struct RatiosReport {
    liquid_assets_pct: f64,
    wholesale_funding_pct: f64,
    lcr: Ratio,
    nsfr: Ratio,
    liquidity_risk_score: f64,
    meets_min_lcr: bool,
}

/// Execute the ratios command.
pub fn execute(args: RatiosArgs, ctx: &Context) -> Result<()> {
    let snapshot = snapshot(args.liquid, args.wholesale)?;
    let factors = &ctx.policy.ratio_factors;
    let lcr = snapshot_lcr(&snapshot, factors);
    let nsfr = snapshot_nsfr(&snapshot, factors);
    let score = liquidity_risk_score(&snapshot);
    let meets_min_lcr = ctx
        .policy
        .survival
        .survives(lcr, snapshot.liquid_assets_pct());

    let rows = vec![
        KeyValue::new("Liquid Assets", format_pct(snapshot.liquid_assets_pct())),
        KeyValue::new("Illiquid Assets", format_pct(snapshot.illiquid_assets_pct())),
        KeyValue::new("Retail Deposits", format_pct(snapshot.retail_deposits_pct())),
        KeyValue::new("Wholesale Funding", format_pct(snapshot.wholesale_funding_pct())),
        KeyValue::new("LCR", format_ratio(lcr)),
        KeyValue::new("NSFR", format_ratio(nsfr)),
        KeyValue::from_f64("Liquidity Risk Score", score, 1),
    ];
    let report = RatiosReport {
        liquid_assets_pct: snapshot.liquid_assets_pct(),
        wholesale_funding_pct: snapshot.wholesale_funding_pct(),
        lcr,
        nsfr,
        liquidity_risk_score: score,
        meets_min_lcr,
    };

    emit(ctx.format, "Liquidity Ratios", &report, &rows, format_ratio(lcr))?;
    if ctx.format == crate::cli::OutputFormat::Table {
        print_verdict(
            meets_min_lcr,
            &format!(
                "LCR floor {}% under policy {}",
                ctx.policy.survival.min_lcr_pct, ctx.policy.name
            ),
        );
    }
    Ok(())
}
