//! ALM command implementation.
//!
//! Duration gap of the balance sheet and the effect of a rebalancing or
//! hedging strategy on equity sensitivity.

use anyhow::Result;
use clap::Args;

use ballast_risk::{compare_strategy, AlmPosition, AlmStrategy};

use crate::commands::Context;
use crate::output::{emit, format_amount, KeyValue};

/// Arguments for the alm command.
#[derive(Args, Debug)]
pub struct AlmArgs {
    /// Total assets
    #[arg(long)]
    pub assets: f64,

    /// Asset duration in years
    #[arg(long)]
    pub asset_duration: f64,

    /// Total liabilities
    #[arg(long)]
    pub liabilities: f64,

    /// Liability duration in years
    #[arg(long)]
    pub liability_duration: f64,

    /// Rate move in basis points
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    pub bps: f64,

    /// Target asset duration after rebalancing
    #[arg(long)]
    pub target_asset_duration: Option<f64>,

    /// Target liability duration after rebalancing
    #[arg(long)]
    pub target_liability_duration: Option<f64>,

    /// Hedge notional (negative for a short hedge)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub hedge_notional: f64,

    /// Hedge instrument duration in years
    #[arg(long, default_value = "0")]
    pub hedge_duration: f64,
}

/// Execute the alm command.
pub fn execute(args: AlmArgs, ctx: &Context) -> Result<()> {
    let position = AlmPosition {
        assets: args.assets,
        asset_duration: args.asset_duration,
        liabilities: args.liabilities,
        liability_duration: args.liability_duration,
    };
    let strategy = AlmStrategy {
        asset_duration: args.target_asset_duration,
        liability_duration: args.target_liability_duration,
        hedge_notional: args.hedge_notional,
        hedge_duration: args.hedge_duration,
    };
    let comparison = compare_strategy(&position, &strategy, args.bps)?;

    let rows = vec![
        KeyValue::new("Equity", format_amount(comparison.equity)),
        KeyValue::from_f64("Duration Gap (before)", comparison.gap_before, 4),
        KeyValue::from_f64("Duration Gap (after)", comparison.gap_after, 4),
        KeyValue::from_f64("Adjusted Asset Duration", comparison.adjusted_asset_duration, 4),
        KeyValue::new(
            format!("Equity Impact {:+} bps (before)", args.bps),
            format_amount(comparison.impact_before),
        ),
        KeyValue::new(
            format!("Equity Impact {:+} bps (after)", args.bps),
            format_amount(comparison.impact_after),
        ),
        KeyValue::new("Risk Reduction", format_amount(comparison.reduction)),
        KeyValue::new(
            "Risk Reduction %",
            comparison
                .reduction_pct
                .as_option()
                .map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}%")),
        ),
        KeyValue::new("Assessment", format!("{:?}", comparison.assessment)),
    ];

    emit(
        ctx.format,
        "Duration Gap Analysis",
        &comparison,
        &rows,
        format!("{:.4}", comparison.gap_before),
    )
}
