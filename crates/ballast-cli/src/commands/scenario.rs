//! Scenario command implementation.
//!
//! Applies preset or custom stress scenarios to a balance-sheet snapshot.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ballast_scenarios::{standard, ScenarioSummary, StressScenario};

use crate::commands::{snapshot, Context};
use crate::output::{emit, format_pct, format_ratio, print_verdict};

/// Arguments for the scenario command.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Liquid assets as a percentage of total assets
    #[arg(long)]
    pub liquid: f64,

    /// Wholesale funding as a percentage of total funding
    #[arg(long)]
    pub wholesale: f64,

    /// Preset name or slug; repeat for several. Defaults to the funding-run presets.
    #[arg(long = "name")]
    pub names: Vec<String>,

    /// Apply every preset, including the rate shocks
    #[arg(long, conflicts_with = "names")]
    pub all: bool,

    /// Custom scenario: retail outflow in percent
    #[arg(long)]
    pub retail_outflow: Option<f64>,

    /// Custom scenario: wholesale outflow in percent
    #[arg(long)]
    pub wholesale_outflow: Option<f64>,

    /// Custom scenario: liquid asset haircut in percent
    #[arg(long)]
    pub haircut: Option<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Liquid")]
    liquid: String,
    #[tabled(rename = "Retail")]
    retail: String,
    #[tabled(rename = "Wholesale")]
    wholesale: String,
    #[tabled(rename = "LCR")]
    lcr: String,
    #[tabled(rename = "NSFR")]
    nsfr: String,
    #[tabled(rename = "Result")]
    result: String,
}

fn scenarios(args: &ScenarioArgs) -> Result<Vec<StressScenario>> {
    let mut selected = if args.all {
        standard::all()
    } else if args.names.is_empty() {
        Vec::new()
    } else {
        args.names
            .iter()
            .map(|n| StressScenario::from_name(n))
            .collect::<Result<Vec<_>, _>>()?
    };

    if args.retail_outflow.is_some() || args.wholesale_outflow.is_some() || args.haircut.is_some() {
        selected.push(
            StressScenario::custom("Custom")
                .with_funding_outflows(
                    args.retail_outflow.unwrap_or(0.0),
                    args.wholesale_outflow.unwrap_or(0.0),
                )
                .with_haircut(args.haircut.unwrap_or(0.0)),
        );
    }
    if selected.is_empty() {
        selected = standard::liquidity();
    }
    Ok(selected)
}

/// Execute the scenario command.
pub fn execute(args: ScenarioArgs, ctx: &Context) -> Result<()> {
    let snapshot = snapshot(args.liquid, args.wholesale)?;
    let scenarios = scenarios(&args)?;
    let summary: ScenarioSummary = ctx.policy.engine().apply_all(&snapshot, &scenarios)?;

    let rows: Vec<OutcomeRow> = summary
        .outcomes
        .iter()
        .map(|o| OutcomeRow {
            scenario: o.scenario_name.clone(),
            liquid: format_pct(o.liquid_assets_pct),
            retail: format_pct(o.retail_deposits_pct),
            wholesale: format_pct(o.wholesale_funding_pct),
            lcr: format_ratio(o.lcr),
            nsfr: format_ratio(o.nsfr),
            result: if o.survived { "SURVIVED" } else { "FAILED" }.to_string(),
        })
        .collect();

    emit(
        ctx.format,
        "Stress Scenarios",
        &summary,
        &rows,
        summary.failed_count,
    )?;

    if ctx.format == crate::cli::OutputFormat::Table {
        print_verdict(
            summary.all_survived(),
            &format!(
                "{} of {} scenarios survived (LCR floor {}%)",
                summary.survived_count(),
                summary.outcomes.len(),
                ctx.policy.survival.min_lcr_pct
            ),
        );
    }
    Ok(())
}
