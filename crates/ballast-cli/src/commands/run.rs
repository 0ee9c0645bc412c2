//! Run command implementation.
//!
//! Simulates a bank run day by day, or sweeps stress levels to find the
//! failure day for each.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ballast_liquidity::{RunOutcome, RunSimulator};
use ballast_scenarios::StressScenario;

use crate::cli::OutputFormat;
use crate::commands::{snapshot, Context};
use crate::output::{emit, format_pct, format_ratio, print_header, print_table, print_verdict, KeyValue};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Liquid assets as a percentage of total assets
    #[arg(long)]
    pub liquid: f64,

    /// Wholesale funding as a percentage of total funding
    #[arg(long)]
    pub wholesale: f64,

    /// Market stress level; defaults to the policy's
    #[arg(long)]
    pub stress: Option<f64>,

    /// Horizon in days; defaults to the policy's
    #[arg(long, conflicts_with = "scenario")]
    pub horizon: Option<u32>,

    /// Take the horizon from a preset scenario
    #[arg(long)]
    pub scenario: Option<String>,

    /// Print the day-by-day trajectory
    #[arg(long)]
    pub trajectory: bool,

    /// Sweep these stress levels instead of a single run, comma separated
    #[arg(long, value_delimiter = ',')]
    pub sweep: Option<Vec<f64>>,
}

#[derive(Debug, Serialize, Tabled)]
struct DayRow {
    #[tabled(rename = "Day")]
    day: u32,
    #[tabled(rename = "Run Prob.")]
    run_probability: String,
    #[tabled(rename = "Retail")]
    retail: String,
    #[tabled(rename = "Wholesale")]
    wholesale: String,
    #[tabled(rename = "Liquid")]
    liquid: String,
    #[tabled(rename = "LCR")]
    lcr: String,
}

#[derive(Debug, Serialize, Tabled)]
struct SweepRow {
    #[tabled(rename = "Stress")]
    stress_level: f64,
    #[tabled(rename = "Outcome")]
    outcome: String,
}

fn describe(outcome: &RunOutcome) -> String {
    match outcome.failed_on_day() {
        Some(day) => day.to_string(),
        None => "survived".to_string(),
    }
}

/// Execute the run command.
pub fn execute(args: RunArgs, ctx: &Context) -> Result<()> {
    let snapshot = snapshot(args.liquid, args.wholesale)?;
    let defaults = ctx.policy.simulation;
    let stress = args.stress.unwrap_or(defaults.stress_level);
    let horizon = args.horizon.unwrap_or(defaults.horizon_days);
    let simulator = RunSimulator::new().with_factors(ctx.policy.ratio_factors);

    if let Some(levels) = &args.sweep {
        let points = simulator.stress_profile(&snapshot, horizon, levels)?;
        let rows: Vec<SweepRow> = points
            .iter()
            .map(|p| SweepRow {
                stress_level: p.stress_level,
                outcome: p.phase.to_string(),
            })
            .collect();
        let first_failure = points
            .iter()
            .find_map(|p| p.failed_on_day().map(|d| format!("{} {d}", p.stress_level)))
            .unwrap_or_else(|| "none".to_string());
        return emit(ctx.format, "Stress Profile", &points, &rows, first_failure);
    }

    let outcome = match &args.scenario {
        Some(name) => simulator.run(&snapshot, &StressScenario::from_name(name)?, stress)?,
        None => simulator.run_horizon(&snapshot, horizon, stress)?,
    };

    let final_state = &outcome.final_state;
    let rows = vec![
        KeyValue::new("Scenario", outcome.scenario_name.clone()),
        KeyValue::new("Stress Level", format!("{stress}")),
        KeyValue::new("Horizon", format!("{} days", final_state.horizon_days())),
        KeyValue::new("Outcome", outcome.phase.to_string()),
        KeyValue::new(
            "Liquid Assets (final)",
            format_pct(final_state.liquid_assets_remaining_pct()),
        ),
        KeyValue::new(
            "Retail Deposits (final)",
            format_pct(final_state.retail_remaining_pct()),
        ),
        KeyValue::new(
            "Wholesale Funding (final)",
            format_pct(final_state.wholesale_remaining_pct()),
        ),
        KeyValue::new(
            "Cumulative Outflow",
            format_pct(final_state.cumulative_outflow_pct()),
        ),
        KeyValue::new(
            "Minimum LCR",
            outcome
                .min_lcr()
                .map_or_else(|| "undefined".to_string(), format_pct),
        ),
    ];

    emit(ctx.format, "Liquidity Run Simulation", &outcome, &rows, describe(&outcome))?;

    if ctx.format == OutputFormat::Table {
        if args.trajectory {
            print_header("Trajectory");
            let days: Vec<DayRow> = outcome
                .trajectory
                .iter()
                .map(|d| DayRow {
                    day: d.day,
                    run_probability: format!("{:.3}", d.run_probability),
                    retail: format_pct(d.retail_deposits_pct),
                    wholesale: format_pct(d.wholesale_funding_pct),
                    liquid: format_pct(d.liquid_assets_pct),
                    lcr: format_ratio(d.lcr),
                })
                .collect();
            print_table(&days);
        }
        print_verdict(outcome.survived(), &format!("Run {}", outcome.phase));
    }
    Ok(())
}
