//! Rates command implementation.
//!
//! Applies rate-shock scenarios to a bond portfolio split across short,
//! medium and long maturity buckets.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ballast_scenarios::{
    apply_rate_shock, holdings_from_weights, RateBucket, RateShockReport, ScenarioPreset,
    StressScenario,
};

use crate::commands::Context;
use crate::error::CliError;
use crate::output::{emit, format_amount, format_pct};

/// Arguments for the rates command.
#[derive(Args, Debug)]
pub struct RatesArgs {
    /// Portfolio market value
    #[arg(long, default_value = "1000")]
    pub portfolio: f64,

    /// Equity capital absorbing the loss
    #[arg(long, default_value = "100")]
    pub capital: f64,

    /// Short, medium and long weights in percent, comma separated
    #[arg(long, value_delimiter = ',', default_value = "20,30,50")]
    pub weights: Vec<f64>,

    /// Short, medium and long durations in years, comma separated
    #[arg(long, value_delimiter = ',', default_value = "1,3.5,7")]
    pub durations: Vec<f64>,

    /// Preset name or slug; repeat for several. Defaults to every rate preset.
    #[arg(long = "name")]
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ShockRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Loss")]
    loss: String,
    #[tabled(rename = "Capital Impact")]
    capital_impact: String,
    #[tabled(rename = "Remaining Capital")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Execute the rates command.
pub fn execute(args: RatesArgs, ctx: &Context) -> Result<()> {
    let buckets = [RateBucket::Short, RateBucket::Medium, RateBucket::Long];
    if args.weights.len() != buckets.len() || args.durations.len() != buckets.len() {
        return Err(CliError::InvalidBuckets(format!(
            "expected 3 weights and 3 durations, got {} and {}",
            args.weights.len(),
            args.durations.len()
        ))
        .into());
    }
    let weights: Vec<(RateBucket, f64, f64)> = buckets
        .into_iter()
        .zip(args.weights.iter().zip(&args.durations))
        .map(|(bucket, (w, d))| (bucket, *w, *d))
        .collect();
    let holdings = holdings_from_weights(args.portfolio, &weights)?;

    let scenarios: Vec<StressScenario> = if args.names.is_empty() {
        ScenarioPreset::RATES.iter().map(ScenarioPreset::scenario).collect()
    } else {
        args.names
            .iter()
            .map(|n| StressScenario::from_name(n))
            .collect::<Result<_, _>>()?
    };

    let reports = scenarios
        .iter()
        .map(|s| apply_rate_shock(&holdings, s, args.capital))
        .collect::<Result<Vec<RateShockReport>, _>>()?;

    let rows: Vec<ShockRow> = reports
        .iter()
        .map(|r| ShockRow {
            scenario: r.scenario_name.clone(),
            loss: format_amount(r.total_loss),
            capital_impact: format_pct(r.capital_impact_pct),
            remaining: format_amount(r.remaining_capital),
            status: r.status.to_string(),
        })
        .collect();

    let worst = reports
        .iter()
        .map(|r| r.capital_impact_pct)
        .fold(0.0_f64, f64::max);
    emit(
        ctx.format,
        "Interest Rate Stress",
        &reports,
        &rows,
        format!("{worst:.2}"),
    )
}
