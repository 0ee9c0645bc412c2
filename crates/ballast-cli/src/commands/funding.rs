//! Funding command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ballast_scenarios::funding::presets;
use ballast_scenarios::{apply_funding_shock, FundingProfile, FundingShock, FundingStressResult};

use crate::commands::Context;
use crate::error::{CliError, CliResult};
use crate::output::{emit, format_amount, format_ratio, print_info};

/// Arguments for the funding command.
#[derive(Args, Debug)]
pub struct FundingArgs {
    /// High-quality liquid assets
    #[arg(long)]
    pub hqla: f64,

    /// Retail deposits
    #[arg(long)]
    pub retail: f64,

    /// Corporate deposits
    #[arg(long)]
    pub corporate: f64,

    /// Short-term wholesale funding
    #[arg(long)]
    pub short_term: f64,

    /// Long-term funding
    #[arg(long)]
    pub long_term: f64,

    /// Liquid assets as a percentage of total assets
    #[arg(long, default_value = "20")]
    pub liquid_pct: f64,

    /// Shock: moderate, bank-run, systemic, northern-rock or all
    #[arg(long, default_value = "all")]
    pub shock: String,
}

#[derive(Debug, Serialize, Tabled)]
struct FundingRow {
    #[tabled(rename = "Shock")]
    shock: String,
    #[tabled(rename = "Outflows")]
    outflows: String,
    #[tabled(rename = "Adjusted HQLA")]
    adjusted_hqla: String,
    #[tabled(rename = "LCR Before")]
    lcr_before: String,
    #[tabled(rename = "LCR After")]
    lcr_after: String,
    #[tabled(rename = "Survival Days")]
    survival_days: String,
    #[tabled(rename = "Result")]
    result: String,
}

/// Resolves a shock name to one or all presets.
pub fn resolve_shocks(name: &str) -> CliResult<Vec<FundingShock>> {
    let normalized: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    match normalized.as_str() {
        "all" => Ok(presets::all()),
        "moderate" => Ok(vec![presets::moderate()]),
        "bankrun" => Ok(vec![presets::bank_run()]),
        "systemic" => Ok(vec![presets::systemic()]),
        "northernrock" => Ok(vec![presets::northern_rock()]),
        _ => Err(CliError::UnknownFundingShock(name.to_string())),
    }
}

/// Execute the funding command.
pub fn execute(args: FundingArgs, ctx: &Context) -> Result<()> {
    let profile = FundingProfile {
        hqla: args.hqla,
        retail_deposits: args.retail,
        corporate_deposits: args.corporate,
        short_term_funding: args.short_term,
        long_term_funding: args.long_term,
        liquid_assets_pct: args.liquid_pct,
    };
    let shocks = resolve_shocks(&args.shock)?;
    let results = shocks
        .iter()
        .map(|s| apply_funding_shock(&profile, s))
        .collect::<Result<Vec<FundingStressResult>, _>>()?;

    let rows: Vec<FundingRow> = results
        .iter()
        .map(|r| FundingRow {
            shock: r.shock_name.clone(),
            outflows: format_amount(r.total_outflows),
            adjusted_hqla: format_amount(r.adjusted_hqla),
            lcr_before: format_ratio(r.pre_stress_lcr),
            lcr_after: format_ratio(r.post_stress_lcr),
            survival_days: format!("{:.1}", r.survival_days),
            result: if r.survives { "SURVIVES" } else { "SHORTFALL" }.to_string(),
        })
        .collect();

    let survived = results.iter().filter(|r| r.survives).count();
    emit(ctx.format, "Funding Stress", &results, &rows, survived)?;
    if ctx.format == crate::cli::OutputFormat::Table {
        print_info(&format!(
            "pre-stress NSFR {}; {survived} of {} shocks covered by HQLA",
            format_ratio(profile.nsfr()),
            results.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_shocks() {
        assert_eq!(resolve_shocks("all").unwrap().len(), 4);
        assert_eq!(resolve_shocks("Bank Run").unwrap()[0].name, "Bank run");
        assert_eq!(
            resolve_shocks("northern-rock").unwrap()[0].name,
            "Northern Rock 2007"
        );
        assert!(resolve_shocks("meteor").is_err());
    }
}
