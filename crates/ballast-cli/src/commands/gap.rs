//! Gap command implementation.
//!
//! Repricing gap across maturity buckets and its net interest margin impact.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ballast_risk::{repricing_gap, BucketAmount, GapReport, MarginImpact, STANDARD_BUCKETS};

use crate::commands::Context;
use crate::error::CliError;
use crate::output::{emit, format_amount, print_info};

/// Arguments for the gap command.
#[derive(Args, Debug)]
pub struct GapArgs {
    /// Rate-sensitive assets per bucket, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub assets: Vec<f64>,

    /// Rate-sensitive liabilities per bucket, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub liabilities: Vec<f64>,

    /// Bucket labels; defaults to 0-3m,3-6m,6-12m,1-2y for four buckets
    #[arg(long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    /// Rate change in percentage points for the margin impact
    #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
    pub shock: f64,
}

#[derive(Debug, Serialize, Tabled)]
struct GapRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Assets")]
    assets: String,
    #[tabled(rename = "Liabilities")]
    liabilities: String,
    #[tabled(rename = "Gap")]
    gap: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
    #[tabled(rename = "NII Impact")]
    nii_impact: String,
}

#[derive(Debug, Serialize)]
struct GapOutput {
    report: GapReport,
    margin: MarginImpact,
}

fn labels(args: &GapArgs) -> Result<Vec<String>, CliError> {
    let count = args.assets.len();
    let labels = match &args.labels {
        Some(labels) => labels.clone(),
        None if count == STANDARD_BUCKETS.len() => {
            STANDARD_BUCKETS.iter().map(|s| (*s).to_string()).collect()
        }
        None => (1..=count).map(|i| format!("B{i}")).collect(),
    };
    if labels.len() != count {
        return Err(CliError::InvalidBuckets(format!(
            "{} labels for {count} buckets",
            labels.len()
        )));
    }
    Ok(labels)
}

/// Execute the gap command.
pub fn execute(args: GapArgs, ctx: &Context) -> Result<()> {
    let labels = labels(&args)?;
    let assets: Vec<BucketAmount> = labels
        .iter()
        .zip(&args.assets)
        .map(|(l, a)| BucketAmount::new(l.clone(), *a))
        .collect();
    let liabilities: Vec<BucketAmount> = labels
        .iter()
        .zip(&args.liabilities)
        .map(|(l, a)| BucketAmount::new(l.clone(), *a))
        .collect();
    if liabilities.len() != args.liabilities.len() {
        return Err(CliError::InvalidBuckets(format!(
            "{} liabilities for {} asset buckets",
            args.liabilities.len(),
            assets.len()
        ))
        .into());
    }

    let report = repricing_gap(&assets, &liabilities)?;
    let margin = report.margin_impact(args.shock);

    let rows: Vec<GapRow> = report
        .buckets
        .iter()
        .zip(&margin.by_bucket)
        .map(|(b, (_, impact))| GapRow {
            bucket: b.label.clone(),
            assets: format_amount(b.assets),
            liabilities: format_amount(b.liabilities),
            gap: format_amount(b.gap),
            cumulative: format_amount(b.cumulative_gap),
            nii_impact: format_amount(*impact),
        })
        .collect();

    let output = GapOutput { report, margin };
    emit(
        ctx.format,
        "Repricing Gap",
        &output,
        &rows,
        format_amount(output.report.total_gap),
    )?;

    if ctx.format == crate::cli::OutputFormat::Table {
        let verdict = match output.report.gap_type.benefits_from(args.shock) {
            Some(true) => "benefits from",
            Some(false) => "loses from",
            None => "is neutral to",
        };
        print_info(&format!(
            "{:?} gap of {}: margin {verdict} a {:+}% move ({} total)",
            output.report.gap_type,
            format_amount(output.report.total_gap),
            args.shock,
            format_amount(output.margin.total)
        ));
    }
    Ok(())
}
