//! Threshold command implementation.
//!
//! Reads a JSON array of scored loans and finds the decision threshold
//! that minimizes expected misclassification cost under the active policy.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use ballast_credit::{
    log_loss, roc_curve, tier_summary, ScoredLoan, ThresholdEvaluation, ThresholdGrid,
    ThresholdOptimizer, ThresholdSweep, TierSummary,
};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::{CliError, CliResult};
use crate::output::{emit, format_metric, print_header, print_info, print_table, KeyValue};

/// Arguments for the threshold command.
#[derive(Args, Debug)]
pub struct ThresholdArgs {
    /// JSON file holding an array of scored loans
    #[arg(long)]
    pub loans: PathBuf,

    /// Evaluate a single threshold instead of sweeping the grid
    #[arg(long)]
    pub at: Option<f64>,

    /// Lowest grid threshold; defaults to the policy's
    #[arg(long)]
    pub min: Option<f64>,

    /// Highest grid threshold; defaults to the policy's
    #[arg(long)]
    pub max: Option<f64>,

    /// Number of grid points; defaults to the policy's
    #[arg(long)]
    pub points: Option<usize>,

    /// Also report AUC and log loss
    #[arg(long)]
    pub roc: bool,

    /// Also report the book by risk tier
    #[arg(long)]
    pub tiers: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct SweepRow {
    #[tabled(rename = "Threshold")]
    threshold: String,
    #[tabled(rename = "TP")]
    tp: u64,
    #[tabled(rename = "FP")]
    fp: u64,
    #[tabled(rename = "TN")]
    tn: u64,
    #[tabled(rename = "FN")]
    fn_: u64,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
    #[tabled(rename = "Precision")]
    precision: String,
    #[tabled(rename = "Recall")]
    recall: String,
    #[tabled(rename = "F1")]
    f1: String,
    #[tabled(rename = "Specificity")]
    specificity: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Best")]
    best: String,
}

#[derive(Debug, Serialize)]
struct ThresholdReport {
    loans: usize,
    avg_loan_amount: f64,
    sweep: Option<ThresholdSweep>,
    evaluation: Option<ThresholdEvaluation>,
    auc: Option<f64>,
    log_loss: Option<f64>,
    tiers: Option<Vec<TierSummary>>,
}

fn load_loans(path: &Path) -> CliResult<Vec<ScoredLoan>> {
    let invalid = |reason: String| CliError::InvalidLoans {
        path: path.to_path_buf(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))
}

fn format_cost(cost: Decimal) -> String {
    format!("{:.2}", cost.round_dp(2))
}

/// Execute the threshold command.
pub fn execute(args: ThresholdArgs, ctx: &Context) -> Result<()> {
    let loans = load_loans(&args.loans)?;
    tracing::info!(count = loans.len(), path = %args.loans.display(), "loaded scored loans");

    let grid_params = ctx.policy.grid;
    let grid = ThresholdGrid::linspace(
        args.min.unwrap_or(grid_params.min),
        args.max.unwrap_or(grid_params.max),
        args.points.unwrap_or(grid_params.points),
    )?;
    let cost_model = ctx.policy.cost_model.with_average_from(&loans);
    let optimizer = ThresholdOptimizer::new()
        .with_grid(grid)
        .with_cost_model(cost_model);

    let (sweep, evaluation) = match args.at {
        Some(t) => (None, Some(optimizer.evaluate_at(&loans, t)?)),
        None => (Some(optimizer.sweep(&loans)?), None),
    };

    let (auc, loss) = if args.roc {
        (Some(roc_curve(&loans)?.auc), Some(log_loss(&loans)?))
    } else {
        (None, None)
    };
    let tiers = if args.tiers {
        Some(tier_summary(&loans)?)
    } else {
        None
    };

    let best_threshold = sweep.as_ref().map(ThresholdSweep::best_threshold);
    let rows: Vec<SweepRow> = sweep
        .as_ref()
        .map(|s| s.rows().to_vec())
        .or_else(|| evaluation.as_ref().map(|e| vec![e.row.clone()]))
        .unwrap_or_default()
        .into_iter()
        .map(|r| SweepRow {
            threshold: format!("{:.2}", r.threshold),
            tp: r.matrix.true_positives,
            fp: r.matrix.false_positives,
            tn: r.matrix.true_negatives,
            fn_: r.matrix.false_negatives,
            accuracy: format!("{:.4}", r.accuracy),
            precision: format_metric(r.precision),
            recall: format_metric(r.recall),
            f1: format_metric(r.f1),
            specificity: format_metric(r.specificity),
            cost: format_cost(r.estimated_cost),
            best: if best_threshold == Some(r.threshold) { "*" } else { "" }.to_string(),
        })
        .collect();

    let minimal = match (&sweep, &evaluation) {
        (Some(s), _) => format!("{:.2}", s.best_threshold()),
        (None, Some(e)) => format_cost(e.row.estimated_cost),
        (None, None) => String::new(),
    };
    let report = ThresholdReport {
        loans: loans.len(),
        avg_loan_amount: cost_model.avg_loan_amount,
        sweep,
        evaluation,
        auc,
        log_loss: loss,
        tiers,
    };
    emit(ctx.format, "Credit Threshold Analysis", &report, &rows, minimal)?;

    if ctx.format == OutputFormat::Table {
        if let Some(s) = &report.sweep {
            let best = s.best();
            print_info(&format!(
                "best threshold {:.2} with estimated cost {} (avg loan {:.2})",
                best.threshold,
                format_cost(best.estimated_cost),
                report.avg_loan_amount
            ));
        }
        if let Some(e) = &report.evaluation {
            print_info(&format!(
                "{} approved, {} rejected ({:.1}% approval)",
                e.approved,
                e.rejected,
                e.approval_rate_pct()
            ));
        }
        if let (Some(auc), Some(loss)) = (report.auc, report.log_loss) {
            print_info(&format!("AUC {auc:.4}, log loss {loss:.4}"));
        }
        if let Some(tiers) = &report.tiers {
            print_header("Risk Tiers");
            let tier_rows: Vec<KeyValue> = tiers
                .iter()
                .map(|t| {
                    KeyValue::new(
                        t.tier.to_string(),
                        format!(
                            "{} loans, observed default rate {}",
                            t.count,
                            format_metric(t.observed_default_rate)
                        ),
                    )
                })
                .collect();
            print_table(&tier_rows);
        }
    }
    Ok(())
}
