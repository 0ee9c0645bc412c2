//! Output formatting utilities.

use std::fmt::Display;

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use ballast_core::{MetricValue, Ratio};

use crate::cli::OutputFormat;

/// Prints a command result in the requested format.
///
/// `report` is the full structured result used for JSON; `rows` drive the
/// table and CSV views; `minimal` is the single headline value.
pub fn emit<R, T>(
    format: OutputFormat,
    title: &str,
    report: &R,
    rows: &[T],
    minimal: impl Display,
) -> anyhow::Result<()>
where
    R: Serialize,
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Table => {
            print_header(title);
            print_table(rows);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Minimal => println!("{minimal}"),
    }
    Ok(())
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a percentage with two decimals.
pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

/// Formats a ratio, spelling out the undefined case.
pub fn format_ratio(ratio: Ratio) -> String {
    ratio.to_string()
}

/// Formats a classification metric.
pub fn format_metric(value: MetricValue) -> String {
    value.to_string()
}

/// Formats a monetary amount with two decimals.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a pass/fail verdict line.
pub fn print_verdict(passed: bool, message: &str) {
    if passed {
        print_success(message);
    } else {
        eprintln!("{} {}", "✗".red(), message);
    }
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair with a fixed number of decimals.
    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self {
            key: key.into(),
            value: format!("{value:.precision$}"),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
