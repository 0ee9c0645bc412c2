//! Bond command implementation.
//!
//! Prices a fixed-coupon bond and reports its duration, DV01 and the
//! duration-based price estimate for rate moves.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use ballast_core::{BondParameters, PaymentFrequency};
use ballast_risk::{
    analyze_bond, dv01, price_sensitivity, price_yield_profile, DurationResult, PricePoint,
    STANDARD_RATE_MOVES,
};

use crate::commands::Context;
use crate::output::{emit, print_header, print_table, KeyValue};

/// Arguments for the bond command.
#[derive(Args, Debug)]
pub struct BondArgs {
    /// Face value
    #[arg(long, default_value = "1000")]
    pub face: f64,

    /// Annual coupon rate in percent (e.g. 5.0 for 5%)
    #[arg(long)]
    pub coupon: f64,

    /// Coupon payments per year: 1, 2 or 4
    #[arg(long, default_value = "1")]
    pub frequency: u32,

    /// Years to maturity
    #[arg(long)]
    pub maturity: f64,

    /// Annual market rate in percent
    #[arg(long)]
    pub market_rate: f64,

    /// Rate move in percentage points for a price estimate
    #[arg(long, allow_negative_numbers = true)]
    pub shift: Option<f64>,

    /// Also print the price estimate for -2% to +2% moves
    #[arg(long)]
    pub profile: bool,
}

#[derive(Debug, Serialize)]
struct BondReport {
    #[serde(flatten)]
    duration: DurationResult,
    dv01: f64,
    shifted_price: Option<PricePoint>,
    profile: Vec<PricePoint>,
}

/// Execute the bond command.
pub fn execute(args: BondArgs, ctx: &Context) -> Result<()> {
    let frequency = PaymentFrequency::try_from(args.frequency)?;
    let bond = BondParameters::new(
        args.face,
        args.coupon,
        frequency,
        args.maturity,
        args.market_rate,
    )?;
    let result = analyze_bond(&bond)?;
    let bond_dv01 = dv01(result.modified_duration_years, result.price)?;

    let shifted_price = args.shift.map(|delta| {
        let estimated = price_sensitivity(result.price, result.modified_duration_years, delta);
        PricePoint {
            delta_rate_pct: delta,
            estimated_price: estimated,
            price_change: estimated - result.price,
        }
    });
    let profile = if args.profile {
        price_yield_profile(
            result.price,
            result.modified_duration_years,
            &STANDARD_RATE_MOVES,
        )
    } else {
        Vec::new()
    };

    let mut rows = vec![
        KeyValue::new("Face Value", format!("{}", args.face)),
        KeyValue::new("Coupon", format!("{}%", args.coupon)),
        KeyValue::new("Frequency", frequency.to_string()),
        KeyValue::new("Maturity", format!("{} years", args.maturity)),
        KeyValue::new("Market Rate", format!("{}%", args.market_rate)),
        KeyValue::new("Periods", result.periods.to_string()),
        KeyValue::from_f64("Price", result.price, 2),
        KeyValue::from_f64("Macaulay Duration", result.macaulay_duration_years, 4),
        KeyValue::from_f64("Modified Duration", result.modified_duration_years, 4),
        KeyValue::new("DV01", bond_dv01.to_string()),
    ];
    if let Some(point) = &shifted_price {
        rows.push(KeyValue::from_f64(
            format!("Price at {:+}%", point.delta_rate_pct),
            point.estimated_price,
            2,
        ));
    }

    let report = BondReport {
        duration: result,
        dv01: bond_dv01.as_f64(),
        shifted_price,
        profile,
    };
    emit(
        ctx.format,
        "Bond Duration Analysis",
        &report,
        &rows,
        format!("{:.2}", report.duration.price),
    )?;

    if args.profile && ctx.format == crate::cli::OutputFormat::Table {
        print_header("Price-Yield Profile");
        let profile_rows: Vec<KeyValue> = report
            .profile
            .iter()
            .map(|p| {
                KeyValue::new(
                    format!("{:+.1}%", p.delta_rate_pct),
                    format!("{:.2} ({:+.2})", p.estimated_price, p.price_change),
                )
            })
            .collect();
        print_table(&profile_rows);
    }

    Ok(())
}
