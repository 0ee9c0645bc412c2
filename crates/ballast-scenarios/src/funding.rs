//! Funding stress in absolute terms.
//!
//! Unlike the percentage snapshot used by [`ScenarioEngine`](crate::ScenarioEngine),
//! a [`FundingProfile`] holds currency amounts for each funding source. A
//! [`FundingShock`] withdraws part of each source and haircuts HQLA; the
//! bank survives if haircut HQLA covers the outflows.

use ballast_core::validation;
use ballast_core::{BallastResult, Ratio};
use ballast_risk::{lcr, nsfr};
use log::debug;
use serde::{Deserialize, Serialize};

/// Run-off weights for the 30-day LCR outflow estimate.
const SHORT_TERM_RUNOFF: f64 = 0.5;
const RETAIL_RUNOFF: f64 = 0.1;
const CORPORATE_RUNOFF: f64 = 0.2;

/// Available stable funding weights.
const RETAIL_ASF: f64 = 0.9;
const CORPORATE_ASF: f64 = 0.5;
const LONG_TERM_ASF: f64 = 0.8;

/// Required stable funding weights.
const ILLIQUID_RSF: f64 = 0.85;
const LIQUID_RSF: f64 = 0.15;

/// Funding sources and liquid buffer of a bank.
///
/// Total assets are taken equal to total liabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingProfile {
    /// High-quality liquid assets.
    pub hqla: f64,
    /// Retail deposits.
    pub retail_deposits: f64,
    /// Corporate deposits.
    pub corporate_deposits: f64,
    /// Short-term wholesale funding.
    pub short_term_funding: f64,
    /// Long-term wholesale funding.
    pub long_term_funding: f64,
    /// Liquid assets as a percentage of total assets.
    pub liquid_assets_pct: f64,
}

impl FundingProfile {
    /// Checks that every amount is non-negative.
    pub fn validate(&self) -> BallastResult<()> {
        validation::non_negative("hqla", self.hqla)?;
        validation::non_negative("retail_deposits", self.retail_deposits)?;
        validation::non_negative("corporate_deposits", self.corporate_deposits)?;
        validation::non_negative("short_term_funding", self.short_term_funding)?;
        validation::non_negative("long_term_funding", self.long_term_funding)?;
        validation::percentage("liquid_assets_pct", self.liquid_assets_pct)?;
        Ok(())
    }

    /// Sum of all funding sources.
    #[must_use]
    pub fn total_liabilities(&self) -> f64 {
        self.retail_deposits + self.corporate_deposits + self.short_term_funding + self.long_term_funding
    }

    /// Liquid assets in currency.
    #[must_use]
    pub fn liquid_assets(&self) -> f64 {
        self.total_liabilities() * self.liquid_assets_pct / 100.0
    }

    /// Illiquid assets in currency.
    #[must_use]
    pub fn illiquid_assets(&self) -> f64 {
        self.total_liabilities() - self.liquid_assets()
    }

    /// Pre-stress LCR with Basel-style run-off weights.
    #[must_use]
    pub fn lcr(&self) -> Ratio {
        lcr(
            self.hqla,
            weighted_outflows(
                self.short_term_funding,
                self.retail_deposits,
                self.corporate_deposits,
            ),
        )
    }

    /// Pre-stress NSFR with Basel-style ASF and RSF weights.
    #[must_use]
    pub fn nsfr(&self) -> Ratio {
        let asf = self.retail_deposits * RETAIL_ASF
            + self.corporate_deposits * CORPORATE_ASF
            + self.long_term_funding * LONG_TERM_ASF;
        let rsf = self.illiquid_assets() * ILLIQUID_RSF + self.liquid_assets() * LIQUID_RSF;
        nsfr(asf, rsf)
    }
}

fn weighted_outflows(short_term: f64, retail: f64, corporate: f64) -> f64 {
    short_term * SHORT_TERM_RUNOFF + retail * RETAIL_RUNOFF + corporate * CORPORATE_RUNOFF
}

/// A funding shock in percent of each source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingShock {
    /// Shock name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Retail deposits withdrawn, in percent.
    pub retail_outflow_pct: f64,
    /// Corporate deposits withdrawn, in percent.
    pub corporate_outflow_pct: f64,
    /// Short-term funding not rolled over, in percent.
    pub short_term_rollover_loss_pct: f64,
    /// Haircut on HQLA, in percent.
    pub hqla_haircut_pct: f64,
    /// Shock duration in days.
    pub duration_days: u32,
}

impl FundingShock {
    /// Checks percentages and duration.
    pub fn validate(&self) -> BallastResult<()> {
        validation::percentage("retail_outflow_pct", self.retail_outflow_pct)?;
        validation::percentage("corporate_outflow_pct", self.corporate_outflow_pct)?;
        validation::percentage(
            "short_term_rollover_loss_pct",
            self.short_term_rollover_loss_pct,
        )?;
        validation::percentage("hqla_haircut_pct", self.hqla_haircut_pct)?;
        validation::positive("duration_days", f64::from(self.duration_days))?;
        Ok(())
    }
}

/// Preset funding shocks.
pub mod presets {
    use super::FundingShock;

    fn shock(
        name: &str,
        description: &str,
        pcts: (f64, f64, f64, f64),
        duration_days: u32,
    ) -> FundingShock {
        FundingShock {
            name: name.to_string(),
            description: description.to_string(),
            retail_outflow_pct: pcts.0,
            corporate_outflow_pct: pcts.1,
            short_term_rollover_loss_pct: pcts.2,
            hqla_haircut_pct: pcts.3,
            duration_days,
        }
    }

    /// Moderate liquidity crisis over 30 days.
    #[must_use]
    pub fn moderate() -> FundingShock {
        shock(
            "Moderate liquidity crisis",
            "Gradual deposit outflows and partial loss of short-term funding",
            (10.0, 20.0, 50.0, 5.0),
            30,
        )
    }

    /// Two-week bank run.
    #[must_use]
    pub fn bank_run() -> FundingShock {
        shock(
            "Bank run",
            "Heavy retail and corporate withdrawals after a loss of confidence",
            (30.0, 40.0, 80.0, 10.0),
            14,
        )
    }

    /// Systemic crisis over 60 days.
    #[must_use]
    pub fn systemic() -> FundingShock {
        shock(
            "Systemic crisis",
            "Funding markets close, deposits run and asset values fall",
            (20.0, 50.0, 90.0, 15.0),
            60,
        )
    }

    /// Northern Rock, 2007.
    #[must_use]
    pub fn northern_rock() -> FundingShock {
        shock(
            "Northern Rock 2007",
            "Securitisation market closes, followed by a retail run",
            (25.0, 35.0, 95.0, 5.0),
            30,
        )
    }

    /// Every preset.
    #[must_use]
    pub fn all() -> Vec<FundingShock> {
        vec![moderate(), bank_run(), systemic(), northern_rock()]
    }
}

/// Result of a funding shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingStressResult {
    /// Shock name.
    pub shock_name: String,
    /// Retail deposits withdrawn.
    pub retail_outflow: f64,
    /// Corporate deposits withdrawn.
    pub corporate_outflow: f64,
    /// Short-term funding not rolled over.
    pub short_term_outflow: f64,
    /// Sum of outflows.
    pub total_outflows: f64,
    /// HQLA after the haircut.
    pub adjusted_hqla: f64,
    /// Whether adjusted HQLA covers the outflows.
    pub survives: bool,
    /// Days until HQLA is exhausted, capped at the shock duration.
    pub survival_days: f64,
    /// LCR before the shock.
    pub pre_stress_lcr: Ratio,
    /// NSFR before the shock.
    pub pre_stress_nsfr: Ratio,
    /// LCR on remaining funding with HQLA net of outflows.
    pub post_stress_lcr: Ratio,
    /// Remaining liquidity for each day `0..=duration`, outflows spread evenly.
    pub liquidity_path: Vec<f64>,
}

/// Applies a funding shock to a profile.
pub fn apply_funding_shock(
    profile: &FundingProfile,
    shock: &FundingShock,
) -> BallastResult<FundingStressResult> {
    profile.validate()?;
    shock.validate()?;

    let retail_outflow = profile.retail_deposits * shock.retail_outflow_pct / 100.0;
    let corporate_outflow = profile.corporate_deposits * shock.corporate_outflow_pct / 100.0;
    let short_term_outflow =
        profile.short_term_funding * shock.short_term_rollover_loss_pct / 100.0;
    let total_outflows = retail_outflow + corporate_outflow + short_term_outflow;
    let adjusted_hqla = profile.hqla * (1.0 - shock.hqla_haircut_pct / 100.0);

    let duration = f64::from(shock.duration_days);
    let survives = adjusted_hqla >= total_outflows;
    let survival_days = if total_outflows > 0.0 {
        duration.min(adjusted_hqla / total_outflows * duration)
    } else {
        duration
    };

    let post_stress_lcr = lcr(
        (adjusted_hqla - total_outflows).max(0.0),
        weighted_outflows(
            profile.short_term_funding - short_term_outflow,
            profile.retail_deposits - retail_outflow,
            profile.corporate_deposits - corporate_outflow,
        ),
    );

    let daily_outflow = total_outflows / duration;
    let liquidity_path = (0..=shock.duration_days)
        .map(|d| (adjusted_hqla - daily_outflow * f64::from(d)).max(0.0))
        .collect();

    debug!(
        "funding shock '{}': outflows {total_outflows:.1} vs HQLA {adjusted_hqla:.1}, survives {survives}",
        shock.name
    );

    Ok(FundingStressResult {
        shock_name: shock.name.clone(),
        retail_outflow,
        corporate_outflow,
        short_term_outflow,
        total_outflows,
        adjusted_hqla,
        survives,
        survival_days,
        pre_stress_lcr: profile.lcr(),
        pre_stress_nsfr: profile.nsfr(),
        post_stress_lcr,
        liquidity_path,
    })
}
