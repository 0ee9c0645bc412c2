//! Regulatory liquidity ratios.
//!
//! [`lcr`] and [`nsfr`] are the plain Basel definitions. [`RatioFactors`]
//! holds the simplified mapping from a percentage balance sheet to those
//! ratios.

use ballast_core::{BalanceSheetSnapshot, Ratio};
use serde::{Deserialize, Serialize};

/// Liquidity Coverage Ratio, `HQLA / net 30-day outflows × 100`.
#[must_use]
pub fn lcr(hqla: f64, net_outflows_30d: f64) -> Ratio {
    Ratio::percent(hqla, net_outflows_30d)
}

/// Net Stable Funding Ratio, `ASF / RSF × 100`.
#[must_use]
pub fn nsfr(available_stable_funding: f64, required_stable_funding: f64) -> Ratio {
    Ratio::percent(available_stable_funding, required_stable_funding)
}

fn default_outflow_factor() -> f64 {
    0.3
}

fn default_wholesale_asf_factor() -> f64 {
    0.5
}

/// Run-off and stable-funding weights for percentage balance sheets.
///
/// ```text
/// LCR  = liquid / ((retail + wholesale) × outflow_factor) × 100
/// NSFR = (retail + wholesale × wholesale_asf_factor) / illiquid × 100
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioFactors {
    /// Share of funding assumed to run off within 30 days.
    #[serde(default = "default_outflow_factor")]
    pub outflow_factor: f64,
    /// Weight of wholesale funding in available stable funding.
    #[serde(default = "default_wholesale_asf_factor")]
    pub wholesale_asf_factor: f64,
}

impl Default for RatioFactors {
    fn default() -> Self {
        Self {
            outflow_factor: default_outflow_factor(),
            wholesale_asf_factor: default_wholesale_asf_factor(),
        }
    }
}

impl RatioFactors {
    /// LCR from liquid assets and remaining funding.
    #[must_use]
    pub fn lcr(&self, liquid: f64, retail: f64, wholesale: f64) -> Ratio {
        lcr(liquid, (retail + wholesale) * self.outflow_factor)
    }

    /// NSFR from remaining funding and illiquid assets.
    #[must_use]
    pub fn nsfr(&self, retail: f64, wholesale: f64, illiquid: f64) -> Ratio {
        nsfr(retail + wholesale * self.wholesale_asf_factor, illiquid)
    }
}

/// LCR of a snapshot under the given factors.
#[must_use]
pub fn snapshot_lcr(snapshot: &BalanceSheetSnapshot, factors: &RatioFactors) -> Ratio {
    factors.lcr(
        snapshot.liquid_assets_pct(),
        snapshot.retail_deposits_pct(),
        snapshot.wholesale_funding_pct(),
    )
}

/// NSFR of a snapshot under the given factors.
#[must_use]
pub fn snapshot_nsfr(snapshot: &BalanceSheetSnapshot, factors: &RatioFactors) -> Ratio {
    factors.nsfr(
        snapshot.retail_deposits_pct(),
        snapshot.wholesale_funding_pct(),
        snapshot.illiquid_assets_pct(),
    )
}

/// Liquidity risk score in `[0, 100]`.
///
/// Grows with illiquid assets and with reliance on wholesale funding:
/// `(100 - liquid) × wholesale / 100`.
#[must_use]
pub fn liquidity_risk_score(snapshot: &BalanceSheetSnapshot) -> f64 {
    let score = snapshot.illiquid_assets_pct() * snapshot.wholesale_funding_pct() / 100.0;
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lcr_nsfr() {
        assert_relative_eq!(lcr(150.0, 100.0).value().unwrap(), 150.0);
        assert_eq!(lcr(150.0, 0.0), Ratio::Undefined);
        assert_relative_eq!(nsfr(90.0, 100.0).value().unwrap(), 90.0);
        assert_eq!(nsfr(90.0, 0.0), Ratio::Undefined);
    }

    #[test]
    fn test_snapshot_ratios() {
        // Northern Rock 2007: 15% liquid, 77% wholesale.
        let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
        let factors = RatioFactors::default();
        assert_relative_eq!(
            snapshot_lcr(&snapshot, &factors).value().unwrap(),
            50.0,
            epsilon = 1e-9
        );
        // (23 + 38.5) / 85
        assert_relative_eq!(
            snapshot_nsfr(&snapshot, &factors).value().unwrap(),
            61.5 / 85.0 * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_all_liquid_nsfr_undefined() {
        let snapshot = BalanceSheetSnapshot::new(100.0, 50.0).unwrap();
        assert_eq!(
            snapshot_nsfr(&snapshot, &RatioFactors::default()),
            Ratio::Undefined
        );
    }

    #[test]
    fn test_liquidity_risk_score() {
        let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
        assert_relative_eq!(liquidity_risk_score(&snapshot), 65.45, epsilon = 1e-9);
        let safe = BalanceSheetSnapshot::new(100.0, 100.0).unwrap();
        assert_relative_eq!(liquidity_risk_score(&safe), 0.0);
    }

    #[test]
    fn test_factors_serde_defaults() {
        let factors: RatioFactors = serde_json::from_str(r#"{"outflow_factor": 0.4}"#).unwrap();
        assert_relative_eq!(factors.outflow_factor, 0.4);
        assert_relative_eq!(factors.wholesale_asf_factor, 0.5);
    }
}
