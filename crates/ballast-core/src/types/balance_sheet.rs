//! Percentage-composition balance sheet.

use serde::{Deserialize, Serialize};

use crate::error::{BallastError, BallastResult};
use crate::validation::{self, PERCENT_TOLERANCE};

/// A balance sheet expressed as percentage shares.
///
/// Assets split into liquid and illiquid, funding splits into retail deposits
/// and wholesale funding. Each pair sums to 100. The snapshot is built from
/// the two independent shares, so the complementary shares hold by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRecord", into = "SnapshotRecord")]
pub struct BalanceSheetSnapshot {
    liquid_assets_pct: f64,
    wholesale_funding_pct: f64,
    total_value: Option<f64>,
}

impl BalanceSheetSnapshot {
    /// Creates a snapshot from the liquid-asset and wholesale-funding shares.
    pub fn new(liquid_assets_pct: f64, wholesale_funding_pct: f64) -> BallastResult<Self> {
        validation::percentage("liquid_assets_pct", liquid_assets_pct)?;
        validation::percentage("wholesale_funding_pct", wholesale_funding_pct)?;
        Ok(Self {
            liquid_assets_pct,
            wholesale_funding_pct,
            total_value: None,
        })
    }

    /// Attaches an absolute balance-sheet size.
    pub fn with_total_value(mut self, total_value: f64) -> BallastResult<Self> {
        validation::non_negative("total_value", total_value)?;
        self.total_value = Some(total_value);
        Ok(self)
    }

    /// Liquid assets as a share of total assets.
    #[must_use]
    pub fn liquid_assets_pct(&self) -> f64 {
        self.liquid_assets_pct
    }

    /// Illiquid assets, `100 - liquid`.
    #[must_use]
    pub fn illiquid_assets_pct(&self) -> f64 {
        100.0 - self.liquid_assets_pct
    }

    /// Wholesale funding as a share of total funding.
    #[must_use]
    pub fn wholesale_funding_pct(&self) -> f64 {
        self.wholesale_funding_pct
    }

    /// Retail deposits, `100 - wholesale`.
    #[must_use]
    pub fn retail_deposits_pct(&self) -> f64 {
        100.0 - self.wholesale_funding_pct
    }

    /// Optional absolute size of the balance sheet.
    #[must_use]
    pub fn total_value(&self) -> Option<f64> {
        self.total_value
    }
}

/// Wire form of a snapshot. The complementary shares are optional on input
/// and checked against the primary ones when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotRecord {
    liquid_assets_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    illiquid_assets_pct: Option<f64>,
    wholesale_funding_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    retail_deposits_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_value: Option<f64>,
}

fn check_pair(field: &str, primary: f64, complement: Option<f64>) -> BallastResult<()> {
    match complement {
        Some(value) if (primary + value - 100.0).abs() > PERCENT_TOLERANCE => Err(
            BallastError::invalid_input(field, format!("{primary} + {value} does not sum to 100")),
        ),
        _ => Ok(()),
    }
}

impl TryFrom<SnapshotRecord> for BalanceSheetSnapshot {
    type Error = BallastError;

    fn try_from(record: SnapshotRecord) -> Result<Self, Self::Error> {
        check_pair(
            "illiquid_assets_pct",
            record.liquid_assets_pct,
            record.illiquid_assets_pct,
        )?;
        check_pair(
            "retail_deposits_pct",
            record.wholesale_funding_pct,
            record.retail_deposits_pct,
        )?;
        let snapshot = Self::new(record.liquid_assets_pct, record.wholesale_funding_pct)?;
        match record.total_value {
            Some(total) => snapshot.with_total_value(total),
            None => Ok(snapshot),
        }
    }
}

impl From<BalanceSheetSnapshot> for SnapshotRecord {
    fn from(snapshot: BalanceSheetSnapshot) -> Self {
        Self {
            liquid_assets_pct: snapshot.liquid_assets_pct(),
            illiquid_assets_pct: Some(snapshot.illiquid_assets_pct()),
            wholesale_funding_pct: snapshot.wholesale_funding_pct(),
            retail_deposits_pct: Some(snapshot.retail_deposits_pct()),
            total_value: snapshot.total_value,
        }
    }
}
