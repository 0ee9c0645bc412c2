//! DV01 (Dollar Value of 01) calculations.
//!
//! DV01 measures the absolute value change for a 1 basis point move in rates.
//!
//! ## Formula
//!
//! ```text
//! DV01 = Modified Duration × Market Value × 0.0001
//! ```

use ballast_core::{validation, BallastError, BallastResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// DV01 value (currency change per basis point)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Dv01(Decimal);

impl Dv01 {
    /// Create a new DV01 value
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Get the DV01 value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Get the DV01 as f64
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl std::fmt::Display for Dv01 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Dv01 {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl TryFrom<f64> for Dv01 {
    type Error = BallastError;

    fn try_from(f: f64) -> BallastResult<Self> {
        to_decimal("dv01", f).map(Self)
    }
}

fn to_decimal(field: &str, value: f64) -> BallastResult<Decimal> {
    Decimal::from_f64_retain(value).ok_or_else(|| {
        BallastError::invalid_input(field, format!("{value} is not representable as a decimal"))
    })
}

/// Calculate DV01 from modified duration and market value.
///
/// # Example
///
/// ```rust
/// use ballast_risk::dv01;
///
/// // 4 years on a 10 million position
/// let value = dv01(4.0, 10_000_000.0).unwrap();
/// assert!((value.as_f64() - 4_000.0).abs() < 1e-6);
/// ```
pub fn dv01(modified_duration_years: f64, market_value: f64) -> BallastResult<Dv01> {
    validation::non_negative("modified_duration_years", modified_duration_years)?;
    validation::non_negative("market_value", market_value)?;
    Dv01::try_from(modified_duration_years * market_value * 0.0001)
}

/// Value change for a move of `bps` basis points: `DV01 × bps`.
pub fn dv01_impact(dv01: Dv01, bps: f64) -> BallastResult<Decimal> {
    let bps = to_decimal("bps", bps)?;
    dv01.value()
        .checked_mul(bps)
        .ok_or_else(|| BallastError::invalid_input("bps", "DV01 impact overflows"))
}

/// Relative value change for a move of `bps`, in percent: `D_mod × bps × 0.01`.
pub fn dv01_impact_pct(modified_duration_years: f64, bps: f64) -> f64 {
    modified_duration_years * bps * 0.0001 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dv01() {
        let value = dv01(5.7, 117_000_000_000.0).unwrap();
        assert_relative_eq!(value.as_f64(), 66_690_000.0, epsilon = 1e-3);
    }

    #[test]
    fn test_dv01_rejects_unrepresentable_inputs() {
        assert!(dv01(f64::NAN, 1000.0).is_err());
        assert!(dv01(4.0, f64::INFINITY).is_err());
        assert!(dv01(-1.0, 1000.0).is_err());
        assert!(dv01(1e300, 1e300).is_err());
        assert!(Dv01::try_from(f64::NAN).is_err());
        assert_eq!(dv01(0.0, 1000.0).unwrap().value(), Decimal::ZERO);
    }

    #[test]
    fn test_dv01_impact() {
        let value = Dv01::new(dec!(4000));
        assert_eq!(dv01_impact(value, 25.0).unwrap(), dec!(100000));
        assert_eq!(dv01_impact(value, -10.0).unwrap(), dec!(-40000));
        assert!(dv01_impact(value, f64::NAN).is_err());
        assert!(dv01_impact(Dv01::new(Decimal::MAX), 2.0).is_err());
    }

    #[test]
    fn test_impact_pct() {
        assert_relative_eq!(dv01_impact_pct(4.0, 100.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dv01::new(dec!(4000)).to_string(), "4000.00");
    }
}
