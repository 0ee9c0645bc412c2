//! Bond price and duration.
//!
//! ## Formula
//!
//! ```text
//! P      = Σ CF_t / (1 + r)^t
//! D_mac  = Σ(t × PV(CF_t)) / P / f
//! D_mod  = (D_mac × f) / (1 + r) / f
//! ```
//!
//! where t is the period index, r the periodic market rate and f the number
//! of payments per year.

use ballast_core::{BallastError, BallastResult, BondParameters};
use log::trace;
use serde::{Deserialize, Serialize};

/// Price and duration measures of a bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationResult {
    /// Present value of all cash flows.
    pub price: f64,
    /// Macaulay duration in years.
    pub macaulay_duration_years: f64,
    /// Modified duration in years.
    pub modified_duration_years: f64,
    /// Market rate per period, as a decimal.
    pub periodic_rate: f64,
    /// Number of coupon periods.
    pub periods: u32,
}

/// Computes price, Macaulay duration and modified duration in a single pass.
///
/// # Example
///
/// ```rust
/// use ballast_core::{BondParameters, PaymentFrequency};
/// use ballast_risk::analyze_bond;
///
/// let bond = BondParameters::new(1000.0, 5.0, PaymentFrequency::Annual, 5.0, 6.0).unwrap();
/// let result = analyze_bond(&bond).unwrap();
/// assert!((result.price - 957.88).abs() < 0.01);
/// ```
pub fn analyze_bond(bond: &BondParameters) -> BallastResult<DurationResult> {
    let schedule = bond.cashflow_schedule()?;
    let rate = bond.periodic_rate();
    let freq = bond.payment_frequency.periods_per_year_f64();

    let mut price = 0.0;
    let mut weighted = 0.0;
    for cf in &schedule {
        let t = f64::from(cf.period);
        let pv = cf.amount / (1.0 + rate).powf(t);
        price += pv;
        weighted += t * pv;
    }

    if price <= 0.0 || !price.is_finite() {
        return Err(BallastError::invalid_input(
            "market_rate_annual",
            format!("bond price {price} is not positive"),
        ));
    }

    let macaulay_periods = weighted / price;
    let modified_periods = macaulay_periods / (1.0 + rate);
    let periods = bond.periods()?;

    trace!(
        "bond priced at {price:.4} over {periods} periods, macaulay {:.4}y",
        macaulay_periods / freq
    );

    Ok(DurationResult {
        price,
        macaulay_duration_years: macaulay_periods / freq,
        modified_duration_years: modified_periods / freq,
        periodic_rate: rate,
        periods,
    })
}

/// Present value of the bond's cash flows at its market rate.
pub fn bond_price(bond: &BondParameters) -> BallastResult<f64> {
    analyze_bond(bond).map(|r| r.price)
}

/// Macaulay duration in years.
pub fn macaulay_duration(bond: &BondParameters) -> BallastResult<f64> {
    analyze_bond(bond).map(|r| r.macaulay_duration_years)
}

/// Modified duration in years.
pub fn modified_duration(bond: &BondParameters) -> BallastResult<f64> {
    analyze_bond(bond).map(|r| r.modified_duration_years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ballast_core::PaymentFrequency;

    fn reference_bond() -> BondParameters {
        BondParameters::new(1000.0, 5.0, PaymentFrequency::Annual, 5.0, 6.0).unwrap()
    }

    #[test]
    fn test_reference_bond() {
        let result = analyze_bond(&reference_bond()).unwrap();
        assert_relative_eq!(result.price, 957.8764, epsilon = 1e-4);
        assert_relative_eq!(result.macaulay_duration_years, 4.5347, epsilon = 1e-4);
        assert_relative_eq!(result.modified_duration_years, 4.2780, epsilon = 1e-4);
        assert_eq!(result.periods, 5);
    }

    #[test]
    fn test_par_bond() {
        let bond =
            BondParameters::new(1000.0, 6.0, PaymentFrequency::SemiAnnual, 10.0, 6.0).unwrap();
        assert_relative_eq!(bond_price(&bond).unwrap(), 1000.0, epsilon = 1e-8);
    }

    #[test]
    fn test_zero_coupon_duration_equals_maturity() {
        let bond = BondParameters::new(100.0, 0.0, PaymentFrequency::Quarterly, 8.0, 3.0).unwrap();
        assert_relative_eq!(macaulay_duration(&bond).unwrap(), 8.0, epsilon = 1e-12);
        assert!(modified_duration(&bond).unwrap() < 8.0);
    }

    #[test]
    fn test_invalid_market_rate() {
        let mut bond = reference_bond();
        bond.market_rate_annual = 0.0;
        assert!(matches!(
            bond_price(&bond),
            Err(BallastError::InvalidInput { .. })
        ));
        bond.market_rate_annual = -1.0;
        assert!(macaulay_duration(&bond).is_err());
    }

    #[test]
    fn test_higher_frequency_shortens_duration() {
        let annual = BondParameters::new(1000.0, 8.0, PaymentFrequency::Annual, 10.0, 8.0).unwrap();
        let quarterly =
            BondParameters::new(1000.0, 8.0, PaymentFrequency::Quarterly, 10.0, 8.0).unwrap();
        assert!(macaulay_duration(&quarterly).unwrap() < macaulay_duration(&annual).unwrap());
    }
}
