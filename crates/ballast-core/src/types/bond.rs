//! Fixed-rate bond parameters.

use log::warn;
use serde::{Deserialize, Serialize};

use super::{Cashflow, CashflowKind, CashflowSchedule, PaymentFrequency};
use crate::error::{BallastError, BallastResult};
use crate::validation;

/// Parameters of a plain fixed-rate bond.
///
/// Rates are annual percentages (`5.0` means 5%). The bond pays
/// `face × coupon / 100 / frequency` at the end of each period and repays
/// principal with the final coupon.
///
/// # Example
///
/// ```rust
/// use ballast_core::types::{BondParameters, PaymentFrequency};
///
/// let bond = BondParameters::new(1000.0, 5.0, PaymentFrequency::Annual, 5.0, 6.0).unwrap();
/// assert_eq!(bond.periods().unwrap(), 5);
/// assert_eq!(bond.cashflow_schedule().unwrap().len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondParameters {
    /// Face (par) value, strictly positive.
    pub face_value: f64,
    /// Annual coupon rate in percent, non-negative.
    pub coupon_rate_annual: f64,
    /// Coupon frequency.
    pub payment_frequency: PaymentFrequency,
    /// Time to maturity in years, strictly positive.
    pub maturity_years: f64,
    /// Annual market yield in percent, strictly positive.
    pub market_rate_annual: f64,
}

impl BondParameters {
    /// Creates validated bond parameters.
    pub fn new(
        face_value: f64,
        coupon_rate_annual: f64,
        payment_frequency: PaymentFrequency,
        maturity_years: f64,
        market_rate_annual: f64,
    ) -> BallastResult<Self> {
        let bond = Self {
            face_value,
            coupon_rate_annual,
            payment_frequency,
            maturity_years,
            market_rate_annual,
        };
        bond.validate()?;
        Ok(bond)
    }

    /// Checks the ranges every pricing formula relies on.
    pub fn validate(&self) -> BallastResult<()> {
        validation::positive("face_value", self.face_value)?;
        validation::non_negative("coupon_rate_annual", self.coupon_rate_annual)?;
        validation::positive("maturity_years", self.maturity_years)?;
        validation::positive("market_rate_annual", self.market_rate_annual)?;
        self.periods().map(|_| ())
    }

    /// Returns the market rate per coupon period as a decimal.
    #[must_use]
    pub fn periodic_rate(&self) -> f64 {
        self.market_rate_annual / 100.0 / self.payment_frequency.periods_per_year_f64()
    }

    /// Returns the coupon paid each period.
    #[must_use]
    pub fn coupon_per_period(&self) -> f64 {
        self.face_value * self.coupon_rate_annual / 100.0
            / self.payment_frequency.periods_per_year_f64()
    }

    /// Number of coupon periods, `round(maturity × frequency)`.
    ///
    /// A maturity that is not a whole number of periods is rounded and logged.
    pub fn periods(&self) -> BallastResult<u32> {
        let exact = self.maturity_years * self.payment_frequency.periods_per_year_f64();
        if !exact.is_finite() || exact > f64::from(u32::MAX) {
            return Err(BallastError::invalid_input(
                "maturity_years",
                format!("{} years is out of range", self.maturity_years),
            ));
        }
        let rounded = exact.round();
        if (exact - rounded).abs() > 1e-9 {
            warn!(
                "maturity of {} years is not a whole number of {} periods, rounding to {}",
                self.maturity_years, self.payment_frequency, rounded
            );
        }
        if rounded < 1.0 {
            return Err(BallastError::invalid_input(
                "maturity_years",
                format!(
                    "{} years is shorter than one {} period",
                    self.maturity_years, self.payment_frequency
                ),
            ));
        }
        Ok(rounded as u32)
    }

    /// Builds the ordered cash flow schedule.
    ///
    /// Zero coupons are not emitted, so a zero-coupon bond has a single
    /// principal flow at maturity.
    pub fn cashflow_schedule(&self) -> BallastResult<CashflowSchedule> {
        self.validate()?;
        let n = self.periods()?;
        let coupon = self.coupon_per_period();
        let mut schedule = CashflowSchedule::with_capacity(n as usize);

        for period in 1..=n {
            if period == n {
                let kind = if coupon > 0.0 {
                    CashflowKind::CouponAndPrincipal
                } else {
                    CashflowKind::Principal
                };
                schedule.push(Cashflow::new(period, coupon + self.face_value, kind));
            } else if coupon > 0.0 {
                schedule.push(Cashflow::new(period, coupon, CashflowKind::Coupon));
            }
        }

        Ok(schedule)
    }
}
