//! Coupon payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BallastError;

/// Payment frequency for coupon bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentFrequency {
    /// Annual payments (1 per year)
    #[default]
    Annual,
    /// Semi-annual payments (2 per year)
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
}

impl PaymentFrequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Annual => 1,
            PaymentFrequency::SemiAnnual => 2,
            PaymentFrequency::Quarterly => 4,
        }
    }

    /// Returns the number of periods per year as f64.
    #[must_use]
    pub fn periods_per_year_f64(&self) -> f64 {
        f64::from(self.periods_per_year())
    }
}

impl TryFrom<u32> for PaymentFrequency {
    type Error = BallastError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PaymentFrequency::Annual),
            2 => Ok(PaymentFrequency::SemiAnnual),
            4 => Ok(PaymentFrequency::Quarterly),
            other => Err(BallastError::invalid_input(
                "payments_per_year",
                format!("must be 1, 2 or 4, got {other}"),
            )),
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentFrequency::Annual => "Annual",
            PaymentFrequency::SemiAnnual => "Semi-Annual",
            PaymentFrequency::Quarterly => "Quarterly",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(PaymentFrequency::Annual.periods_per_year(), 1);
        assert_eq!(PaymentFrequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(PaymentFrequency::Quarterly.periods_per_year(), 4);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(
            PaymentFrequency::try_from(2).unwrap(),
            PaymentFrequency::SemiAnnual
        );
        assert!(PaymentFrequency::try_from(12).is_err());
        assert!(PaymentFrequency::try_from(0).is_err());
    }
}
