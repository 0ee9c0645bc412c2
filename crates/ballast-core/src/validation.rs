//! Input guards shared by every analytics crate.
//!
//! The core re-validates only the invariants its formulas depend on; callers
//! remain responsible for validating raw user input.

use crate::error::{BallastError, BallastResult};

/// Tolerance used when checking that paired percentages sum to 100.
pub const PERCENT_TOLERANCE: f64 = 1e-9;

/// Requires a finite, strictly positive value.
pub fn positive(field: &str, value: f64) -> BallastResult<f64> {
    if !value.is_finite() {
        return Err(BallastError::invalid_input(field, "must be finite"));
    }
    if value <= 0.0 {
        return Err(BallastError::invalid_input(
            field,
            format!("must be positive, got {value}"),
        ));
    }
    Ok(value)
}

/// Requires a finite, non-negative value.
pub fn non_negative(field: &str, value: f64) -> BallastResult<f64> {
    if !value.is_finite() {
        return Err(BallastError::invalid_input(field, "must be finite"));
    }
    if value < 0.0 {
        return Err(BallastError::invalid_input(
            field,
            format!("must be non-negative, got {value}"),
        ));
    }
    Ok(value)
}

/// Requires a finite value in `[0, 100]`.
pub fn percentage(field: &str, value: f64) -> BallastResult<f64> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(BallastError::invalid_input(
            field,
            format!("must be a percentage in [0, 100], got {value}"),
        ));
    }
    Ok(value)
}

/// Requires a finite value in `[0, 1]`.
pub fn unit_interval(field: &str, value: f64) -> BallastResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(BallastError::invalid_input(
            field,
            format!("must lie in [0, 1], got {value}"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        assert_eq!(positive("x", 1.5).unwrap(), 1.5);
        assert!(positive("x", 0.0).is_err());
        assert!(positive("x", -2.0).is_err());
        assert!(positive("x", f64::NAN).is_err());
        assert!(positive("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative("x", 0.0).unwrap(), 0.0);
        assert!(non_negative("x", -0.1).is_err());
    }

    #[test]
    fn test_percentage_bounds() {
        assert!(percentage("pct", 0.0).is_ok());
        assert!(percentage("pct", 100.0).is_ok());
        assert!(percentage("pct", 100.5).is_err());
        assert!(percentage("pct", -1.0).is_err());
    }

    #[test]
    fn test_unit_interval() {
        assert!(unit_interval("p", 0.5).is_ok());
        let err = unit_interval("p", 1.2).unwrap_err();
        assert!(err.to_string().contains("[0, 1]"));
    }
}
