//! Sentinel-carrying numeric results.
//!
//! A regulatory ratio with a zero denominator is [`Ratio::Undefined`], and a
//! classification metric with a zero denominator is
//! [`MetricValue::NotApplicable`]. Neither is ever stored as an infinite or
//! NaN float.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BallastError, BallastResult};

/// A percentage ratio such as LCR or NSFR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ratio {
    /// The ratio, already scaled to percent.
    Defined(f64),
    /// The denominator was zero.
    Undefined,
}

impl Ratio {
    /// Computes `numerator / denominator × 100`, or `Undefined` when the
    /// denominator is zero.
    #[must_use]
    pub fn percent(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            Ratio::Undefined
        } else {
            Ratio::Defined(numerator / denominator * 100.0)
        }
    }

    /// Returns true when the ratio has a value.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        matches!(self, Ratio::Defined(_))
    }

    /// Converts to an option.
    #[must_use]
    pub fn as_option(&self) -> Option<f64> {
        match self {
            Ratio::Defined(v) => Some(*v),
            Ratio::Undefined => None,
        }
    }

    /// Returns the value, or [`BallastError::DivisionGuard`] naming `metric`.
    pub fn require(&self, metric: &str) -> BallastResult<f64> {
        self.as_option()
            .ok_or_else(|| BallastError::division_guard(metric))
    }

    /// Returns the value, or a division guard error.
    pub fn value(&self) -> BallastResult<f64> {
        self.require("ratio")
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Defined(v) => write!(f, "{v:.2}%"),
            Ratio::Undefined => write!(f, "undefined"),
        }
    }
}

/// A classification metric that may be undefined for a given confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    /// The metric value.
    Value(f64),
    /// The metric has a zero denominator.
    NotApplicable,
}

impl MetricValue {
    /// Computes `numerator / denominator`, or `NotApplicable` when the
    /// denominator is zero.
    #[must_use]
    pub fn fraction(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            MetricValue::NotApplicable
        } else {
            MetricValue::Value(numerator / denominator)
        }
    }

    /// Converts to an option.
    #[must_use]
    pub fn as_option(&self) -> Option<f64> {
        match self {
            MetricValue::Value(v) => Some(*v),
            MetricValue::NotApplicable => None,
        }
    }

    /// Returns true when the metric has a value.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        matches!(self, MetricValue::Value(_))
    }

    /// Returns the value, or [`BallastError::UndefinedMetric`] naming `metric`.
    pub fn require(&self, metric: &str) -> BallastResult<f64> {
        self.as_option().ok_or_else(|| {
            BallastError::undefined_metric(metric, "denominator is zero in the confusion matrix")
        })
    }

    /// Returns the value, or an undefined metric error.
    pub fn value(&self) -> BallastResult<f64> {
        self.require("metric")
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Value(v) => write!(f, "{v:.4}"),
            MetricValue::NotApplicable => write!(f, "n/a"),
        }
    }
}
