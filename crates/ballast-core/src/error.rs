//! Error types for the Ballast library.
//!
//! Every condition the analytics core can hit is local and recoverable. The
//! core returns one of these variants (or a sentinel value such as
//! [`Ratio::Undefined`](crate::types::Ratio)) instead of a misleading number.

use thiserror::Error;

/// A specialized Result type for Ballast operations.
pub type BallastResult<T> = Result<T, BallastError>;

/// The main error type for Ballast operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BallastError {
    /// A parameter was outside the range the formulas are defined for.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending parameter.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A scenario name did not match any preset in the catalog.
    #[error("Unknown scenario: {name}")]
    UnknownScenario {
        /// The name that failed to resolve.
        name: String,
    },

    /// A ratio was requested as a number but its denominator is zero.
    #[error("{metric} is undefined: denominator is zero")]
    DivisionGuard {
        /// The ratio that could not be computed.
        metric: String,
    },

    /// A classification metric has a zero denominator in the confusion matrix.
    #[error("{metric} is not applicable: {reason}")]
    UndefinedMetric {
        /// The metric (precision, recall, ...).
        metric: String,
        /// Which count was zero.
        reason: String,
    },

    /// A simulation was asked to advance past its terminal state.
    #[error("Simulation already finished: {phase}")]
    SimulationFinished {
        /// Display form of the terminal phase.
        phase: String,
    },

    /// Configuration could not be applied.
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the configuration error.
        reason: String,
    },
}

impl BallastError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown scenario error.
    #[must_use]
    pub fn unknown_scenario(name: impl Into<String>) -> Self {
        Self::UnknownScenario { name: name.into() }
    }

    /// Creates a division guard error.
    #[must_use]
    pub fn division_guard(metric: impl Into<String>) -> Self {
        Self::DivisionGuard {
            metric: metric.into(),
        }
    }

    /// Creates an undefined metric error.
    #[must_use]
    pub fn undefined_metric(metric: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UndefinedMetric {
            metric: metric.into(),
            reason: reason.into(),
        }
    }

    /// Creates a simulation finished error.
    #[must_use]
    pub fn simulation_finished(phase: impl std::fmt::Display) -> Self {
        Self::SimulationFinished {
            phase: phase.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BallastError::invalid_input("market_rate_annual", "must be positive");
        assert!(err.to_string().contains("market_rate_annual"));
        assert!(err.to_string().contains("must be positive"));

        let err = BallastError::unknown_scenario("zombie apocalypse");
        assert_eq!(err.to_string(), "Unknown scenario: zombie apocalypse");
    }

    #[test]
    fn test_metric_errors() {
        let err = BallastError::division_guard("LCR");
        assert!(err.to_string().contains("LCR"));

        let err = BallastError::undefined_metric("precision", "no predicted positives");
        assert!(err.to_string().contains("not applicable"));
    }

    #[test]
    fn test_error_clone_eq() {
        let err = BallastError::config("bad grid");
        assert_eq!(err.clone(), err);
    }
}
