//! Policy configuration.
//!
//! A [`PolicyConfig`] gathers every tunable the analytics treat as policy
//! rather than domain truth: the survival floor, the ratio run-off factors,
//! the credit cost weights, the threshold grid and the simulation defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use ballast_credit::{CostModel, ThresholdGrid, ThresholdOptimizer};
use ballast_risk::RatioFactors;
use ballast_scenarios::{ScenarioEngine, SurvivalPolicy, DEFAULT_HORIZON_DAYS};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Name of the default policy.
pub const STANDARD: &str = "STANDARD";

/// Name of the stricter policy.
pub const CONSERVATIVE: &str = "CONSERVATIVE";

// =============================================================================
// THRESHOLD GRID PARAMETERS
// =============================================================================

/// Bounds and density of the credit threshold grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    /// Lowest threshold.
    #[serde(default = "default_grid_min")]
    pub min: f64,
    /// Highest threshold.
    #[serde(default = "default_grid_max")]
    pub max: f64,
    /// Number of evenly spaced points.
    #[serde(default = "default_grid_points")]
    pub points: usize,
}

fn default_grid_min() -> f64 {
    0.1
}

fn default_grid_max() -> f64 {
    0.9
}

fn default_grid_points() -> usize {
    9
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            min: default_grid_min(),
            max: default_grid_max(),
            points: default_grid_points(),
        }
    }
}

impl GridParams {
    /// Builds the grid.
    pub fn to_grid(&self) -> ConfigResult<ThresholdGrid> {
        ThresholdGrid::linspace(self.min, self.max, self.points).map_err(|e| {
            ConfigError::Validation {
                field: "grid".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl Validate for GridParams {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (field, value) in [("grid.min", self.min), ("grid.max", self.max)] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("must lie in [0, 1], got {value}"),
                    "unit_interval",
                ));
            }
        }
        if self.min > self.max {
            errors.push(ValidationError::with_rule(
                "grid",
                format!("min {} exceeds max {}", self.min, self.max),
                "ordered_bounds",
            ));
        }
        if self.points < 1 {
            errors.push(ValidationError::new("grid.points", "must be at least 1"));
        }
        errors
    }
}

// =============================================================================
// SIMULATION DEFAULTS
// =============================================================================

/// Defaults for the liquidity run simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationDefaults {
    /// Simulation horizon in days.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Market stress level.
    #[serde(default = "default_stress_level")]
    pub stress_level: f64,
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

fn default_stress_level() -> f64 {
    5.0
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            stress_level: default_stress_level(),
        }
    }
}

impl Validate for SimulationDefaults {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.horizon_days == 0 {
            errors.push(ValidationError::new(
                "simulation.horizon_days",
                "must be at least 1",
            ));
        }
        if !self.stress_level.is_finite() || self.stress_level < 0.0 {
            errors.push(ValidationError::with_rule(
                "simulation.stress_level",
                format!("must be finite and non-negative, got {}", self.stress_level),
                "non_negative",
            ));
        }
        errors
    }
}

// =============================================================================
// POLICY CONFIG
// =============================================================================

/// Complete analytics policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Policy name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the manager refuses to replace this policy.
    #[serde(default)]
    pub read_only: bool,
    /// Survival rule applied to stress scenarios.
    #[serde(default)]
    pub survival: SurvivalPolicy,
    /// LCR and NSFR factors.
    #[serde(default)]
    pub ratio_factors: RatioFactors,
    /// Credit misclassification costs.
    #[serde(default)]
    pub cost_model: CostModel,
    /// Credit threshold grid.
    #[serde(default)]
    pub grid: GridParams,
    /// Run simulator defaults.
    #[serde(default)]
    pub simulation: SimulationDefaults,
}

fn default_name() -> String {
    STANDARD.to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl PolicyConfig {
    /// Creates a policy with default values under a new name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: false,
            description: None,
            ..Self::standard()
        }
    }

    /// The default policy: LCR floor 70%, bad-loss rate 0.7.
    pub fn standard() -> Self {
        Self {
            name: STANDARD.to_string(),
            description: Some("Default survival floor and credit cost weights".to_string()),
            survival: SurvivalPolicy::default(),
            ratio_factors: RatioFactors::default(),
            cost_model: CostModel::default(),
            grid: GridParams::default(),
            simulation: SimulationDefaults::default(),
            read_only: true,
        }
    }

    /// A stricter policy: LCR floor 100%, bad-loss rate 0.9.
    pub fn conservative() -> Self {
        Self {
            name: CONSERVATIVE.to_string(),
            description: Some("Full LCR coverage and heavier default losses".to_string()),
            survival: SurvivalPolicy::with_min_lcr(100.0),
            cost_model: CostModel {
                bad_loss_rate: 0.9,
                ..CostModel::default()
            },
            ..Self::standard()
        }
    }

    /// Looks up a built-in policy by name, case-insensitively.
    pub fn named(name: &str) -> ConfigResult<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            STANDARD => Ok(Self::standard()),
            CONSERVATIVE => Ok(Self::conservative()),
            _ => Err(ConfigError::NotFound {
                key: name.to_string(),
            }),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the survival policy.
    #[must_use]
    pub fn with_survival(mut self, survival: SurvivalPolicy) -> Self {
        self.survival = survival;
        self
    }

    /// Sets the cost model.
    #[must_use]
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Sets the simulation defaults.
    #[must_use]
    pub fn with_simulation(mut self, simulation: SimulationDefaults) -> Self {
        self.simulation = simulation;
        self
    }

    /// Parses a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a policy file, choosing the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if extension != "toml" && extension != "json" {
            return Err(ConfigError::UnsupportedFormat { extension });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading policy from {}", path.display());
        let mut config = if extension == "toml" {
            Self::from_toml_str(&text)?
        } else {
            Self::from_json_str(&text)?
        };
        config.read_only = false;
        Ok(config)
    }

    /// Renders the policy as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scenario engine carrying this policy's factors and survival rule.
    pub fn engine(&self) -> ScenarioEngine {
        ScenarioEngine::new()
            .with_factors(self.ratio_factors)
            .with_policy(self.survival)
    }

    /// Threshold optimizer over this policy's grid and cost model.
    pub fn optimizer(&self) -> ConfigResult<ThresholdOptimizer> {
        Ok(ThresholdOptimizer::new()
            .with_grid(self.grid.to_grid()?)
            .with_cost_model(self.cost_model))
    }
}

impl Validate for PolicyConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "must not be empty"));
        }

        let survival = &self.survival;
        if !survival.min_lcr_pct.is_finite() || survival.min_lcr_pct < 0.0 {
            errors.push(ValidationError::with_rule(
                "survival.min_lcr_pct",
                format!("must be non-negative, got {}", survival.min_lcr_pct),
                "non_negative",
            ));
        }

        for (field, value) in [
            ("ratio_factors.outflow_factor", self.ratio_factors.outflow_factor),
            (
                "ratio_factors.wholesale_asf_factor",
                self.ratio_factors.wholesale_asf_factor,
            ),
            ("cost_model.bad_loss_rate", self.cost_model.bad_loss_rate),
            (
                "cost_model.opportunity_cost_rate",
                self.cost_model.opportunity_cost_rate,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("must lie in [0, 1], got {value}"),
                    "unit_interval",
                ));
            }
        }

        if !self.cost_model.avg_loan_amount.is_finite() || self.cost_model.avg_loan_amount <= 0.0
        {
            errors.push(ValidationError::with_rule(
                "cost_model.avg_loan_amount",
                format!("must be positive, got {}", self.cost_model.avg_loan_amount),
                "positive",
            ));
        }

        errors.extend(self.grid.validate());
        errors.extend(self.simulation.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_named_policies() {
        let standard = PolicyConfig::named("standard").unwrap();
        assert_relative_eq!(standard.survival.min_lcr_pct, 70.0);
        assert_relative_eq!(standard.cost_model.bad_loss_rate, 0.7);
        assert!(standard.is_valid());

        let conservative = PolicyConfig::named("CONSERVATIVE").unwrap();
        assert_relative_eq!(conservative.survival.min_lcr_pct, 100.0);
        assert_relative_eq!(conservative.cost_model.bad_loss_rate, 0.9);
        assert_relative_eq!(conservative.cost_model.opportunity_cost_rate, 0.1);
        assert!(conservative.is_valid());

        assert!(matches!(
            PolicyConfig::named("reckless"),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_validate_collects_everything() {
        let mut config = PolicyConfig::new("BROKEN");
        config.cost_model.bad_loss_rate = 1.5;
        config.grid = GridParams {
            min: 0.8,
            max: 0.2,
            points: 0,
        };
        config.simulation.horizon_days = 0;

        let errors = config.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(errors.len(), 4);
        assert!(fields.contains(&"cost_model.bad_loss_rate"));
        assert!(fields.contains(&"grid"));
        assert!(fields.contains(&"grid.points"));
        assert!(fields.contains(&"simulation.horizon_days"));
    }

    #[test]
    fn test_toml_partial_document() {
        let config = PolicyConfig::from_toml_str(
            r#"
            name = "DESK"

            [survival]
            min_lcr_pct = 85.0

            [grid]
            points = 17
            "#,
        )
        .unwrap();
        assert_eq!(config.name, "DESK");
        assert_relative_eq!(config.survival.min_lcr_pct, 85.0);
        assert!(config.survival.require_positive_liquid);
        assert_eq!(config.grid.points, 17);
        assert_relative_eq!(config.grid.min, 0.1);
        assert_eq!(config.simulation.horizon_days, 30);
        assert_eq!(config.optimizer().unwrap().grid().len(), 17);
    }

    #[test]
    fn test_json_rejects_invalid() {
        let err = PolicyConfig::from_json_str(r#"{"simulation": {"horizon_days": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(PolicyConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PolicyConfig::conservative();
        let text = config.to_toml_string().unwrap();
        let back = PolicyConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_engine_uses_policy() {
        let engine = PolicyConfig::conservative().engine();
        assert_relative_eq!(engine.policy().min_lcr_pct, 100.0);
    }
}
