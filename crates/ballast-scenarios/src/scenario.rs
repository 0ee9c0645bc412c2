//! Stress scenario definitions.
//!
//! A scenario combines a funding run (retail and wholesale outflows), a
//! haircut on liquid assets, and per-bucket rate shocks. Presets form a closed
//! catalog; anything else is a custom scenario built with the `with_*` methods.

use ballast_core::validation;
use ballast_core::{BallastError, BallastResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default stress horizon in days.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Maturity bucket for rate shocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RateBucket {
    /// Short-term instruments.
    Short,
    /// Medium-term instruments.
    Medium,
    /// Long-term instruments.
    Long,
    /// A caller-defined bucket.
    Custom(String),
}

impl fmt::Display for RateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateBucket::Short => write!(f, "Short"),
            RateBucket::Medium => write!(f, "Medium"),
            RateBucket::Long => write!(f, "Long"),
            RateBucket::Custom(label) => write!(f, "{label}"),
        }
    }
}

/// A rate shock applied to one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketShock {
    /// Target bucket.
    pub bucket: RateBucket,
    /// Shock in basis points (positive = rates up).
    pub bps: f64,
}

/// Catalog of predefined scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioPreset {
    /// Moderate bank run: retail 15%, wholesale 35%, haircut 20%.
    ModerateRun,
    /// Wholesale funding crisis: retail 5%, wholesale 70%, haircut 40%.
    FundingCrisis,
    /// Systemic shock: retail 25%, wholesale 80%, haircut 60%.
    SystemicShock,
    /// Parallel +200bp.
    ParallelUp200,
    /// Parallel +300bp.
    ParallelUp300,
    /// Parallel +400bp.
    ParallelUp400,
    /// Short +300bp, medium +200bp, long +100bp.
    ShortEndShock,
    /// Short +100bp, medium +200bp, long +300bp.
    LongEndShock,
}

impl ScenarioPreset {
    /// Every preset, in catalog order.
    pub const ALL: [ScenarioPreset; 8] = [
        ScenarioPreset::ModerateRun,
        ScenarioPreset::FundingCrisis,
        ScenarioPreset::SystemicShock,
        ScenarioPreset::ParallelUp200,
        ScenarioPreset::ParallelUp300,
        ScenarioPreset::ParallelUp400,
        ScenarioPreset::ShortEndShock,
        ScenarioPreset::LongEndShock,
    ];

    /// The funding-run presets.
    pub const LIQUIDITY: [ScenarioPreset; 3] = [
        ScenarioPreset::ModerateRun,
        ScenarioPreset::FundingCrisis,
        ScenarioPreset::SystemicShock,
    ];

    /// The rate-shock presets.
    pub const RATES: [ScenarioPreset; 5] = [
        ScenarioPreset::ParallelUp200,
        ScenarioPreset::ParallelUp300,
        ScenarioPreset::ParallelUp400,
        ScenarioPreset::ShortEndShock,
        ScenarioPreset::LongEndShock,
    ];

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            ScenarioPreset::ModerateRun => "Moderate run",
            ScenarioPreset::FundingCrisis => "Funding crisis",
            ScenarioPreset::SystemicShock => "Systemic shock",
            ScenarioPreset::ParallelUp200 => "Parallel +200bp",
            ScenarioPreset::ParallelUp300 => "Parallel +300bp",
            ScenarioPreset::ParallelUp400 => "Parallel +400bp",
            ScenarioPreset::ShortEndShock => "Short-end shock",
            ScenarioPreset::LongEndShock => "Long-end shock",
        }
    }

    /// Kebab-case identifier used on the command line and in config files.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            ScenarioPreset::ModerateRun => "moderate-run",
            ScenarioPreset::FundingCrisis => "funding-crisis",
            ScenarioPreset::SystemicShock => "systemic-shock",
            ScenarioPreset::ParallelUp200 => "parallel-up-200",
            ScenarioPreset::ParallelUp300 => "parallel-up-300",
            ScenarioPreset::ParallelUp400 => "parallel-up-400",
            ScenarioPreset::ShortEndShock => "short-end-shock",
            ScenarioPreset::LongEndShock => "long-end-shock",
        }
    }

    /// Builds the scenario for this preset.
    #[must_use]
    pub fn scenario(&self) -> StressScenario {
        match self {
            ScenarioPreset::ModerateRun => standard::moderate_run(),
            ScenarioPreset::FundingCrisis => standard::funding_crisis(),
            ScenarioPreset::SystemicShock => standard::systemic_shock(),
            ScenarioPreset::ParallelUp200 => standard::parallel_up(*self, 200.0),
            ScenarioPreset::ParallelUp300 => standard::parallel_up(*self, 300.0),
            ScenarioPreset::ParallelUp400 => standard::parallel_up(*self, 400.0),
            ScenarioPreset::ShortEndShock => standard::short_end_shock(),
            ScenarioPreset::LongEndShock => standard::long_end_shock(),
        }
    }
}

impl fmt::Display for ScenarioPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ScenarioPreset {
    type Err = BallastError;

    /// Matches the display name or slug, ignoring case and separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        ScenarioPreset::ALL
            .into_iter()
            .find(|p| normalize(p.display_name()) == key || normalize(p.slug()) == key)
            .ok_or_else(|| BallastError::unknown_scenario(s))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Where a scenario came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// One of the catalog presets.
    Preset(ScenarioPreset),
    /// Built from caller-supplied values.
    Custom,
}

/// A stress scenario. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenario {
    /// Scenario name.
    pub name: String,
    /// Preset or custom.
    pub kind: ScenarioKind,
    /// Description.
    pub description: Option<String>,
    /// Rate shocks by bucket. Buckets not listed are unshocked.
    pub rate_shock_bps_by_bucket: Vec<BucketShock>,
    /// Share of retail deposits withdrawn, in percent.
    pub retail_outflow_pct: f64,
    /// Share of wholesale funding withdrawn, in percent.
    pub wholesale_outflow_pct: f64,
    /// Haircut applied to liquid assets, in percent.
    pub hqla_haircut_pct: f64,
    /// Stress horizon in days.
    pub horizon_days: u32,
}

impl StressScenario {
    /// Creates an empty custom scenario over the default horizon.
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ScenarioKind::Custom,
            description: None,
            rate_shock_bps_by_bucket: Vec::new(),
            retail_outflow_pct: 0.0,
            wholesale_outflow_pct: 0.0,
            hqla_haircut_pct: 0.0,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Resolves a preset by display name or slug.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ballast_scenarios::StressScenario;
    ///
    /// let scenario = StressScenario::from_name("Funding crisis").unwrap();
    /// assert_eq!(scenario.wholesale_outflow_pct, 70.0);
    /// assert!(StressScenario::from_name("alien invasion").is_err());
    /// ```
    pub fn from_name(name: &str) -> BallastResult<Self> {
        name.parse::<ScenarioPreset>().map(|p| p.scenario())
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Sets the shock for a bucket, replacing any existing one.
    #[must_use]
    pub fn with_rate_shock(mut self, bucket: RateBucket, bps: f64) -> Self {
        match self
            .rate_shock_bps_by_bucket
            .iter_mut()
            .find(|s| s.bucket == bucket)
        {
            Some(existing) => existing.bps = bps,
            None => self.rate_shock_bps_by_bucket.push(BucketShock { bucket, bps }),
        }
        self
    }

    /// Sets the same shock on short, medium and long buckets.
    #[must_use]
    pub fn with_parallel_shock(self, bps: f64) -> Self {
        self.with_rate_shock(RateBucket::Short, bps)
            .with_rate_shock(RateBucket::Medium, bps)
            .with_rate_shock(RateBucket::Long, bps)
    }

    /// Sets retail and wholesale outflows, in percent.
    #[must_use]
    pub fn with_funding_outflows(mut self, retail_pct: f64, wholesale_pct: f64) -> Self {
        self.retail_outflow_pct = retail_pct;
        self.wholesale_outflow_pct = wholesale_pct;
        self
    }

    /// Sets the liquid-asset haircut, in percent.
    #[must_use]
    pub fn with_haircut(mut self, haircut_pct: f64) -> Self {
        self.hqla_haircut_pct = haircut_pct;
        self
    }

    /// Sets the horizon in days.
    #[must_use]
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// Shock for a bucket in basis points, zero when the bucket is not shocked.
    #[must_use]
    pub fn rate_shock_bps(&self, bucket: &RateBucket) -> f64 {
        self.rate_shock_bps_by_bucket
            .iter()
            .find(|s| &s.bucket == bucket)
            .map_or(0.0, |s| s.bps)
    }

    /// Returns true if any funding outflow or haircut is set.
    #[must_use]
    pub fn has_funding_shock(&self) -> bool {
        self.retail_outflow_pct > 0.0 || self.wholesale_outflow_pct > 0.0 || self.hqla_haircut_pct > 0.0
    }

    /// Returns true if any bucket is shocked.
    #[must_use]
    pub fn has_rate_shock(&self) -> bool {
        self.rate_shock_bps_by_bucket.iter().any(|s| s.bps != 0.0)
    }

    /// Checks percentages and horizon.
    pub fn validate(&self) -> BallastResult<()> {
        validation::percentage("retail_outflow_pct", self.retail_outflow_pct)?;
        validation::percentage("wholesale_outflow_pct", self.wholesale_outflow_pct)?;
        validation::percentage("hqla_haircut_pct", self.hqla_haircut_pct)?;
        if self.horizon_days == 0 {
            return Err(BallastError::invalid_input(
                "horizon_days",
                "must be at least one day",
            ));
        }
        for shock in &self.rate_shock_bps_by_bucket {
            if !shock.bps.is_finite() {
                return Err(BallastError::invalid_input(
                    "rate_shock_bps_by_bucket",
                    format!("shock for {} must be finite", shock.bucket),
                ));
            }
        }
        Ok(())
    }
}

/// Preset scenario constructors.
pub mod standard {
    use super::*;

    fn preset(p: ScenarioPreset) -> StressScenario {
        StressScenario {
            kind: ScenarioKind::Preset(p),
            ..StressScenario::custom(p.display_name())
        }
    }

    /// Moderate bank run.
    #[must_use]
    pub fn moderate_run() -> StressScenario {
        preset(ScenarioPreset::ModerateRun)
            .with_description("Retail 15% and wholesale 35% withdrawn, market liquidity down 20%")
            .with_funding_outflows(15.0, 35.0)
            .with_haircut(20.0)
    }

    /// Wholesale funding crisis.
    #[must_use]
    pub fn funding_crisis() -> StressScenario {
        preset(ScenarioPreset::FundingCrisis)
            .with_description("Wholesale markets close: 70% of wholesale funding withdrawn")
            .with_funding_outflows(5.0, 70.0)
            .with_haircut(40.0)
    }

    /// Systemic shock.
    #[must_use]
    pub fn systemic_shock() -> StressScenario {
        preset(ScenarioPreset::SystemicShock)
            .with_description("Broad run on retail and wholesale funding with fire-sale haircuts")
            .with_funding_outflows(25.0, 80.0)
            .with_haircut(60.0)
    }

    pub(super) fn parallel_up(p: ScenarioPreset, bps: f64) -> StressScenario {
        preset(p)
            .with_description(format!("Parallel shift up {bps} basis points"))
            .with_parallel_shock(bps)
    }

    /// Short end up 300bp, tapering to 100bp at the long end.
    #[must_use]
    pub fn short_end_shock() -> StressScenario {
        preset(ScenarioPreset::ShortEndShock)
            .with_description("Short +300bp, medium +200bp, long +100bp")
            .with_rate_shock(RateBucket::Short, 300.0)
            .with_rate_shock(RateBucket::Medium, 200.0)
            .with_rate_shock(RateBucket::Long, 100.0)
    }

    /// Long end up 300bp, tapering to 100bp at the short end.
    #[must_use]
    pub fn long_end_shock() -> StressScenario {
        preset(ScenarioPreset::LongEndShock)
            .with_description("Short +100bp, medium +200bp, long +300bp")
            .with_rate_shock(RateBucket::Short, 100.0)
            .with_rate_shock(RateBucket::Medium, 200.0)
            .with_rate_shock(RateBucket::Long, 300.0)
    }

    /// The three funding-run presets.
    #[must_use]
    pub fn liquidity() -> Vec<StressScenario> {
        ScenarioPreset::LIQUIDITY.iter().map(ScenarioPreset::scenario).collect()
    }

    /// Every preset scenario.
    #[must_use]
    pub fn all() -> Vec<StressScenario> {
        ScenarioPreset::ALL.iter().map(ScenarioPreset::scenario).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liquidity_presets() {
        let s = ScenarioPreset::ModerateRun.scenario();
        assert_eq!(s.retail_outflow_pct, 15.0);
        assert_eq!(s.wholesale_outflow_pct, 35.0);
        assert_eq!(s.hqla_haircut_pct, 20.0);
        assert_eq!(s.horizon_days, 30);
        assert_eq!(s.kind, ScenarioKind::Preset(ScenarioPreset::ModerateRun));

        let s = ScenarioPreset::SystemicShock.scenario();
        assert_eq!(
            (s.retail_outflow_pct, s.wholesale_outflow_pct, s.hqla_haircut_pct),
            (25.0, 80.0, 60.0)
        );
    }

    #[test]
    fn test_rate_presets() {
        let s = ScenarioPreset::ShortEndShock.scenario();
        assert_eq!(s.rate_shock_bps(&RateBucket::Short), 300.0);
        assert_eq!(s.rate_shock_bps(&RateBucket::Long), 100.0);
        assert_eq!(s.rate_shock_bps(&RateBucket::Custom("FX".into())), 0.0);
        assert!(!s.has_funding_shock());

        let s = ScenarioPreset::ParallelUp400.scenario();
        assert_eq!(s.rate_shock_bps(&RateBucket::Medium), 400.0);
        assert_eq!(s.rate_shock_bps_by_bucket.len(), 3);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            StressScenario::from_name("funding-crisis").unwrap().name,
            "Funding crisis"
        );
        assert_eq!(
            StressScenario::from_name("SYSTEMIC SHOCK").unwrap().kind,
            ScenarioKind::Preset(ScenarioPreset::SystemicShock)
        );
        assert_eq!(
            StressScenario::from_name("Parallel +200bp").unwrap().kind,
            ScenarioKind::Preset(ScenarioPreset::ParallelUp200)
        );
        assert!(matches!(
            StressScenario::from_name("zombie apocalypse"),
            Err(BallastError::UnknownScenario { .. })
        ));
    }

    #[test]
    fn test_custom_builder() {
        let s = StressScenario::custom("Deposit flight")
            .with_funding_outflows(40.0, 10.0)
            .with_haircut(5.0)
            .with_rate_shock(RateBucket::Custom("5y".into()), 150.0)
            .with_rate_shock(RateBucket::Custom("5y".into()), 175.0)
            .with_horizon_days(14);
        assert_eq!(s.kind, ScenarioKind::Custom);
        assert_eq!(s.rate_shock_bps_by_bucket.len(), 1);
        assert_eq!(s.rate_shock_bps(&RateBucket::Custom("5y".into())), 175.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(StressScenario::custom("x").with_haircut(120.0).validate().is_err());
        assert!(StressScenario::custom("x").with_horizon_days(0).validate().is_err());
        assert!(StressScenario::custom("x")
            .with_funding_outflows(-1.0, 0.0)
            .validate()
            .is_err());
        for s in standard::all() {
            assert!(s.validate().is_ok(), "{} should validate", s.name);
        }
    }
}
