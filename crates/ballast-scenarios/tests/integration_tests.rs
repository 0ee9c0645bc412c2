//! Integration tests for scenario application.

use ballast_core::{BalanceSheetSnapshot, Ratio};
use ballast_scenarios::prelude::*;
use proptest::prelude::*;

#[test]
fn every_preset_resolves_by_slug_and_name() {
    for preset in ScenarioPreset::ALL {
        let by_slug = StressScenario::from_name(preset.slug()).unwrap();
        let by_name = StressScenario::from_name(preset.display_name()).unwrap();
        assert_eq!(by_slug, by_name);
        assert_eq!(by_slug.kind, ScenarioKind::Preset(preset));
    }
}

#[test]
fn scenario_round_trips_through_json() {
    let scenario = StressScenario::custom("Deposit flight")
        .with_funding_outflows(40.0, 10.0)
        .with_rate_shock(RateBucket::Custom("5y".into()), 150.0);
    let json = serde_json::to_string(&scenario).unwrap();
    let back: StressScenario = serde_json::from_str(&json).unwrap();
    assert_eq!(back, scenario);
}

#[test]
fn rate_only_scenario_leaves_liquidity_unchanged() {
    let snapshot = BalanceSheetSnapshot::new(25.0, 40.0).unwrap();
    let outcome = ScenarioEngine::new()
        .apply(&snapshot, &ScenarioPreset::ParallelUp300.scenario())
        .unwrap();
    assert_eq!(outcome.liquid_assets_pct, 25.0);
    assert_eq!(outcome.retail_deposits_pct, 60.0);
    assert!(matches!(outcome.lcr, Ratio::Defined(_)));
}

proptest! {
    #[test]
    fn heavier_haircut_never_improves_lcr(
        liquid in 1.0f64..100.0,
        wholesale in 0.0f64..100.0,
        haircut in 0.0f64..99.0,
        extra in 0.0f64..1.0,
    ) {
        let snapshot = BalanceSheetSnapshot::new(liquid, wholesale).unwrap();
        let engine = ScenarioEngine::new();
        let light = StressScenario::custom("light").with_haircut(haircut);
        let heavy = StressScenario::custom("heavy").with_haircut(haircut + extra);
        let a = engine.apply(&snapshot, &light).unwrap().lcr.as_option().unwrap();
        let b = engine.apply(&snapshot, &heavy).unwrap().lcr.as_option().unwrap();
        prop_assert!(b <= a + 1e-9);
    }

    #[test]
    fn failed_count_matches_outcomes(liquid in 0.0f64..100.0, wholesale in 0.0f64..100.0) {
        let snapshot = BalanceSheetSnapshot::new(liquid, wholesale).unwrap();
        let summary = ScenarioEngine::new().apply_all(&snapshot, &standard::all()).unwrap();
        prop_assert_eq!(summary.outcomes.len(), 8);
        prop_assert_eq!(
            summary.failed_count,
            summary.outcomes.iter().filter(|o| !o.survived).count()
        );
    }
}
