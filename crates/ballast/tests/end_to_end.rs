//! Flows that cross crate boundaries.

use approx::assert_relative_eq;
use ballast::prelude::*;
use ballast::risk::{dv01, standard_buckets};

#[test]
fn bond_duration_feeds_dv01() {
    let bond = BondParameters::new(1000.0, 5.0, PaymentFrequency::Annual, 5.0, 6.0).unwrap();
    let result = analyze_bond(&bond).unwrap();
    assert_relative_eq!(result.price, 957.8764, epsilon = 1e-4);
    assert_relative_eq!(result.macaulay_duration_years, 4.5347, epsilon = 1e-4);
    assert_relative_eq!(result.modified_duration_years, 4.2780, epsilon = 1e-4);

    let value = dv01(result.modified_duration_years, result.price).unwrap();
    assert_relative_eq!(value.as_f64(), 0.4098, epsilon = 1e-4);
}

#[test]
fn conservative_policy_fails_more_scenarios() {
    let snapshot = BalanceSheetSnapshot::new(30.0, 40.0).unwrap();
    let standard = PolicyConfig::named("STANDARD").unwrap().engine();
    let conservative = PolicyConfig::named("CONSERVATIVE").unwrap().engine();

    let loose = standard.apply_standard(&snapshot).unwrap();
    let strict = conservative.apply_standard(&snapshot).unwrap();
    assert!(strict.failed_count >= loose.failed_count);
}

#[test]
fn preset_horizon_drives_simulation() {
    let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
    let scenario: StressScenario = "moderate-run".parse::<ScenarioPreset>().unwrap().scenario();
    let outcome = RunSimulator::new().run(&snapshot, &scenario, 8.0).unwrap();
    assert_eq!(outcome.phase, RunPhase::Failed(17));
    assert_eq!(outcome.trajectory.len(), 18);
}

#[test]
fn gap_report_totals() {
    let report = repricing_gap(
        &standard_buckets([100.0, 80.0, 60.0, 40.0]),
        &standard_buckets([120.0, 70.0, 50.0, 60.0]),
    )
    .unwrap();
    assert_relative_eq!(report.total_gap, -20.0);
    assert_relative_eq!(report.margin_impact(1.0).total, -0.2);
}

#[test]
fn policy_cost_model_prices_the_sweep() {
    let loans: Vec<ScoredLoan> = [(0.05, false), (0.35, false), (0.6, true), (0.92, true)]
        .iter()
        .enumerate()
        .map(|(i, &(p, y))| {
            ScoredLoan::new(format!("L{i}"), p)
                .with_label(y)
                .with_loan_amount(20_000.0)
        })
        .collect();
    let policy = PolicyConfig::named("CONSERVATIVE").unwrap();
    let optimizer = policy
        .optimizer()
        .unwrap()
        .with_cost_model(policy.cost_model.with_average_from(&loans));
    let sweep = optimizer.sweep(&loans).unwrap();
    assert!(sweep.best().estimated_cost.is_zero());
    assert!(policy.grid.to_grid().unwrap().points().contains(&sweep.best_threshold()));
}
