//! End-to-end checks of the forecast engine through its public API

use std::sync::Arc;

use approx::assert_relative_eq;
use proforma_forecast::{
    derive_metrics,
    model::{AssumptionKey, CogsLine, HeadcountRow, OpExLine, RevenueLine, RevenueUpdate},
    persistence::{export_year_table, load_lines, Snapshot},
    scenario::load_scenarios,
    ForecastError, ForecastMode, ForecastState, ModelStore, ScenarioRunner, Year, YearlyValues,
};

#[test]
fn default_session_scenario() {
    let store = ModelStore::new();
    let m = store.metrics();

    assert_eq!(m.total_revenue.get(Year::One), 660_000.0);
    assert_eq!(m.total_revenue.get(Year::Two), 1_900_000.0);
    assert_eq!(m.total_revenue.get(Year::Three), 4_840_000.0);
    assert_eq!(m.total_cogs.year1, 115_800.0);
    assert_eq!(m.total_opex.year1, 768_000.0);
    assert_eq!(m.gross_profit.year1, 544_200.0);
    assert_relative_eq!(m.gross_margin.year1, 82.45, epsilon = 0.01);
    assert_eq!(m.ebitda.year1, -223_800.0);
    assert_eq!(m.monthly_burn, 18_650.0);
    assert_eq!(m.runway_months, 107);
}

#[test]
fn derivation_is_idempotent() {
    let state = ForecastState::initial();
    let a = derive_metrics(&state);
    let b = derive_metrics(&state);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn mutation_isolation() {
    let mut store = ModelStore::new();
    let before = store.snapshot();

    let v = YearlyValues::new(7.0, 8.0, 9.0);
    store.update_revenue(RevenueUpdate::Line(RevenueLine::AiTools, v)).unwrap();
    let after = store.snapshot();

    assert!(Arc::ptr_eq(&before.cogs, &after.cogs));
    assert!(Arc::ptr_eq(&before.opex, &after.opex));
    assert!(Arc::ptr_eq(&before.headcount, &after.headcount));
    assert!(Arc::ptr_eq(&before.assumptions, &after.assumptions));
    assert_eq!(before.forecast_mode, after.forecast_mode);

    let mut expected = (*before.revenue).clone();
    expected.ai_tools = v;
    assert_eq!(*after.revenue, expected);
}

#[test]
fn enterprise_gate() {
    let mut store = ModelStore::new();
    let enabled_y3 = store.metrics().total_revenue.year3;

    store.update_revenue(RevenueUpdate::EnterpriseEnabled(false)).unwrap();
    let disabled_y3 = store.metrics().total_revenue.year3;
    assert_eq!(enabled_y3 - disabled_y3, 400_000.0);

    store
        .update_revenue(RevenueUpdate::Line(
            RevenueLine::Enterprise,
            YearlyValues::new(0.0, 100_000.0, 9_000_000.0),
        ))
        .unwrap();
    assert_eq!(store.metrics().total_revenue.year3, disabled_y3);
}

#[test]
fn zero_revenue_year_has_zero_margin() {
    let mut store = ModelStore::new();
    for &line in RevenueLine::ALL {
        let mut v = *store.state().revenue.line(line);
        v.year2 = 0.0;
        store.update_revenue(RevenueUpdate::Line(line, v)).unwrap();
    }
    let m = store.metrics();
    assert_eq!(m.total_revenue.year2, 0.0);
    assert_eq!(m.gross_margin.year2, 0.0);
    assert!(m.gross_margin.year1.is_finite());
}

#[test]
fn headcount_never_feeds_opex() {
    let mut store = ModelStore::new();
    let before = store.metrics();
    store
        .add_headcount(HeadcountRow::new("Research", [10.0, 20.0, 30.0], 200_000.0))
        .unwrap();
    let after = store.metrics();

    assert_eq!(after.total_opex, before.total_opex);
    assert_eq!(after.ebitda, before.ebitda);
    assert_eq!(after.headcount_cost.year1 - before.headcount_cost.year1, 2_000_000.0);
}

#[test]
fn boundary_errors() {
    let mut store = ModelStore::new();
    let row = HeadcountRow::new("Ops", [1.0, 1.0, 1.0], 1.0);
    assert!(matches!(
        store.update_headcount(100, row),
        Err(ForecastError::IndexOutOfRange { index: 100, len: 4 })
    ));
    assert!(matches!(
        store.set_forecast_mode_str("quantum"),
        Err(ForecastError::InvalidForecastMode(_))
    ));
    assert!(matches!(
        "contractors".parse::<CogsLine>(),
        Err(ForecastError::UnknownKey { section: "cogs", .. })
    ));
}

#[test]
fn snapshot_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut store = ModelStore::new();
    store.set_forecast_mode(ForecastMode::Ai);
    store
        .update_opex(OpExLine::Contractors, YearlyValues::new(1.0, 2.0, 3.0))
        .unwrap();
    store.update_assumptions(AssumptionKey::LtvMonths, 36.0).unwrap();
    Snapshot::capture(store.state()).save(&path).unwrap();

    let restored = ModelStore::from_state(Snapshot::load(&path).unwrap().state);
    assert_eq!(restored.state(), store.state());
    assert_eq!(restored.metrics(), store.metrics());
}

#[test]
fn csv_lines_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let lines = dir.path().join("lines.csv");
    std::fs::write(
        &lines,
        "section,key,year1,year2,year3\nopex,contractors,0,0,0\ncogs,videoProcessing,0,0,0\n",
    )
    .unwrap();

    let mut store = ModelStore::new();
    assert_eq!(load_lines(&lines, &mut store).unwrap(), 2);
    let m = store.metrics();
    assert_eq!(m.total_opex.year1, 696_000.0);
    assert_eq!(m.total_cogs.year1, 91_800.0);

    let out = dir.path().join("years.csv");
    export_year_table(&m, &out).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn scenario_file_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenarios.json");
    std::fs::write(
        &path,
        r#"{ "no-enterprise": ["revenue.enterpriseEnabled=false"],
             "flat-costs": ["opex.salesMarketing=180000,180000,180000"] }"#,
    )
    .unwrap();

    let scenarios = load_scenarios(&path).unwrap();
    let runner = ScenarioRunner::new(ForecastState::initial());
    let results: Vec<_> = runner
        .run_all(&scenarios)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(results[0].name, "no-enterprise");
    assert_eq!(results[0].metrics.arr, 4_440_000.0);
    assert_eq!(results[1].name, "flat-costs");
    assert_eq!(results[1].metrics.total_opex.year3, 2_040_000.0);
}

#[test]
fn failed_csv_import_is_all_or_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let lines = dir.path().join("lines.csv");
    std::fs::write(
        &lines,
        "section,key,year1,year2,year3\nopex,contractors,0,0,0\nopex,rent,1,2,3\n",
    )
    .unwrap();

    let mut store = ModelStore::new();
    assert!(load_lines(&lines, &mut store).is_err());
    assert_eq!(*store.state(), ForecastState::initial());
    assert_eq!(store.metrics().total_opex.year1, 768_000.0);
}
