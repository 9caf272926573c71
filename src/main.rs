//! Forecast CLI
//!
//! Derives the three-year model from defaults or a saved snapshot, applies
//! edits, and prints, saves or exports the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use proforma_forecast::{
    model::AssumptionKey,
    overrides::apply_all,
    persistence::{export_year_table, load_lines, Snapshot},
    scenario::load_scenarios,
    ForecastMetrics, ForecastMode, ModelStore, Override, ScenarioRunner,
};

#[derive(Parser, Debug)]
#[command(name = "forecast", version, about = "Three-year pro-forma forecast")]
struct Args {
    /// Start from a saved snapshot instead of the defaults
    #[arg(long)]
    load: Option<PathBuf>,

    /// CSV of line items (section,key,year1,year2,year3)
    #[arg(long)]
    lines: Option<PathBuf>,

    /// Edit applied before deriving, e.g. revenue.aiTools=1,2,3 (repeatable)
    #[arg(long = "set", value_name = "PATH=VALUE")]
    set: Vec<Override>,

    /// Cash on hand used for runway
    #[arg(long, env = "FORECAST_CASH_ON_HAND")]
    cash_on_hand: Option<f64>,

    /// JSON file of named scenarios to compare against the edited model
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Write the edited model to a snapshot file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write the per-year metrics table to CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    forecast_mode: ForecastMode,
    metrics: &'a ForecastMetrics,
    scenarios: Vec<ScenarioReport>,
}

#[derive(Serialize)]
struct ScenarioReport {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<ForecastMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut store = match &args.load {
        Some(path) => {
            let snapshot = Snapshot::load(path)
                .with_context(|| format!("loading snapshot {}", path.display()))?;
            ModelStore::from_state(snapshot.state)
        }
        None => ModelStore::new(),
    };

    if let Some(path) = &args.lines {
        load_lines(path, &mut store).with_context(|| format!("loading lines {}", path.display()))?;
    }
    if let Some(cash) = args.cash_on_hand {
        store
            .update_assumptions(AssumptionKey::CashOnHand, cash)
            .context("setting cash on hand")?;
    }
    apply_all(&mut store, &args.set).context("applying --set edits")?;
    info!("Applied {} edits", args.set.len());

    let metrics = store.metrics();

    let scenarios = match &args.scenarios {
        Some(path) => {
            let scenarios = load_scenarios(path)
                .with_context(|| format!("loading scenarios {}", path.display()))?;
            let runner = ScenarioRunner::new(store.state().clone());
            scenarios
                .iter()
                .zip(runner.run_all(&scenarios))
                .map(|(scenario, result)| match result {
                    Ok(r) => ScenarioReport { name: r.name, metrics: Some(r.metrics), error: None },
                    Err(e) => ScenarioReport {
                        name: scenario.name.clone(),
                        metrics: None,
                        error: Some(e.to_string()),
                    },
                })
                .collect()
        }
        None => Vec::new(),
    };

    if let Some(path) = &args.save {
        Snapshot::capture(store.state())
            .save(path)
            .with_context(|| format!("saving snapshot {}", path.display()))?;
    }
    if let Some(path) = &args.csv {
        export_year_table(&metrics, path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if args.json {
        let report = Report {
            forecast_mode: store.state().forecast_mode,
            metrics: &metrics,
            scenarios,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_tables(store.state().forecast_mode, &metrics, &scenarios);
    }

    Ok(())
}

fn print_tables(mode: ForecastMode, metrics: &ForecastMetrics, scenarios: &[ScenarioReport]) {
    println!("Pro-Forma Forecast ({} mode)", mode);
    println!("============================\n");

    println!("{:>4} {:>14} {:>12} {:>12} {:>14} {:>8} {:>14} {:>6} {:>12}",
        "Year", "Revenue", "COGS", "OpEx", "Gross Profit", "GM %", "EBITDA", "Heads", "Salaries");
    println!("{}", "-".repeat(106));
    for row in metrics.year_rows() {
        println!("{:>4} {:>14.0} {:>12.0} {:>12.0} {:>14.0} {:>8.1} {:>14.0} {:>6.0} {:>12.0}",
            row.year,
            row.total_revenue,
            row.total_cogs,
            row.total_opex,
            row.gross_profit,
            row.gross_margin,
            row.ebitda,
            row.headcount,
            row.headcount_cost,
        );
    }

    println!("\nUnit economics:");
    println!("  ARR:            ${:.0}", metrics.arr);
    println!("  ARPU:           ${:.2}", metrics.arpu);
    println!("  LTV:            ${:.2}", metrics.ltv);
    println!("  LTV/CAC:        {:.2}", metrics.ltv_cac_ratio);
    println!("\nCash:");
    println!("  Monthly burn:   ${:.2}", metrics.monthly_burn);
    println!("  Runway:         {} months", metrics.runway_months);
    println!("  Breakeven:      {}", metrics.breakeven_label());

    if !scenarios.is_empty() {
        println!("\nScenarios:");
        println!("{:<20} {:>14} {:>14} {:>8} {:>10}", "Name", "ARR", "EBITDA Y1", "Runway", "Breakeven");
        println!("{}", "-".repeat(70));
        for s in scenarios {
            match (&s.metrics, &s.error) {
                (Some(m), _) => println!("{:<20} {:>14.0} {:>14.0} {:>8} {:>10}",
                    s.name, m.arr, m.ebitda.year1, m.runway_months, m.breakeven_label()),
                (None, Some(e)) => println!("{:<20} error: {}", s.name, e),
                (None, None) => println!("{:<20} (no result)", s.name),
            }
        }
    }
}
