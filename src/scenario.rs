//! Scenario runner for what-if comparisons
//!
//! Holds one base state, then evaluates any number of named override sets
//! against it without touching the base.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use rayon::prelude::*;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::Result;
use crate::metrics::{DerivationConfig, ForecastMetrics, MetricsEngine};
use crate::model::ForecastState;
use crate::overrides::{apply_all, Override};
use crate::store::ModelStore;

/// Named set of edits
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub overrides: Vec<Override>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, overrides: Vec<Override>) -> Self {
        Self { name: name.into(), overrides }
    }
}

/// Outcome of one scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub state: ForecastState,
    pub metrics: ForecastMetrics,
}

/// Scenario file: `{ "name": ["path=value", ...], ... }`
///
/// Scenarios keep the order they appear in the file. A name may appear once.
#[derive(Debug)]
struct ScenarioFile(Vec<Scenario>);

impl<'de> Deserialize<'de> for ScenarioFile {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScenarioFileVisitor;

        impl<'de> Visitor<'de> for ScenarioFileVisitor {
            type Value = ScenarioFile;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of scenario name to override list")
            }

            fn visit_map<V>(self, mut map: V) -> std::result::Result<ScenarioFile, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut seen = HashSet::new();
                let mut scenarios = Vec::new();

                while let Some(name) = map.next_key::<String>()? {
                    if !seen.insert(name.clone()) {
                        return Err(de::Error::custom(format!("duplicate scenario name '{}'", name)));
                    }
                    let overrides: Vec<Override> = map.next_value()?;
                    scenarios.push(Scenario::new(name, overrides));
                }

                Ok(ScenarioFile(scenarios))
            }
        }

        deserializer.deserialize_map(ScenarioFileVisitor)
    }
}

/// Parse a scenario JSON document
pub fn scenarios_from_json(json: &str) -> Result<Vec<Scenario>> {
    let file: ScenarioFile = serde_json::from_str(json)?;
    Ok(file.0)
}

/// Load scenarios from a JSON file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    scenarios_from_json(&std::fs::read_to_string(path)?)
}

/// Pre-built runner sharing one base state across scenarios
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ForecastState::initial());
/// let cheap_cac = Scenario::new("cheap-cac", vec!["assumptions.cacCost=80".parse()?]);
/// let result = runner.run(&cheap_cac)?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: ForecastState,
    engine: MetricsEngine,
}

impl ScenarioRunner {
    pub fn new(base: ForecastState) -> Self {
        Self::with_config(base, DerivationConfig::default())
    }

    pub fn with_config(base: ForecastState, config: DerivationConfig) -> Self {
        Self { base, engine: MetricsEngine::new(config) }
    }

    pub fn base(&self) -> &ForecastState {
        &self.base
    }

    /// Metrics of the unmodified base
    pub fn baseline(&self) -> ForecastMetrics {
        self.engine.derive(&self.base)
    }

    /// Apply one scenario to a copy of the base and derive its metrics
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioResult> {
        let mut store = ModelStore::from_state(self.base.clone());
        apply_all(&mut store, &scenario.overrides)?;
        let state = store.state().clone();
        Ok(ScenarioResult {
            name: scenario.name.clone(),
            metrics: self.engine.derive(&state),
            state,
        })
    }

    /// Run scenarios in parallel; results keep input order
    pub fn run_all(&self, scenarios: &[Scenario]) -> Vec<Result<ScenarioResult>> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(ForecastState::initial())
    }
}
