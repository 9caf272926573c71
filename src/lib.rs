//! Pro-forma forecast engine for a creator-platform financial plan
//!
//! This library provides:
//! - A three-year input model (revenue, COGS, OpEx, headcount, assumptions)
//! - A copy-on-write session store with validated mutators
//! - Pure derivation of totals, margins, EBITDA, unit economics, burn, runway and breakeven
//! - JSON snapshots, CSV line import and CSV metrics export
//! - Textual overrides and parallel what-if scenarios

pub mod error;
pub mod model;
pub mod store;
pub mod metrics;
pub mod persistence;
pub mod overrides;
pub mod scenario;

// Re-export commonly used types
pub use error::{ForecastError, Result};
pub use model::{ForecastState, ForecastMode, YearlyValues, Year};
pub use store::ModelStore;
pub use metrics::{ForecastMetrics, MetricsEngine, DerivationConfig, derive_metrics};
pub use overrides::Override;
pub use scenario::{Scenario, ScenarioRunner, ScenarioResult};
