//! Derived financial metrics: totals, margins, unit economics, burn and breakeven

mod engine;
mod breakeven;
mod report;

pub use engine::{MetricsEngine, DerivationConfig, derive_metrics};
pub use breakeven::{breakeven_month, monthly_growth_factor};
pub use report::{ForecastMetrics, YearRow};
