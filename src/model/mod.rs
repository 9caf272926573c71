//! Forecast input model: yearly line tables, headcount, assumptions
//!
//! `ForecastState` holds every table behind an `Arc`, so snapshots taken before
//! and after a mutation share the tables that did not change.

mod keys;
mod yearly;
mod lines;
mod headcount;
mod assumptions;

pub use yearly::{Year, YearlyValues};
pub use lines::{RevenueModel, CogsModel, OpExModel, RevenueLine, CogsLine, OpExLine, RevenueUpdate};
pub use headcount::{HeadcountRow, default_headcount, total_heads, total_cost};
pub use assumptions::{Assumptions, AssumptionKey, DEFAULT_CASH_ON_HAND};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// How the forecast lines are produced. Only `Custom` (hand-edited) has
/// behavior today; the others are stored and round-tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMode {
    #[default]
    Custom,
    Ai,
    Hybrid,
}

impl ForecastMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ForecastMode::Custom => "custom",
            ForecastMode::Ai => "ai",
            ForecastMode::Hybrid => "hybrid",
        }
    }
}

impl FromStr for ForecastMode {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom" => Ok(ForecastMode::Custom),
            "ai" => Ok(ForecastMode::Ai),
            "hybrid" => Ok(ForecastMode::Hybrid),
            other => Err(ForecastError::InvalidForecastMode(other.to_string())),
        }
    }
}

impl fmt::Display for ForecastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete forecast inputs for one planning session
///
/// Cloning is cheap (reference counts only). Serializes as a single JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastState {
    pub forecast_mode: ForecastMode,
    pub revenue: Arc<RevenueModel>,
    pub cogs: Arc<CogsModel>,
    pub opex: Arc<OpExModel>,
    pub headcount: Arc<Vec<HeadcountRow>>,
    pub assumptions: Arc<Assumptions>,
}

impl ForecastState {
    /// Defaults for a brand-new session
    pub fn initial() -> Self {
        Self {
            forecast_mode: ForecastMode::Custom,
            revenue: Arc::new(RevenueModel::default_plan()),
            cogs: Arc::new(CogsModel::default_plan()),
            opex: Arc::new(OpExModel::default_plan()),
            headcount: Arc::new(default_headcount()),
            assumptions: Arc::new(Assumptions::default_plan()),
        }
    }
}

impl Default for ForecastState {
    fn default() -> Self {
        Self::initial()
    }
}
