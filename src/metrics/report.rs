//! Derived metric outputs

use serde::{Deserialize, Serialize};

use crate::model::{Year, YearlyValues};

/// Snapshot of everything derived from one `ForecastState`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMetrics {
    pub total_revenue: YearlyValues,
    pub total_cogs: YearlyValues,
    pub total_opex: YearlyValues,
    pub gross_profit: YearlyValues,
    /// Percent; 0 for years with no revenue
    pub gross_margin: YearlyValues,
    pub ebitda: YearlyValues,

    /// Planned heads per year (not part of OpEx)
    pub headcount: YearlyValues,
    /// Salary cost per year (not part of OpEx)
    pub headcount_cost: YearlyValues,

    pub arr: f64,
    pub arpu: f64,
    pub ltv: f64,
    pub ltv_cac_ratio: f64,
    pub monthly_burn: f64,
    pub runway_months: u32,
    /// `None` when no month within the horizon turns a profit
    pub breakeven_month: Option<u32>,
}

/// One row of the per-year table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRow {
    pub year: u32,
    pub total_revenue: f64,
    pub total_cogs: f64,
    pub total_opex: f64,
    pub gross_profit: f64,
    pub gross_margin: f64,
    pub ebitda: f64,
    pub headcount: f64,
    pub headcount_cost: f64,
}

impl ForecastMetrics {
    /// Per-year rows for tabular output
    pub fn year_rows(&self) -> Vec<YearRow> {
        Year::ALL
            .iter()
            .map(|&y| YearRow {
                year: y.number(),
                total_revenue: self.total_revenue.get(y),
                total_cogs: self.total_cogs.get(y),
                total_opex: self.total_opex.get(y),
                gross_profit: self.gross_profit.get(y),
                gross_margin: self.gross_margin.get(y),
                ebitda: self.ebitda.get(y),
                headcount: self.headcount.get(y),
                headcount_cost: self.headcount_cost.get(y),
            })
            .collect()
    }

    /// Breakeven month for display ("N/A" when not reached)
    pub fn breakeven_label(&self) -> String {
        match self.breakeven_month {
            Some(month) => month.to_string(),
            None => "N/A".to_string(),
        }
    }

    /// True while year-1 EBITDA is negative
    pub fn is_burning(&self) -> bool {
        self.monthly_burn > 0.0
    }
}
