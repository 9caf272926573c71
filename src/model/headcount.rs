//! Department headcount plan
//!
//! Headcount cost is reported on its own and is not part of OpEx totals.

use serde::{Deserialize, Serialize};

use super::yearly::{Year, YearlyValues};
use crate::error::{ForecastError, Result};

/// Planned heads per year for one department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadcountRow {
    pub department: String,
    pub year1_count: f64,
    pub year2_count: f64,
    pub year3_count: f64,
    pub avg_salary: f64,
}

impl HeadcountRow {
    pub fn new(department: impl Into<String>, counts: [f64; 3], avg_salary: f64) -> Self {
        Self {
            department: department.into(),
            year1_count: counts[0],
            year2_count: counts[1],
            year3_count: counts[2],
            avg_salary,
        }
    }

    pub fn count(&self, year: Year) -> f64 {
        match year {
            Year::One => self.year1_count,
            Year::Two => self.year2_count,
            Year::Three => self.year3_count,
        }
    }

    /// Salary cost per year (count x average salary, no salary growth applied)
    pub fn cost(&self) -> YearlyValues {
        YearlyValues::from_fn(|y| self.count(y) * self.avg_salary)
    }

    pub(crate) fn ensure_finite(&self) -> Result<()> {
        let fields = [self.year1_count, self.year2_count, self.year3_count, self.avg_salary];
        if fields.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(ForecastError::NonFinite {
                field: format!("headcount '{}'", self.department),
            })
        }
    }
}

/// Default department plan for a fresh session
pub fn default_headcount() -> Vec<HeadcountRow> {
    vec![
        HeadcountRow::new("Engineering", [3.0, 6.0, 10.0], 150_000.0),
        HeadcountRow::new("Sales & Marketing", [1.0, 3.0, 6.0], 110_000.0),
        HeadcountRow::new("G&A", [1.0, 2.0, 3.0], 95_000.0),
        HeadcountRow::new("Customer Success", [1.0, 2.0, 4.0], 70_000.0),
    ]
}

/// Total heads per year across departments
pub fn total_heads(rows: &[HeadcountRow]) -> YearlyValues {
    YearlyValues::from_fn(|y| rows.iter().map(|r| r.count(y)).sum())
}

/// Total salary cost per year across departments
pub fn total_cost(rows: &[HeadcountRow]) -> YearlyValues {
    let costs: Vec<YearlyValues> = rows.iter().map(HeadcountRow::cost).collect();
    YearlyValues::sum(&costs)
}
