//! Textual `path=value` edits applied through the model store
//!
//! Paths:
//! - `mode=<custom|ai|hybrid>`
//! - `revenue.<line>=y1,y2,y3` and `revenue.enterpriseEnabled=<true|false>`
//! - `cogs.<line>=y1,y2,y3`, `opex.<line>=y1,y2,y3`
//! - `assumptions.<key>=<number>`
//! - `headcount.<index>=<department>,<y1>,<y2>,<y3>,<avgSalary>`

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ForecastError, Result};
use crate::model::{
    AssumptionKey, CogsLine, ForecastMode, HeadcountRow, OpExLine, RevenueLine, RevenueUpdate,
    YearlyValues,
};
use crate::store::ModelStore;

/// One parsed edit
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum Override {
    Mode(ForecastMode),
    Revenue(RevenueUpdate),
    Cogs(CogsLine, YearlyValues),
    OpEx(OpExLine, YearlyValues),
    Assumption(AssumptionKey, f64),
    Headcount(usize, HeadcountRow),
}

impl Override {
    pub fn apply(&self, store: &mut ModelStore) -> Result<()> {
        match self {
            Override::Mode(mode) => {
                store.set_forecast_mode(*mode);
                Ok(())
            }
            Override::Revenue(update) => store.update_revenue(*update),
            Override::Cogs(line, values) => store.update_cogs(*line, *values),
            Override::OpEx(line, values) => store.update_opex(*line, *values),
            Override::Assumption(key, value) => store.update_assumptions(*key, *value),
            Override::Headcount(index, row) => store.update_headcount(*index, row.clone()),
        }
    }
}

/// Apply edits in order, stopping at the first failure
pub fn apply_all(store: &mut ModelStore, overrides: &[Override]) -> Result<()> {
    overrides.iter().try_for_each(|o| o.apply(store))
}

impl FromStr for Override {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ForecastError::InvalidOverride(s.to_string());

        let (path, value) = s.split_once('=').ok_or_else(invalid)?;
        let (path, value) = (path.trim(), value.trim());

        if path == "mode" {
            return Ok(Override::Mode(value.parse()?));
        }

        let (section, key) = path.split_once('.').ok_or_else(invalid)?;
        match section {
            "revenue" if key == "enterpriseEnabled" => {
                let enabled = value.parse::<bool>().map_err(|_| invalid())?;
                Ok(Override::Revenue(RevenueUpdate::EnterpriseEnabled(enabled)))
            }
            "revenue" => Ok(Override::Revenue(RevenueUpdate::Line(
                key.parse()?,
                parse_yearly(value).ok_or_else(invalid)?,
            ))),
            "cogs" => Ok(Override::Cogs(key.parse()?, parse_yearly(value).ok_or_else(invalid)?)),
            "opex" => Ok(Override::OpEx(key.parse()?, parse_yearly(value).ok_or_else(invalid)?)),
            "assumptions" => Ok(Override::Assumption(
                key.parse()?,
                value.parse::<f64>().map_err(|_| invalid())?,
            )),
            "headcount" => {
                let index = key.parse::<usize>().map_err(|_| invalid())?;
                Ok(Override::Headcount(index, parse_headcount(value).ok_or_else(invalid)?))
            }
            other => Err(ForecastError::UnknownKey {
                section: "override section",
                key: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Override {
    type Error = ForecastError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yearly = |v: &YearlyValues| format!("{},{},{}", v.year1, v.year2, v.year3);
        match self {
            Override::Mode(mode) => write!(f, "mode={}", mode),
            Override::Revenue(RevenueUpdate::Line(line, v)) => write!(f, "revenue.{}={}", line, yearly(v)),
            Override::Revenue(RevenueUpdate::EnterpriseEnabled(on)) => {
                write!(f, "revenue.enterpriseEnabled={}", on)
            }
            Override::Cogs(line, v) => write!(f, "cogs.{}={}", line, yearly(v)),
            Override::OpEx(line, v) => write!(f, "opex.{}={}", line, yearly(v)),
            Override::Assumption(key, value) => write!(f, "assumptions.{}={}", key, value),
            Override::Headcount(index, row) => write!(
                f,
                "headcount.{}={},{},{},{},{}",
                index, row.department, row.year1_count, row.year2_count, row.year3_count, row.avg_salary
            ),
        }
    }
}

fn parse_yearly(value: &str) -> Option<YearlyValues> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [y1, y2, y3] => Some(YearlyValues::new(*y1, *y2, *y3)),
        _ => None,
    }
}

/// Department may itself contain commas, so split from the right
fn parse_headcount(value: &str) -> Option<HeadcountRow> {
    let mut parts = value.rsplitn(5, ',');
    let avg_salary = parts.next()?.trim().parse().ok()?;
    let y3 = parts.next()?.trim().parse().ok()?;
    let y2 = parts.next()?.trim().parse().ok()?;
    let y1 = parts.next()?.trim().parse().ok()?;
    let department = parts.next()?.trim();
    if department.is_empty() {
        return None;
    }
    Some(HeadcountRow::new(department, [y1, y2, y3], avg_salary))
}
