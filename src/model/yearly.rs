//! Three-slot yearly projection values

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Projection year (1-indexed in display, 0-indexed in storage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Year {
    One,
    Two,
    Three,
}

impl Year {
    pub const ALL: [Year; 3] = [Year::One, Year::Two, Year::Three];

    /// 1-based year number
    pub fn number(self) -> u32 {
        match self {
            Year::One => 1,
            Year::Two => 2,
            Year::Three => 3,
        }
    }
}

/// Year-1..3 values for one financial line item
///
/// Negative values are allowed (net losses, credits).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YearlyValues {
    pub year1: f64,
    pub year2: f64,
    pub year3: f64,
}

impl YearlyValues {
    pub const ZERO: YearlyValues = YearlyValues { year1: 0.0, year2: 0.0, year3: 0.0 };

    pub const fn new(year1: f64, year2: f64, year3: f64) -> Self {
        Self { year1, year2, year3 }
    }

    pub fn get(&self, year: Year) -> f64 {
        match year {
            Year::One => self.year1,
            Year::Two => self.year2,
            Year::Three => self.year3,
        }
    }

    /// Build from a per-year function
    pub fn from_fn(mut f: impl FnMut(Year) -> f64) -> Self {
        Self {
            year1: f(Year::One),
            year2: f(Year::Two),
            year3: f(Year::Three),
        }
    }

    /// Combine two records slot by slot
    pub fn zip_with(&self, other: &YearlyValues, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::from_fn(|y| f(self.get(y), other.get(y)))
    }

    /// Slot-wise sum of several records
    pub fn sum<'a>(lines: impl IntoIterator<Item = &'a YearlyValues>) -> Self {
        lines
            .into_iter()
            .fold(Self::ZERO, |acc, line| acc.zip_with(line, |a, b| a + b))
    }

    /// Reject NaN/inf before the value enters a model table
    pub fn ensure_finite(&self, field: &str) -> Result<()> {
        if Year::ALL.iter().all(|&y| self.get(y).is_finite()) {
            Ok(())
        } else {
            Err(ForecastError::NonFinite { field: field.to_string() })
        }
    }
}
