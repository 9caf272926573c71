//! Month-by-month breakeven search
//!
//! Revenue, COGS and OpEx each start at their year-1 monthly run-rate and
//! compound geometrically toward their year-3 level over `growth_months`.
//! The search itself runs for `horizon_months`, which may be shorter or longer.

use log::debug;

use crate::model::YearlyValues;

/// Monthly growth factor taking `year1` to `year3` over `growth_months`
///
/// A series whose year-1 base is zero, or whose year-3/year-1 ratio is negative
/// or not finite, has no defined geometric path and is held flat (factor 1.0).
pub fn monthly_growth_factor(year1: f64, year3: f64, growth_months: u32) -> f64 {
    if year1 == 0.0 || growth_months == 0 {
        debug!("breakeven: zero base (year1={}, year3={}), holding flat", year1, year3);
        return 1.0;
    }

    let ratio = year3 / year1;
    if !ratio.is_finite() || ratio < 0.0 {
        debug!("breakeven: ratio {} not compoundable, holding flat", ratio);
        return 1.0;
    }

    ratio.powf(1.0 / growth_months as f64)
}

/// One compounding monthly series
#[derive(Debug, Clone, Copy)]
struct MonthlySeries {
    value: f64,
    growth: f64,
}

impl MonthlySeries {
    fn new(line: &YearlyValues, growth_months: u32) -> Self {
        Self {
            value: line.year1 / 12.0,
            growth: monthly_growth_factor(line.year1, line.year3, growth_months),
        }
    }

    fn advance(&mut self) {
        self.value *= self.growth;
    }
}

/// First month in `1..=horizon_months` with positive monthly profit
///
/// Month 1 is evaluated at the year-1 run-rate; each later month compounds once more.
pub fn breakeven_month(
    revenue: &YearlyValues,
    cogs: &YearlyValues,
    opex: &YearlyValues,
    horizon_months: u32,
    growth_months: u32,
) -> Option<u32> {
    let mut rev = MonthlySeries::new(revenue, growth_months);
    let mut cost = MonthlySeries::new(cogs, growth_months);
    let mut op = MonthlySeries::new(opex, growth_months);

    for month in 1..=horizon_months {
        if rev.value - cost.value - op.value > 0.0 {
            return Some(month);
        }
        rev.advance();
        cost.advance();
        op.advance();
    }

    None
}
