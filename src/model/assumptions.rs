//! Model-wide scalar assumptions

use serde::{Deserialize, Serialize};

use super::keys::define_key_enum;

/// Cash balance used for runway when none is supplied
pub const DEFAULT_CASH_ON_HAND: f64 = 2_000_000.0;

define_key_enum!(AssumptionKey, "assumptions", {
    RevenueGrowth => "revenueGrowth",
    ChurnRate => "churnRate",
    PricingGrowth => "pricingGrowth",
    CogsPercent => "cogsPercent",
    HeadcountGrowth => "headcountGrowth",
    SalaryGrowth => "salaryGrowth",
    CacCost => "cacCost",
    LtvMonths => "ltvMonths",
    CashOnHand => "cashOnHand",
});

/// Scalar planning parameters
///
/// Only `cac_cost`, `ltv_months` and `cash_on_hand` feed the derivation. The
/// percentage fields are carried for display and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    /// Annual revenue growth (%)
    pub revenue_growth: f64,
    /// Monthly churn (%)
    pub churn_rate: f64,
    /// Annual price increase (%)
    pub pricing_growth: f64,
    /// COGS as share of revenue (%)
    pub cogs_percent: f64,
    /// Annual headcount growth (%)
    pub headcount_growth: f64,
    /// Annual salary growth (%)
    pub salary_growth: f64,
    /// Customer acquisition cost ($)
    pub cac_cost: f64,
    /// Customer lifetime (months)
    pub ltv_months: f64,
    /// Cash available for runway ($)
    #[serde(default = "default_cash_on_hand")]
    pub cash_on_hand: f64,
}

fn default_cash_on_hand() -> f64 {
    DEFAULT_CASH_ON_HAND
}

impl Assumptions {
    pub fn default_plan() -> Self {
        Self {
            revenue_growth: 150.0,
            churn_rate: 5.0,
            pricing_growth: 10.0,
            cogs_percent: 18.0,
            headcount_growth: 80.0,
            salary_growth: 4.0,
            cac_cost: 150.0,
            ltv_months: 24.0,
            cash_on_hand: DEFAULT_CASH_ON_HAND,
        }
    }

    pub fn get(&self, key: AssumptionKey) -> f64 {
        *self.field(key)
    }

    pub(crate) fn set(&mut self, key: AssumptionKey, value: f64) {
        *self.field_mut(key) = value;
    }

    fn field(&self, key: AssumptionKey) -> &f64 {
        match key {
            AssumptionKey::RevenueGrowth => &self.revenue_growth,
            AssumptionKey::ChurnRate => &self.churn_rate,
            AssumptionKey::PricingGrowth => &self.pricing_growth,
            AssumptionKey::CogsPercent => &self.cogs_percent,
            AssumptionKey::HeadcountGrowth => &self.headcount_growth,
            AssumptionKey::SalaryGrowth => &self.salary_growth,
            AssumptionKey::CacCost => &self.cac_cost,
            AssumptionKey::LtvMonths => &self.ltv_months,
            AssumptionKey::CashOnHand => &self.cash_on_hand,
        }
    }

    fn field_mut(&mut self, key: AssumptionKey) -> &mut f64 {
        match key {
            AssumptionKey::RevenueGrowth => &mut self.revenue_growth,
            AssumptionKey::ChurnRate => &mut self.churn_rate,
            AssumptionKey::PricingGrowth => &mut self.pricing_growth,
            AssumptionKey::CogsPercent => &mut self.cogs_percent,
            AssumptionKey::HeadcountGrowth => &mut self.headcount_growth,
            AssumptionKey::SalaryGrowth => &mut self.salary_growth,
            AssumptionKey::CacCost => &mut self.cac_cost,
            AssumptionKey::LtvMonths => &mut self.ltv_months,
            AssumptionKey::CashOnHand => &mut self.cash_on_hand,
        }
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_plan()
    }
}
