//! Derivation of forecast metrics from model state

use crate::model::{self, ForecastState};
use super::breakeven::breakeven_month;
use super::report::ForecastMetrics;

/// Parameters of the derivation
#[derive(Debug, Clone, PartialEq)]
pub struct DerivationConfig {
    /// Months simulated when searching for breakeven
    pub horizon_months: u32,

    /// Months over which each line compounds from its year-1 to its year-3
    /// level; independent of `horizon_months`
    pub growth_months: u32,

    /// Simplified ARPU: year-3 subscription revenue divided by this
    pub arpu_divisor: f64,

    /// Runway reported when year-1 EBITDA is not negative
    pub no_burn_runway_months: u32,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            horizon_months: 36,
            growth_months: 36,
            arpu_divisor: 1000.0,
            no_burn_runway_months: 36,
        }
    }
}

/// Stateless metrics engine
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    config: DerivationConfig,
}

impl MetricsEngine {
    pub fn new(config: DerivationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DerivationConfig {
        &self.config
    }

    /// Compute every derived metric for `state`
    pub fn derive(&self, state: &ForecastState) -> ForecastMetrics {
        let total_revenue = state.revenue.total();
        let total_cogs = state.cogs.total();
        let total_opex = state.opex.total();

        let gross_profit = total_revenue.zip_with(&total_cogs, |rev, cogs| rev - cogs);
        let gross_margin = gross_profit.zip_with(&total_revenue, |gp, rev| {
            if rev == 0.0 {
                0.0
            } else {
                gp / rev * 100.0
            }
        });
        let ebitda = gross_profit.zip_with(&total_opex, |gp, opex| gp - opex);

        let assumptions = &state.assumptions;
        let arr = total_revenue.year3;
        let arpu = state.revenue.subscriptions.year3 / self.config.arpu_divisor;
        let ltv = arpu * assumptions.ltv_months;
        let ltv_cac_ratio = if assumptions.cac_cost > 0.0 {
            ltv / assumptions.cac_cost
        } else {
            0.0
        };

        let monthly_burn = if ebitda.year1 < 0.0 { ebitda.year1.abs() / 12.0 } else { 0.0 };
        let runway_months = self.runway(assumptions.cash_on_hand, monthly_burn);

        ForecastMetrics {
            breakeven_month: breakeven_month(
                &total_revenue,
                &total_cogs,
                &total_opex,
                self.config.horizon_months,
                self.config.growth_months,
            ),
            headcount: model::total_heads(&state.headcount),
            headcount_cost: model::total_cost(&state.headcount),
            total_revenue,
            total_cogs,
            total_opex,
            gross_profit,
            gross_margin,
            ebitda,
            arr,
            arpu,
            ltv,
            ltv_cac_ratio,
            monthly_burn,
            runway_months,
        }
    }

    fn runway(&self, cash_on_hand: f64, monthly_burn: f64) -> u32 {
        if monthly_burn > 0.0 {
            // float-to-int `as` saturates
            (cash_on_hand.max(0.0) / monthly_burn).floor() as u32
        } else {
            self.config.no_burn_runway_months
        }
    }
}

/// Derive metrics with the default parameters
pub fn derive_metrics(state: &ForecastState) -> ForecastMetrics {
    MetricsEngine::default().derive(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssumptionKey, YearlyValues, OpExLine, RevenueLine, RevenueUpdate};
    use crate::store::ModelStore;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_plan_figures() {
        let m = derive_metrics(&ForecastState::initial());

        assert_eq!(m.total_revenue, YearlyValues::new(660_000.0, 1_900_000.0, 4_840_000.0));
        assert_eq!(m.total_cogs.year1, 115_800.0);
        assert_eq!(m.total_opex.year1, 768_000.0);
        assert_eq!(m.gross_profit.year1, 544_200.0);
        assert_relative_eq!(m.gross_margin.year1, 82.4545, epsilon = 1e-3);
        assert_eq!(m.ebitda.year1, -223_800.0);
        assert_eq!(m.monthly_burn, 18_650.0);
        assert_eq!(m.runway_months, 107);
        assert_eq!(m.arr, 4_840_000.0);
        assert_eq!(m.arpu, 2_880.0);
        assert_eq!(m.ltv, 69_120.0);
        assert_relative_eq!(m.ltv_cac_ratio, 460.8, epsilon = 1e-9);
        assert_eq!(m.breakeven_month, Some(18));
    }

    #[test]
    fn test_identities_hold_per_year() {
        let mut store = ModelStore::new();
        store
            .update_opex(OpExLine::SalesMarketing, YearlyValues::new(5e6, -2e5, 3.3))
            .unwrap();
        let m = store.metrics();
        for y in crate::model::Year::ALL {
            assert_eq!(m.gross_profit.get(y), m.total_revenue.get(y) - m.total_cogs.get(y));
            assert_eq!(m.ebitda.get(y), m.gross_profit.get(y) - m.total_opex.get(y));
        }
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let mut store = ModelStore::new();
        for line in RevenueLine::ALL {
            store.update_revenue(RevenueUpdate::Line(*line, YearlyValues::ZERO)).unwrap();
        }
        let m = store.metrics();
        assert_eq!(m.gross_margin, YearlyValues::ZERO);
        assert_eq!(m.breakeven_month, None);
        assert_eq!(m.breakeven_label(), "N/A");
    }

    #[test]
    fn test_no_burn_runway() {
        let mut store = ModelStore::new();
        store
            .update_revenue(RevenueUpdate::Line(
                RevenueLine::Subscriptions,
                YearlyValues::new(5_000_000.0, 6_000_000.0, 7_000_000.0),
            ))
            .unwrap();
        let m = store.metrics();
        assert!(m.ebitda.year1 > 0.0);
        assert_eq!(m.monthly_burn, 0.0);
        assert_eq!(m.runway_months, 36);
        assert!(!m.is_burning());
    }

    #[test]
    fn test_cash_on_hand_drives_runway() {
        let mut store = ModelStore::new();
        store.update_assumptions(AssumptionKey::CashOnHand, 186_500.0).unwrap();
        assert_eq!(store.metrics().runway_months, 10);

        store.update_assumptions(AssumptionKey::CashOnHand, -50.0).unwrap();
        assert_eq!(store.metrics().runway_months, 0);
    }

    #[test]
    fn test_zero_cac_ratio() {
        let mut store = ModelStore::new();
        store.update_assumptions(AssumptionKey::CacCost, 0.0).unwrap();
        assert_eq!(store.metrics().ltv_cac_ratio, 0.0);
    }

    #[test]
    fn test_growth_assumptions_do_not_move_metrics() {
        let mut store = ModelStore::new();
        let before = store.metrics();
        store.update_assumptions(AssumptionKey::RevenueGrowth, 900.0).unwrap();
        store.update_assumptions(AssumptionKey::SalaryGrowth, 50.0).unwrap();
        assert_eq!(store.metrics(), before);
    }

    #[test]
    fn test_shorter_horizon_keeps_growth_path() {
        let engine = MetricsEngine::new(DerivationConfig { horizon_months: 12, ..Default::default() });
        assert_eq!(engine.config().growth_months, 36);
        assert_eq!(engine.derive(&ForecastState::initial()).breakeven_month, None);

        let fast = MetricsEngine::new(DerivationConfig {
            horizon_months: 12,
            growth_months: 12,
            ..Default::default()
        });
        assert_eq!(fast.derive(&ForecastState::initial()).breakeven_month, Some(7));
    }
}
