//! Session model store
//!
//! Holds the current `ForecastState` snapshot. Each mutator installs a new
//! snapshot in which only the replaced table is freshly allocated; every other
//! table is the same `Arc` as before, so `Arc::ptr_eq` works as change detection.

use std::sync::Arc;

use log::debug;

use crate::error::{ForecastError, Result};
use crate::metrics::{DerivationConfig, ForecastMetrics, MetricsEngine};
use crate::model::{
    AssumptionKey, CogsLine, ForecastMode, ForecastState, HeadcountRow, OpExLine, RevenueUpdate,
    YearlyValues,
};

/// Single-writer store for one planning session
#[derive(Debug, Clone)]
pub struct ModelStore {
    current: Arc<ForecastState>,
}

impl ModelStore {
    /// Store seeded with the session defaults
    pub fn new() -> Self {
        Self::from_state(ForecastState::initial())
    }

    /// Store seeded with a restored or prepared state
    pub fn from_state(state: ForecastState) -> Self {
        Self { current: Arc::new(state) }
    }

    /// Current immutable snapshot
    pub fn snapshot(&self) -> Arc<ForecastState> {
        Arc::clone(&self.current)
    }

    pub fn state(&self) -> &ForecastState {
        &self.current
    }

    /// Replace the whole aggregate (e.g. after loading a snapshot)
    pub fn replace(&mut self, state: ForecastState) {
        debug!("store: replacing aggregate");
        self.current = Arc::new(state);
    }

    /// Derive metrics from the current snapshot with default parameters
    pub fn metrics(&self) -> ForecastMetrics {
        MetricsEngine::new(DerivationConfig::default()).derive(&self.current)
    }

    pub fn set_forecast_mode(&mut self, mode: ForecastMode) {
        debug!("store: forecastMode = {}", mode);
        let mut next = (*self.current).clone();
        next.forecast_mode = mode;
        self.current = Arc::new(next);
    }

    /// Parse and set the mode from its string name
    pub fn set_forecast_mode_str(&mut self, mode: &str) -> Result<()> {
        self.set_forecast_mode(mode.parse()?);
        Ok(())
    }

    pub fn update_revenue(&mut self, update: RevenueUpdate) -> Result<()> {
        if let RevenueUpdate::Line(line, values) = &update {
            values.ensure_finite(&format!("revenue.{}", line))?;
        }
        debug!("store: revenue {:?}", update);

        let mut next = (*self.current).clone();
        let revenue = Arc::make_mut(&mut next.revenue);
        match update {
            RevenueUpdate::Line(line, values) => *revenue.line_mut(line) = values,
            RevenueUpdate::EnterpriseEnabled(enabled) => revenue.enterprise_enabled = enabled,
        }
        self.current = Arc::new(next);
        Ok(())
    }

    pub fn update_cogs(&mut self, line: CogsLine, values: YearlyValues) -> Result<()> {
        values.ensure_finite(&format!("cogs.{}", line))?;
        debug!("store: cogs.{} = {:?}", line, values);

        let mut next = (*self.current).clone();
        *Arc::make_mut(&mut next.cogs).line_mut(line) = values;
        self.current = Arc::new(next);
        Ok(())
    }

    pub fn update_opex(&mut self, line: OpExLine, values: YearlyValues) -> Result<()> {
        values.ensure_finite(&format!("opex.{}", line))?;
        debug!("store: opex.{} = {:?}", line, values);

        let mut next = (*self.current).clone();
        *Arc::make_mut(&mut next.opex).line_mut(line) = values;
        self.current = Arc::new(next);
        Ok(())
    }

    /// Replace the row at `index`; never grows the list
    pub fn update_headcount(&mut self, index: usize, row: HeadcountRow) -> Result<()> {
        self.check_headcount_index(index)?;
        row.ensure_finite()?;
        debug!("store: headcount[{}] = {:?}", index, row);

        let mut next = (*self.current).clone();
        Arc::make_mut(&mut next.headcount)[index] = row;
        self.current = Arc::new(next);
        Ok(())
    }

    pub fn add_headcount(&mut self, row: HeadcountRow) -> Result<()> {
        row.ensure_finite()?;
        debug!("store: headcount push {:?}", row);

        let mut next = (*self.current).clone();
        Arc::make_mut(&mut next.headcount).push(row);
        self.current = Arc::new(next);
        Ok(())
    }

    pub fn remove_headcount(&mut self, index: usize) -> Result<HeadcountRow> {
        self.check_headcount_index(index)?;

        let mut next = (*self.current).clone();
        let removed = Arc::make_mut(&mut next.headcount).remove(index);
        debug!("store: headcount remove [{}] {}", index, removed.department);
        self.current = Arc::new(next);
        Ok(removed)
    }

    pub fn update_assumptions(&mut self, key: AssumptionKey, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(ForecastError::NonFinite { field: format!("assumptions.{}", key) });
        }
        debug!("store: assumptions.{} = {}", key, value);

        let mut next = (*self.current).clone();
        Arc::make_mut(&mut next.assumptions).set(key, value);
        self.current = Arc::new(next);
        Ok(())
    }

    fn check_headcount_index(&self, index: usize) -> Result<()> {
        let len = self.current.headcount.len();
        if index < len {
            Ok(())
        } else {
            Err(ForecastError::IndexOutOfRange { index, len })
        }
    }
}

impl Default for ModelStore {
    fn default() -> Self {
        Self::new()
    }
}
