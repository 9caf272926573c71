//! Write the per-year metrics table as CSV

use std::io::Write;
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::metrics::ForecastMetrics;

/// Write one header row plus one row per year
pub fn write_year_table<W: Write>(metrics: &ForecastMetrics, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in metrics.year_rows() {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn export_year_table<P: AsRef<Path>>(metrics: &ForecastMetrics, path: P) -> Result<()> {
    let path = path.as_ref();
    write_year_table(metrics, std::fs::File::create(path)?)?;
    info!("Year table written to {}", path.display());
    Ok(())
}
