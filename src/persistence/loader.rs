//! Load line items from CSV
//!
//! Expected columns: `section,key,year1,year2,year3`, one row per line item.
//! Each row replaces that line through the store, so key validation is the
//! same as for interactive edits.

use std::io::Read;
use std::path::Path;

use csv::Reader;
use log::info;
use serde::Deserialize;

use crate::error::{ForecastError, Result};
use crate::model::{CogsLine, OpExLine, RevenueLine, RevenueUpdate, YearlyValues};
use crate::store::ModelStore;

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct LineRow {
    section: String,
    key: String,
    year1: f64,
    year2: f64,
    year3: f64,
}

impl LineRow {
    fn apply(self, store: &mut ModelStore) -> Result<()> {
        let values = YearlyValues::new(self.year1, self.year2, self.year3);
        match self.section.as_str() {
            "revenue" => store.update_revenue(RevenueUpdate::Line(self.key.parse::<RevenueLine>()?, values)),
            "cogs" => store.update_cogs(self.key.parse::<CogsLine>()?, values),
            "opex" => store.update_opex(self.key.parse::<OpExLine>()?, values),
            other => Err(ForecastError::UnknownKey {
                section: "line section",
                key: other.to_string(),
            }),
        }
    }
}

/// Apply every row of a CSV file; returns the number of lines replaced
pub fn load_lines<P: AsRef<Path>>(path: P, store: &mut ModelStore) -> Result<usize> {
    let path = path.as_ref();
    let count = apply_rows(Reader::from_path(path)?, store)?;
    info!("Loaded {} line items from {}", count, path.display());
    Ok(count)
}

/// Apply rows from any reader (string buffer, upload body)
pub fn load_lines_from_reader<R: Read>(reader: R, store: &mut ModelStore) -> Result<usize> {
    apply_rows(Reader::from_reader(reader), store)
}

/// All rows land or none do: edits go to a staged copy that replaces the
/// caller's store only after the last row succeeds.
fn apply_rows<R: Read>(mut reader: Reader<R>, store: &mut ModelStore) -> Result<usize> {
    let mut staged = store.clone();
    let mut count = 0;
    for result in reader.deserialize() {
        let row: LineRow = result?;
        row.apply(&mut staged)?;
        count += 1;
    }
    *store = staged;
    Ok(count)
}
