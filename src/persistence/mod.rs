//! Persistence adapters: JSON snapshots, CSV line import, CSV metrics export

pub mod snapshot;
pub mod loader;
pub mod export;

pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use loader::{load_lines, load_lines_from_reader};
pub use export::{export_year_table, write_year_table};
