//! Error types for the forecast engine

use thiserror::Error;

/// Result type for forecast operations
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors raised at the mutation boundary and by the persistence adapters
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Forecast mode string outside custom/ai/hybrid
    #[error("invalid forecast mode '{0}' (expected custom, ai or hybrid)")]
    InvalidForecastMode(String),

    /// Unknown line or assumption name within a section
    #[error("unknown {section} key '{key}'")]
    UnknownKey { section: &'static str, key: String },

    /// Headcount index beyond the current list
    #[error("headcount index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// NaN or infinite value supplied for a numeric field
    #[error("non-finite value for {field}")]
    NonFinite { field: String },

    /// Malformed `path=value` override
    #[error("invalid override '{0}'")]
    InvalidOverride(String),

    /// Snapshot written by an incompatible version
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshot { found: u32, expected: u32 },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
