use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the spending dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The ledger file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimiter structure of a row is malformed.
    #[error("Malformed CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the export's header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A date cell did not match the expected DD/MM/YYYY format.
    #[error("Invalid date {value:?} on line {line}")]
    InvalidDate { line: usize, value: String },

    /// A numeric cell could not be parsed.
    #[error("Invalid number {value:?} on line {line}")]
    InvalidNumber { line: usize, value: String },

    /// The expected data directory does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// A daily-totals query was issued for a month outside 1-12.
    #[error("Month out of range (expected 1-12): {0}")]
    InvalidMonth(u32),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashboardError {
    /// Whether the error belongs to the load phase and must abort the run
    /// before any view is rendered.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            DashboardError::FileRead { .. }
                | DashboardError::Csv(_)
                | DashboardError::MissingColumn(_)
                | DashboardError::InvalidDate { .. }
                | DashboardError::InvalidNumber { .. }
                | DashboardError::DataPathNotFound(_)
        )
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
