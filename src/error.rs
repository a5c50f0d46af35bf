use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("grid is not rectangular: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
}
