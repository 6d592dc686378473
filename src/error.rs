use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an import.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV not found: {}", .0.display())]
    CsvNotFound(PathBuf),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error tokenizing data. Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("No columns to parse from file")]
    NoColumns,

    #[error("type inference failed: {0}")]
    Inference(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
