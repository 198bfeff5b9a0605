//! Error types for the FBRef dashboard CLI

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashError>;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing configuration: {keys}")]
    MissingConfig { keys: String },

    #[error("CSV file not found: {path}")]
    CsvNotFound { path: PathBuf },

    #[error("unknown metric: {name}")]
    UnknownMetric { name: String },

    #[error("unknown column: {name}")]
    UnknownColumn { name: String },

    #[error("player not found: {name}")]
    PlayerNotFound { name: String },

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
