//! Error types for CSV to libSVM conversion

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unreadable label: {cell:?}")]
    UnreadableLabel { cell: String },

    #[error("Failed to decode row {row_index}: {reason}")]
    RowDecodeFailed {
        row_index: usize,
        reason: Box<ConvertError>,
    },

    #[error("Cannot open {path:?} for reading: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open {path:?} for writing: {source}")]
    SinkUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
