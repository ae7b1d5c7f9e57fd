//! Error types for the CIMA motion ETL.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("metadata file not found or unreadable: {path}: {source}")]
    MetadataRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("missing required column '{column}' in {context}")]
    MissingColumn { column: String, context: String },

    #[error("failed to parse '{value}' as a number in column '{column}'")]
    NumericParse { column: String, value: String },

    #[error("column '{column}' has {actual} values, table has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} out of range, table has {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("metadata must be loaded before this operation")]
    MetadataNotLoaded,

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
