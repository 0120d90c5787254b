//! Error types for input parsing.

use thiserror::Error;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while parsing the input files
#[derive(Debug, Error)]
pub enum DataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed metadata XML
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required metadata field absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Numeric metadata field did not parse after unit removal
    #[error("Field {field} is not numeric: {value:?}")]
    InvalidNumber { field: String, value: String },

    /// Data file has no header line
    #[error("Data file has no header line")]
    MissingHeader,

    /// Data row cell count differs from the header
    #[error("Line {line}: expected {expected} fields, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// CSV-layer error
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}
