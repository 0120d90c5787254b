//! Error types for the conversion pipeline

use labreport_data::DataError;
use labreport_ooxml::DocxError;
use thiserror::Error;

/// Errors that can occur during a conversion run
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Metadata or measurement data failed to parse
    #[error("Input data error: {0}")]
    Data(#[from] DataError),

    /// The template package could not be read, rewritten or saved
    #[error("Document error: {0}")]
    Document(#[from] DocxError),

    /// The data file held no records to build a table from
    #[error("Table synthesis requires at least one data record")]
    EmptyDataset,
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
