//! Error types for DOCX package operations

use thiserror::Error;

/// Errors that can occur while reading or mutating a DOCX package
#[derive(Error, Debug)]
pub enum DocxError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required package part not found in archive
    #[error("Required package part not found: {0}")]
    MissingPart(String),

    /// Invalid document structure
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, DocxError>;
