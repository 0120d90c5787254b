//! # labreport-ooxml
//!
//! DOCX package handling for labreport.
//!
//! This crate provides everything the report engines need from the
//! document side:
//! - Open and save a DOCX package ([`DocxArchive`])
//! - Parse the body into a read-side tree ([`Document`])
//! - Stream-rewrite body text runs while preserving untouched markup
//!   ([`rewrite_runs`])
//! - Build styled data tables ([`TableBuilder`])
//!
//! ## Example: Reading a Document
//!
//! ```no_run
//! use labreport_ooxml::{Document, DocxArchive};
//!
//! let archive = DocxArchive::open("report.docx")?;
//! let document = Document::parse(archive.document_xml()?)?;
//!
//! for block in &document.blocks {
//!     println!("{:?}", block);
//! }
//! # Ok::<(), labreport_ooxml::DocxError>(())
//! ```

pub mod archive;
pub mod document;
pub mod error;
pub mod rewrite;
pub mod tablegen;
pub mod test_utils;

pub use archive::{DocxArchive, DOCUMENT_PART};
pub use document::{Block, Document, Paragraph, Run, Table, TableCell, TableRow};
pub use error::{DocxError, Result};
pub use rewrite::{rewrite_runs, RunDirective};
pub use tablegen::TableBuilder;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
