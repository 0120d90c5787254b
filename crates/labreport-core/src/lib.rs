//! # labreport-core
//!
//! Template filling engines for labreport: placeholder substitution, table
//! synthesis, and the conversion orchestrator that sequences them.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! labreport_core::convert(
//!     Path::new("experiment.xml"),
//!     Path::new("measurements.csv"),
//!     Path::new("template.docx"),
//!     Some(Path::new("report.docx")),
//! )?;
//! # Ok::<(), labreport_core::ConvertError>(())
//! ```

pub mod convert;
pub mod error;
pub mod substitute;
pub mod table;

pub use convert::{convert, convert_with_options};
pub use error::{ConvertError, Result};
pub use substitute::{
    substitute_placeholders, PlaceholderBinding, ELIDED_VALUE, TOKEN_CLOSE, TOKEN_OPEN,
};
pub use table::{synthesize_table, TABLE_MARKER};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
