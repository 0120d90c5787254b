//! # labreport-data
//!
//! Input parsing for labreport: the experiment metadata XML file and the
//! delimited measurement data file. Both parsers produce plain owned data
//! that the report engines consume; neither knows anything about
//! documents.

pub mod error;
pub mod metadata;
pub mod tabular;

pub use error::{DataError, Result};
pub use metadata::{ExperimentMetadata, FieldSpec, METADATA_FIELDS};
pub use tabular::{TabularData, TabularOptions, TabularRecord};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
