//! Conversion orchestrator
//!
//! Sequences one report run: parse metadata, parse measurement data,
//! substitute scalar placeholders, synthesize the measurement table,
//! persist. Both inputs are parsed before the template is opened, and the
//! file on disk is only replaced once the fully mutated package is ready,
//! so a failing run never leaves a half-written report behind.

use std::path::Path;

use labreport_data::{ExperimentMetadata, TabularData, TabularOptions};
use labreport_ooxml::DocxArchive;

use crate::error::Result;
use crate::substitute::{substitute_placeholders, PlaceholderBinding};
use crate::table::synthesize_table;

/// Fill `template` with `metadata` and `data`, writing the result to
/// `output` (or back over the template when `output` is None).
pub fn convert(
    metadata_path: &Path,
    data_path: &Path,
    template_path: &Path,
    output_path: Option<&Path>,
) -> Result<()> {
    convert_with_options(
        metadata_path,
        data_path,
        template_path,
        output_path,
        TabularOptions::default(),
    )
}

/// [`convert`] with explicit data file options
pub fn convert_with_options(
    metadata_path: &Path,
    data_path: &Path,
    template_path: &Path,
    output_path: Option<&Path>,
    options: TabularOptions,
) -> Result<()> {
    let metadata = ExperimentMetadata::load(metadata_path)?;
    log::debug!("Parsed {} metadata fields", metadata.len());

    let data = TabularData::load_with_options(data_path, options)?;
    log::debug!("Parsed {} data records", data.record_count());

    let mut archive = DocxArchive::open(template_path)?;
    let body = archive.document_xml()?.to_vec();

    let binding = PlaceholderBinding::from_metadata(&metadata);
    let body = substitute_placeholders(&body, &binding)?;
    let body = synthesize_table(&body, &data)?;
    archive.set_document_xml(body);

    let target = output_path.unwrap_or(template_path);
    archive.write_to_file(target)?;
    log::debug!("Wrote report to {}", target.display());

    Ok(())
}
