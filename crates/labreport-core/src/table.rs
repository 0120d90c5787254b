//! Table synthesis engine
//!
//! A single marker token anchors the measurement table in the template.
//! Every run containing the marker has it stripped, its paragraph is
//! centered, and a freshly built table is inserted immediately after that
//! paragraph. A template without the marker is a valid no-table report; a
//! data file without records is a fatal input error because the header row
//! alone cannot anchor a table.

use labreport_data::TabularData;
use labreport_ooxml::{rewrite_runs, RunDirective, TableBuilder};

use crate::error::{ConvertError, Result};

/// Marker token that anchors the measurement table
pub const TABLE_MARKER: &str = "{{DataTable}}";

/// Insert the measurement table at every marker occurrence.
pub fn synthesize_table(xml: &[u8], data: &TabularData) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(ConvertError::EmptyDataset);
    }

    let mut builder = TableBuilder::new(data.columns().to_vec());
    for record in data.records() {
        builder.push_row(record.values().to_vec());
    }
    let table_xml = builder.build();

    let mut anchors = 0usize;
    let out = rewrite_runs(xml, |text| {
        if text.contains(TABLE_MARKER) {
            anchors += 1;
            RunDirective {
                replace: Some(text.replace(TABLE_MARKER, "")),
                center_paragraph: true,
                insert_after_paragraph: Some(table_xml.clone()),
            }
        } else {
            RunDirective::keep()
        }
    })?;

    if anchors == 0 {
        log::debug!("No table marker in template, skipping table synthesis");
    } else {
        log::debug!(
            "Inserted {} table(s) with {} rows",
            anchors,
            data.record_count() + 1
        );
    }
    Ok(out)
}
