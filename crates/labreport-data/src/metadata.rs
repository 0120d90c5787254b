//! Experiment metadata parsing
//!
//! The metadata file is a single XML record whose direct child elements
//! carry the experiment's scalar fields. Field names are exact and
//! case-sensitive. Numeric fields embed a unit suffix in their text
//! ("100GPa"); the suffix is stripped and the remainder must parse as a
//! decimal number. The stored value is the stripped literal text: it is
//! substituted into the report verbatim, with no further formatting.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{DataError, Result};

/// One field of the metadata schema
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Exact element name in the metadata file
    pub name: &'static str,
    /// Unit suffix stripped before numeric validation, if the field is numeric
    pub unit: Option<&'static str>,
}

/// The canonical metadata schema, in substitution order.
///
/// The first eight fields are the historical baseline set; the last four
/// were added with intermittent excitation support.
pub const METADATA_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "StartTime", unit: None },
    FieldSpec { name: "EndTime", unit: None },
    FieldSpec { name: "ExperimentName", unit: None },
    FieldSpec { name: "Frequency", unit: Some("Hz") },
    FieldSpec { name: "Amplitude", unit: Some("um") },
    FieldSpec { name: "MaxStress", unit: Some("MPa") },
    FieldSpec { name: "ElasticModulus", unit: Some("GPa") },
    FieldSpec { name: "Density", unit: Some("kg/m3") },
    FieldSpec { name: "ExcitationEnabled", unit: None },
    FieldSpec { name: "ExcitationTime", unit: Some("ms") },
    FieldSpec { name: "IntervalTime", unit: Some("ms") },
    FieldSpec { name: "ExcitationMode", unit: None },
];

/// Parsed experiment metadata
///
/// An ordered key/value mapping following [`METADATA_FIELDS`]. Constructed
/// once per conversion and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ExperimentMetadata {
    fields: Vec<(String, String)>,
}

impl ExperimentMetadata {
    /// Load metadata from an XML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }
        let xml = fs::read(path)?;
        Self::parse(&xml)
    }

    /// Parse metadata from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let leaves = collect_leaves(xml)?;

        let mut fields = Vec::with_capacity(METADATA_FIELDS.len());
        for spec in METADATA_FIELDS {
            let raw = leaves
                .get(spec.name)
                .ok_or_else(|| DataError::MissingField(spec.name.to_string()))?;

            let value = match spec.unit {
                Some(unit) => {
                    let stripped = raw.strip_suffix(unit).unwrap_or(raw).trim_end();
                    if stripped.parse::<f64>().is_err() {
                        return Err(DataError::InvalidNumber {
                            field: spec.name.to_string(),
                            value: raw.clone(),
                        });
                    }
                    stripped.to_string()
                }
                None => raw.clone(),
            };
            fields.push((spec.name.to_string(), value));
        }

        Ok(Self { fields })
    }

    /// Look up a field value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate fields in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collect the direct child leaves of the root element.
///
/// Leaf text is whitespace-trimmed; XML pretty-printing carries no meaning.
fn collect_leaves(xml: &[u8]) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut leaves = HashMap::new();
    let mut depth = 0usize;
    let mut current: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                if depth == 2 {
                    current = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                    text.clear();
                }
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 1 {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    leaves.insert(name, String::new());
                }
            }
            Ok(Event::Text(ref t)) => {
                if depth == 2 && current.is_some() {
                    text.push_str(&t.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(_)) => {
                if depth == 2 {
                    if let Some(name) = current.take() {
                        leaves.insert(name, text.trim().to_string());
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DataError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn full_metadata_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Experiment>
  <StartTime>2022-01-01 12:00:00</StartTime>
  <EndTime>2022-01-01 13:00:00</EndTime>
  <ExperimentName>Sample</ExperimentName>
  <Frequency>20000Hz</Frequency>
  <Amplitude>35um</Amplitude>
  <MaxStress>450MPa</MaxStress>
  <ElasticModulus>100GPa</ElasticModulus>
  <Density>7850kg/m3</Density>
  <ExcitationEnabled>true</ExcitationEnabled>
  <ExcitationTime>0</ExcitationTime>
  <IntervalTime>100ms</IntervalTime>
  <ExcitationMode>pulse</ExcitationMode>
</Experiment>"#
    }

    #[test]
    fn test_parse_full_schema() {
        let meta = ExperimentMetadata::parse(full_metadata_xml().as_bytes()).unwrap();

        assert_eq!(meta.len(), METADATA_FIELDS.len());
        assert_eq!(meta.get("StartTime"), Some("2022-01-01 12:00:00"));
        assert_eq!(meta.get("ExperimentName"), Some("Sample"));
        assert_eq!(meta.get("Frequency"), Some("20000"));
        assert_eq!(meta.get("Amplitude"), Some("35"));
        assert_eq!(meta.get("MaxStress"), Some("450"));
        assert_eq!(meta.get("ElasticModulus"), Some("100"));
        assert_eq!(meta.get("Density"), Some("7850"));
        assert_eq!(meta.get("ExcitationEnabled"), Some("true"));
        assert_eq!(meta.get("ExcitationTime"), Some("0"));
        assert_eq!(meta.get("IntervalTime"), Some("100"));
        assert_eq!(meta.get("ExcitationMode"), Some("pulse"));
    }

    #[test]
    fn test_field_order_is_schema_order() {
        let meta = ExperimentMetadata::parse(full_metadata_xml().as_bytes()).unwrap();
        let names: Vec<&str> = meta.iter().map(|(name, _)| name).collect();
        let expected: Vec<&str> = METADATA_FIELDS.iter().map(|spec| spec.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let xml = full_metadata_xml().replace(
            "<ElasticModulus>100GPa</ElasticModulus>",
            "",
        );
        let err = ExperimentMetadata::parse(xml.as_bytes()).unwrap_err();
        match err {
            DataError::MissingField(name) => assert_eq!(name, "ElasticModulus"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_unit_suffix_is_fatal() {
        let xml = full_metadata_xml().replace("100GPa", "100gpa");
        let err = ExperimentMetadata::parse(xml.as_bytes()).unwrap_err();
        match err {
            DataError::InvalidNumber { field, value } => {
                assert_eq!(field, "ElasticModulus");
                assert_eq!(value, "100gpa");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_content_is_fatal() {
        let xml = full_metadata_xml().replace("450MPa", "highMPa");
        let err = ExperimentMetadata::parse(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::InvalidNumber { .. }));
    }

    #[test]
    fn test_numeric_field_without_suffix_is_accepted() {
        // ExcitationTime carries no "ms" here; a plain number still parses
        let meta = ExperimentMetadata::parse(full_metadata_xml().as_bytes()).unwrap();
        assert_eq!(meta.get("ExcitationTime"), Some("0"));
    }

    #[test]
    fn test_space_between_number_and_unit() {
        let xml = full_metadata_xml().replace("100GPa", "100 GPa");
        let meta = ExperimentMetadata::parse(xml.as_bytes()).unwrap();
        assert_eq!(meta.get("ElasticModulus"), Some("100"));
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let xml = full_metadata_xml().replace("ExperimentName", "experimentname");
        let err = ExperimentMetadata::parse(xml.as_bytes()).unwrap_err();
        match err {
            DataError::MissingField(name) => assert_eq!(name, "ExperimentName"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(full_metadata_xml().as_bytes()).unwrap();
        file.flush().unwrap();

        let meta = ExperimentMetadata::load(file.path()).unwrap();
        assert_eq!(meta.get("ExperimentName"), Some("Sample"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ExperimentMetadata::load("/nonexistent/metadata.xml").unwrap_err();
        assert!(matches!(err, DataError::FileNotFound(_)));
    }
}
