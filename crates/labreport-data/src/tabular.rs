//! Measurement data parsing
//!
//! The data file is plain delimited text: one header line naming the
//! columns, then one record per line. Fields are literal splits on the
//! delimiter; there is no quoting, escaping, or whitespace trimming. Every
//! data line must have exactly the header's field count.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{DataError, Result};

/// Options for parsing the data file
#[derive(Debug, Clone)]
pub struct TabularOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
}

impl Default for TabularOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TabularOptions {
    /// Create options for tab-separated values (TSV)
    pub fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }

    /// Create options for semicolon-separated values (common in European locales)
    pub fn semicolon() -> Self {
        Self { delimiter: b';' }
    }
}

/// Parsed measurement data: the column names and the data rows, both in
/// file order
#[derive(Debug, Clone)]
pub struct TabularData {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// One data row viewed as an ordered column-name/value mapping
#[derive(Debug, Clone, Copy)]
pub struct TabularRecord<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl TabularData {
    /// Load data from a delimited-text file with default options
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_options(path, TabularOptions::default())
    }

    /// Load data from a delimited-text file
    pub fn load_with_options<P: AsRef<Path>>(path: P, options: TabularOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }

    /// Parse data from any reader
    pub fn from_reader<R: Read>(reader: R, options: TabularOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(false) // The header line is handled here
            .quoting(false) // Fields are literal splits
            .trim(csv::Trim::None)
            .flexible(true) // Field counts checked below for a precise error
            .from_reader(reader);

        let mut records = csv_reader.records();

        let header = match records.next() {
            Some(record) => record?,
            None => return Err(DataError::MissingHeader),
        };
        let columns: Vec<String> = header.iter().map(|s| s.to_string()).collect();

        let mut rows = Vec::new();
        for (idx, record) in records.enumerate() {
            let record = record?;
            let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            if row.len() != columns.len() {
                return Err(DataError::ColumnCount {
                    // Header is line 1
                    line: idx + 2,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// The column names from the header line
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data records
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the file held no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate data rows as records
    pub fn records(&self) -> impl Iterator<Item = TabularRecord<'_>> {
        self.rows.iter().map(|values| TabularRecord {
            columns: &self.columns,
            values,
        })
    }
}

impl<'a> TabularRecord<'a> {
    /// Cell values in column order
    pub fn values(&self) -> &'a [String] {
        self.values
    }

    /// Look up a cell by column name
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i].as_str())
    }

    /// Iterate (column, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(c, v)| (c.as_str(), v.as_str()))
    }
}
