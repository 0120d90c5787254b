//! Document content parsing (word/document.xml)
//!
//! This module parses the main document content into a read-side tree of
//! paragraphs, tables and text runs. The tree is used for inspecting a
//! finished report; mutation goes through [`crate::rewrite`] so that
//! untouched markup survives byte for byte.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{DocxError, Result};

/// A parsed document body
#[derive(Debug, Clone)]
pub struct Document {
    /// Document body blocks
    pub blocks: Vec<Block>,
}

/// Block-level elements
#[derive(Debug, Clone)]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A paragraph with its content
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// Paragraph justification (w:jc), if set
    pub justification: Option<String>,
    /// Text runs in document order
    pub runs: Vec<Run>,
}

/// A literal text run
#[derive(Debug, Clone)]
pub struct Run {
    /// The text content
    pub text: String,
}

/// A table
#[derive(Debug, Clone)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
}

/// A table row
#[derive(Debug, Clone)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
}

/// A table cell
#[derive(Debug, Clone)]
pub struct TableCell {
    /// Paragraphs in this cell
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parse a document from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        // Don't trim text - preserve whitespace in runs
        reader.config_mut().trim_text(false);

        let mut blocks = Vec::new();
        let mut buf = Vec::new();

        let mut in_body = false;
        let mut current_para: Option<ParagraphBuilder> = None;
        let mut current_run: Option<RunBuilder> = None;
        let mut current_table: Option<TableBuilder> = None;
        // Track if we're inside a <w:t> element (actual text vs instrText)
        let mut in_text_element = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"body" => in_body = true,
                    b"p" if in_body => {
                        current_para = Some(ParagraphBuilder::new());
                    }
                    b"jc" if current_para.is_some() && current_run.is_none() => {
                        if let Some(val) = get_attr(e, b"w:val") {
                            current_para.as_mut().unwrap().justification = Some(val);
                        }
                    }
                    b"r" if current_para.is_some() => {
                        current_run = Some(RunBuilder::new());
                    }
                    b"t" if current_run.is_some() => {
                        in_text_element = true;
                    }
                    b"tbl" if in_body => {
                        current_table = Some(TableBuilder::new());
                    }
                    b"tr" if current_table.is_some() => {
                        current_table.as_mut().unwrap().current_row = Some(TableRowBuilder::new());
                    }
                    b"tc" if current_table.is_some() => {
                        if let Some(ref mut table) = current_table {
                            if let Some(ref mut row) = table.current_row {
                                row.current_cell = Some(TableCellBuilder::new());
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"body" => in_body = false,
                    b"p" if current_para.is_some() => {
                        let para = current_para.take().unwrap().build();

                        if let Some(ref mut table) = current_table {
                            // Paragraph inside a table cell
                            if let Some(ref mut row) = table.current_row {
                                if let Some(ref mut cell) = row.current_cell {
                                    cell.paragraphs.push(para);
                                }
                            }
                        } else {
                            blocks.push(Block::Paragraph(para));
                        }
                    }
                    b"t" => {
                        in_text_element = false;
                    }
                    b"r" if current_run.is_some() => {
                        let run = current_run.take().unwrap().build();
                        if !run.text.is_empty() {
                            if let Some(ref mut para) = current_para {
                                para.runs.push(run);
                            }
                        }
                    }
                    b"tc" if current_table.is_some() => {
                        if let Some(ref mut table) = current_table {
                            if let Some(ref mut row) = table.current_row {
                                if let Some(cell) = row.current_cell.take() {
                                    row.cells.push(cell.build());
                                }
                            }
                        }
                    }
                    b"tr" if current_table.is_some() => {
                        if let Some(ref mut table) = current_table {
                            if let Some(row) = table.current_row.take() {
                                table.rows.push(row.build());
                            }
                        }
                    }
                    b"tbl" if current_table.is_some() => {
                        let table = current_table.take().unwrap().build();
                        blocks.push(Block::Table(table));
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => {
                    // Self-closing elements like <w:jc w:val="center"/>
                    if e.local_name().as_ref() == b"jc"
                        && current_para.is_some()
                        && current_run.is_none()
                    {
                        if let Some(val) = get_attr(e, b"w:val") {
                            current_para.as_mut().unwrap().justification = Some(val);
                        }
                    }
                }
                Ok(Event::Text(ref e)) => {
                    // Only capture text inside <w:t> elements, not <w:instrText>
                    if in_text_element {
                        if let Some(ref mut run) = current_run {
                            let text = e.unescape().unwrap_or_default();
                            run.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Document { blocks })
    }

    /// Get all top-level paragraphs (flattening tables)
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().flat_map(|block| match block {
            Block::Paragraph(p) => vec![p].into_iter(),
            Block::Table(t) => t
                .rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .flat_map(|c| c.paragraphs.iter())
                .collect::<Vec<_>>()
                .into_iter(),
        })
    }

    /// Get all tables in the body
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Get plain text content
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Paragraph {
    /// Get plain text of this paragraph
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

impl TableCell {
    /// Get plain text of this cell
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// Builder types for constructing elements during parsing

#[derive(Default)]
struct ParagraphBuilder {
    justification: Option<String>,
    runs: Vec<Run>,
}

impl ParagraphBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn build(self) -> Paragraph {
        Paragraph {
            justification: self.justification,
            runs: self.runs,
        }
    }
}

#[derive(Default)]
struct RunBuilder {
    text: String,
}

impl RunBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn build(self) -> Run {
        Run { text: self.text }
    }
}

#[derive(Default)]
struct TableBuilder {
    rows: Vec<TableRow>,
    current_row: Option<TableRowBuilder>,
}

impl TableBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn build(self) -> Table {
        Table { rows: self.rows }
    }
}

#[derive(Default)]
struct TableRowBuilder {
    cells: Vec<TableCell>,
    current_cell: Option<TableCellBuilder>,
}

impl TableRowBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn build(self) -> TableRow {
        TableRow { cells: self.cells }
    }
}

#[derive(Default)]
struct TableCellBuilder {
    paragraphs: Vec<Paragraph>,
}

impl TableCellBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn build(self) -> TableCell {
        TableCell {
            paragraphs: self.paragraphs,
        }
    }
}

fn get_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| String::from_utf8(a.value.to_vec()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_paragraph() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:p>
                    <w:r>
                        <w:t>Hello, world!</w:t>
                    </w:r>
                </w:p>
            </w:body>
        </w:document>"#;

        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.plain_text(), "Hello, world!");
    }

    #[test]
    fn test_ignore_field_codes() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:p>
                    <w:r><w:fldChar w:fldCharType="begin"/></w:r>
                    <w:r><w:instrText>TOC \o "1-3"</w:instrText></w:r>
                    <w:r><w:fldChar w:fldCharType="separate"/></w:r>
                    <w:r><w:t>Table of Contents</w:t></w:r>
                    <w:r><w:fldChar w:fldCharType="end"/></w:r>
                </w:p>
            </w:body>
        </w:document>"#;

        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.plain_text(), "Table of Contents");
    }

    #[test]
    fn test_parse_justified_paragraph() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:p>
                    <w:pPr>
                        <w:jc w:val="center"/>
                    </w:pPr>
                    <w:r><w:t>Centered</w:t></w:r>
                </w:p>
            </w:body>
        </w:document>"#;

        let doc = Document::parse(xml).unwrap();
        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("Expected paragraph");
        };
        assert_eq!(p.justification, Some("center".to_string()));
    }

    #[test]
    fn test_parse_table() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:tbl>
                    <w:tr>
                        <w:tc>
                            <w:p><w:r><w:t>Cell 1</w:t></w:r></w:p>
                        </w:tc>
                        <w:tc>
                            <w:p><w:r><w:t>Cell 2</w:t></w:r></w:p>
                        </w:tc>
                    </w:tr>
                    <w:tr>
                        <w:tc>
                            <w:p><w:r><w:t>Cell 3</w:t></w:r></w:p>
                        </w:tc>
                        <w:tc>
                            <w:p><w:r><w:t>Cell 4</w:t></w:r></w:p>
                        </w:tc>
                    </w:tr>
                </w:tbl>
            </w:body>
        </w:document>"#;

        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.blocks.len(), 1);

        let Block::Table(t) = &doc.blocks[0] else {
            panic!("Expected table");
        };
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[0].cells.len(), 2);
        assert_eq!(t.rows[0].cells[0].plain_text(), "Cell 1");
        assert_eq!(t.rows[1].cells[1].plain_text(), "Cell 4");
    }

    #[test]
    fn test_parse_multiple_block_types() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:p><w:r><w:t>Intro</w:t></w:r></w:p>
                <w:tbl>
                    <w:tr>
                        <w:tc><w:p><w:r><w:t>Data</w:t></w:r></w:p></w:tc>
                    </w:tr>
                </w:tbl>
                <w:p><w:r><w:t>Conclusion</w:t></w:r></w:p>
            </w:body>
        </w:document>"#;

        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.blocks.len(), 3);
        assert!(matches!(&doc.blocks[0], Block::Paragraph(_)));
        assert!(matches!(&doc.blocks[1], Block::Table(_)));
        assert!(matches!(&doc.blocks[2], Block::Paragraph(_)));
        assert_eq!(doc.tables().count(), 1);
    }

    #[test]
    fn test_parse_empty_document() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
            </w:body>
        </w:document>"#;

        let doc = Document::parse(xml).unwrap();
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_run_split_across_elements() {
        // A run's text can arrive in several <w:t> fragments
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:p>
                    <w:r><w:t>Start</w:t></w:r>
                    <w:r><w:t>Time</w:t></w:r>
                </w:p>
            </w:body>
        </w:document>"#;

        let doc = Document::parse(xml).unwrap();
        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("Expected paragraph");
        };
        assert_eq!(p.runs.len(), 2);
        assert_eq!(p.plain_text(), "StartTime");
    }
}
