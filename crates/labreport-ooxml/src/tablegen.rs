//! Styled table construction
//!
//! Builds the WordprocessingML for a bordered data table. Styling lives at
//! table level only: single borders on the outer edges and both interior
//! directions, full page width, centered placement. Cell content is plain
//! text, one paragraph per cell.

use quick_xml::escape::escape;

/// Builder for a bordered, page-centered table
#[derive(Debug, Clone)]
pub struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableBuilder {
    /// Create a builder with the given header cells
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Append one data row
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of columns, taken from the header
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Render the table markup
    pub fn build(&self) -> String {
        let mut out = String::new();
        out.push_str("<w:tbl>");

        // Table properties: full width, centered, bordered
        out.push_str("<w:tblPr>");
        out.push_str("<w:tblW w:w=\"5000\" w:type=\"pct\"/>");
        out.push_str("<w:jc w:val=\"center\"/>");
        out.push_str("<w:tblBorders>");
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            out.push_str(&format!(
                "<w:{} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
                edge
            ));
        }
        out.push_str("</w:tblBorders>");
        out.push_str("</w:tblPr>");

        // Table grid (column definitions)
        out.push_str("<w:tblGrid>");
        for _ in &self.header {
            out.push_str("<w:gridCol w:w=\"2000\"/>");
        }
        out.push_str("</w:tblGrid>");

        // Header row repeats on page breaks
        out.push_str("<w:tr><w:trPr><w:tblHeader/></w:trPr>");
        for cell in &self.header {
            push_cell(&mut out, cell);
        }
        out.push_str("</w:tr>");

        for row in &self.rows {
            out.push_str("<w:tr>");
            for cell in row {
                push_cell(&mut out, cell);
            }
            out.push_str("</w:tr>");
        }

        out.push_str("</w:tbl>");
        out
    }
}

fn push_cell(out: &mut String, text: &str) {
    out.push_str("<w:tc><w:tcPr></w:tcPr>");
    if text.is_empty() {
        out.push_str("<w:p/>");
    } else {
        out.push_str(&format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(text)
        ));
    }
    out.push_str("</w:tc>");
}
