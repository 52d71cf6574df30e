//! Fixed-layout PDF report.
//!
//! Emits a PDF 1.4 document on A4 pages using the standard Helvetica fonts,
//! so no font data is embedded. Content is laid out top to bottom and a new
//! page starts when the cursor reaches the bottom margin.

use std::fmt::Write;

use crate::bias::AnalysisResult;

use super::blocks::{Block, REPORT_TITLE, blocks};

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 56.0;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f64 = 20.0;
const HEADING_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 11.0;
const FOOTER_SIZE: f64 = 9.0;
const LEADING: f64 = 1.45;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f64 = 0.5;

/// Table column offsets from the left margin.
const TABLE_COLUMNS: [f64; 3] = [0.0, 260.0, 360.0];
const FIELD_VALUE_OFFSET: f64 = 200.0;
/// Space kept clear between a cell and the next column.
const COLUMN_GUTTER: f64 = 10.0;

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Accumulates page content streams.
struct Layout {
    pages: Vec<String>,
    current: String,
    y: f64,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: String::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Move down by one line of `size`, breaking the page if needed.
    fn advance(&mut self, size: f64) {
        let step = size * LEADING;
        if self.y - step < MARGIN + FOOTER_SIZE * LEADING {
            self.new_page();
        }
        self.y -= step;
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn text_at(&mut self, x: f64, text: &str, size: f64, font: Font) {
        let _ = writeln!(
            self.current,
            "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
            font.resource(),
            size,
            x,
            self.y,
            escape(text)
        );
    }

    fn line(&mut self, text: &str, size: f64, font: Font) {
        self.advance(size);
        self.text_at(MARGIN, text, size, font);
    }

    fn rule(&mut self) {
        self.y -= 4.0;
        let _ = writeln!(
            self.current,
            "0.5 w {:.2} {:.2} m {:.2} {:.2} l S",
            MARGIN,
            self.y,
            PAGE_WIDTH - MARGIN,
            self.y
        );
    }

    fn gap(&mut self, amount: f64) {
        self.y -= amount;
    }

    fn paragraph(&mut self, text: &str, size: f64, indent: f64) {
        let max_chars = ((CONTENT_WIDTH - indent) / (size * AVG_GLYPH_WIDTH)) as usize;
        for line in wrap(text, max_chars) {
            self.advance(size);
            self.text_at(MARGIN + indent, &line, size, Font::Regular);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading(text) => {
                self.gap(BODY_SIZE);
                self.line(text, HEADING_SIZE, Font::Bold);
                self.rule();
            }
            Block::Field(label, value) => {
                self.advance(BODY_SIZE);
                let label = fit(label, FIELD_VALUE_OFFSET - COLUMN_GUTTER, BODY_SIZE);
                let value = fit(value, CONTENT_WIDTH - FIELD_VALUE_OFFSET, BODY_SIZE);
                self.text_at(MARGIN, &label, BODY_SIZE, Font::Bold);
                self.text_at(MARGIN + FIELD_VALUE_OFFSET, &value, BODY_SIZE, Font::Regular);
            }
            Block::Paragraph(text) => {
                self.gap(BODY_SIZE * 0.5);
                self.paragraph(text, BODY_SIZE, 0.0);
            }
            Block::Table { header, rows } => {
                self.table_row(header, Font::Bold);
                for row in rows {
                    self.table_row(row, Font::Regular);
                }
            }
            Block::Bullets(items) => {
                for item in items {
                    self.advance(BODY_SIZE);
                    self.text_at(MARGIN, "-", BODY_SIZE, Font::Regular);
                    // First line shares the bullet's baseline
                    self.y += BODY_SIZE * LEADING;
                    self.paragraph(item, BODY_SIZE, 12.0);
                }
            }
        }
    }

    fn table_row(&mut self, cells: &[String; 3], font: Font) {
        self.advance(BODY_SIZE);
        for (idx, (cell, offset)) in cells.iter().zip(TABLE_COLUMNS).enumerate() {
            let width = match TABLE_COLUMNS.get(idx + 1) {
                Some(next) => next - offset - COLUMN_GUTTER,
                None => CONTENT_WIDTH - offset,
            };
            let cell = fit(cell, width, BODY_SIZE);
            self.text_at(MARGIN + offset, &cell, BODY_SIZE, font);
        }
    }

    /// Close the last page and stamp page numbers.
    fn finish(mut self) -> Vec<String> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.new_page();
        }

        let total = self.pages.len();
        for (idx, page) in self.pages.iter_mut().enumerate() {
            let _ = writeln!(
                page,
                "BT /F1 {} Tf {:.2} {:.2} Td (Page {} of {}) Tj ET",
                FOOTER_SIZE,
                MARGIN,
                MARGIN - FOOTER_SIZE,
                idx + 1,
                total
            );
        }
        self.pages
    }
}

/// Render an analysis as a PDF document.
pub fn render_pdf(result: &AnalysisResult) -> Vec<u8> {
    let mut layout = Layout::new();
    layout.line(REPORT_TITLE, TITLE_SIZE, Font::Bold);
    layout.gap(BODY_SIZE * 0.5);

    for block in blocks(result) {
        layout.block(&block);
    }

    let title = format!("{} - {}", REPORT_TITLE, result.sensitive_attribute);
    write_document(&layout.finish(), &title)
}

/// Serialize page content streams into a complete PDF file.
fn write_document(pages: &[String], title: &str) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3-4 fonts, 5 info, then a page/content pair per page
    const FIRST_PAGE_ID: usize = 6;

    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_ID + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        format!(
            "<< /Title ({}) /Producer (BiasLens {}) >>",
            escape(title),
            env!("CARGO_PKG_VERSION")
        )
        .into_bytes(),
    ];

    for (idx, content) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                FIRST_PAGE_ID + 2 * idx + 1
            )
            .into_bytes(),
        );

        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content.as_bytes());
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", idx + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(xref, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );
    out.extend_from_slice(xref.as_bytes());

    out
}

/// Escape text for a PDF literal string in WinAnsiEncoding.
///
/// Latin-1 characters become octal escapes, a few common typographic marks
/// are transliterated and anything else becomes `?`. The output is ASCII.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(ch);
            }
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\n' | '\r' | '\t' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            '\u{A0}'..='\u{FF}' => {
                let _ = write!(out, "\\{:03o}", ch as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

/// Cut `text` to the characters that fit in `width` points, marking the cut
/// with an ellipsis.
fn fit(text: &str, width: f64, size: f64) -> String {
    let max_chars = (width / (size * AVG_GLYPH_WIDTH)) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Greedy word wrap on whitespace. Words longer than `max_chars` are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a (b) \\c"), "a \\(b\\) \\\\c");
        assert_eq!(escape("18–30"), "18-30");
        assert_eq!(escape("naïve"), "na\\357ve");
        assert_eq!(escape("Zürich"), "Z\\374rich");
        assert_eq!(escape("Zärich"), "Z\\344rich");
        assert_eq!(escape("\u{A0}"), "\\240");
        assert_eq!(escape("東京"), "??");
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("short", 100.0, 10.0), "short");
        // 50 points at size 10 holds 10 characters
        assert_eq!(fit("abcdefghij", 50.0, 10.0), "abcdefghij");
        assert_eq!(fit("abcdefghijk", 50.0, 10.0), "abcdefg...");
        assert_eq!(fit("ééééééééééé", 50.0, 10.0), "ééééééé...");
    }

    #[test]
    fn test_long_cells_are_cut_to_column() {
        let long = "x".repeat(200);
        let mut layout = Layout::new();
        layout.block(&Block::Table {
            header: ["Group".to_string(), "Count".to_string(), "Share".to_string()],
            rows: vec![[long.clone(), "1".to_string(), "100.00%".to_string()]],
        });
        layout.block(&Block::Field("Attribute".to_string(), long.clone()));
        let page = layout.finish().remove(0);

        assert!(!page.contains(&long));
        // 250 points of the first column hold 45 glyphs at body size
        assert!(page.contains(&format!("({}...)", "x".repeat(42))));
        // 283 points of the field value hold 51 glyphs
        assert!(page.contains(&format!("({}...)", "x".repeat(48))));
        assert!(page.contains("(100.00%)"));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_layout_breaks_pages() {
        let mut layout = Layout::new();
        for i in 0..200 {
            layout.line(&format!("line {}", i), BODY_SIZE, Font::Regular);
        }
        let pages = layout.finish();
        assert!(pages.len() > 1);
        assert!(pages[0].contains(&format!("Page 1 of {}", pages.len())));
    }

    #[test]
    fn test_document_structure() {
        let doc = write_document(&["BT ET".to_string()], "t");
        let text = String::from_utf8_lossy(&doc);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("/Count 1"));
        assert!(text.trim_end().ends_with("%%EOF"));

        // startxref must point at the xref table
        let start = text.rfind("startxref\n").unwrap() + "startxref\n".len();
        let offset: usize = text[start..].lines().next().unwrap().parse().unwrap();
        assert!(doc[offset..].starts_with(b"xref"));
    }
}
