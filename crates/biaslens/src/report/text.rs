//! Plain-text report.

use std::fmt::Write;

use crate::bias::AnalysisResult;

use super::blocks::{Block, REPORT_TITLE, blocks};

/// Render an analysis as plain text.
pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_TITLE);
    let _ = writeln!(out, "{}", "=".repeat(REPORT_TITLE.len()));

    for block in blocks(result) {
        match block {
            Block::Heading(text) => {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", text);
                let _ = writeln!(out, "{}", "-".repeat(text.chars().count()));
            }
            Block::Field(label, value) => {
                let _ = writeln!(out, "{:<30} {}", format!("{}:", label), value);
            }
            Block::Paragraph(text) => {
                let _ = writeln!(out, "{}", text);
            }
            Block::Table { header, rows } => {
                let width = rows
                    .iter()
                    .map(|r| r[0].chars().count())
                    .chain(std::iter::once(header[0].len()))
                    .max()
                    .unwrap_or(0);
                let _ = writeln!(
                    out,
                    "{:<width$}  {:>8}  {:>8}",
                    header[0],
                    header[1],
                    header[2],
                    width = width
                );
                for row in rows {
                    let pad = width.saturating_sub(row[0].chars().count());
                    let _ = writeln!(
                        out,
                        "{}{}  {:>8}  {:>8}",
                        row[0],
                        " ".repeat(pad),
                        row[1],
                        row[2]
                    );
                }
            }
            Block::Bullets(items) => {
                for item in items {
                    let _ = writeln!(out, "  - {}", item);
                }
            }
        }
    }

    out
}
