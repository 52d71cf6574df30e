//! Report rendering for analysis results.
//!
//! Both renderers consume the same ordered [`Block`] list, so the PDF and
//! text reports always show the same sections in the same order.

mod blocks;
mod pdf;
mod text;

pub use blocks::{Block, REPORT_TITLE, blocks};
pub use pdf::render_pdf;
pub use text::render_text;
