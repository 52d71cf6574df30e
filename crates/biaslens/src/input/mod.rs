//! Input parsing and data source handling.

mod dataset;
mod parser;
mod source;

pub use dataset::{Dataset, Value};
pub use parser::{Parser, ParserConfig};
pub use source::SourceMetadata;
