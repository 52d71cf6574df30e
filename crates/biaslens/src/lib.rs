//! BiasLens: group-fairness statistics for tabular datasets.
//!
//! Given a dataset and a sensitive attribute (a column whose values define
//! group membership), BiasLens computes each group's share of the rows,
//! disparate impact, statistical parity difference, and a plain-language
//! assessment. Other numeric columns that track the smallest group are
//! flagged as proxy features. Results can be rendered as a PDF or text report.
//!
//! # Core Principles
//!
//! - **Pure**: analysis is a deterministic function of its inputs
//! - **Non-destructive**: the caller's dataset is never modified
//! - **Explicit failures**: missing columns and empty groupings are named errors
//!
//! # Example
//!
//! ```no_run
//! use biaslens::BiasLens;
//!
//! let lens = BiasLens::new();
//! let (result, _source) = lens.analyze_file("applicants.csv", "gender").unwrap();
//!
//! println!("Disparate impact: {}", result.disparate_impact);
//! println!("{}", result.explanation);
//! ```

pub mod bias;
pub mod error;
pub mod input;
pub mod llm;
pub mod report;

mod biaslens;

pub use crate::biaslens::{BiasLens, BiasLensConfig};
pub use bias::{
    AnalysisResult, AttributeKind, BiasEngine, BiasTier, Bucket, BucketPolicy,
    ExplanationSource, GroupDistribution, ProxyScan,
};
pub use error::{BiasLensError, Result};
pub use input::{Dataset, Parser, ParserConfig, SourceMetadata, Value};
pub use llm::{ExplanationContext, LlmConfig, MockProvider, OllamaProvider, TextGenerator};
