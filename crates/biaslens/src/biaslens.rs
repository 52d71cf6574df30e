//! Main BiasLens struct and public API.

use std::path::Path;
use std::sync::Arc;

use crate::bias::{AnalysisResult, BiasEngine, BucketPolicy};
use crate::error::Result;
use crate::input::{Dataset, Parser, ParserConfig, SourceMetadata};
use crate::llm::TextGenerator;

/// Configuration for BiasLens analysis.
#[derive(Debug, Clone, Default)]
pub struct BiasLensConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Bucketing policy for numeric sensitive attributes.
    pub buckets: BucketPolicy,
}

/// Ingests tabular data and runs bias analysis on it.
pub struct BiasLens {
    parser: Parser,
    engine: BiasEngine,
}

impl BiasLens {
    /// Create a BiasLens instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(BiasLensConfig::default())
    }

    /// Create a BiasLens instance with custom configuration.
    pub fn with_config(config: BiasLensConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            engine: BiasEngine::new().with_buckets(config.buckets),
        }
    }

    /// Add a text generator for explanations.
    ///
    /// When a generator is configured, its text replaces the rule-based
    /// explanation. Generator failures fall back to a fixed message and do
    /// not fail the analysis.
    pub fn with_llm(mut self, generator: impl TextGenerator + 'static) -> Self {
        self.engine = self.engine.with_generator(generator);
        self
    }

    /// Share an already constructed text generator.
    pub fn with_shared_llm(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.engine = self.engine.with_shared_generator(generator);
        self
    }

    /// The underlying engine.
    pub fn engine(&self) -> &BiasEngine {
        &self.engine
    }

    /// Parse a data file and analyze `column`.
    pub fn analyze_file(
        &self,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<(AnalysisResult, SourceMetadata)> {
        let (dataset, source) = self.parser.parse_file(path)?;
        let result = self.engine.analyze(&dataset, column)?;
        Ok((result, source))
    }

    /// Parse uploaded bytes and analyze `column`.
    pub fn analyze_bytes(
        &self,
        name: &str,
        contents: &[u8],
        column: &str,
    ) -> Result<(AnalysisResult, SourceMetadata)> {
        let (dataset, source) = self.parser.parse_bytes(name, contents)?;
        let result = self.engine.analyze(&dataset, column)?;
        Ok((result, source))
    }

    /// Analyze an already loaded dataset.
    pub fn analyze(&self, dataset: &Dataset, column: &str) -> Result<AnalysisResult> {
        self.engine.analyze(dataset, column)
    }
}

impl Default for BiasLens {
    fn default() -> Self {
        Self::new()
    }
}
