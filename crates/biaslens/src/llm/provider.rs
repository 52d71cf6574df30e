//! Text generation trait and types.

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default time budget for one generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(90);

/// Inputs handed to a text generator when explaining an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationContext {
    /// Sensitive attribute name.
    pub attribute: String,
    /// Group label to share of eligible rows.
    pub distribution: IndexMap<String, f64>,
    pub disparate_impact: f64,
    pub statistical_parity_difference: f64,
}

/// Configuration for text generators.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "llama3").
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,

    /// Upper bound on a single generation request.
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "llama3".to_string(),
            max_tokens: 512,
            temperature: 0.3,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

/// Produces a free-text explanation of an analysis.
///
/// Implementations must be thread-safe (Send + Sync) so one generator can
/// be shared by concurrent analyses. Errors are never fatal to an analysis:
/// the engine substitutes a fixed fallback text.
pub trait TextGenerator: Send + Sync {
    /// Generate an explanation for the given metrics.
    fn generate(&self, context: &ExplanationContext) -> Result<String>;

    /// Get the configuration for this generator.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this generator (for logging/debugging).
    fn name(&self) -> &str;
}
