//! Mock text generator for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{BiasLensError, Result};

use super::provider::{ExplanationContext, LlmConfig, TextGenerator};

#[derive(Debug, Clone)]
enum MockBehavior {
    Echo,
    Fixed(String),
    Fail(String),
}

/// Mock generator that returns predictable responses for testing.
pub struct MockProvider {
    config: LlmConfig,
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a mock that summarises the context it was given.
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::Echo)
    }

    /// Create a mock that always returns `text`.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fixed(text.into()))
    }

    /// Create a mock that always fails, as a timed-out or unreachable
    /// model would.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fail(reason.into()))
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            config: LlmConfig {
                model: "mock".to_string(),
                ..LlmConfig::default()
            },
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `generate` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TextGenerator for MockProvider {
    fn generate(&self, context: &ExplanationContext) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Echo => {
                let (smallest, _) = context
                    .distribution
                    .iter()
                    .min_by(|a, b| a.1.total_cmp(b.1))
                    .map(|(g, s)| (g.as_str(), *s))
                    .unwrap_or(("", 0.0));
                Ok(format!(
                    "Across {} groups of '{}', the smallest group is '{}'. \
                     Disparate impact is {:.3} and statistical parity difference is {:.3}.",
                    context.distribution.len(),
                    context.attribute,
                    smallest,
                    context.disparate_impact,
                    context.statistical_parity_difference
                ))
            }
            MockBehavior::Fixed(text) => Ok(text.clone()),
            MockBehavior::Fail(reason) => Err(BiasLensError::Generation(reason.clone())),
        }
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
