//! Application state for the web server.

use std::sync::Arc;

use biaslens::{BiasLens, TextGenerator};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Parser and engine shared by all requests.
    pub lens: Arc<BiasLens>,
    /// Name of the configured text generator (for display).
    /// If None, explanations are rule-based only.
    pub generator_name: Option<String>,
}

impl AppState {
    /// Create application state, optionally with a text generator.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        let generator_name = generator.as_ref().map(|g| g.name().to_string());
        let lens = match generator {
            Some(generator) => BiasLens::new().with_shared_llm(generator),
            None => BiasLens::new(),
        };

        Self {
            lens: Arc::new(lens),
            generator_name,
        }
    }

    /// Name of the configured generator, if any.
    pub fn generator_name(&self) -> Option<&str> {
        self.generator_name.as_deref()
    }
}
