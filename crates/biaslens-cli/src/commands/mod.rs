//! CLI command implementations.

pub mod analyze;
pub mod serve;

use std::sync::Arc;
use std::time::Duration;

use biaslens::{LlmConfig, MockProvider, OllamaProvider, TextGenerator};

use crate::cli::{LlmArgs, LlmProviderChoice};

/// Build the text generator selected on the command line.
///
/// Must run outside the tokio runtime: the Ollama generator owns a blocking
/// HTTP client.
pub fn build_generator(
    args: &LlmArgs,
) -> Result<Option<Arc<dyn TextGenerator>>, Box<dyn std::error::Error>> {
    let mut config = LlmConfig {
        timeout: Duration::from_secs(args.llm_timeout),
        ..LlmConfig::default()
    };
    if let Some(model) = &args.model {
        config.model = model.clone();
    }

    let generator: Option<Arc<dyn TextGenerator>> = match args.llm {
        LlmProviderChoice::None => None,
        LlmProviderChoice::Ollama => Some(Arc::new(OllamaProvider::with_config(config)?)),
        LlmProviderChoice::Mock => Some(Arc::new(MockProvider::new())),
    };

    Ok(generator)
}
