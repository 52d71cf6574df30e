//! Optional text generation for analysis explanations.
//!
//! BiasLens works fully without a generator: every analysis carries a
//! rule-based explanation. When a generator is configured its text replaces
//! the rule-based one, and any failure (unreachable server, timeout, bad
//! response) degrades to a fixed fallback string instead of failing the
//! analysis.
//!
//! # Example
//!
//! ```no_run
//! use biaslens::{BiasLens, OllamaProvider};
//!
//! let lens = BiasLens::new().with_llm(OllamaProvider::new().unwrap());
//! let (result, _source) = lens.analyze_file("people.csv", "gender").unwrap();
//! println!("{}", result.explanation);
//! ```

mod mock;
mod ollama;
mod prompts;
mod provider;

pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use provider::{DEFAULT_GENERATION_TIMEOUT, ExplanationContext, LlmConfig, TextGenerator};
