//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BiasLens: group-fairness statistics for tabular datasets
#[derive(Parser)]
#[command(name = "biaslens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file for bias in a sensitive attribute
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Sensitive attribute column (e.g., "gender", "age")
        #[arg(short, long)]
        sensitive: String,

        /// Print the result as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Write a PDF report to this path
        #[arg(long, value_name = "OUT")]
        pdf: Option<PathBuf>,

        /// Write a plain-text report to this path
        #[arg(long, value_name = "OUT")]
        text: Option<PathBuf>,

        /// Field delimiter (auto-detected when omitted)
        #[arg(short, long)]
        delimiter: Option<char>,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Serve the upload API and web page
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        #[command(flatten)]
        llm: LlmArgs,
    },
}

/// Options selecting the explanation generator.
#[derive(clap::Args, Clone, Debug)]
pub struct LlmArgs {
    /// Text generator for explanations
    #[arg(long, default_value = "none")]
    pub llm: LlmProviderChoice,

    /// Model to use (e.g., "llama3", "mistral")
    #[arg(long)]
    pub model: Option<String>,

    /// Seconds to wait for a generated explanation
    #[arg(long, default_value = "90")]
    pub llm_timeout: u64,
}

/// Text generator choice.
#[derive(Clone, Debug, Default)]
pub enum LlmProviderChoice {
    /// No generator - rule-based explanations only
    #[default]
    None,
    /// Ollama local models (requires Ollama running)
    Ollama,
    /// Mock generator for testing
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(LlmProviderChoice::None),
            "ollama" | "local" => Ok(LlmProviderChoice::Ollama),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: none, ollama, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::Ollama => write!(f, "ollama"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}
