//! BiasLens CLI - group-fairness analysis for tabular datasets.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            sensitive,
            json,
            pdf,
            text,
            delimiter,
            llm,
        } => commands::analyze::run(
            commands::analyze::AnalyzeArgs {
                file,
                sensitive,
                json,
                pdf,
                text,
                delimiter,
            },
            &llm,
        ),

        Commands::Serve { port, no_open, llm } => commands::serve::run(port, no_open, &llm),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "biaslens=debug" } else { "biaslens=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
