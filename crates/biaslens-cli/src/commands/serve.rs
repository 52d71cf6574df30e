//! Serve command - run the upload API and web page.

use colored::Colorize;

use crate::cli::LlmArgs;
use crate::server::{app, state::AppState};

pub fn run(port: u16, no_open: bool, llm: &LlmArgs) -> Result<(), Box<dyn std::error::Error>> {
    // The blocking generator client has to exist before the runtime starts
    let generator = super::build_generator(llm)?;
    let state = AppState::new(generator);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting BiasLens server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!(
        "  Explanations: {}",
        state.generator_name().unwrap_or("rule-based")
    );
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    // Held until after the runtime is gone so the last generator handle is
    // never dropped on an async worker
    let _outside = state.clone();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        app::run_server(state, port).await
    })
}
