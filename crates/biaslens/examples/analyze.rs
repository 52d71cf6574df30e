//! Example: analyze one sensitive attribute of a data file.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path> <column> [--brackets]
//!
//! `--brackets` swaps the default age brackets for decade buckets.

use std::env;

use biaslens::report::render_text;
use biaslens::{BiasLens, BiasLensConfig, BucketPolicy, MockProvider};

fn main() -> biaslens::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example analyze -- <file_path> <column> [--brackets]");
        std::process::exit(1);
    }

    let mut config = BiasLensConfig::default();
    if args.iter().any(|a| a == "--brackets") {
        config.buckets = BucketPolicy::from_edges(
            &[0.0, 20.0, 30.0, 40.0, 50.0, 60.0, 120.0],
            &["<=20", "21-30", "31-40", "41-50", "51-60", "60+"],
        )?;
    }

    // Mock generator so the example runs without a local model
    let lens = BiasLens::with_config(config).with_llm(MockProvider::new());
    let (result, source) = lens.analyze_file(&args[1], &args[2])?;

    println!("{} ({} rows, sha256 {})", source.file, source.row_count, source.hash);
    println!();
    println!("{}", render_text(&result));

    Ok(())
}
