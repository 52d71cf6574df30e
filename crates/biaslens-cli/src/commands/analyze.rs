//! Analyze command - compute fairness metrics for one sensitive attribute.

use std::path::PathBuf;

use biaslens::report::{render_pdf, render_text};
use biaslens::{AnalysisResult, BiasLens, BiasLensConfig, BiasTier, ParserConfig};
use colored::Colorize;

use crate::cli::LlmArgs;

/// Arguments of `biaslens analyze`.
pub struct AnalyzeArgs {
    pub file: PathBuf,
    pub sensitive: String,
    pub json: bool,
    pub pdf: Option<PathBuf>,
    pub text: Option<PathBuf>,
    pub delimiter: Option<char>,
}

pub fn run(args: AnalyzeArgs, llm: &LlmArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let delimiter = match args.delimiter {
        Some(c) if c.is_ascii() => Some(c as u8),
        Some(c) => return Err(format!("Delimiter must be a single ASCII character, got '{}'", c).into()),
        None => None,
    };

    let config = BiasLensConfig {
        parser: ParserConfig {
            delimiter,
            ..ParserConfig::default()
        },
        ..BiasLensConfig::default()
    };

    let mut lens = BiasLens::with_config(config);
    if let Some(generator) = super::build_generator(llm)? {
        lens = lens.with_shared_llm(generator);
    }

    if !args.json {
        println!(
            "{} {} {} {}",
            "Analyzing".cyan().bold(),
            args.file.display().to_string().white(),
            "for".cyan(),
            args.sensitive.white().bold()
        );
    }

    let (result, source) = lens.analyze_file(&args.file, &args.sensitive)?;
    tracing::debug!(hash = %source.hash, rows = source.row_count, "analyzed {}", source.file);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    if let Some(path) = &args.pdf {
        std::fs::write(path, render_pdf(&result))?;
        report_saved(args.json, path);
    }
    if let Some(path) = &args.text {
        std::fs::write(path, render_text(&result))?;
        report_saved(args.json, path);
    }

    Ok(())
}

fn report_saved(quiet: bool, path: &std::path::Path) {
    if !quiet {
        println!(
            "{} {}",
            "Saved report to".green().bold(),
            path.display().to_string().white()
        );
    }
}

fn print_summary(result: &AnalysisResult) {
    println!();
    println!(
        "Attribute: {} ({})",
        result.sensitive_attribute.white().bold(),
        result.attribute_type
    );
    println!(
        "Rows: {} total, {} analyzed, {} excluded",
        result.total_rows,
        result.eligible_rows.to_string().white().bold(),
        result.excluded_rows
    );

    println!();
    println!("{}", "Group distribution:".yellow().bold());
    for (label, share) in &result.distribution {
        let count = result.group_counts.get(label).copied().unwrap_or(0);
        println!("  {:20} {:>8} {:>7.1}%", label, count, share * 100.0);
    }

    println!();
    println!("Disparate impact:              {:.3}", result.disparate_impact);
    println!(
        "Statistical parity difference: {:.3}",
        result.statistical_parity_difference
    );

    let tier = match result.bias_tier {
        BiasTier::High => result.bias_tier.label().red().bold(),
        BiasTier::Potential => result.bias_tier.label().yellow().bold(),
        BiasTier::None => result.bias_tier.label().green().bold(),
    };
    println!("Assessment:                    {}", tier);

    println!();
    println!("{}", result.explanation);

    if !result.feature_correlations.is_empty() {
        println!();
        println!("{}", "Proxy features:".yellow().bold());
        for (feature, r) in &result.feature_correlations {
            let marker = if result.main_bias_driver.as_deref() == Some(feature.as_str()) {
                " (main driver)".red().to_string()
            } else {
                String::new()
            };
            println!("  {:20} {:>7.3}{}", feature, r, marker);
        }
    }

    println!();
    println!("{}", "Recommendations:".yellow().bold());
    for rec in &result.recommendations {
        println!("  - {}", rec);
    }
}
