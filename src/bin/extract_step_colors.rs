// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Extract per-part colors from a STEP file into a color document

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use step_colors::cli::{init_logging, Reporter};
use step_colors::{extract_colors, ConverterConfig, EntityStore};

#[derive(Parser)]
#[command(name = "extract-step-colors")]
#[command(about = "Extract per-part colors from a STEP assembly into a JSON color document", long_about = None)]
struct Cli {
    /// Input STEP file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output JSON file
    #[arg(value_name = "OUTPUT")]
    output: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Usage errors exit 1 like every other operator-facing failure
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };
    let config = ConverterConfig::load()?;
    let verbose = cli.verbose || config.verbose;
    init_logging(verbose);

    let input = Path::new(&cli.input);
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", cli.input));
        std::process::exit(1);
    }

    Reporter::progress(&format!("Parsing {}", input.display()));
    let store = read_store(input, verbose)?;
    if verbose {
        let stats = store.stats();
        Reporter::report_info(&format!(
            "{} statements, {} entities kept",
            stats.statements, stats.retained
        ));
    }

    Reporter::progress("Resolving styled items");
    let extraction = extract_colors(&store);
    let document = extraction.to_document();

    let output = Path::new(&cli.output);
    document
        .save(output)
        .with_context(|| format!("Failed to write color document: {}", output.display()))?;

    Reporter::report_extraction(output, &extraction.stats, &document, verbose);
    if document.is_empty() {
        Reporter::report_warning("No part colors found");
    } else {
        Reporter::success(&format!("Colored {} parts", document.objects.len()));
    }

    Ok(())
}

fn read_store(input: &Path, verbose: bool) -> Result<EntityStore> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open STEP file: {}", input.display()))?;

    let store = if verbose {
        let length = file.metadata().map(|m| m.len()).unwrap_or(0);
        let pb = ProgressBar::new(length);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes}")?
                .progress_chars("#>-"),
        );
        let store = EntityStore::from_reader(BufReader::new(pb.wrap_read(file)));
        pb.finish_and_clear();
        store
    } else {
        EntityStore::from_reader(BufReader::new(file))
    };

    store.with_context(|| format!("Failed to parse STEP file: {}", input.display()))
}
