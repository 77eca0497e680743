// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Dry-run the tiered name matcher of a color document against a GLB scene

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use step_colors::cli::{init_logging, Reporter};
use step_colors::{ColorDocument, ConverterConfig, SceneGraph, TieredMatcher};

#[derive(Parser)]
#[command(name = "match-parts")]
#[command(about = "Report which GLB mesh nodes a color document would color", long_about = None)]
struct Cli {
    /// Color document written by extract-step-colors
    #[arg(value_name = "COLORS")]
    colors: PathBuf,

    /// GLB scene to match against
    #[arg(value_name = "SCENE")]
    scene: PathBuf,

    /// Maximum number of unmatched node names to list
    #[arg(short, long)]
    limit: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConverterConfig::load()?;
    init_logging(cli.verbose || config.verbose);

    for path in [&cli.colors, &cli.scene] {
        if !path.is_file() {
            Reporter::report_error(&format!("Input file not found: {}", path.display()));
            std::process::exit(1);
        }
    }

    let document = ColorDocument::load(&cli.colors)
        .with_context(|| format!("Failed to read color document: {}", cli.colors.display()))?;
    if let Err(e) = document.validate() {
        Reporter::report_warning(&e.to_string());
    }

    let scene = SceneGraph::open(&cli.scene)
        .with_context(|| format!("Failed to read GLB file: {}", cli.scene.display()))?;

    Reporter::progress(&format!(
        "Matching {} mesh nodes against {} parts",
        scene.mesh_count(),
        document.objects.len()
    ));
    let matcher = TieredMatcher::new(&document);
    let report = matcher.match_all(scene.mesh_nodes());

    let limit = cli.limit.unwrap_or(config.unmatched_preview_limit);
    Reporter::report_matches(&report, scene.mesh_count(), limit);
    Ok(())
}
