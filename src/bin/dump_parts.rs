// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Dump mesh and group names of a GLB into an editable parts template

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use step_colors::cli::{init_logging, Reporter};
use step_colors::{ConverterConfig, PartsTemplate, SceneGraph};

#[derive(Parser)]
#[command(name = "dump-parts")]
#[command(about = "Write a .colors.json parts template from the node names of a GLB file")]
#[command(
    long_about = "Write a .colors.json parts template from the node names of a GLB file.\n\n\
    The template lists cleaned mesh names under _parts and their parent names under _groups.\n\
    Move names into main_parts / accent_parts, then delete the _ keys."
)]
struct Cli {
    /// Input GLB file
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output template (defaults to <input>.colors.json)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(input) = cli.input.as_deref() else {
        Cli::command().print_long_help()?;
        return Ok(());
    };

    let config = ConverterConfig::load()?;
    init_logging(cli.verbose || config.verbose);

    if !input.is_file() {
        Reporter::report_error(&format!("File not found: {}", input.display()));
        std::process::exit(1);
    }

    let scene = SceneGraph::open(input)
        .with_context(|| format!("Failed to read GLB file: {}", input.display()))?;
    let template = PartsTemplate::from_scene(
        &scene,
        &config.template.main_color,
        &config.template.accent_color,
    );

    let output = output_path(input, cli.output);
    template
        .save(&output)
        .with_context(|| format!("Failed to write template: {}", output.display()))?;

    Reporter::report_template(&output, &template);
    Ok(())
}

fn output_path(input: &Path, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PartsTemplate::default_path(input))
}
