// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::color::rgb_to_hex;
use crate::extract::{ColorDocument, ExtractionStats};
use crate::matching::MatchReport;
use crate::scene::PartsTemplate;
use colored::*;
use std::path::Path;

/// Printed after a parts template is written
pub const TEMPLATE_HINT: &str =
    "Move names from _groups/_parts into main_parts/accent_parts, then delete the _ keys.";

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a finished color extraction
    pub fn report_extraction(
        output: &Path,
        stats: &ExtractionStats,
        document: &ColorDocument,
        verbose: bool,
    ) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Wrote:".bold(), output.display().to_string().cyan());
        println!("{}", "━".repeat(80).bright_black());

        Self::print_count("Styled items", stats.styled_items);
        Self::print_count("Resolved", stats.resolved);
        Self::print_count("Parts with color", document.objects.len());
        Self::print_count("Materials", document.materials.len());
        Self::print_count("Objects", document.objects.len());

        if verbose {
            println!("\n{}", "Product names:".bold());
            Self::print_count("Direct", stats.direct);
            Self::print_count("Relationship", stats.relationship);
            Self::print_count("Mapped item", stats.mapped_item);
            Self::print_count("No color", stats.without_color);
            Self::print_count("No product", stats.without_product);
        }

        if !document.materials.is_empty() {
            println!("\n{}", "Materials:".bold());
            for line in Self::material_lines(document) {
                println!("  {}", line);
            }
        }
        println!("{}", "━".repeat(80).bright_black());
    }

    /// One `#rrggbb  name` line per material, sorted by name
    pub fn material_lines(document: &ColorDocument) -> Vec<String> {
        let mut materials: Vec<_> = document.materials.iter().collect();
        materials.sort_by(|a, b| a.0.cmp(b.0));
        materials
            .into_iter()
            .map(|(name, rgb)| format!("{}  {}", rgb_to_hex(*rgb), name))
            .collect()
    }

    /// Report a written parts template
    pub fn report_template(output: &Path, template: &PartsTemplate) {
        println!(
            "Found {} groups, {} parts → {}",
            template.groups.len(),
            template.parts.len(),
            output.display()
        );
        println!("{}", TEMPLATE_HINT);
    }

    /// Report the outcome of matching scene nodes to part colors
    pub fn report_matches(report: &MatchReport, mesh_nodes: usize, preview_limit: usize) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "{} {} of {} mesh nodes",
            "Applied colors to".bold(),
            report.applied.to_string().green(),
            mesh_nodes
        );
        println!("{}", "━".repeat(80).bright_black());

        Self::print_count("Exact", report.exact);
        Self::print_count("Base key", report.base_key);
        Self::print_count("Parent", report.parent_exact);
        Self::print_count("Parent base key", report.parent_base_key);

        if !report.unmatched.is_empty() {
            println!(
                "\n{} {}",
                "Unmatched:".yellow().bold(),
                report.unmatched.len()
            );
            for line in Self::unmatched_lines(report, preview_limit) {
                println!("  {}", line.bright_black());
            }
        }
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Bounded list of unmatched names with an `(and N more)` tail
    pub fn unmatched_lines(report: &MatchReport, limit: usize) -> Vec<String> {
        let (shown, hidden) = report.unmatched_preview(limit);
        let mut lines: Vec<String> = shown.iter().map(|name| format!("- {}", name)).collect();
        if hidden > 0 {
            lines.push(format!("(and {} more)", hidden));
        }
        lines
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    fn print_count(name: &str, value: usize) {
        println!(
            "  {} {}",
            format!("{}:", name).bright_black(),
            value.to_string().cyan()
        );
    }

    /// Print progress line
    pub fn progress(message: &str) {
        println!("{} {}...", "⏳".bright_blue(), message.bright_black());
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_lines_sorted() {
        let mut document = ColorDocument::default();
        document.materials.insert("red".to_string(), [1.0, 0.0, 0.0]);
        document.materials.insert("blue".to_string(), [0.0, 0.0, 1.0]);
        assert_eq!(
            Reporter::material_lines(&document),
            vec!["#0000ff  blue", "#ff0000  red"]
        );
    }

    #[test]
    fn test_unmatched_lines() {
        let report = MatchReport {
            unmatched: (0..12).map(|i| format!("Node{}", i)).collect(),
            ..MatchReport::default()
        };
        let lines = Reporter::unmatched_lines(&report, 10);
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "- Node0");
        assert_eq!(lines[10], "(and 2 more)");

        let lines = Reporter::unmatched_lines(&report, 20);
        assert_eq!(lines.len(), 12);
    }
}
