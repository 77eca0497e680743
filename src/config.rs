// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Converter configuration: `converter.toml` plus environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// File looked up in the working directory by [`ConverterConfig::load`]
pub const CONFIG_FILE: &str = "converter.toml";

/// Colors written into new parts templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateColors {
    /// `#RRGGBB` for the main part group
    pub main_color: String,
    /// `#RRGGBB` for the accent part group
    pub accent_color: String,
}

impl Default for TemplateColors {
    fn default() -> Self {
        Self {
            main_color: "#FF6600".to_string(),
            accent_color: "#00AAFF".to_string(),
        }
    }
}

/// Converter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub template: TemplateColors,
    /// How many unmatched node names a match report lists
    pub unmatched_preview_limit: usize,
    /// Verbose output
    pub verbose: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            template: TemplateColors::default(),
            unmatched_preview_limit: 10,
            verbose: false,
        }
    }
}

impl ConverterConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let mut config: ConverterConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.sanitize_colors();
        Ok(config)
    }

    /// Load `converter.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `STEP_COLORS_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(color) = lookup("STEP_COLORS_MAIN_COLOR") {
            override_color(&mut self.template.main_color, "STEP_COLORS_MAIN_COLOR", color);
        }

        if let Some(color) = lookup("STEP_COLORS_ACCENT_COLOR") {
            override_color(&mut self.template.accent_color, "STEP_COLORS_ACCENT_COLOR", color);
        }

        if let Some(limit) = lookup("STEP_COLORS_PREVIEW_LIMIT") {
            match limit.trim().parse() {
                Ok(limit) => self.unmatched_preview_limit = limit,
                Err(_) => warn!(value = limit.as_str(), "ignoring invalid STEP_COLORS_PREVIEW_LIMIT"),
            }
        }

        if let Some(verbose) = lookup("STEP_COLORS_VERBOSE") {
            self.verbose = matches!(verbose.trim(), "1" | "true" | "yes");
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    fn sanitize_colors(&mut self) {
        let defaults = TemplateColors::default();
        if !is_hex_color(&self.template.main_color) {
            warn!(value = self.template.main_color.as_str(), "invalid template.main_color, using default");
            self.template.main_color = defaults.main_color;
        }
        if !is_hex_color(&self.template.accent_color) {
            warn!(value = self.template.accent_color.as_str(), "invalid template.accent_color, using default");
            self.template.accent_color = defaults.accent_color;
        }
    }
}

fn override_color(slot: &mut String, key: &str, value: String) {
    if is_hex_color(&value) {
        *slot = value;
    } else {
        warn!(key, value = value.as_str(), "ignoring color override, expected #RRGGBB");
    }
}

/// `#RRGGBB` with hexadecimal digits of either case
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
}
