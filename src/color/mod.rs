// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Presentation colors recovered from STEP style chains

mod resolver;

pub use resolver::{ColorResolver, MemoState};

use serde::{Deserialize, Serialize};

/// Pre-defined draughting colours (ISO 10303-46)
pub const PREDEFINED_COLOURS: [(&str, [f64; 3]); 8] = [
    ("red", [1.0, 0.0, 0.0]),
    ("green", [0.0, 1.0, 0.0]),
    ("blue", [0.0, 0.0, 1.0]),
    ("yellow", [1.0, 1.0, 0.0]),
    ("magenta", [1.0, 0.0, 1.0]),
    ("cyan", [0.0, 1.0, 1.0]),
    ("black", [0.0, 0.0, 0.0]),
    ("white", [1.0, 1.0, 1.0]),
];

/// An RGB color with the name the CAD tool gave it, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
    pub name: Option<String>,
    pub rgb: [f64; 3],
}

impl ColorInfo {
    pub fn new(name: Option<String>, rgb: [f64; 3]) -> Self {
        Self { name, rgb }
    }

    /// Look up a pre-defined colour by name, case-insensitively
    pub fn predefined(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        PREDEFINED_COLOURS
            .iter()
            .find(|(known, _)| *known == lower)
            .map(|(known, rgb)| Self::new(Some(known.to_string()), *rgb))
    }

    /// Material key: the CAD name, or `color_<r>_<g>_<b>` with 3 decimals
    pub fn material_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!(
                "color_{:.3}_{:.3}_{:.3}",
                self.rgb[0], self.rgb[1], self.rgb[2]
            ),
        }
    }

    /// Channels rounded to 6 decimal places
    pub fn rounded_rgb(&self) -> [f64; 3] {
        self.rgb.map(round6)
    }

    pub fn hex(&self) -> String {
        rgb_to_hex(self.rgb)
    }
}

/// `#rrggbb` swatch, each channel truncated after scaling to 0..=255
pub fn rgb_to_hex(rgb: [f64; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c * 255.0).clamp(0.0, 255.0) as u8);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_predefined_lookup() {
        let yellow = ColorInfo::predefined("YELLOW").unwrap();
        assert_eq!(yellow.name.as_deref(), Some("yellow"));
        assert_eq!(yellow.rgb, [1.0, 1.0, 0.0]);
        assert!(ColorInfo::predefined("orange").is_none());
    }

    #[test]
    fn test_synthetic_material_name() {
        let red = ColorInfo::new(None, [1.0, 0.0, 0.0]);
        assert_eq!(red.material_name(), "color_1.000_0.000_0.000");

        let unnamed = ColorInfo::new(Some(String::new()), [0.2, 0.4, 0.6]);
        assert_eq!(unnamed.material_name(), "color_0.200_0.400_0.600");

        let named = ColorInfo::new(Some("Steel".to_string()), [0.5, 0.5, 0.5]);
        assert_eq!(named.material_name(), "Steel");
    }

    #[test]
    fn test_rounded_rgb() {
        let color = ColorInfo::new(None, [0.123456789, 1.0, 0.0000004]);
        let rounded = color.rounded_rgb();
        assert_relative_eq!(rounded[0], 0.123457);
        assert_relative_eq!(rounded[1], 1.0);
        assert_relative_eq!(rounded[2], 0.0);
    }

    #[test]
    fn test_hex() {
        assert_eq!(rgb_to_hex([1.0, 0.0, 0.0]), "#ff0000");
        assert_eq!(rgb_to_hex([0.2, 0.4, 0.6]), "#336699");
        assert_eq!(rgb_to_hex([1.5, -0.1, 0.5]), "#ff007f");
    }
}
