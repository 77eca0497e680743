// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! The `materials` / `objects` color document

use crate::color::ColorInfo;
use crate::error::DocumentError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color assignments for a converted model.
///
/// `materials` maps a material name to its RGB triple, `objects` maps a part
/// name to one of those material names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorDocument {
    #[serde(default)]
    pub materials: IndexMap<String, [f64; 3]>,
    #[serde(default)]
    pub objects: IndexMap<String, String>,
}

impl ColorDocument {
    /// Build a document from part assignments, in the given order.
    ///
    /// Unnamed colors get a synthetic `color_r_g_b` key; if two colors share
    /// a name, the first one's RGB is kept.
    pub fn from_assignments<'a, I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a ColorInfo)>,
    {
        let mut document = Self::default();
        for (part, color) in assignments {
            let material = color.material_name();
            document
                .materials
                .entry(material.clone())
                .or_insert_with(|| color.rounded_rgb());
            document.objects.insert(part.clone(), material);
        }
        document
    }

    /// Check that every object refers to a known material
    pub fn validate(&self) -> Result<(), DocumentError> {
        match self.dangling().next() {
            Some((part, color)) => Err(DocumentError::DanglingMaterial {
                part: part.clone(),
                color: color.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Objects whose material is missing from `materials`
    pub fn dangling(&self) -> impl Iterator<Item = (&String, &String)> {
        self.objects
            .iter()
            .filter(|(_, color)| !self.materials.contains_key(color.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() || self.objects.is_empty()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write as indented JSON, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_assignments() {
        let mut parts = IndexMap::new();
        parts.insert("Bracket".to_string(), ColorInfo::new(None, [0.2, 0.4, 0.6]));
        parts.insert(
            "Housing".to_string(),
            ColorInfo::new(Some("Signal Red".to_string()), [0.8, 0.1, 0.1]),
        );
        parts.insert("Cover".to_string(), ColorInfo::new(None, [0.2, 0.4, 0.6]));

        let document = ColorDocument::from_assignments(&parts);
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(
            value,
            json!({
                "materials": {
                    "color_0.200_0.400_0.600": [0.2, 0.4, 0.6],
                    "Signal Red": [0.8, 0.1, 0.1]
                },
                "objects": {
                    "Bracket": "color_0.200_0.400_0.600",
                    "Housing": "Signal Red",
                    "Cover": "color_0.200_0.400_0.600"
                }
            })
        );
        assert!(document.validate().is_ok());
    }

    #[test]
    fn test_same_name_keeps_first_rgb() {
        let mut parts = IndexMap::new();
        parts.insert("A".to_string(), ColorInfo::new(Some("Paint".to_string()), [1.0, 0.0, 0.0]));
        parts.insert("B".to_string(), ColorInfo::new(Some("Paint".to_string()), [0.0, 1.0, 0.0]));
        let document = ColorDocument::from_assignments(&parts);
        assert_eq!(document.materials["Paint"], [1.0, 0.0, 0.0]);
        assert_eq!(document.objects["B"], "Paint");
    }

    #[test]
    fn test_validate_dangling() {
        let document: ColorDocument = serde_json::from_value(json!({
            "materials": {"red": [1.0, 0.0, 0.0]},
            "objects": {"Bracket": "red", "Cover": "blue"}
        }))
        .unwrap();
        let err = document.validate().unwrap_err();
        assert!(matches!(
            err,
            DocumentError::DanglingMaterial { ref part, ref color } if part == "Cover" && color == "blue"
        ));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let document: ColorDocument = serde_json::from_str("{}").unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("colors.json");

        let mut document = ColorDocument::default();
        document.materials.insert("red".to_string(), [1.0, 0.0, 0.0]);
        document.objects.insert("Bracket".to_string(), "red".to_string());
        document.save(&path).unwrap();

        assert_eq!(ColorDocument::load(&path).unwrap(), document);
    }
}
