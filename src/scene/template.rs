// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Editable parts template generated from scene node names

use super::SceneGraph;
use crate::error::DocumentError;
use crate::naming::{normalize, strip_instance_suffix};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Scaffold for hand-assigning parts to a main and an accent color.
///
/// `groups` and `parts` are reference lists; an editor moves names from them
/// into `main_parts` / `accent_parts` and drops the underscored keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartsTemplate {
    pub main_color: String,
    pub accent_color: String,
    pub main_parts: Vec<String>,
    pub accent_parts: Vec<String>,
    #[serde(rename = "_groups")]
    pub groups: Vec<String>,
    #[serde(rename = "_parts")]
    pub parts: Vec<String>,
}

impl PartsTemplate {
    /// Collect part names of mesh nodes and group names of their parents.
    ///
    /// Names are normalized and stripped of a `-N` instance suffix, kept once
    /// each, then sorted case-insensitively.
    pub fn from_scene(scene: &SceneGraph, main_color: &str, accent_color: &str) -> Self {
        let mut parts = UniqueNames::default();
        let mut groups = UniqueNames::default();
        for (name, parent) in scene.mesh_nodes() {
            parts.push(name);
            if let Some(parent) = parent {
                groups.push(parent);
            }
        }

        Self {
            main_color: main_color.to_string(),
            accent_color: accent_color.to_string(),
            main_parts: Vec::new(),
            accent_parts: Vec::new(),
            groups: groups.into_sorted(),
            parts: parts.into_sorted(),
        }
    }

    /// `model.glb` becomes `model.colors.json`; any other path gets
    /// `.colors.json` appended
    pub fn default_path(scene_path: &Path) -> PathBuf {
        let is_glb = scene_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("glb"));
        if is_glb {
            scene_path.with_extension("colors.json")
        } else {
            let mut path = scene_path.as_os_str().to_owned();
            path.push(".colors.json");
            PathBuf::from(path)
        }
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[derive(Default)]
struct UniqueNames {
    seen: AHashSet<String>,
    names: Vec<String>,
}

impl UniqueNames {
    fn push(&mut self, raw: &str) {
        let cleaned = normalize(raw);
        if cleaned.is_empty() {
            return;
        }
        let key = strip_instance_suffix(&cleaned);
        if self.seen.insert(key.to_string()) {
            self.names.push(key.to_string());
        }
    }

    fn into_sorted(mut self) -> Vec<String> {
        self.names.sort_by_key(|name| name.to_lowercase());
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scene(nodes: serde_json::Value) -> SceneGraph {
        let root: gltf_json::Root = serde_json::from_value(json!({
            "asset": {"version": "2.0"},
            "nodes": nodes,
            "meshes": [{"primitives": [{"attributes": {}}]}]
        }))
        .unwrap();
        SceneGraph::from_root(&root)
    }

    #[test]
    fn test_from_scene() {
        let scene = scene(json!([
            {"name": "Robot/Arm (group)", "children": [1, 2, 3]},
            {"name": "Robot/Arm/link.step-1 (mesh)", "mesh": 0},
            {"name": "Robot/Arm/link.step-2 (mesh)", "mesh": 0},
            {"name": "Robot/Arm/Bolt (mesh)", "mesh": 0},
            {"name": "Frame-2", "children": [5]},
            {"name": "Axle.step", "mesh": 0},
            {"name": "Loose", "children": []}
        ]));
        let template = PartsTemplate::from_scene(&scene, "#FF6600", "#00AAFF");

        assert_eq!(template.parts, vec!["Axle", "Bolt", "link"]);
        assert_eq!(template.groups, vec!["Arm", "Frame"]);
        assert!(template.main_parts.is_empty());
        assert!(template.accent_parts.is_empty());
    }

    #[test]
    fn test_sort_is_stable_for_case_variants() {
        let scene = scene(json!([
            {"name": "bolt", "mesh": 0},
            {"name": "Bolt", "mesh": 0},
            {"name": "axle", "mesh": 0}
        ]));
        let template = PartsTemplate::from_scene(&scene, "#FF6600", "#00AAFF");
        assert_eq!(template.parts, vec!["axle", "bolt", "Bolt"]);
    }

    #[test]
    fn test_unnamed_meshes_are_skipped() {
        let scene = scene(json!([{"mesh": 0}, {"name": " (mesh) ", "mesh": 0}]));
        let template = PartsTemplate::from_scene(&scene, "#FF6600", "#00AAFF");
        assert!(template.parts.is_empty());
        assert!(template.groups.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let scene = scene(json!([{"name": "Base", "mesh": 0}]));
        let json = PartsTemplate::from_scene(&scene, "#FF6600", "#00AAFF")
            .to_json()
            .unwrap();
        assert!(json.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            json!({
                "main_color": "#FF6600",
                "accent_color": "#00AAFF",
                "main_parts": [],
                "accent_parts": [],
                "_groups": [],
                "_parts": ["Base"]
            })
        );
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys[4], "_groups");
    }

    #[test]
    fn test_default_path() {
        assert_eq!(
            PartsTemplate::default_path(Path::new("out/model.GLB")),
            PathBuf::from("out/model.colors.json")
        );
        assert_eq!(
            PartsTemplate::default_path(Path::new("scene.gltf")),
            PathBuf::from("scene.gltf.colors.json")
        );
    }
}
