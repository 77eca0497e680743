// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene-graph view of a converted GLB: node names, meshes and parents

mod glb;
mod template;

pub use glb::{read_glb_json, read_json_chunk, CHUNK_BIN, CHUNK_JSON, GLB_MAGIC};
pub use template::PartsTemplate;

use crate::error::SceneError;
use std::path::Path;

/// One glTF node, reduced to what name matching needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneNode {
    pub name: Option<String>,
    pub has_mesh: bool,
    pub parent: Option<usize>,
}

/// Flat node list with parent links, in glTF node order
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Load the node hierarchy from a GLB file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        Ok(Self::from_root(&read_glb_json(path)?))
    }

    pub fn from_root(root: &gltf_json::Root) -> Self {
        let mut nodes: Vec<SceneNode> = root
            .nodes
            .iter()
            .map(|node| SceneNode {
                name: node.name.clone(),
                has_mesh: node.mesh.is_some(),
                parent: None,
            })
            .collect();

        for (index, node) in root.nodes.iter().enumerate() {
            for child in node.children.iter().flatten() {
                if let Some(child) = nodes.get_mut(child.value()) {
                    child.parent = Some(index);
                }
            }
        }
        Self { nodes }
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn parent_of(&self, index: usize) -> Option<&SceneNode> {
        let parent = self.nodes.get(index)?.parent?;
        self.nodes.get(parent)
    }

    /// `(name, parent name)` of every node that carries a mesh.
    ///
    /// Unnamed nodes yield an empty name.
    pub fn mesh_nodes(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.has_mesh)
            .map(|(index, node)| {
                let name = node.name.as_deref().unwrap_or("");
                let parent = self.parent_of(index).and_then(|p| p.name.as_deref());
                (name, parent)
            })
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.has_mesh).count()
    }
}
