// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe STEP color extraction
//!
//! Recovers per-part colors from ISO 10303-21 (STEP) assemblies so they can be
//! reapplied to meshes in a converted glTF scene. The STEP DATA section is
//! streamed into an entity store, styled items are followed to their colors
//! and product names, and the result is written as a `materials` / `objects`
//! color document. Scene node names are matched back to those parts with a
//! tiered normalized-name lookup.

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod matching;
pub mod naming;
pub mod scene;
pub mod step;

pub use color::{ColorInfo, ColorResolver};
pub use config::ConverterConfig;
pub use error::{DocumentError, SceneError, StepError};
pub use extract::{extract_colors, ColorDocument, Extraction, ExtractionStats};
pub use graph::{LookupMaps, ProductNameResolver, Strategy};
pub use matching::{MatchReport, MatchTier, TieredMatcher};
pub use naming::{base_key, normalize, strip_instance_suffix};
pub use scene::{PartsTemplate, SceneGraph};
pub use step::{Entity, EntityId, EntityKind, EntityStore};

use std::path::Path;

/// Parse a STEP file and extract its part colors
pub fn extract_file(path: impl AsRef<Path>) -> Result<Extraction, StepError> {
    let store = EntityStore::open(path)?;
    Ok(extract_colors(&store))
}
