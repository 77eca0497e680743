// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Styled item walk producing per-part color assignments

mod document;

pub use document::ColorDocument;

use crate::color::{ColorInfo, ColorResolver};
use crate::graph::{LookupMaps, ProductNameResolver, Strategy};
use crate::step::{EntityKind, EntityStore};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

/// Counters for one extraction run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// `STYLED_ITEM` entities seen
    pub styled_items: usize,
    /// Styled items with both a color and a product name
    pub resolved: usize,
    /// Styled items whose style chain reached no color
    pub without_color: usize,
    /// Styled items whose geometry reached no product name
    pub without_product: usize,
    /// Resolutions per product-name strategy
    pub direct: usize,
    pub relationship: usize,
    pub mapped_item: usize,
}

impl ExtractionStats {
    fn record(&mut self, strategy: Strategy) {
        self.resolved += 1;
        match strategy {
            Strategy::Direct => self.direct += 1,
            Strategy::RelationshipBridge => self.relationship += 1,
            Strategy::MappedInstance => self.mapped_item += 1,
        }
    }
}

/// Part colors from one STEP file, in order of first assignment
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub assignments: IndexMap<String, ColorInfo>,
    pub stats: ExtractionStats,
}

impl Extraction {
    pub fn to_document(&self) -> ColorDocument {
        ColorDocument::from_assignments(&self.assignments)
    }
}

/// Pair every styled item with its color and product name.
///
/// The first reference of a styled item is its style assignment and the last
/// is the styled geometry item. Items where either side fails to resolve are
/// skipped. Once a part has a color, later styled items for the same part are
/// ignored.
pub fn extract_colors(store: &EntityStore) -> Extraction {
    let maps = LookupMaps::build(store);
    let products = ProductNameResolver::new(&maps);
    let mut colors = ColorResolver::new(store);
    let mut extraction = Extraction::default();

    for item in store.of_kind(EntityKind::StyledItem) {
        extraction.stats.styled_items += 1;

        let refs = item.references();
        let &[style, .., geometry] = refs.as_slice() else {
            continue;
        };

        let Some(color) = colors.resolve(style) else {
            extraction.stats.without_color += 1;
            debug!(styled_item = item.id, style, "no color reachable from style");
            continue;
        };
        let Some(product) = products.resolve(geometry) else {
            extraction.stats.without_product += 1;
            debug!(styled_item = item.id, geometry, "no product name for geometry");
            continue;
        };

        extraction.stats.record(product.strategy);
        if !extraction.assignments.contains_key(product.name) {
            debug!(
                part = product.name,
                strategy = product.strategy.as_str(),
                "assigned color"
            );
            extraction
                .assignments
                .insert(product.name.to_string(), color);
        }
    }

    info!(
        styled_items = extraction.stats.styled_items,
        resolved = extraction.stats.resolved,
        parts = extraction.assignments.len(),
        memo_entries = colors.visited(),
        "extracted part colors"
    );
    extraction
}
