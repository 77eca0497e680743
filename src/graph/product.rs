// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry item to product name resolution

use super::LookupMaps;
use crate::step::EntityId;
use serde::Serialize;

/// Which path through the reference graph produced a product name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    /// Owning representation has its own shape definition
    Direct,
    /// A representation related to the owner has the shape definition
    RelationshipBridge,
    /// The owner is instanced through a representation map and mapped item
    MappedInstance,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::RelationshipBridge => "relationship",
            Strategy::MappedInstance => "mapped-item",
        }
    }
}

/// A resolved product name and the strategy that found it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductMatch<'a> {
    pub name: &'a str,
    pub strategy: Strategy,
}

/// Resolves geometry items to product names over prebuilt [`LookupMaps`]
pub struct ProductNameResolver<'a> {
    maps: &'a LookupMaps,
}

impl<'a> ProductNameResolver<'a> {
    pub fn new(maps: &'a LookupMaps) -> Self {
        Self { maps }
    }

    /// Resolve the product owning a geometry item.
    ///
    /// Strategies are tried in order: direct shape definition, related
    /// representations (ascending id), then the mapped-item instance of the
    /// owning representation. Returns `None` when the item has no owner or
    /// every strategy fails.
    pub fn resolve(&self, item: EntityId) -> Option<ProductMatch<'a>> {
        let maps = self.maps;
        let repr = *maps.item_to_repr.get(&item)?;

        if let Some(name) = maps.product_name_of(repr) {
            return Some(ProductMatch {
                name,
                strategy: Strategy::Direct,
            });
        }

        if let Some(linked) = maps.repr_links.get(&repr) {
            if let Some(name) = linked.iter().find_map(|&other| maps.product_name_of(other)) {
                return Some(ProductMatch {
                    name,
                    strategy: Strategy::RelationshipBridge,
                });
            }
        }

        let name = maps
            .repr_source_to_map
            .get(&repr)
            .and_then(|map| maps.map_to_mapped_item.get(map))
            .and_then(|mapped| maps.item_to_repr.get(mapped))
            .and_then(|&owner| maps.product_name_of(owner))?;
        Some(ProductMatch {
            name,
            strategy: Strategy::MappedInstance,
        })
    }
}
