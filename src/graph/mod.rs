// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reference graph between geometry, representations and product definitions

mod product;

pub use product::{ProductMatch, ProductNameResolver, Strategy};

use crate::step::{EntityId, EntityKind, EntityStore};
use ahash::AHashMap;
use std::collections::BTreeSet;
use tracing::debug;

/// Lookup maps derived once from an [`EntityStore`], read-only afterwards.
///
/// Missing relationship entities leave the corresponding map empty; callers
/// treat an absent key as "no match".
#[derive(Debug, Clone, Default)]
pub struct LookupMaps {
    /// Geometry item -> owning shape representation
    pub item_to_repr: AHashMap<EntityId, EntityId>,
    /// Shape representation -> its representation context
    pub repr_contexts: AHashMap<EntityId, EntityId>,
    /// Representation -> product definition shape
    pub repr_to_pds: AHashMap<EntityId, EntityId>,
    /// Product definition shape -> product definition
    pub pds_to_pd: AHashMap<EntityId, EntityId>,
    /// Product definition -> product name
    pub pd_names: AHashMap<EntityId, String>,
    /// Undirected links between related representations, ordered by id
    pub repr_links: AHashMap<EntityId, BTreeSet<EntityId>>,
    /// Mapped (source) representation -> representation map
    pub repr_source_to_map: AHashMap<EntityId, EntityId>,
    /// Representation map -> mapped item instancing it
    pub map_to_mapped_item: AHashMap<EntityId, EntityId>,
}

impl LookupMaps {
    /// Build every map in one pass over the store.
    ///
    /// When an item is listed by both a `SHAPE_REPRESENTATION` and an
    /// `ADVANCED_BREP_SHAPE_REPRESENTATION`, the brep representation owns it.
    /// Among several brep claims the last one in file order wins.
    pub fn build(store: &EntityStore) -> Self {
        let mut maps = Self::default();

        for entity in store.iter() {
            let refs = entity.references();
            match entity.kind {
                kind if kind.is_shape_representation() => {
                    let Some((&context, items)) = refs.split_last() else {
                        continue;
                    };
                    maps.repr_contexts.insert(entity.id, context);
                    let is_brep = kind == EntityKind::AdvancedBrepShapeRepresentation;
                    for &item in items {
                        if is_brep || !maps.item_to_repr.contains_key(&item) {
                            maps.item_to_repr.insert(item, entity.id);
                        }
                    }
                }
                EntityKind::ShapeDefinitionRepresentation => {
                    if let &[pds, repr, ..] = refs.as_slice() {
                        maps.repr_to_pds.insert(repr, pds);
                    }
                }
                kind if kind.is_representation_relationship() => {
                    if let &[.., first, second] = refs.as_slice() {
                        maps.repr_links.entry(first).or_default().insert(second);
                        maps.repr_links.entry(second).or_default().insert(first);
                    }
                }
                EntityKind::RepresentationMap => {
                    if let &[_, source, ..] = refs.as_slice() {
                        maps.repr_source_to_map.insert(source, entity.id);
                    }
                }
                EntityKind::MappedItem => {
                    if let Some(&map) = refs.first() {
                        maps.map_to_mapped_item.insert(map, entity.id);
                    }
                }
                EntityKind::ProductDefinitionShape => {
                    if let Some(&pd) = refs.last() {
                        maps.pds_to_pd.insert(entity.id, pd);
                    }
                }
                EntityKind::ProductDefinition => {
                    if let Some(name) = entity.first_string() {
                        maps.pd_names.insert(entity.id, name);
                    }
                }
                _ => {}
            }
        }

        debug!(
            items = maps.item_to_repr.len(),
            representations = maps.repr_contexts.len(),
            products = maps.pd_names.len(),
            links = maps.repr_links.len(),
            "built lookup maps"
        );
        maps
    }

    /// Direct chain: representation -> shape definition -> product definition -> name.
    ///
    /// Empty names count as unresolved.
    pub fn product_name_of(&self, repr: EntityId) -> Option<&str> {
        let pds = self.repr_to_pds.get(&repr)?;
        let pd = self.pds_to_pd.get(pds)?;
        self.pd_names
            .get(pd)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Entity;

    fn store(entities: &[(EntityId, EntityKind, &str)]) -> EntityStore {
        entities
            .iter()
            .map(|(id, kind, args)| Entity::new(*id, *kind, *args))
            .collect()
    }

    #[test]
    fn test_direct_chain_maps() {
        let store = store(&[
            (10, EntityKind::AdvancedBrepShapeRepresentation, "'',(#11,#12),#13"),
            (20, EntityKind::ShapeDefinitionRepresentation, "#21,#10"),
            (21, EntityKind::ProductDefinitionShape, "'','',#22"),
            (22, EntityKind::ProductDefinition, "'Bracket','',#23,#24"),
        ]);
        let maps = LookupMaps::build(&store);
        assert_eq!(maps.item_to_repr.get(&11), Some(&10));
        assert_eq!(maps.item_to_repr.get(&12), Some(&10));
        assert_eq!(maps.repr_contexts.get(&10), Some(&13));
        assert_eq!(maps.product_name_of(10), Some("Bracket"));
    }

    #[test]
    fn test_brep_representation_wins() {
        let store = store(&[
            (1, EntityKind::ShapeRepresentation, "'',(#5),#9"),
            (2, EntityKind::AdvancedBrepShapeRepresentation, "'',(#5),#9"),
            (3, EntityKind::ShapeRepresentation, "'',(#5),#9"),
        ]);
        let maps = LookupMaps::build(&store);
        assert_eq!(maps.item_to_repr.get(&5), Some(&2));
    }

    #[test]
    fn test_brep_wins_regardless_of_order() {
        let store = store(&[
            (2, EntityKind::AdvancedBrepShapeRepresentation, "'',(#5),#9"),
            (1, EntityKind::ShapeRepresentation, "'',(#5),#9"),
        ]);
        let maps = LookupMaps::build(&store);
        assert_eq!(maps.item_to_repr.get(&5), Some(&2));
    }

    #[test]
    fn test_last_brep_claim_wins() {
        let store = store(&[
            (2, EntityKind::AdvancedBrepShapeRepresentation, "'',(#5),#9"),
            (1, EntityKind::ShapeRepresentation, "'',(#5),#9"),
            (7, EntityKind::AdvancedBrepShapeRepresentation, "'',(#5),#9"),
        ]);
        let maps = LookupMaps::build(&store);
        assert_eq!(maps.item_to_repr.get(&5), Some(&7));
    }

    #[test]
    fn test_relationship_links_are_undirected() {
        let store = store(&[
            (1, EntityKind::ShapeRepresentationRelationship, "'','',#10,#20"),
            (2, EntityKind::RepresentationRelationship, "'','',#10,#30"),
        ]);
        let maps = LookupMaps::build(&store);
        let linked: Vec<_> = maps.repr_links[&10].iter().copied().collect();
        assert_eq!(linked, vec![20, 30]);
        assert!(maps.repr_links[&20].contains(&10));
        assert!(maps.repr_links[&30].contains(&10));
    }

    #[test]
    fn test_mapped_item_bridge_maps() {
        let store = store(&[
            (40, EntityKind::RepresentationMap, "#41,#10"),
            (50, EntityKind::MappedItem, "'',#40,#42"),
        ]);
        let maps = LookupMaps::build(&store);
        assert_eq!(maps.repr_source_to_map.get(&10), Some(&40));
        assert_eq!(maps.map_to_mapped_item.get(&40), Some(&50));
    }

    #[test]
    fn test_empty_store_builds_empty_maps() {
        let maps = LookupMaps::build(&EntityStore::default());
        assert!(maps.item_to_repr.is_empty());
        assert!(maps.repr_links.is_empty());
        assert_eq!(maps.product_name_of(1), None);
    }

    #[test]
    fn test_empty_product_name_is_unresolved() {
        let store = store(&[
            (20, EntityKind::ShapeDefinitionRepresentation, "#21,#10"),
            (21, EntityKind::ProductDefinitionShape, "'','',#22"),
            (22, EntityKind::ProductDefinition, "'','',#23,#24"),
        ]);
        let maps = LookupMaps::build(&store);
        assert_eq!(maps.product_name_of(10), None);
    }
}
