// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STEP entity kinds retained by the store

use super::args;
use serde::{Deserialize, Serialize};

/// Instance id of a STEP entity (`#123`)
pub type EntityId = u64;

/// Entity types needed for color and product resolution.
///
/// Every other type in a STEP file is dropped while streaming. Adding a
/// resolution strategy that needs a new type means adding a variant here and
/// a keyword in [`EntityKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    StyledItem,
    PresentationStyleAssignment,
    SurfaceStyleUsage,
    SurfaceSideStyle,
    SurfaceStyleFillArea,
    FillAreaStyle,
    FillAreaStyleColour,
    ColourRgb,
    DraughtingPreDefinedColour,
    AdvancedBrepShapeRepresentation,
    ShapeRepresentation,
    ShapeDefinitionRepresentation,
    ProductDefinitionShape,
    ProductDefinition,
    ShapeRepresentationRelationship,
    RepresentationRelationship,
    MappedItem,
    RepresentationMap,
}

impl EntityKind {
    /// The relevant-type allowlist, paired with the STEP keyword of each kind
    pub const ALL: [(EntityKind, &'static str); 18] = [
        (EntityKind::StyledItem, "STYLED_ITEM"),
        (EntityKind::PresentationStyleAssignment, "PRESENTATION_STYLE_ASSIGNMENT"),
        (EntityKind::SurfaceStyleUsage, "SURFACE_STYLE_USAGE"),
        (EntityKind::SurfaceSideStyle, "SURFACE_SIDE_STYLE"),
        (EntityKind::SurfaceStyleFillArea, "SURFACE_STYLE_FILL_AREA"),
        (EntityKind::FillAreaStyle, "FILL_AREA_STYLE"),
        (EntityKind::FillAreaStyleColour, "FILL_AREA_STYLE_COLOUR"),
        (EntityKind::ColourRgb, "COLOUR_RGB"),
        (EntityKind::DraughtingPreDefinedColour, "DRAUGHTING_PRE_DEFINED_COLOUR"),
        (EntityKind::AdvancedBrepShapeRepresentation, "ADVANCED_BREP_SHAPE_REPRESENTATION"),
        (EntityKind::ShapeRepresentation, "SHAPE_REPRESENTATION"),
        (EntityKind::ShapeDefinitionRepresentation, "SHAPE_DEFINITION_REPRESENTATION"),
        (EntityKind::ProductDefinitionShape, "PRODUCT_DEFINITION_SHAPE"),
        (EntityKind::ProductDefinition, "PRODUCT_DEFINITION"),
        (EntityKind::ShapeRepresentationRelationship, "SHAPE_REPRESENTATION_RELATIONSHIP"),
        (EntityKind::RepresentationRelationship, "REPRESENTATION_RELATIONSHIP"),
        (EntityKind::MappedItem, "MAPPED_ITEM"),
        (EntityKind::RepresentationMap, "REPRESENTATION_MAP"),
    ];

    /// Look up a kind by its exact STEP keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(_, name)| *name == keyword)
            .map(|(kind, _)| *kind)
    }

    pub fn keyword(&self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("UNKNOWN")
    }

    /// Representations that own geometry items
    pub fn is_shape_representation(&self) -> bool {
        matches!(
            self,
            EntityKind::ShapeRepresentation | EntityKind::AdvancedBrepShapeRepresentation
        )
    }

    pub fn is_representation_relationship(&self) -> bool {
        matches!(
            self,
            EntityKind::ShapeRepresentationRelationship | EntityKind::RepresentationRelationship
        )
    }
}

/// A retained STEP instance with its unparsed argument text
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Text between the opening parenthesis after the type keyword and the
    /// closing parenthesis before `;`
    pub args: String,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, args: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            args: args.into(),
        }
    }

    /// All `#N` references in argument order
    pub fn references(&self) -> Vec<EntityId> {
        args::references(&self.args)
    }

    /// First quoted string argument, usually the entity's name
    pub fn first_string(&self) -> Option<String> {
        args::first_string(&self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for (kind, keyword) in EntityKind::ALL {
            assert_eq!(EntityKind::from_keyword(keyword), Some(kind));
            assert_eq!(kind.keyword(), keyword);
        }
    }

    #[test]
    fn test_irrelevant_keywords() {
        assert_eq!(EntityKind::from_keyword("CARTESIAN_POINT"), None);
        assert_eq!(EntityKind::from_keyword("colour_rgb"), None);
        assert_eq!(EntityKind::from_keyword("OVER_RIDING_STYLED_ITEM"), None);
    }

    #[test]
    fn test_entity_accessors() {
        let entity = Entity::new(7, EntityKind::StyledItem, "'',(#12),#30");
        assert_eq!(entity.references(), vec![12, 30]);
        assert_eq!(entity.first_string(), Some(String::new()));
    }
}
