// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Style chain walker with a per-run memo

use super::ColorInfo;
use crate::step::{args, EntityId, EntityKind, EntityStore};
use ahash::AHashMap;
use tracing::warn;

/// Memo entry for one entity id. Ids never visited have no entry.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoState {
    /// On the current walk; reaching it again is a cycle
    Pending,
    /// Final outcome, never recomputed
    Resolved(Option<ColorInfo>),
}

/// Outcome of entering an entity
enum Step {
    Done(Option<ColorInfo>),
    Descend(Frame),
}

/// An intermediate entity whose references are being tried in order
struct Frame {
    id: EntityId,
    refs: Vec<EntityId>,
    next: usize,
}

impl Frame {
    fn next_ref(&mut self) -> Option<EntityId> {
        let id = self.refs.get(self.next).copied()?;
        self.next += 1;
        Some(id)
    }
}

/// Walks from a style assignment to a concrete colour.
///
/// `COLOUR_RGB` and `DRAUGHTING_PRE_DEFINED_COLOUR` are terminal. Every other
/// entity is an intermediate hop whose references are tried depth-first in
/// argument order; the first one that resolves wins. The walk uses an
/// explicit stack, and an id is marked [`MemoState::Pending`] before its
/// references are visited, so cycles resolve to `None`.
pub struct ColorResolver<'a> {
    store: &'a EntityStore,
    memo: AHashMap<EntityId, MemoState>,
}

impl<'a> ColorResolver<'a> {
    pub fn new(store: &'a EntityStore) -> Self {
        Self {
            store,
            memo: AHashMap::new(),
        }
    }

    pub fn resolve(&mut self, id: EntityId) -> Option<ColorInfo> {
        let mut stack = match self.memo.get(&id) {
            Some(MemoState::Resolved(color)) => return color.clone(),
            Some(MemoState::Pending) => return None,
            None => match self.enter(id) {
                Step::Done(color) => return color,
                Step::Descend(frame) => vec![frame],
            },
        };

        // Result of the child that finished last, consumed by the frame on top
        let mut child: Option<ColorInfo> = None;

        while let Some(frame) = stack.last_mut() {
            let outcome = if child.is_some() {
                Some(child.take())
            } else {
                match frame.next_ref() {
                    None => Some(None),
                    Some(next) => match self.memo.get(&next) {
                        Some(MemoState::Pending) => None,
                        Some(MemoState::Resolved(color)) => {
                            child = color.clone();
                            None
                        }
                        None => match self.enter(next) {
                            Step::Done(color) => {
                                child = color;
                                None
                            }
                            Step::Descend(frame) => {
                                stack.push(frame);
                                None
                            }
                        },
                    },
                }
            };

            if let Some(color) = outcome {
                if let Some(done) = stack.pop() {
                    self.memo.insert(done.id, MemoState::Resolved(color.clone()));
                }
                if stack.is_empty() {
                    return color;
                }
                child = color;
            }
        }
        None
    }

    /// Memo entry for an id, if it has been visited
    pub fn state(&self, id: EntityId) -> Option<&MemoState> {
        self.memo.get(&id)
    }

    /// Number of ids with a memo entry
    pub fn visited(&self) -> usize {
        self.memo.len()
    }

    fn enter(&mut self, id: EntityId) -> Step {
        let store = self.store;
        let Some(entity) = store.get(id) else {
            self.memo.insert(id, MemoState::Resolved(None));
            return Step::Done(None);
        };

        let terminal = match entity.kind {
            EntityKind::ColourRgb => Some(parse_colour_rgb(id, &entity.args)),
            EntityKind::DraughtingPreDefinedColour => {
                Some(entity.first_string().and_then(|name| ColorInfo::predefined(&name)))
            }
            _ => None,
        };

        match terminal {
            Some(color) => {
                self.memo.insert(id, MemoState::Resolved(color.clone()));
                Step::Done(color)
            }
            None => {
                self.memo.insert(id, MemoState::Pending);
                Step::Descend(Frame {
                    id,
                    refs: entity.references(),
                    next: 0,
                })
            }
        }
    }
}

fn parse_colour_rgb(id: EntityId, raw: &str) -> Option<ColorInfo> {
    let name = args::first_string(raw).filter(|name| !name.is_empty());
    match args::numbers(raw).as_slice() {
        &[r, g, b, ..] => Some(ColorInfo::new(name, [r, g, b])),
        _ => {
            warn!(id, arguments = raw, "COLOUR_RGB without three numeric components");
            None
        }
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

    fn style_chain() -> EntityStore {
        store(&[
            (1, EntityKind::PresentationStyleAssignment, "(#2)"),
            (2, EntityKind::SurfaceStyleUsage, ".BOTH.,#3"),
            (3, EntityKind::SurfaceSideStyle, "'',(#4)"),
            (4, EntityKind::SurfaceStyleFillArea, "#5"),
            (5, EntityKind::FillAreaStyle, "'',(#6)"),
            (6, EntityKind::FillAreaStyleColour, "'',#7"),
            (7, EntityKind::ColourRgb, "'Blue 42',0.1,0.2,0.9"),
        ])
    }

    #[test]
    fn test_full_style_chain() {
        let store = style_chain();
        let mut resolver = ColorResolver::new(&store);
        let color = resolver.resolve(1).unwrap();
        assert_eq!(color.name.as_deref(), Some("Blue 42"));
        assert_eq!(color.rgb, [0.1, 0.2, 0.9]);
        assert_eq!(resolver.visited(), 7);
        assert!(matches!(resolver.state(4), Some(MemoState::Resolved(Some(_)))));
    }

    #[test]
    fn test_memo_is_reused() {
        let store = style_chain();
        let mut resolver = ColorResolver::new(&store);
        let first = resolver.resolve(1);
        let second = resolver.resolve(1);
        assert_eq!(first, second);
        assert_eq!(resolver.resolve(5), first);
    }

    #[test]
    fn test_unnamed_colour() {
        let store = store(&[(7, EntityKind::ColourRgb, "'',1.,0.,0.")]);
        let color = ColorResolver::new(&store).resolve(7).unwrap();
        assert_eq!(color.name, None);
        assert_eq!(color.rgb, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_predefined_colour() {
        let store = store(&[
            (1, EntityKind::FillAreaStyleColour, "'',#2"),
            (2, EntityKind::DraughtingPreDefinedColour, "'Green'"),
        ]);
        let color = ColorResolver::new(&store).resolve(1).unwrap();
        assert_eq!(color.name.as_deref(), Some("green"));
        assert_eq!(color.rgb, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unknown_predefined_colour() {
        let store = store(&[(2, EntityKind::DraughtingPreDefinedColour, "'orange'")]);
        assert_eq!(ColorResolver::new(&store).resolve(2), None);
    }

    #[test]
    fn test_first_successful_branch_wins() {
        let store = store(&[
            (1, EntityKind::PresentationStyleAssignment, "(#2,#3,#4)"),
            (2, EntityKind::SurfaceStyleUsage, ".BOTH.,#99"),
            (3, EntityKind::FillAreaStyleColour, "'',#5"),
            (4, EntityKind::FillAreaStyleColour, "'',#6"),
            (5, EntityKind::ColourRgb, "'first',1.,0.,0."),
            (6, EntityKind::ColourRgb, "'second',0.,1.,0."),
        ]);
        let mut resolver = ColorResolver::new(&store);
        let color = resolver.resolve(1).unwrap();
        assert_eq!(color.name.as_deref(), Some("first"));
        // Branches after the winner are never visited
        assert!(resolver.state(4).is_none());
    }

    #[test]
    fn test_cycle_resolves_to_none() {
        let store = store(&[
            (1, EntityKind::RepresentationRelationship, "'','',#2,#3"),
            (2, EntityKind::RepresentationRelationship, "'','',#1,#3"),
        ]);
        let mut resolver = ColorResolver::new(&store);
        assert_eq!(resolver.resolve(1), None);
        assert_eq!(resolver.resolve(2), None);
        assert_eq!(resolver.state(1), Some(&MemoState::Resolved(None)));
        assert_eq!(resolver.state(2), Some(&MemoState::Resolved(None)));
    }

    #[test]
    fn test_self_reference() {
        let store = store(&[(1, EntityKind::SurfaceSideStyle, "'',(#1)")]);
        assert_eq!(ColorResolver::new(&store).resolve(1), None);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 200_000u64;
        let mut entities: Vec<Entity> = (1..depth)
            .map(|id| Entity::new(id, EntityKind::SurfaceStyleFillArea, format!("#{}", id + 1)))
            .collect();
        entities.push(Entity::new(depth, EntityKind::ColourRgb, "'',0.5,0.5,0.5"));
        let store: EntityStore = entities.into_iter().collect();

        let color = ColorResolver::new(&store).resolve(1).unwrap();
        assert_eq!(color.rgb, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_malformed_colour() {
        let store = store(&[(1, EntityKind::ColourRgb, "'odd',0.5")]);
        assert_eq!(ColorResolver::new(&store).resolve(1), None);
    }
}
