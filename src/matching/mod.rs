// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tiered matching of scene node names against extracted part colors
//!
//! A scene importer renames and instances parts, so node names rarely equal
//! the product names found in the STEP file. Each node is tried against the
//! color document in four steps: its normalized name, its base key, then the
//! same two lookups with its parent's name.

use crate::extract::ColorDocument;
use crate::naming::{base_key, normalize};
use ahash::AHashMap;
use serde::Serialize;
use tracing::warn;

/// Lookup step that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchTier {
    /// Normalized node name is a part name
    Exact,
    /// Node base key equals a part base key
    BaseKey,
    /// Normalized parent name is a part name
    ParentExact,
    /// Parent base key equals a part base key
    ParentBaseKey,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::BaseKey => "base key",
            MatchTier::ParentExact => "parent",
            MatchTier::ParentBaseKey => "parent base key",
        }
    }
}

/// Material chosen for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMatch<'a> {
    pub material: &'a str,
    pub tier: MatchTier,
}

/// Part-name indexes over a color document
#[derive(Debug, Clone, Default)]
pub struct TieredMatcher {
    by_name: AHashMap<String, String>,
    by_base: AHashMap<String, String>,
}

impl TieredMatcher {
    /// Index `objects` by normalized name and by base key.
    ///
    /// For both indexes the first part producing a key wins. Objects whose
    /// material is missing from `materials` are left out.
    pub fn new(document: &ColorDocument) -> Self {
        let mut matcher = Self::default();
        for (part, material) in &document.objects {
            if !document.materials.contains_key(material.as_str()) {
                warn!(part = part.as_str(), material = material.as_str(), "object refers to unknown material");
                continue;
            }
            let key = normalize(part);
            matcher
                .by_base
                .entry(base_key(&key).to_string())
                .or_insert_with(|| material.clone());
            matcher.by_name.entry(key).or_insert_with(|| material.clone());
        }
        matcher
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Choose a material for a scene node, or `None` if no tier matches
    pub fn match_node(&self, name: &str, parent: Option<&str>) -> Option<NodeMatch<'_>> {
        if let Some(found) = self.lookup(name, MatchTier::Exact, MatchTier::BaseKey) {
            return Some(found);
        }
        parent.and_then(|parent| self.lookup(parent, MatchTier::ParentExact, MatchTier::ParentBaseKey))
    }

    fn lookup(&self, raw: &str, exact: MatchTier, base: MatchTier) -> Option<NodeMatch<'_>> {
        let key = normalize(raw);
        if let Some(material) = self.by_name.get(&key) {
            return Some(NodeMatch { material, tier: exact });
        }
        self.by_base
            .get(base_key(&key))
            .map(|material| NodeMatch { material, tier: base })
    }

    /// Match a batch of `(node, parent)` names and collect the outcome
    pub fn match_all<'n, I>(&self, nodes: I) -> MatchReport
    where
        I: IntoIterator<Item = (&'n str, Option<&'n str>)>,
    {
        let mut report = MatchReport::default();
        for (name, parent) in nodes {
            match self.match_node(name, parent) {
                Some(found) => report.record(found.tier),
                None => report.unmatched.push(name.to_string()),
            }
        }
        report
    }
}

/// Totals from matching a set of scene nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub applied: usize,
    pub exact: usize,
    pub base_key: usize,
    pub parent_exact: usize,
    pub parent_base_key: usize,
    /// Nodes no tier could match, in visit order
    pub unmatched: Vec<String>,
}

impl MatchReport {
    fn record(&mut self, tier: MatchTier) {
        self.applied += 1;
        match tier {
            MatchTier::Exact => self.exact += 1,
            MatchTier::BaseKey => self.base_key += 1,
            MatchTier::ParentExact => self.parent_exact += 1,
            MatchTier::ParentBaseKey => self.parent_base_key += 1,
        }
    }

    /// At most `limit` unmatched names and how many were left out
    pub fn unmatched_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.unmatched.len().min(limit);
        (&self.unmatched[..shown], self.unmatched.len() - shown)
    }
}
