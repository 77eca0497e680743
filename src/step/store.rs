// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Streaming STEP reader that keeps only relevant entities

use super::entity::{Entity, EntityId, EntityKind};
use crate::error::StepError;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

static ENTITY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(\d+)\s*=\s*([A-Z_][A-Z0-9_]*)\s*\(").expect("valid regex")
});

/// A physical line that opens a new `#id =` instance
static STATEMENT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\d+\s*=").expect("valid regex"));

/// Counters collected while streaming a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Complete statements found inside DATA sections
    pub statements: usize,
    /// Statements whose type is in the relevant set
    pub retained: usize,
    /// Statements without a `#id = TYPE(` header (complex instances, noise)
    pub unrecognized: usize,
}

/// Relevant entities of one STEP file, in file order
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: IndexMap<EntityId, Entity>,
    stats: ParseStats,
}

impl EntityStore {
    /// Stream a STEP file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StepError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse STEP text held in memory
    pub fn parse(source: &str) -> Result<Self, StepError> {
        Self::from_reader(source.as_bytes())
    }

    /// Stream STEP text line by line.
    ///
    /// Only statements between `DATA;` and `ENDSEC;` are considered, and only
    /// those whose type is in [`EntityKind::ALL`] are stored. Fails if the
    /// stream has no DATA section, or if the section is never closed.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, StepError> {
        let mut store = Self::default();
        let mut splitter = StatementSplitter::default();
        let mut raw = Vec::new();
        let mut in_data = false;
        let mut saw_data = false;

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&raw);
            let trimmed = line.trim();

            // A stray quote must not swallow the statements after it
            if in_data
                && !splitter.is_idle()
                && (trimmed == "ENDSEC;"
                    || (splitter.in_string && STATEMENT_START.is_match(trimmed)))
            {
                let fragment = splitter.take_pending();
                debug!(fragment = fragment.trim(), "dropping statement with unbalanced quote or comment");
                if !fragment.trim().is_empty() {
                    store.stats.statements += 1;
                    store.stats.unrecognized += 1;
                }
            }

            if splitter.is_idle() {
                if trimmed == "DATA;" {
                    in_data = true;
                    saw_data = true;
                    continue;
                }
                if trimmed == "ENDSEC;" {
                    if in_data {
                        in_data = false;
                        splitter.reset();
                    }
                    continue;
                }
            }
            if !in_data {
                continue;
            }

            for statement in splitter.push_line(trimmed) {
                store.add_statement(&statement);
            }
        }

        if !saw_data {
            return Err(StepError::MissingDataSection);
        }
        if in_data {
            return Err(StepError::UnterminatedDataSection);
        }

        info!(
            statements = store.stats.statements,
            retained = store.stats.retained,
            unrecognized = store.stats.unrecognized,
            "parsed STEP data section"
        );
        Ok(store)
    }

    fn add_statement(&mut self, statement: &str) {
        let statement = statement.trim();
        if statement.is_empty() {
            return;
        }
        self.stats.statements += 1;

        let Some(caps) = ENTITY_HEADER.captures(statement) else {
            self.stats.unrecognized += 1;
            return;
        };
        let Some(kind) = EntityKind::from_keyword(&caps[2]) else {
            return;
        };
        let Ok(id) = caps[1].parse::<EntityId>() else {
            self.stats.unrecognized += 1;
            return;
        };

        let header_len = caps.get(0).map_or(0, |m| m.end());
        let rest = statement[header_len..].trim_end();
        let args = rest.strip_suffix(')').unwrap_or(rest);

        if self.entities.contains_key(&id) {
            debug!(id, "duplicate entity id, keeping first definition");
            return;
        }
        self.stats.retained += 1;
        self.entities.insert(id, Entity::new(id, kind, args));
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All retained entities in file order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Retained entities of one kind, in file order
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(move |e| e.kind == kind)
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }
}

impl FromIterator<Entity> for EntityStore {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut store = Self::default();
        for entity in iter {
            store.stats.statements += 1;
            store.stats.retained += 1;
            store.entities.entry(entity.id).or_insert(entity);
        }
        store
    }
}

/// Joins physical lines and cuts them into `;`-terminated statements.
///
/// Semicolons inside quoted strings and `/* */` comments do not terminate a
/// statement. Comment text is dropped.
#[derive(Debug, Default)]
struct StatementSplitter {
    buffer: String,
    in_string: bool,
    in_comment: bool,
}

impl StatementSplitter {
    /// No partial statement, string or comment is pending
    fn is_idle(&self) -> bool {
        !self.in_string && !self.in_comment && self.buffer.trim().is_empty()
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.in_string = false;
        self.in_comment = false;
    }

    /// Abandon the partial statement and return its text
    fn take_pending(&mut self) -> String {
        let pending = std::mem::take(&mut self.buffer);
        self.reset();
        pending
    }

    fn push_line(&mut self, line: &str) -> Vec<String> {
        let mut complete = Vec::new();
        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }

        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if self.in_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.in_comment = false;
                }
                continue;
            }
            if self.in_string {
                if c == '\'' {
                    self.in_string = false;
                }
                self.buffer.push(c);
                continue;
            }
            match c {
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    self.in_comment = true;
                }
                '\'' => {
                    self.in_string = true;
                    self.buffer.push(c);
                }
                ';' => complete.push(std::mem::take(&mut self.buffer)),
                _ => self.buffer.push(c),
            }
        }
        complete
    }
}
