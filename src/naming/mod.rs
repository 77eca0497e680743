// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Name normalization shared by every tool that correlates part names
//!
//! Names reach this crate from three places: `PRODUCT_DEFINITION` strings in
//! STEP files, node names in GLB files exported by a CAD host, and object
//! names in a scene editor after import. All of them go through [`normalize`]
//! before being compared, and through [`base_key`] when an instance suffix
//! should be ignored. Matching only works if every consumer uses these
//! functions, so nothing else in the crate re-implements the rules.

use regex::Regex;
use std::sync::LazyLock;

/// `.step` extension with an optional `-N` instance suffix after it
static STEP_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.step(-\d+)?$").expect("valid regex"));

/// `(mesh)` / `(group)` annotations added by CAD exporters
static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\((?:mesh|group)\)\s*").expect("valid regex"));

/// Scene-editor duplicate: `Name.001`
static DOT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\.\d{3}$").expect("valid regex"));

/// CAD-host duplicate: `Name001`
static DIGIT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\D)\d{3,}$").expect("valid regex"));

/// STEP instance: `Name-1`
static HYPHEN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)-\d+$").expect("valid regex"));

/// Canonicalize a raw CAD or scene node name into a comparison key.
///
/// Keeps only the last `/`-separated component, drops `(mesh)` and `(group)`
/// annotations, strips a trailing `.step` extension while keeping a `-N`
/// instance suffix after it, and trims whitespace. The steps are repeated
/// until the name stops changing, so the result is always a fixpoint.
///
/// ```
/// use step_colors::naming::normalize;
///
/// assert_eq!(normalize("Assembly/Bracket.step-2 (mesh)"), "Bracket-2");
/// assert_eq!(normalize("Part.STEP"), "Part");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_once(raw);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(raw: &str) -> String {
    let last = raw.rsplit('/').next().unwrap_or(raw);
    let without_annotations = ANNOTATION.replace_all(last, "");
    let trimmed = without_annotations.trim();
    let without_extension = STEP_EXTENSION.replace(trimmed, "$1");
    without_extension.trim().to_string()
}

/// Strip one trailing instance suffix for fallback matching.
///
/// Rules are tried in order and only the first match applies:
/// `Name.001`, then `Name001` (three or more digits after a non-digit),
/// then `Name-12`. Names without a suffix are returned unchanged.
pub fn base_key(name: &str) -> &str {
    for pattern in [&*DOT_SUFFIX, &*DIGIT_SUFFIX, &*HYPHEN_SUFFIX] {
        if let Some(prefix) = pattern.captures(name).and_then(|caps| caps.get(1)) {
            return prefix.as_str();
        }
    }
    name
}

/// Strip only a trailing `-N` instance suffix.
///
/// Used when listing canonical part names for a template, where `.001` style
/// suffixes are part of the exported name and must be preserved.
pub fn strip_instance_suffix(name: &str) -> &str {
    HYPHEN_SUFFIX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map_or(name, |prefix| prefix.as_str())
}
