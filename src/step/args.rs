// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! On-demand parsing of raw STEP argument text

use super::entity::EntityId;

/// Parse `#id` references from STEP argument text, in order.
///
/// `#` characters inside quoted strings are not references.
pub fn references(args: &str) -> Vec<EntityId> {
    let mut refs = Vec::new();
    for segment in unquoted_segments(args) {
        let mut chars = segment.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            if c != '#' {
                continue;
            }
            let digits_start = start + 1;
            let mut digits_end = digits_start;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_digit() {
                    digits_end = i + 1;
                    chars.next();
                } else {
                    break;
                }
            }
            if let Ok(id) = segment[digits_start..digits_end].parse::<EntityId>() {
                refs.push(id);
            }
        }
    }
    refs
}

/// First single-quoted string in the arguments, with `''` unescaped
pub fn first_string(args: &str) -> Option<String> {
    let start = args.find('\'')?;
    let mut value = String::new();
    let mut chars = args[start + 1..].chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                value.push('\'');
                chars.next();
            } else {
                return Some(value);
            }
        } else {
            value.push(c);
        }
    }
    // Unterminated string runs to the end of the arguments
    Some(value)
}

/// Numeric literals outside quoted strings, in order.
///
/// References, enumerations (`.T.`), unset markers (`$`, `*`) and anything
/// inside quotes are skipped, so digits in an entity name are never taken for
/// values.
pub fn numbers(args: &str) -> Vec<f64> {
    unquoted_segments(args)
        .flat_map(|segment| segment.split(|c: char| c == ',' || c == '(' || c == ')'))
        .map(str::trim)
        .filter(|token| {
            token
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+')
        })
        .filter_map(parse_step_float)
        .collect()
}

/// Parse a STEP real, including the `0.E+000` form some exporters write
pub fn parse_step_float(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.contains(".E") || token.contains(".e") {
        token.replacen(".E", ".0E", 1).replacen(".e", ".0e", 1).parse().ok()
    } else {
        token.parse().ok()
    }
}

/// Split argument text into the pieces that lie outside quoted strings
fn unquoted_segments(args: &str) -> impl Iterator<Item = &str> {
    let mut segments = Vec::new();
    let mut in_string = false;
    let mut segment_start = 0;
    let bytes = args.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if in_string {
                if bytes.get(i + 1) == Some(&b'\'') {
                    i += 2;
                    continue;
                }
                in_string = false;
                segment_start = i + 1;
            } else {
                segments.push(&args[segment_start..i]);
                in_string = true;
            }
        }
        i += 1;
    }
    if !in_string {
        segments.push(&args[segment_start..]);
    }
    segments.into_iter()
}
