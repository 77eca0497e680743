// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for STEP parsing, scene reading and color documents

use std::io;
use thiserror::Error;

/// Failure to read the DATA section of a STEP file
#[derive(Debug, Error)]
pub enum StepError {
    #[error("failed to read STEP stream: {0}")]
    Io(#[from] io::Error),

    #[error("no DATA; section found in STEP stream")]
    MissingDataSection,

    #[error("DATA; section is not terminated by ENDSEC;")]
    UnterminatedDataSection,
}

/// Failure to read the JSON chunk of a GLB container
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] io::Error),

    #[error("not a GLB file (missing glTF magic)")]
    NotGlb,

    #[error("first GLB chunk is not JSON (found chunk type {0:#010x})")]
    MissingJsonChunk(u32),

    #[error("GLB container is truncated: {0}")]
    Truncated(&'static str),

    #[error("invalid glTF JSON chunk: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to load, validate or write a color document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to access color document: {0}")]
    Io(#[from] io::Error),

    #[error("invalid color document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("object '{part}' refers to unknown material '{color}'")]
    DanglingMaterial { part: String, color: String },
}
