// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! GLB container reading (JSON chunk only)

use crate::error::SceneError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// `glTF` magic, little-endian
pub const GLB_MAGIC: u32 = 0x46546C67;
/// JSON chunk type, little-endian
pub const CHUNK_JSON: u32 = 0x4E4F534A;
/// Binary chunk type, little-endian
pub const CHUNK_BIN: u32 = 0x004E4942;

/// Read and parse the JSON chunk of a GLB file
pub fn read_glb_json(path: impl AsRef<Path>) -> Result<gltf_json::Root, SceneError> {
    let file = File::open(path.as_ref())?;
    let json = read_json_chunk(BufReader::new(file))?;
    Ok(serde_json::from_slice(&json)?)
}

/// Read the raw JSON chunk that must follow the 12-byte GLB header.
///
/// The binary chunk and anything after it are never read.
pub fn read_json_chunk<R: Read>(mut reader: R) -> Result<Vec<u8>, SceneError> {
    let magic = read_u32(&mut reader).map_err(|_| SceneError::NotGlb)?;
    if magic != GLB_MAGIC {
        return Err(SceneError::NotGlb);
    }
    let _version = read_u32(&mut reader).map_err(|_| SceneError::Truncated("header"))?;
    let _total_length = read_u32(&mut reader).map_err(|_| SceneError::Truncated("header"))?;

    let chunk_length =
        read_u32(&mut reader).map_err(|_| SceneError::Truncated("chunk header"))? as usize;
    let chunk_type = read_u32(&mut reader).map_err(|_| SceneError::Truncated("chunk header"))?;
    if chunk_type != CHUNK_JSON {
        return Err(SceneError::MissingJsonChunk(chunk_type));
    }

    let mut json = Vec::new();
    reader
        .take(chunk_length as u64)
        .read_to_end(&mut json)?;
    if json.len() < chunk_length {
        return Err(SceneError::Truncated("JSON chunk"));
    }
    Ok(json)
}

fn read_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}
