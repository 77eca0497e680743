// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! ISO 10303-21 (STEP) reading: entity allowlist, streaming store, argument helpers

pub mod args;
mod entity;
mod store;

pub use entity::{Entity, EntityId, EntityKind};
pub use store::{EntityStore, ParseStats};
