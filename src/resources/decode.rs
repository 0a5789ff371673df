// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Decoding of untyped configuration trees into typed resource configuration.

use crate::error::{ProviderError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Decode a configuration tree for `type_name` in one validated step.
///
/// Sequence order in the tree is kept in the decoded value.
pub fn decode<T: DeserializeOwned>(type_name: &'static str, tree: Value) -> Result<T> {
    debug!("Decoding {} configuration", type_name);
    serde_json::from_value(tree).map_err(|source| ProviderError::InvalidResource { type_name, source })
}
