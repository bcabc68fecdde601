// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! The `schema` command
//!
//! Prints the settings catalogue so frontends and scripts can discover
//! groups, field types, defaults, and select options without hardcoding
//! them.

use envkeep::store::SettingsStore;
use serde_json::Value;

use crate::error::CtlError;

/// Execute the schema command.
pub fn execute(store: &SettingsStore) -> Result<Value, CtlError> {
    Ok(store.catalog().to_value())
}
