// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! The `values` and `get` commands
//!
//! Both read the settings file through the store and report effective
//! values, with catalogue defaults filled in for anything the file
//! does not set.

use envkeep::store::SettingsStore;
use serde_json::{json, Value};

use crate::error::CtlError;

/// Execute the values command.
///
/// With no group filter the result is the full nested snapshot; with
/// `--group` only that group's object is returned, still wrapped under
/// the group key.
pub fn execute(
    store: &SettingsStore,
    group: Option<&str>,
) -> Result<Value, CtlError> {
    let snapshot = store.resolve();
    let all = snapshot.to_value();

    match group {
        None => Ok(all),
        Some(group_key) => match all.get(group_key) {
            Some(group_value) => Ok(json!({ group_key: group_value })),
            None => Err(CtlError::usage(format!(
                "unknown group '{group_key}'"
            ))),
        },
    }
}

/// Execute the get command for a single key.
pub fn execute_get(
    store: &SettingsStore,
    key: &str,
) -> Result<Value, CtlError> {
    if !store.catalog().contains_key(key) {
        return Err(CtlError::usage(format!("unknown key '{key}'")));
    }

    let snapshot = store.resolve();
    let value = snapshot.get(key).unwrap_or_default();
    Ok(json!({ "key": key, "value": value }))
}
