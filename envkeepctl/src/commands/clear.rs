// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! The `clear` command
//!
//! Sends a null update for each named key. Required keys are protected
//! by the store and come back in `skipped_required` instead of being
//! emptied.

use envkeep::store::{SaveRequest, SettingsStore};
use serde_json::{json, Value};

use crate::error::CtlError;
use crate::output::OutputHandler;

/// Execute the clear command.
pub fn execute(
    store: &SettingsStore,
    keys: &[String],
    output: &OutputHandler,
) -> Result<Value, CtlError> {
    let mut request = SaveRequest::new();
    for key in keys {
        let Some((group, _)) = store.catalog().find(key) else {
            return Err(CtlError::usage(format!("unknown key '{key}'")));
        };
        request.clear(group.key, key);
    }

    let outcome = store.save(&request)?;
    let skipped: Vec<String> = keys
        .iter()
        .filter(|key| !outcome.updated_keys.contains(*key))
        .cloned()
        .collect();

    if !skipped.is_empty() {
        output.info(format!(
            "Skipped required key(s): {}",
            skipped.join(", ")
        ));
    }
    output.info(format!(
        "Cleared {} key(s) in {}",
        outcome.updated_keys.len(),
        store.path().display()
    ));

    Ok(json!({
        "cleared": outcome.updated_keys,
        "skipped_required": skipped,
        "requires_restart": outcome.requires_restart,
    }))
}
