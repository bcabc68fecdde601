// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! The `set` command
//!
//! Parses `KEY=VALUE` arguments, validates every key against the
//! catalogue up front, and applies them in a single save. The store
//! itself would silently drop unknown keys; for an interactive tool a
//! typo should be an error instead.

use envkeep::catalog::Catalog;
use envkeep::store::{SaveRequest, SettingsStore};
use serde_json::Value;

use crate::error::CtlError;
use crate::output::OutputHandler;

/// Execute the set command.
///
/// An empty value (`KEY=`) clears the key if the catalogue allows it.
pub fn execute(
    store: &SettingsStore,
    pairs: &[String],
    output: &OutputHandler,
) -> Result<Value, CtlError> {
    let request = build_request(store.catalog(), pairs)?;
    let outcome = store.save(&request)?;

    output.info(format!(
        "Saved {} key(s) to {}",
        outcome.updated_keys.len(),
        store.path().display()
    ));

    Ok(serde_json::to_value(&outcome)?)
}

/// Turn `KEY=VALUE` arguments into a save request, resolving each key
/// to its catalogue group.
fn build_request(
    catalog: &Catalog,
    pairs: &[String],
) -> Result<SaveRequest, CtlError> {
    let mut request = SaveRequest::new();

    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(CtlError::usage(format!(
                "expected KEY=VALUE, got '{pair}'"
            )));
        };
        let Some((group, _)) = catalog.find(key) else {
            return Err(CtlError::usage(format!("unknown key '{key}'")));
        };
        request.set(group.key, key, value);
    }

    Ok(request)
}
