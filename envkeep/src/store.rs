// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Save orchestration.
//!
//! [`SettingsStore`] ties the parser, catalogue, resolver, and
//! merge-writer together: it owns the target path, the write lock that
//! serializes saves, and the invalidation hooks fired after each
//! successful write. One store per file is the unit of serialization;
//! two stores on the same path would race each other at the whole-file
//! level.

use crate::cache::InvalidationHook;
use crate::catalog::Catalog;
use crate::error::{Result, SettingsError};
use crate::line_parser;
use crate::merge_writer;
use crate::resolver::{self, SettingsSnapshot};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One incoming value. JSON booleans and numbers are accepted and
/// coerced to their canonical string spelling on save; text passes
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl ScalarValue {
    fn is_empty_text(&self) -> bool {
        matches!(self, ScalarValue::Text(t) if t.is_empty())
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{b}"),
            ScalarValue::Number(n) => write!(f, "{n}"),
            ScalarValue::Text(t) => f.write_str(t),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Number(value.into())
    }
}

/// A save request: `group key -> field key -> value`.
///
/// A `None` value (JSON `null`) asks to clear the field; an absent
/// field is left untouched. Groups and fields the catalogue does not
/// know are ignored, so partial or forward-incompatible payloads are
/// harmless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveRequest(
    pub BTreeMap<String, BTreeMap<String, Option<ScalarValue>>>,
);

impl SaveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value for `key` in `group`.
    pub fn set(
        &mut self,
        group: &str,
        key: &str,
        value: impl Into<ScalarValue>,
    ) {
        let _ = self
            .0
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), Some(value.into()));
    }

    /// Records a clear request for `key` in `group`.
    pub fn clear(&mut self, group: &str, key: &str) {
        let _ = self
            .0
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), None);
    }
}

/// What a completed save did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// Keys actually written, in sorted order.
    pub updated_keys: Vec<String>,
    /// Always true: the engine never hot-applies values into a running
    /// process's environment, so callers must restart the owning
    /// process to pick up changes.
    pub requires_restart: bool,
}

/// Schema-driven store over one `KEY=VALUE` file.
pub struct SettingsStore {
    path: PathBuf,
    catalog: &'static Catalog,
    hooks: Vec<Arc<dyn InvalidationHook>>,
    write_lock: Mutex<()>,
}

impl SettingsStore {
    /// A store over `path` using the built-in catalogue.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_catalog(path, Catalog::builtin())
    }

    /// A store over `path` using a caller-provided catalogue.
    pub fn with_catalog(
        path: impl Into<PathBuf>,
        catalog: &'static Catalog,
    ) -> Self {
        Self {
            path: path.into(),
            catalog,
            hooks: Vec::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Registers an observer fired once per successful save.
    pub fn add_hook(&mut self, hook: Arc<dyn InvalidationHook>) {
        self.hooks.push(hook);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Resolves the current effective values.
    ///
    /// Lock-free: reads may run concurrently with each other and with a
    /// save, observing either the old or the new file but never a
    /// partial one (saves replace atomically).
    pub fn resolve(&self) -> SettingsSnapshot {
        resolver::resolve(
            &line_parser::parse_file(&self.path),
            self.catalog,
        )
    }

    /// Applies a save request to the file.
    ///
    /// Collects updates against the catalogue (see [`SaveRequest`] for
    /// how unknown and empty entries are treated), merges them into
    /// the current file content, replaces the file atomically, and
    /// fires every hook exactly once. An empty update set still
    /// rewrites the file byte-identically and still fires the hooks.
    pub fn save(&self, request: &SaveRequest) -> Result<SaveOutcome> {
        // serialize writers on this file; interleaved read-then-write
        // from two callers would lose one caller's keys wholesale
        let _guard = self.write_lock.lock().unwrap(); //#[allow_ci]

        let updates = self.collect_updates(request)?;
        let lines = line_parser::parse_file(&self.path);
        let merged = merge_writer::merge(&lines, &updates);
        merge_writer::replace_file(&self.path, &merged)?;

        for hook in &self.hooks {
            hook.invalidate();
        }

        let updated_keys: Vec<String> = updates.into_keys().collect();
        info!(
            "saved {} key(s) to {}",
            updated_keys.len(),
            self.path.display()
        );
        Ok(SaveOutcome {
            updated_keys,
            requires_restart: true,
        })
    }

    // Walks the catalogue rather than the request, so entries the
    // catalogue does not know can never reach the writer.
    fn collect_updates(
        &self,
        request: &SaveRequest,
    ) -> Result<BTreeMap<String, String>> {
        let mut updates = BTreeMap::new();
        for group in self.catalog.groups() {
            let Some(requested) = request.0.get(group.key) else {
                continue;
            };
            for field in group.fields {
                let Some(incoming) = requested.get(field.key) else {
                    continue;
                };
                match incoming {
                    Some(value) if !value.is_empty_text() => {
                        let value = value.to_string();
                        if value.contains('\n') || value.contains('\r') {
                            return Err(SettingsError::InvalidValue {
                                key: field.key.to_string(),
                            });
                        }
                        let _ = updates
                            .insert(field.key.to_string(), value);
                    }
                    // null or empty string: an intentional clear,
                    // honored only for non-required fields
                    _ => {
                        if field.required {
                            debug!(
                                "ignoring empty value for required \
                                 key {}",
                                field.key
                            );
                        } else {
                            let _ = updates.insert(
                                field.key.to_string(),
                                String::new(),
                            );
                        }
                    }
                }
            }
        }
        self.log_unknown_entries(request);
        Ok(updates)
    }

    fn log_unknown_entries(&self, request: &SaveRequest) {
        for (group_key, fields) in &request.0 {
            match self.catalog.fields_of(group_key) {
                None => debug!("ignoring unknown group {group_key}"),
                Some(known) => {
                    for key in fields.keys() {
                        if !known.iter().any(|f| f.key == key.as_str()) {
                            debug!(
                                "ignoring unknown key {key} in group \
                                 {group_key}"
                            );
                        }
                    }
                }
            }
        }
    }
}
