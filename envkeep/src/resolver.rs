// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Effective-value resolution: file contents layered over catalogue
//! defaults. A pure read; never fails, never mutates anything.

use crate::catalog::{Catalog, FieldKind, GroupSpec};
use crate::line_parser::EnvLine;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The value in force for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveValue {
    pub key: &'static str,
    pub value: String,
    /// `Some` for password fields only: true iff the resolved value is
    /// non-empty. A presentation signal; the real value is carried
    /// alongside it either way.
    pub configured: Option<bool>,
}

/// One group's resolved values, in field order.
#[derive(Debug, Clone)]
pub struct ResolvedGroup {
    pub group: &'static GroupSpec,
    pub values: Vec<EffectiveValue>,
}

/// Every catalogue field's effective value, in catalogue order.
#[derive(Debug, Clone)]
pub struct SettingsSnapshot {
    groups: Vec<ResolvedGroup>,
}

impl SettingsSnapshot {
    pub fn groups(&self) -> &[ResolvedGroup] {
        &self.groups
    }

    pub fn group(&self, group_key: &str) -> Option<&ResolvedGroup> {
        self.groups.iter().find(|g| g.group.key == group_key)
    }

    /// Flat lookup across all groups.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.values.iter())
            .find(|v| v.key == key)
            .map(|v| v.value.as_str())
    }

    /// Serializes the nested value document: `group -> field -> value`,
    /// with a `<KEY>_configured` boolean beside every password field.
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        for resolved in &self.groups {
            let mut group = Map::new();
            for v in &resolved.values {
                group.insert(
                    v.key.to_string(),
                    Value::from(v.value.as_str()),
                );
                if let Some(configured) = v.configured {
                    group.insert(
                        format!("{}_configured", v.key),
                        Value::Bool(configured),
                    );
                }
            }
            root.insert(
                resolved.group.key.to_string(),
                Value::Object(group),
            );
        }
        Value::Object(root)
    }
}

/// Computes the effective value of every catalogue field.
///
/// Precedence per field: the file's value if the key is present (the
/// last occurrence of a duplicated key wins, so later hand-edited lines
/// override earlier ones), else the field default, else the empty
/// string. Keys in the file that no catalogue field claims are ignored
/// here; the merge path still preserves them.
pub fn resolve(lines: &[EnvLine], catalog: &Catalog) -> SettingsSnapshot {
    let mut flat: HashMap<&str, &str> = HashMap::new();
    for line in lines {
        if let EnvLine::Pair { key, value, .. } = line {
            let _ = flat.insert(key.as_str(), value.as_str());
        }
    }

    let groups = catalog
        .groups()
        .iter()
        .map(|group| {
            let values = group
                .fields
                .iter()
                .map(|field| {
                    let value = flat
                        .get(field.key)
                        .copied()
                        .unwrap_or_else(|| field.default.unwrap_or(""))
                        .to_string();
                    let configured = (field.kind == FieldKind::Password)
                        .then(|| !value.is_empty());
                    EffectiveValue {
                        key: field.key,
                        value,
                        configured,
                    }
                })
                .collect();
            ResolvedGroup { group, values }
        })
        .collect();

    SettingsSnapshot { groups }
}
