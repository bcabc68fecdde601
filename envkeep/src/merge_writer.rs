// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Merge-write: applies key updates to a parsed file while keeping
//! every untouched byte exactly as it was, then replaces the target
//! atomically (temp file + rename) so readers never observe a partial
//! write and a failed save leaves the original intact.

use crate::error::{Result, SettingsError};
use crate::line_parser::EnvLine;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Comment line introducing the appended section for new keys.
pub const MARKER: &str = "# Added by envkeep";

/// True when `value` must be quoted on output: it contains a space or
/// either quote character.
pub fn needs_quoting(value: &str) -> bool {
    value.contains(' ') || value.contains('"') || value.contains('\'')
}

/// Renders one `KEY=VALUE` line (no terminator), double-quoting the
/// value only when [`needs_quoting`] says so.
pub fn format_pair(key: &str, value: &str) -> String {
    if needs_quoting(value) {
        format!("{key}=\"{value}\"")
    } else {
        format!("{key}={value}")
    }
}

/// Applies `updates` to `lines` and returns the complete new content.
///
/// Verbatim lines and pairs whose key is not being updated pass through
/// as their original bytes. A pair whose key is in `updates` is
/// regenerated in place; every line carrying that key is rewritten, so
/// duplicated keys stay duplicated (and the resolver's last-wins rule
/// still yields the new value). Keys with no existing line are appended
/// under [`MARKER`] in ascending key order, separated from the content
/// by one empty line. With no updates the output equals the input byte
/// for byte.
pub fn merge(
    lines: &[EnvLine],
    updates: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();
    let mut applied: HashSet<&str> = HashSet::new();

    for line in lines {
        match line {
            EnvLine::Verbatim(raw) => out.push_str(raw),
            EnvLine::Pair { key, raw, .. } => match updates.get(key) {
                Some(value) => {
                    out.push_str(&format_pair(key, value));
                    out.push('\n');
                    let _ = applied.insert(key.as_str());
                }
                None => out.push_str(raw),
            },
        }
    }

    // BTreeMap iteration gives the appended section a stable,
    // lexically sorted order regardless of request order.
    let new_keys: Vec<(&String, &String)> = updates
        .iter()
        .filter(|(key, _)| !applied.contains(key.as_str()))
        .collect();
    if !new_keys.is_empty() {
        if !out.is_empty() {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            // one empty separator line before the marker; do not
            // stack another onto an existing trailing blank
            if !out.ends_with("\n\n") && out != "\n" {
                out.push('\n');
            }
        }
        out.push_str(MARKER);
        out.push('\n');
        for (key, value) in new_keys {
            out.push_str(&format_pair(key, value));
            out.push('\n');
        }
    }

    out
}

/// Atomically replaces the contents of `path`.
///
/// The new content is staged in a temp file in the target's directory
/// and renamed over the target, carrying the existing file's
/// permissions across the rename (a fresh temp file is created 0600,
/// which would silently change the mode of the real file). On any
/// failure the original file is untouched.
pub fn replace_file(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stage = |source: std::io::Error| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(stage)?;
    tmp.write_all(contents.as_bytes()).map_err(stage)?;
    tmp.flush().map_err(stage)?;
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(stage)?;
    }
    tmp.persist(path).map_err(|e| SettingsError::Persist {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
