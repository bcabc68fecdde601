// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

use log::{error, warn};
use std::path::Path;

/// One physical line of a `KEY=VALUE` configuration file.
///
/// The parser never drops or rejects a line: anything it does not
/// recognize as a key/value pair is carried through as `Verbatim` so a
/// later rewrite can reproduce the file byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvLine {
    /// Blank line, `#` comment, or unrecognized content. The payload is
    /// the exact source text, line terminator included.
    Verbatim(String),
    /// A recognized `KEY=VALUE` line. `raw` keeps the exact source text
    /// (terminator included) so untouched pairs render losslessly.
    Pair {
        key: String,
        value: String,
        raw: String,
    },
}

impl EnvLine {
    /// The exact source text of this line, terminator included.
    pub fn raw(&self) -> &str {
        match self {
            EnvLine::Verbatim(raw) => raw,
            EnvLine::Pair { raw, .. } => raw,
        }
    }

    /// The key of a recognized pair, `None` for verbatim content.
    pub fn key(&self) -> Option<&str> {
        match self {
            EnvLine::Verbatim(_) => None,
            EnvLine::Pair { key, .. } => Some(key),
        }
    }

    /// The unquoted value of a recognized pair.
    pub fn value(&self) -> Option<&str> {
        match self {
            EnvLine::Verbatim(_) => None,
            EnvLine::Pair { value, .. } => Some(value),
        }
    }
}

// Strips exactly one outer pair of matching quotes. A pair needs at
// least two characters; a lone quote is content, not quoting.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && ((bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parses file content into an ordered sequence of [`EnvLine`]s.
///
/// For each physical line:
///
/// * empty (after trimming) or starting with `#` => `Verbatim`
/// * containing `=` => split on the first `=` only, trim key and value,
///   strip one outer pair of matching single or double quotes => `Pair`
/// * anything else => `Verbatim` (unrecognized content is preserved,
///   never an error)
///
/// Concatenating the `raw()` text of every returned line reproduces the
/// input exactly, including CRLF terminators and a missing final
/// newline.
///
/// # Arguments
///
/// * `content` the file content to be parsed
///
/// # Returns
///
/// The ordered list of parsed lines
///
/// # Examples
///
/// * `"# db\nHOST=a\n"` => `[Verbatim, Pair { key: "HOST", .. }]`
/// * `"GREETING=\"hello world\"\n"` => value `hello world`
pub fn parse_str(content: &str) -> Vec<EnvLine> {
    let mut lines = Vec::new();
    for segment in content.split_inclusive('\n') {
        let stripped = segment.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            lines.push(EnvLine::Verbatim(segment.to_string()));
        } else if let Some((key, value)) = stripped.split_once('=') {
            lines.push(EnvLine::Pair {
                key: key.trim().to_string(),
                value: unquote(value.trim()).to_string(),
                raw: segment.to_string(),
            });
        } else {
            lines.push(EnvLine::Verbatim(segment.to_string()));
        }
    }
    lines
}

/// Parses the file at `path`, degrading to an empty sequence when the
/// file cannot be read.
///
/// A missing file is a normal condition (fresh deployment) and is only
/// logged at warn level; any other read failure is logged as an error.
/// Neither aborts the caller, so resolution and merging stay
/// best-effort as required of the read path.
pub fn parse_file(path: &Path) -> Vec<EnvLine> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("configuration file not found at {}", path.display());
            Vec::new()
        }
        Err(e) => {
            error!("failed to read {}: {e}", path.display());
            Vec::new()
        }
    }
}
