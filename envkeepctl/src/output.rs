// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Output formatting and handling for envkeepctl
//!
//! Results go to stdout so they can be piped; progress and log
//! messages go to stderr. JSON is the canonical format; the table
//! format is a readable rendering of the same data for humans.

use crate::error::CtlError;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON output - structured data suitable for machine processing
    Json,
    /// Human-readable table format
    Table,
}

impl From<crate::OutputFormat> for Format {
    fn from(format: crate::OutputFormat) -> Self {
        match format {
            crate::OutputFormat::Json => Format::Json,
            crate::OutputFormat::Table => Format::Table,
        }
    }
}

/// Output handler for formatting and displaying results
///
/// # Design Principles
///
/// - JSON output goes to stdout for machine processing
/// - Human-readable messages go to stderr for logging
/// - Quiet mode suppresses non-essential output
#[derive(Debug)]
pub struct OutputHandler {
    format: Format,
    quiet: bool,
}

impl OutputHandler {
    /// Create a new output handler
    ///
    /// # Arguments
    ///
    /// * `format` - The output format to use
    /// * `quiet` - Whether to suppress non-essential output
    pub fn new(format: Format, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output a successful result to stdout
    pub fn success(&self, value: Value) {
        let output = match self.format {
            Format::Json => self.format_json(value),
            Format::Table => self.format_table(value),
        };

        println!("{output}");
    }

    /// Output an error
    ///
    /// JSON errors go to stdout so scripted callers always get a
    /// parseable document; human-readable errors go to stderr.
    pub fn error(&self, error: CtlError) {
        let error_json = error.to_json();

        match self.format {
            Format::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&error_json)
                        .unwrap_or_default()
                );
            }
            Format::Table => {
                eprintln!("Error: {error}");
                if let Some(details) =
                    error_json.get("error").and_then(|e| e.get("details"))
                {
                    if !details.is_null() {
                        eprintln!(
                            "Details: {}",
                            serde_json::to_string_pretty(details)
                                .unwrap_or_default()
                        );
                    }
                }
            }
        }
    }

    /// Display an informational message (only if not quiet)
    pub fn info<T: AsRef<str>>(&self, message: T) {
        if !self.quiet {
            info!("{}", message.as_ref());
        }
    }

    /// Format value as pretty-printed JSON
    fn format_json(&self, value: Value) -> String {
        serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format value as a human-readable table
    ///
    /// Objects of objects become sections with indented `key: value`
    /// lines, which covers the values listing; flat objects cover save
    /// outcomes; anything else falls back to a plain rendering.
    fn format_table(&self, value: Value) -> String {
        match value {
            Value::Object(map) => {
                let mut output = String::new();
                for (key, entry) in &map {
                    match entry {
                        Value::Object(fields) => {
                            output.push_str(&format!("{key}:\n"));
                            for (field, field_value) in fields {
                                if let Value::Array(items) = field_value {
                                    output.push_str(&format!(
                                        "  {field}:\n"
                                    ));
                                    for item in items {
                                        output.push_str(&format!(
                                            "    - {}\n",
                                            Self::render_item(item)
                                        ));
                                    }
                                } else {
                                    output.push_str(&format!(
                                        "  {field}: {}\n",
                                        Self::render_scalar(field_value)
                                    ));
                                }
                            }
                        }
                        Value::Array(items) => {
                            output.push_str(&format!("{key}:\n"));
                            for item in items {
                                output.push_str(&format!(
                                    "  - {}\n",
                                    Self::render_item(item)
                                ));
                            }
                        }
                        other => {
                            output.push_str(&format!(
                                "{key}: {}\n",
                                Self::render_scalar(other)
                            ));
                        }
                    }
                }
                output
            }
            other => Self::render_scalar(&other),
        }
    }

    /// Render a leaf value without JSON quoting noise
    fn render_scalar(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Render one array element
    ///
    /// Objects collapse to their `key` field when present so catalogue
    /// listings stay readable.
    fn render_item(item: &Value) -> String {
        if let Some(Value::String(key)) = item.get("key") {
            return key.clone();
        }
        Self::render_scalar(item)
    }
}
