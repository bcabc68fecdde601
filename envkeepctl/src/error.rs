// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Error handling for envkeepctl
//!
//! [`CtlError`] wraps everything a command can fail with: tool
//! configuration problems, bad command-line input, and errors coming
//! out of the settings engine. It also knows how to render itself as
//! structured JSON for the `--format json` error path.

use envkeep::error::SettingsError;
use serde_json::Value;
use thiserror::Error;

/// Main error type for envkeepctl operations
#[derive(Error, Debug)]
pub enum CtlError {
    /// Tool configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors from the settings engine
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Invalid command-line input
    #[error("Usage error: {0}")]
    Usage(String),

    /// File I/O errors
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("Error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl CtlError {
    /// Create a new usage error
    ///
    /// # Arguments
    ///
    /// * `message` - Description of what was wrong with the input
    pub fn usage<T: Into<String>>(message: T) -> Self {
        Self::Usage(message.into())
    }

    /// Get the error code for JSON output
    ///
    /// Returns a string constant that identifies the error type for
    /// programmatic use.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Settings(_) => "SETTINGS_ERROR",
            Self::Usage(_) => "USAGE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Generic(_) => "GENERIC_ERROR",
        }
    }

    /// Convert to JSON value for output
    ///
    /// Creates a structured JSON representation of the error suitable
    /// for CLI output.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "details": self.error_details()
            }
        })
    }

    /// Get additional error details for JSON output
    fn error_details(&self) -> Value {
        match self {
            Self::Settings(SettingsError::Write { path, .. })
            | Self::Settings(SettingsError::Persist { path, .. }) => {
                serde_json::json!({
                    "path": path.display().to_string()
                })
            }
            Self::Settings(SettingsError::InvalidValue { key }) => {
                serde_json::json!({ "key": key })
            }
            _ => Value::Null,
        }
    }
}

// Unit Testing
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error() {
        let error = CtlError::usage("unknown key 'NOPE'");
        assert_eq!(error.error_code(), "USAGE_ERROR");
        assert_eq!(error.to_string(), "Usage error: unknown key 'NOPE'");
    }

    #[test]
    fn test_to_json_structure() {
        let error = CtlError::usage("test error");
        let json = error.to_json();

        assert_eq!(json["error"]["code"], "USAGE_ERROR");
        assert_eq!(json["error"]["message"], "Usage error: test error");
        assert!(json["error"]["details"].is_null());
    }

    #[test]
    fn test_settings_error_details_carry_the_key() {
        let error = CtlError::from(SettingsError::InvalidValue {
            key: "SMTP_HOST".to_string(),
        });
        let json = error.to_json();

        assert_eq!(json["error"]["code"], "SETTINGS_ERROR");
        assert_eq!(json["error"]["details"]["key"], "SMTP_HOST");
    }
}
