// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Tool configuration for envkeepctl
//!
//! This configures the CLI itself, not the settings file it edits.
//! Sources are merged with a clear precedence order:
//!
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables (prefixed with `ENVKEEP_`)
//! 3. The first configuration file found (TOML format)
//! 4. Default values (lowest priority)
//!
//! # Configuration Sources
//!
//! ## Configuration Files (Optional)
//! The first existing file wins:
//! - Explicit path provided via `--config` (required to exist if given)
//! - `envkeepctl.toml` (current directory)
//! - `~/.config/envkeepctl/config.toml` (user)
//! - `$XDG_CONFIG_HOME/envkeepctl/config.toml` (XDG override)
//! - `/etc/envkeep/envkeepctl.toml` (system-wide)
//!
//! With no file at all, envkeepctl operates on `./.env` with defaults
//! and environment variables.
//!
//! ## Environment Variables
//! Environment variables use the prefix `ENVKEEP_` with double
//! underscores as section separators:
//! - `ENVKEEP_STORE__FILE=/srv/app/.env`
//! - `ENVKEEP_OUTPUT__FORMAT=table`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [store]
//! file = "/srv/app/.env"
//!
//! [output]
//! format = "table"
//! ```

use crate::output::Format;
use crate::Cli;
use config::{ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for envkeepctl
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the configuration file that was loaded, if any
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
    /// Settings store configuration
    pub store: StoreConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Which settings file the tool operates on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the `KEY=VALUE` file
    pub file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("./.env"),
        }
    }
}

/// Default presentation of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format used when `--format` is not given
    pub format: Format,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::Json,
        }
    }
}

impl Config {
    /// Check if a configuration file was loaded
    #[must_use]
    pub fn has_config_file(&self) -> bool {
        self.loaded_from.is_some()
    }

    /// Load configuration from multiple sources
    ///
    /// Configuration files are completely optional. If none is found
    /// the defaults apply, still subject to environment overrides.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional explicit path to a configuration
    ///   file. If None, searches standard locations. If Some() but the
    ///   file doesn't exist, returns an error.
    ///
    /// # Errors
    ///
    /// Returns ConfigError if:
    /// - Explicit configuration file path provided but file doesn't exist
    /// - Configuration file has invalid syntax
    /// - Environment variables have invalid values
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?);

        let mut loaded_path: Option<PathBuf> = None;
        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                log::debug!("Loading config from: {}", path.display());
                builder = builder.add_source(
                    File::from(path.clone())
                        .format(FileFormat::Toml)
                        .required(false),
                );
                loaded_path = Some(path);
                break;
            }
        }

        // An explicit config path that doesn't exist is an error
        if let Some(explicit_path) = config_path {
            if !PathBuf::from(explicit_path).exists() {
                return Err(ConfigError::Message(format!(
                    "Specified configuration file not found: {explicit_path}"
                )));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ENVKEEP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.loaded_from = loaded_path;

        if config.loaded_from.is_none() {
            log::info!(
                "No configuration files found, using defaults and \
                 environment variables"
            );
        }

        Ok(config)
    }

    /// Apply command-line argument overrides
    ///
    /// CLI arguments have the highest precedence and override any
    /// values loaded from configuration files or environment variables.
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(ref file) = cli.file {
            self.store.file = PathBuf::from(file);
        }

        if let Some(format) = cli.format {
            self.output.format = format.into();
        }

        self
    }

    /// Get configuration file search paths
    ///
    /// Returns paths in order of precedence (highest priority first):
    /// 1. `envkeepctl.toml` (current directory)
    /// 2. `~/.config/envkeepctl/config.toml` (user)
    /// 3. `$XDG_CONFIG_HOME/envkeepctl/config.toml` (XDG override)
    /// 4. `/etc/envkeep/envkeepctl.toml` (system-wide)
    fn get_config_paths(config_path: Option<&str>) -> Vec<PathBuf> {
        // If an explicit path is provided, use only that
        if let Some(path) = config_path {
            return vec![PathBuf::from(path)];
        }

        let mut paths = Vec::new();

        // 1. Current directory
        paths.push(PathBuf::from("envkeepctl.toml"));

        // 2. User config (canonical path)
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(
                PathBuf::from(home).join(".config/envkeepctl/config.toml"),
            );
        }

        // 3. XDG config directory
        if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(xdg_config).join("envkeepctl/config.toml"),
            );
        }

        // 4. System-wide
        paths.push(PathBuf::from("/etc/envkeep/envkeepctl.toml"));

        paths
    }
}

// Unit Testing
#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_cli(
        file: Option<String>,
        format: Option<crate::OutputFormat>,
    ) -> Cli {
        Cli {
            config: None,
            file,
            format,
            verbose: 0,
            quiet: false,
            command: None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.store.file, PathBuf::from("./.env"));
        assert_eq!(config.output.format, Format::Json);
        assert!(!config.has_config_file());
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let cli = create_test_cli(
            Some("/srv/app/.env".to_string()),
            Some(crate::OutputFormat::Table),
        );
        let config = Config::default().with_cli_overrides(&cli);

        assert_eq!(config.store.file, PathBuf::from("/srv/app/.env"));
        assert_eq!(config.output.format, Format::Table);
    }

    #[test]
    fn test_cli_without_overrides_keeps_config() {
        let cli = create_test_cli(None, None);
        let config = Config::default().with_cli_overrides(&cli);

        assert_eq!(config.store.file, PathBuf::from("./.env"));
        assert_eq!(config.output.format, Format::Json);
    }

    #[test]
    fn test_explicit_missing_config_file_is_an_error() {
        let result = Config::load(Some("/nonexistent/envkeepctl.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_config_path_is_the_only_candidate() {
        let paths =
            Config::get_config_paths(Some("/tmp/custom/envkeepctl.toml"));
        assert_eq!(
            paths,
            vec![PathBuf::from("/tmp/custom/envkeepctl.toml")]
        );
    }

    #[test]
    fn test_search_paths_include_cwd_and_system() {
        let paths = Config::get_config_paths(None);
        assert_eq!(paths[0], PathBuf::from("envkeepctl.toml"));
        assert!(paths
            .contains(&PathBuf::from("/etc/envkeep/envkeepctl.toml")));
    }
}
