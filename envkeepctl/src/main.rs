// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! # envkeepctl
//!
//! Command-line tool for inspecting and editing line-oriented
//! `KEY=VALUE` settings files through the envkeep catalogue. Saves go
//! through the engine, so comments, ordering, and unknown keys in the
//! file survive every edit.

#![deny(
    nonstandard_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use envkeep::catalog::Catalog;
use envkeep::store::SettingsStore;
use log::{debug, error};
use serde_json::Value;
use std::process;

use crate::config::Config;
use crate::error::CtlError;
use crate::output::OutputHandler;

/// Command-line tool for schema-driven KEY=VALUE settings files
#[derive(Parser)]
#[command(
    name = "envkeepctl",
    version,
    about = "Inspect and edit a KEY=VALUE settings file through its catalogue",
    long_about = "envkeepctl reads and edits line-oriented KEY=VALUE files \
                  through a typed catalogue of known settings. Saves rewrite \
                  only the keys they touch; comments, ordering, and unknown \
                  keys in the file are preserved byte for byte.",
    after_long_help = "CONFIGURATION SOURCES (highest to lowest priority):\n  \
        1. Command-line arguments (--file, --format)\n  \
        2. Environment variables (ENVKEEP_STORE__FILE, ENVKEEP_OUTPUT__FORMAT)\n  \
        3. Configuration files (envkeepctl.toml, ~/.config/envkeepctl/config.toml, etc.)\n  \
        4. Built-in defaults"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Settings file to operate on [default: ./.env]
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except results
    #[arg(short, long)]
    quiet: bool,

    /// Output format [default: json]
    #[arg(short = 'o', long, value_enum, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available output formats
#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output (default)
    Json,
    /// Human-readable table format
    Table,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Print the settings catalogue as structured data
    Schema,

    /// Show effective values, with defaults filled in
    Values {
        /// Only show this group
        #[arg(long, value_name = "GROUP")]
        group: Option<String>,
    },

    /// Show the effective value of a single key
    Get {
        /// Setting key, e.g. SMTP_HOST
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Write one or more settings to the file
    Set {
        /// KEY=VALUE pairs to write (KEY= clears an optional key)
        #[arg(value_name = "KEY=VALUE", required = true)]
        pairs: Vec<String>,
    },

    /// Clear one or more settings back to their defaults
    Clear {
        /// Setting keys to clear
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    // Override config with CLI arguments
    let config = config.with_cli_overrides(&cli);
    debug!(
        "Operating on settings file {}",
        config.store.file.display()
    );

    match cli.command {
        Some(ref command) => {
            let output =
                OutputHandler::new(config.output.format, cli.quiet);

            match execute_command(command, &config, &output) {
                Ok(response) => {
                    output.success(response);
                }
                Err(e) => {
                    error!("Command failed: {e}");
                    output.error(e);
                    process::exit(1);
                }
            }
        }
        None => {
            handle_no_command(&config);
        }
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    pretty_env_logger::formatted_builder()
        .filter_level(log_level)
        .target(pretty_env_logger::env_logger::Target::Stderr)
        .init();
}

/// Handle the case when no subcommand is provided.
///
/// Shows a store summary followed by clap's auto-generated help text.
fn handle_no_command(config: &Config) {
    use std::io::IsTerminal;

    print_store_summary(config);

    if !config.has_config_file() {
        eprintln!("No configuration file found.");
        if std::io::stdin().is_terminal() {
            eprintln!(
                "  Tip: create envkeepctl.toml to pin the settings file."
            );
        }
        eprintln!();
    }

    // Print clap's auto-generated help (subcommands, options, etc.)
    // This stays in sync automatically as commands are added/removed.
    let mut cmd = Cli::command();
    let _ = cmd.print_help();
}

/// Print a summary of the current store to stderr.
fn print_store_summary(config: &Config) {
    if let Some(ref path) = config.loaded_from {
        eprintln!("Configuration: {}", path.display());
    } else {
        eprintln!("Configuration: (defaults)");
    }
    if config.store.file.exists() {
        eprintln!("Settings file: {}", config.store.file.display());
    } else {
        eprintln!(
            "Settings file: {} (missing)",
            config.store.file.display()
        );
    }
    let catalog = Catalog::builtin();
    let keys: usize =
        catalog.groups().iter().map(|g| g.fields.len()).sum();
    eprintln!(
        "Catalogue:     {} group(s), {} key(s)",
        catalog.groups().len(),
        keys
    );
    eprintln!();
}

/// Execute the given command
fn execute_command(
    command: &Commands,
    config: &Config,
    output: &OutputHandler,
) -> Result<Value, CtlError> {
    let store = SettingsStore::new(&config.store.file);

    match command {
        Commands::Schema => commands::schema::execute(&store),
        Commands::Values { group } => {
            commands::values::execute(&store, group.as_deref())
        }
        Commands::Get { key } => {
            commands::values::execute_get(&store, key)
        }
        Commands::Set { pairs } => {
            commands::set::execute(&store, pairs, output)
        }
        Commands::Clear { keys } => {
            commands::clear::execute(&store, keys, output)
        }
    }
}
