// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to stage new contents for {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
    #[error("value for {key} must not contain line breaks")]
    InvalidValue { key: String },
}

pub type Result<T> = std::result::Result<T, SettingsError>;
