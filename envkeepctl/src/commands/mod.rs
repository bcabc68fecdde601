// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Command implementations for envkeepctl

pub mod clear;
pub mod schema;
pub mod set;
pub mod values;
