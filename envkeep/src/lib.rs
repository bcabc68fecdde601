// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

pub mod cache;
pub mod catalog;
pub mod error;
pub mod line_parser;
pub mod merge_writer;
pub mod resolver;
pub mod store;
