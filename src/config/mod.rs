// ABOUTME: Configuration module for the diff and validator
// ABOUTME: Environment-driven settings plus the configuration error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration errors
pub mod error;
/// Diff and validator settings
pub mod validator;

pub use error::ConfigError;
pub use validator::{LotPreference, ValidatorConfig};
