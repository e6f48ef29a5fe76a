// ABOUTME: Configuration error types for validator settings loaded from the environment
// ABOUTME: Defines error variants for unparsable values and out-of-range thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for validator settings.

use remy_core::errors::{AppError, ErrorCode};
use std::env;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable is set but not valid unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Environment variable is set but could not be parsed
    #[error("Parse error for {key}: {message}")]
    Parse {
        /// Variable name
        key: &'static str,
        /// What went wrong
        message: String,
    },

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match error {
            ConfigError::ValueOutOfRange(_) => ErrorCode::ConfigInvalid,
            ConfigError::EnvVar(_) | ConfigError::Parse { .. } => ErrorCode::ConfigError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
