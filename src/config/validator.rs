// ABOUTME: Validator configuration loaded from environment variables
// ABOUTME: Fuzzy-match threshold, default unit family, lot tie-break policy, and parallelism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Diff and validator configuration
//!
//! Environment-only, like the rest of the service configuration. Unset
//! variables take the defaults; set-but-unparsable variables are errors.
//!
//! | Variable                   | Default            |
//! |----------------------------|--------------------|
//! | `REMY_FUZZY_THRESHOLD`     | `0.75`             |
//! | `REMY_DEFAULT_FAMILY`      | `mass`             |
//! | `REMY_LOT_PREFERENCE`      | `largest_quantity` |
//! | `REMY_BUILTIN_DENSITIES`   | `false`            |
//! | `REMY_PARALLEL_CANDIDATES` | `true`             |

use remy_core::constants::matching::DEFAULT_FUZZY_THRESHOLD;
use remy_core::models::UnitFamily;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

const FUZZY_THRESHOLD_VAR: &str = "REMY_FUZZY_THRESHOLD";
const DEFAULT_FAMILY_VAR: &str = "REMY_DEFAULT_FAMILY";
const LOT_PREFERENCE_VAR: &str = "REMY_LOT_PREFERENCE";
const BUILTIN_DENSITIES_VAR: &str = "REMY_BUILTIN_DENSITIES";
const PARALLEL_CANDIDATES_VAR: &str = "REMY_PARALLEL_CANDIDATES";

/// Which lot wins when several inventory items match a mention equally well
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LotPreference {
    /// Deplete the largest on-hand quantity first, then lowest id
    #[default]
    LargestQuantity,
    /// Deplete the earliest best-before date first (undated lots last),
    /// then largest quantity, then lowest id
    NearestExpiry,
}

impl fmt::Display for LotPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LargestQuantity => f.write_str("largest_quantity"),
            Self::NearestExpiry => f.write_str("nearest_expiry"),
        }
    }
}

impl FromStr for LotPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "largest_quantity" | "largest" => Ok(Self::LargestQuantity),
            "nearest_expiry" | "expiry" | "fefo" => Ok(Self::NearestExpiry),
            other => Err(format!("unknown lot preference '{other}'")),
        }
    }
}

/// Diff and validator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Minimum similarity (0, 1] for a fuzzy or alias binding
    pub fuzzy_threshold: f64,
    /// Family assumed for an unmatched mention whose unit is unknown
    pub default_family: UnitFamily,
    /// Tie-break between equally good lots
    pub lot_preference: LotPreference,
    /// Fall back to the built-in density reference when an item has no hint
    pub builtin_densities: bool,
    /// Normalize the candidates of a plan on the rayon pool
    pub parallel_candidates: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            default_family: UnitFamily::Mass,
            lot_preference: LotPreference::LargestQuantity,
            builtin_densities: false,
            parallel_candidates: true,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unparsable or the
    /// resulting configuration fails [`ValidatorConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            fuzzy_threshold: parse_env(FUZZY_THRESHOLD_VAR)?.unwrap_or(defaults.fuzzy_threshold),
            default_family: parse_env(DEFAULT_FAMILY_VAR)?.unwrap_or(defaults.default_family),
            lot_preference: parse_env(LOT_PREFERENCE_VAR)?.unwrap_or(defaults.lot_preference),
            builtin_densities: parse_bool_env(BUILTIN_DENSITIES_VAR)?
                .unwrap_or(defaults.builtin_densities),
            parallel_candidates: parse_bool_env(PARALLEL_CANDIDATES_VAR)?
                .unwrap_or(defaults.parallel_candidates),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` if the fuzzy threshold is not in (0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fuzzy_threshold > 0.0 && self.fuzzy_threshold <= 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "fuzzy_threshold must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Set the fuzzy threshold
    #[must_use]
    pub const fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Set the lot preference
    #[must_use]
    pub const fn with_lot_preference(mut self, preference: LotPreference) -> Self {
        self.lot_preference = preference;
        self
    }

    /// Enable or disable the built-in density reference
    #[must_use]
    pub const fn with_builtin_densities(mut self, enabled: bool) -> Self {
        self.builtin_densities = enabled;
        self
    }

    /// Enable or disable parallel candidate normalization
    #[must_use]
    pub const fn with_parallel_candidates(mut self, enabled: bool) -> Self {
        self.parallel_candidates = enabled;
        self
    }
}

/// Read and parse an optional environment variable
fn parse_env<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                key,
                message: e.to_string(),
            }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::EnvVar(e)),
    }
}

/// Read an optional boolean variable, accepting `1`/`0`/`yes`/`no` as well
fn parse_bool_env(key: &'static str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            other => Err(ConfigError::Parse {
                key,
                message: format!("expected a boolean, got '{other}'"),
            }),
        },
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::EnvVar(e)),
    }
}
