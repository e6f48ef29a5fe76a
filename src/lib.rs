// ABOUTME: Main library entry point for the Remy dinner planner diff and validator
// ABOUTME: Reconciles untrusted candidate meal plans against a household inventory snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Remy Planner
//!
//! Deterministic post-processing for candidate dinner plans. A plan
//! generator proposes candidate meals with free-text ingredient lists; this
//! crate reconciles each candidate with the true inventory state:
//!
//! - **Ingredient resolution**: free-text mentions bind to inventory items
//!   by id, exact name, alias, or thresholded fuzzy match
//! - **Unit normalization**: quantities convert to grams, milliliters, or counts
//! - **Inventory reconciliation**: deductions clamp to on-hand stock, the
//!   rest becomes a shopping shortfall
//! - **Macro recomputation**: per-serving kcal, protein, carbs, and fat from
//!   a nutrition reference
//! - **Diagnostics**: every non-exact decision is recorded on the candidate
//!
//! Inventory is never mutated here; deltas are computed for an external
//! apply step.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use remy_planner::config::ValidatorConfig;
//! use remy_planner::errors::AppResult;
//! use remy_planner::validator::{load_nutrition, load_plan, DiffValidator, InventorySnapshot};
//!
//! fn main() -> AppResult<()> {
//!     let config = ValidatorConfig::default();
//!     let snapshot = InventorySnapshot::from_json_file("inventory.json", &config)?;
//!     let nutrition = load_nutrition("nutrition.json")?;
//!     let plan = load_plan("plan.json")?;
//!
//!     let normalized = DiffValidator::new(config).normalize_plan(&plan, &snapshot, &nutrition);
//!     println!("{}", serde_json::to_string_pretty(&normalized)?);
//!     Ok(())
//! }
//! ```

/// Validator configuration from the environment
pub mod config;

/// Structured logging setup
pub mod logging;

/// Diff and validator stages
pub mod validator;

// Re-export the foundation crate under the paths consumers expect
pub use remy_core::constants;
pub use remy_core::errors;
pub use remy_core::models;
