// ABOUTME: Core types and constants for the Remy dinner planner
// ABOUTME: Foundation crate with error handling, plan/inventory/nutrition models, and unit constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Remy Core
//!
//! Foundation crate providing the shared types and constants of the Remy
//! diff and validator. It changes rarely so the validator crate can iterate
//! on algorithms without rebuilding the data model.
//!
//! ## Modules
//!
//! - **errors**: `AppError`/`ErrorCode` plus the ingredient-scoped `ValidationError` and `UnitError`
//! - **constants**: conversion factors, matching thresholds, and the name qualifier list
//! - **models**: inventory items, untrusted plan input, normalized plan output, nutrition reference

/// Unified error handling with error codes and ingredient-scoped errors
pub mod errors;

/// Conversion factors, thresholds, and name-normalization word lists
pub mod constants;

/// Inventory, plan, nutrition, and unit models
pub mod models;
