// ABOUTME: JSON loaders for candidate plans and nutrition reference tables
// ABOUTME: File and string entry points that map I/O and decode failures into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use remy_core::errors::{AppError, AppResult};
use remy_core::models::{NutritionReference, RawPlan};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Read and decode a JSON file
fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let resource = path.display().to_string();
    let json = fs::read_to_string(path)
        .map_err(|e| AppError::from(e).with_resource(resource.clone()))?;
    serde_json::from_str(&json).map_err(|e| AppError::from(e).with_resource(resource))
}

/// Decode a plan envelope
///
/// Only the envelope (`date`, `candidates`) must be well formed; each
/// candidate is decoded later on its own.
///
/// # Errors
///
/// Returns `AppError` with `SerializationError` if the envelope is malformed.
pub fn plan_from_json_str(json: &str) -> AppResult<RawPlan> {
    Ok(serde_json::from_str(json)?)
}

/// Load a plan envelope from a file
///
/// # Errors
///
/// Returns `AppError` if the file is missing, unreadable, or malformed.
pub fn load_plan(path: impl AsRef<Path>) -> AppResult<RawPlan> {
    let plan: RawPlan = read_json(path.as_ref())?;
    debug!(date = %plan.date, candidates = plan.candidates.len(), "Plan loaded");
    Ok(plan)
}

/// Load a nutrition reference (`{"<id>": {kcal, protein_g, carb_g, fat_g}}`) from a file
///
/// # Errors
///
/// Returns `AppError` if the file is missing, unreadable, or malformed.
pub fn load_nutrition(path: impl AsRef<Path>) -> AppResult<NutritionReference> {
    let reference: NutritionReference = read_json(path.as_ref())?;
    debug!(entries = reference.len(), "Nutrition reference loaded");
    Ok(reference)
}
