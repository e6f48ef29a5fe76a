// ABOUTME: normalize subcommand reconciling a plan file with an inventory file
// ABOUTME: Prints the normalized plan JSON to stdout and a summary to the log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use remy_planner::errors::AppError;
use remy_planner::models::NutritionReference;
use remy_planner::validator::{load_nutrition, load_plan, DiffValidator, InventorySnapshot};
use tracing::info;

/// Normalize `plan` against `inventory` and print the result
pub fn run(plan: &Path, inventory: &Path, nutrition: Option<&Path>, compact: bool) -> Result<()> {
    let validator = DiffValidator::from_env().map_err(AppError::from)?;
    let snapshot = InventorySnapshot::from_json_file(inventory, validator.config())?;
    let reference = match nutrition {
        Some(path) => load_nutrition(path)?,
        None => NutritionReference::new(),
    };
    let raw_plan = load_plan(plan)?;

    info!(
        inventory_items = snapshot.len(),
        nutrition_entries = reference.len(),
        candidates = raw_plan.candidates.len(),
        "Normalizing plan"
    );

    let normalized = validator.normalize_plan(&raw_plan, &snapshot, &reference);
    let json = if compact {
        serde_json::to_string(&normalized)?
    } else {
        serde_json::to_string_pretty(&normalized)?
    };
    println!("{json}");
    Ok(())
}
