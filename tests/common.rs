// ABOUTME: Shared test utilities and fixtures for diff and validator integration tests
// ABOUTME: Provides quiet logging setup, a household inventory, nutrition data, and plan builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `remy_planner`
//!
//! Fixtures mirror a small household: a few weighed proteins and
//! vegetables, a carton of broth, and counted produce.

use chrono::NaiveDate;
use remy_planner::config::ValidatorConfig;
use remy_planner::models::{
    Diagnostic, InventoryItem, MacroProfile, NormalizedCandidate, NutritionReference,
    RawIngredientMention, RawPlan, Severity, Stage,
};
use remy_planner::validator::InventorySnapshot;
use serde_json::{json, Value};
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const CHICKEN_THIGH: u64 = 1;
pub const BROCCOLI: u64 = 2;
pub const RICE: u64 = 3;
pub const BROTH: u64 = 4;
pub const LEMON: u64 = 5;
pub const GROUND_BEEF: u64 = 6;
pub const OLIVE_OIL: u64 = 7;

/// Date used by every fixture plan
pub fn plan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

/// Household inventory used across the integration tests
pub fn household_items() -> Vec<InventoryItem> {
    vec![
        InventoryItem::new(CHICKEN_THIGH, "Chicken Thigh, boneless", 600.0, "g")
            .with_aliases(["chicken thighs"]),
        InventoryItem::new(BROCCOLI, "Broccoli", 500.0, "g"),
        InventoryItem::new(RICE, "Rice", 1.0, "kg").with_aliases(["white rice", "jasmine rice"]),
        InventoryItem::new(BROTH, "Vegetable Broth", 250.0, "ml").with_aliases(["stock"]),
        InventoryItem::new(LEMON, "Lemon", 1.0, "count").with_piece_weight(100.0),
        InventoryItem::new(GROUND_BEEF, "Ground Beef", 600.0, "g"),
        InventoryItem::new(OLIVE_OIL, "Olive Oil", 500.0, "ml").with_density(0.92),
    ]
}

/// Snapshot of [`household_items`] with the default configuration
pub fn household_snapshot() -> InventorySnapshot {
    InventorySnapshot::build(household_items(), &ValidatorConfig::default())
}

/// Nutrition reference for the household inventory, per 100 canonical units
pub fn household_nutrition() -> NutritionReference {
    NutritionReference::new()
        .with(CHICKEN_THIGH, MacroProfile::new(177.0, 24.2, 0.0, 8.4))
        .with(BROCCOLI, MacroProfile::new(34.0, 2.8, 6.6, 0.4))
        .with(RICE, MacroProfile::new(130.0, 2.7, 28.0, 0.3))
        .with(BROTH, MacroProfile::new(5.0, 0.3, 0.9, 0.1))
        .with(GROUND_BEEF, MacroProfile::new(250.0, 26.0, 0.0, 15.0))
        .with(OLIVE_OIL, MacroProfile::new(884.0, 0.0, 0.0, 100.0))
}

/// Mention with a canonical count quantity and no free-text unit
pub fn count_mention(name: &str, count: f64) -> RawIngredientMention {
    RawIngredientMention {
        name: name.to_owned(),
        qty_count: Some(count),
        ..RawIngredientMention::default()
    }
}

/// Candidate JSON as the planner emits it
pub fn candidate_json(title: &str, servings: i64, ingredients: &[RawIngredientMention]) -> Value {
    json!({
        "title": title,
        "estimated_time_min": 30,
        "servings": servings,
        "steps": ["Prep", "Cook", "Serve"],
        "ingredients_required": ingredients,
    })
}

/// Plan wrapping the given candidate values
pub fn plan_of(candidates: Vec<Value>) -> RawPlan {
    RawPlan {
        date: plan_date(),
        candidates,
    }
}

/// Diagnostics of `candidate` emitted by `stage` at `severity`
pub fn diagnostics_at(
    candidate: &NormalizedCandidate,
    stage: Stage,
    severity: Severity,
) -> Vec<&Diagnostic> {
    candidate
        .diagnostics
        .iter()
        .filter(|d| d.stage == stage && d.severity == severity)
        .collect()
}

/// Whether any diagnostic concerns `ingredient` and mentions `needle`
pub fn has_diagnostic(candidate: &NormalizedCandidate, ingredient: &str, needle: &str) -> bool {
    candidate.diagnostics.iter().any(|d| {
        d.ingredient.as_deref() == Some(ingredient) && d.message.to_lowercase().contains(needle)
    })
}
