// ABOUTME: Data models shared between the validator, its loaders, and the CLI
// ABOUTME: Re-exports inventory, plan, nutrition, unit, and diagnostic types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Diagnostic records
pub mod diagnostics;
/// Inventory items from the storage layer
pub mod inventory;
/// Nutrition reference and macro estimates
pub mod nutrition;
/// Untrusted plan input and normalized plan output
pub mod plan;
/// Units and unit families
pub mod units;

pub use diagnostics::{Diagnostic, Severity, Stage};
pub use inventory::InventoryItem;
pub use nutrition::{MacroProfile, Macros, NutritionReference};
pub use plan::{
    FamilyFields, IngredientRequirement, InventoryDeltaRecord, NormalizedCandidate,
    NormalizedPlan, RawCandidate, RawIngredientMention, RawPlan, RequestedQuantity,
    ShortfallReason, ShortfallRecord,
};
pub use units::{Unit, UnitFamily};
