// ABOUTME: Macro recomputation from canonical ingredient quantities and the nutrition reference
// ABOUTME: Sums per-ingredient contributions and divides by the effective servings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use remy_core::constants::nutrition::REFERENCE_UNITS;
use remy_core::models::{Macros, NutritionReference, Stage};

use super::diagnostics::Diagnostics;
use super::resolver::ResolvedIngredient;
use super::snapshot::InventorySnapshot;

/// Servings to divide by: the declared value, or 1 when missing or below 1
///
/// Fractional declarations round to the nearest whole serving.
pub fn effective_servings(declared: Option<f64>, diagnostics: &mut Diagnostics) -> u32 {
    match declared {
        Some(servings) if servings.is_finite() && servings >= 1.0 => {
            let whole = servings.round();
            if (whole - servings).abs() > f64::EPSILON {
                diagnostics.field_warning(
                    Stage::MacroRecomputation,
                    "servings",
                    format!("servings {servings} is not a whole number; using {whole}"),
                );
            }
            whole.min(f64::from(u32::MAX)) as u32
        }
        Some(servings) => {
            diagnostics.field_warning(
                Stage::MacroRecomputation,
                "servings",
                format!("servings {servings} is below 1; using 1"),
            );
            1
        }
        None => {
            diagnostics.field_warning(
                Stage::MacroRecomputation,
                "servings",
                "servings missing; using 1",
            );
            1
        }
    }
}

/// Per-serving macros for the requested (unclamped) quantities
///
/// Ingredients without a reference entry contribute nothing and get an
/// info diagnostic. The result is unrounded.
pub fn recompute(
    ingredients: &[ResolvedIngredient],
    snapshot: &InventorySnapshot,
    reference: &NutritionReference,
    servings: u32,
    diagnostics: &mut Diagnostics,
) -> Macros {
    let mut total = Macros::default();

    for ingredient in ingredients {
        let Some(id) = ingredient.binding.item_id() else {
            diagnostics.info(
                Stage::MacroRecomputation,
                &ingredient.name,
                "not in inventory; no nutrition reference, contributes zero macros",
            );
            continue;
        };

        if ingredient.tracked_item(snapshot).is_none() {
            diagnostics.info(
                Stage::MacroRecomputation,
                &ingredient.name,
                format!(
                    "quantity is in {} but item {id} is tracked in another family; contributes zero macros",
                    ingredient.quantity.family
                ),
            );
            continue;
        }

        let Some(profile) = reference.get(id) else {
            diagnostics.info(
                Stage::MacroRecomputation,
                &ingredient.name,
                format!("no nutrition reference for item {id}; contributes zero macros"),
            );
            continue;
        };

        let profile = profile.sanitized();
        let scale = ingredient.quantity.value.max(0.0) / REFERENCE_UNITS;
        total.kcal += profile.kcal * scale;
        total.protein_g += profile.protein_g * scale;
        total.carb_g += profile.carb_g * scale;
        total.fat_g += profile.fat_g * scale;
    }

    let servings = f64::from(servings.max(1));
    Macros {
        kcal: total.kcal / servings,
        protein_g: total.protein_g / servings,
        carb_g: total.carb_g / servings,
        fat_g: total.fat_g / servings,
    }
}
