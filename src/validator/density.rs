// ABOUTME: Built-in density and piece-weight reference for common pantry ingredients
// ABOUTME: Consulted only when configured and when an inventory item carries no hint of its own
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::LazyLock;

use super::similarity::normalize_name;
use super::units::ConversionHints;

/// Density information for an ingredient
///
/// Grams per milliliter for liquids and pourable solids, grams per piece for
/// countable items.
#[derive(Debug, Clone, Copy)]
struct IngredientDensity {
    grams_per_ml: Option<f64>,
    grams_per_piece: Option<f64>,
    aliases: &'static [&'static str],
}

impl IngredientDensity {
    const fn per_ml(grams_per_ml: f64) -> Self {
        Self {
            grams_per_ml: Some(grams_per_ml),
            grams_per_piece: None,
            aliases: &[],
        }
    }

    const fn per_piece(grams_per_piece: f64) -> Self {
        Self {
            grams_per_ml: None,
            grams_per_piece: Some(grams_per_piece),
            aliases: &[],
        }
    }

    const fn both(grams_per_ml: f64, grams_per_piece: f64) -> Self {
        Self {
            grams_per_ml: Some(grams_per_ml),
            grams_per_piece: Some(grams_per_piece),
            aliases: &[],
        }
    }

    const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    const fn hints(&self) -> ConversionHints {
        ConversionHints {
            density_g_per_ml: self.grams_per_ml,
            grams_per_piece: self.grams_per_piece,
        }
    }
}

/// Approximate averages; item-level hints always take precedence
const DENSITY_TABLE: &[(&str, IngredientDensity)] = &[
    // Proteins
    ("chicken breast", IngredientDensity::per_ml(0.58)),
    ("chicken thigh", IngredientDensity::per_ml(0.60)),
    ("ground beef", IngredientDensity::per_ml(0.54).with_aliases(&["beef mince"])),
    ("egg", IngredientDensity::both(1.03, 50.0)),
    ("tofu", IngredientDensity::per_ml(0.52)),
    ("greek yogurt", IngredientDensity::per_ml(1.05).with_aliases(&["yogurt"])),
    // Grains
    ("rice", IngredientDensity::per_ml(0.77).with_aliases(&["white rice"])),
    ("oats", IngredientDensity::per_ml(0.36).with_aliases(&["rolled oats"])),
    ("pasta", IngredientDensity::per_ml(0.45).with_aliases(&["dry pasta"])),
    ("flour", IngredientDensity::per_ml(0.50).with_aliases(&["all purpose flour"])),
    // Produce
    ("banana", IngredientDensity::per_piece(120.0)),
    ("apple", IngredientDensity::per_piece(180.0)),
    ("lemon", IngredientDensity::per_piece(100.0)),
    ("avocado", IngredientDensity::per_piece(150.0)),
    ("spinach", IngredientDensity::per_ml(0.12).with_aliases(&["baby spinach"])),
    ("broccoli", IngredientDensity::per_ml(0.36)),
    ("carrot", IngredientDensity::both(0.50, 60.0)),
    ("onion", IngredientDensity::both(0.63, 110.0)),
    ("garlic clove", IngredientDensity::per_piece(3.0).with_aliases(&["garlic"])),
    ("tomato", IngredientDensity::both(0.60, 150.0)),
    ("bell pepper", IngredientDensity::per_piece(120.0).with_aliases(&["capsicum"])),
    ("potato", IngredientDensity::per_piece(150.0)),
    // Dairy and fats
    ("milk", IngredientDensity::per_ml(1.03).with_aliases(&["whole milk"])),
    ("butter", IngredientDensity::per_ml(0.91)),
    ("cheese", IngredientDensity::per_ml(0.45).with_aliases(&["cheddar"])),
    ("olive oil", IngredientDensity::per_ml(0.92).with_aliases(&["evoo"])),
    ("vegetable oil", IngredientDensity::per_ml(0.92).with_aliases(&["canola oil"])),
    // Pantry
    ("sugar", IngredientDensity::per_ml(0.85).with_aliases(&["granulated sugar"])),
    ("honey", IngredientDensity::per_ml(1.42)),
    ("water", IngredientDensity::per_ml(1.0)),
    ("broth", IngredientDensity::per_ml(1.0).with_aliases(&["stock", "vegetable broth", "chicken broth"])),
    ("soy sauce", IngredientDensity::per_ml(1.15).with_aliases(&["tamari"])),
    ("black beans", IngredientDensity::per_ml(0.72)),
    ("chickpeas", IngredientDensity::per_ml(0.72).with_aliases(&["garbanzo beans"])),
    ("lentils", IngredientDensity::per_ml(0.77)),
    ("peanut butter", IngredientDensity::per_ml(1.07)),
];

/// Normalized name and alias index over the table
static DENSITY_INDEX: LazyLock<HashMap<String, IngredientDensity>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for (name, density) in DENSITY_TABLE {
        index.entry(normalize_name(name)).or_insert(*density);
        for alias in density.aliases {
            index.entry(normalize_name(alias)).or_insert(*density);
        }
    }
    index
});

/// Look up built-in hints for an ingredient name
///
/// Exact match on the normalized name or a known alias. No partial
/// matching: a wrong density is worse than the 1 ml ≈ 1 g fallback.
#[must_use]
pub fn builtin_hints(ingredient_name: &str) -> Option<ConversionHints> {
    DENSITY_INDEX
        .get(&normalize_name(ingredient_name))
        .map(IngredientDensity::hints)
}

/// Number of names (including aliases) the reference can answer for
#[must_use]
pub fn known_names() -> usize {
    DENSITY_INDEX.len()
}
