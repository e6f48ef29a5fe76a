// ABOUTME: Nutrition reference table and macro estimate models
// ABOUTME: MacroProfile per 100 canonical units keyed by inventory id, Macros per serving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Macronutrients per 100 canonical units (g, ml, or items) of one ingredient
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroProfile {
    /// Energy in kcal
    #[serde(default)]
    pub kcal: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein_g: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carb_g: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat_g: f64,
}

impl MacroProfile {
    /// Create a profile from per-100-unit values
    #[must_use]
    pub const fn new(kcal: f64, protein_g: f64, carb_g: f64, fat_g: f64) -> Self {
        Self {
            kcal,
            protein_g,
            carb_g,
            fat_g,
        }
    }

    /// Copy with negative or non-finite fields replaced by zero
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            kcal: clean(self.kcal),
            protein_g: clean(self.protein_g),
            carb_g: clean(self.carb_g),
            fat_g: clean(self.fat_g),
        }
    }
}

/// Nutrition reference supplied by the nutrition data collaborator
///
/// Serialized as a JSON object keyed by inventory id:
/// `{"1": {"kcal": 177, "protein_g": 24.2, "carb_g": 0, "fat_g": 8.4}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutritionReference {
    entries: BTreeMap<u64, MacroProfile>,
}

impl NutritionReference {
    /// Create an empty reference
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the profile for an ingredient id
    pub fn insert(&mut self, ingredient_id: u64, profile: MacroProfile) {
        self.entries.insert(ingredient_id, profile);
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, ingredient_id: u64, profile: MacroProfile) -> Self {
        self.insert(ingredient_id, profile);
        self
    }

    /// Look up the profile for an ingredient id
    #[must_use]
    pub fn get(&self, ingredient_id: u64) -> Option<&MacroProfile> {
        self.entries.get(&ingredient_id)
    }

    /// Number of ingredients with reference data
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the reference has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Macronutrient estimate per serving
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    /// Energy in kcal
    pub kcal: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carb_g: f64,
    /// Fat in grams
    pub fat_g: f64,
}
