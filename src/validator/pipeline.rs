// ABOUTME: Diff and validator pipeline turning untrusted candidates into normalized candidates
// ABOUTME: Runs resolution, unit normalization, reconciliation, and macro recomputation per candidate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Diff & Validator
//!
//! Deterministic post-processing of planner output. Every submitted
//! candidate produces exactly one normalized candidate; nothing inside a
//! normalization pass is fatal. Decisions that are not exact are recorded
//! as diagnostics on the candidate that took them.
//!
//! ```rust,no_run
//! use remy_planner::config::ValidatorConfig;
//! use remy_planner::models::{InventoryItem, NutritionReference, RawPlan};
//! use remy_planner::validator::{DiffValidator, InventorySnapshot};
//!
//! # fn run(plan: RawPlan) {
//! let config = ValidatorConfig::default();
//! let snapshot = InventorySnapshot::build(
//!     vec![InventoryItem::new(1, "Chicken Thigh", 600.0, "g")],
//!     &config,
//! );
//! let validator = DiffValidator::new(config);
//! let normalized = validator.normalize_plan(&plan, &snapshot, &NutritionReference::new());
//! assert_eq!(normalized.candidates.len(), plan.candidates.len());
//! # }
//! ```

use std::collections::HashMap;

use rayon::prelude::*;
use remy_core::errors::ValidationError;
use remy_core::models::{
    IngredientRequirement, InventoryDeltaRecord, Macros, NormalizedCandidate, NormalizedPlan,
    NutritionReference, RawCandidate, RawIngredientMention, RawPlan, Severity, ShortfallReason,
    ShortfallRecord, Stage, Unit,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::diagnostics::Diagnostics;
use super::macros::{effective_servings, recompute};
use super::reconciler::{reconcile, Reconciliation};
use super::resolver::{IngredientResolver, ResolvedIngredient};
use super::snapshot::InventorySnapshot;
use super::units::{
    normalize_requested, round_macro, round_output, round_output_within, ConversionHints,
};
use crate::config::{ConfigError, ValidatorConfig};

/// Normalizes candidate plans against an inventory snapshot
#[derive(Debug, Clone, Default)]
pub struct DiffValidator {
    config: ValidatorConfig,
}

impl DiffValidator {
    /// Create a validator with the given configuration
    #[must_use]
    pub const fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Create a validator configured from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a `REMY_*` variable is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        ValidatorConfig::from_env().map(Self::new)
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Normalize every candidate of a plan, preserving submission order
    pub fn normalize_plan(
        &self,
        plan: &RawPlan,
        snapshot: &InventorySnapshot,
        nutrition: &NutritionReference,
    ) -> NormalizedPlan {
        let candidates: Vec<NormalizedCandidate> = if self.config.parallel_candidates {
            plan.candidates
                .par_iter()
                .map(|value| self.normalize_value(value, snapshot, nutrition))
                .collect()
        } else {
            plan.candidates
                .iter()
                .map(|value| self.normalize_value(value, snapshot, nutrition))
                .collect()
        };

        let warnings: usize = candidates
            .iter()
            .map(|c| {
                c.diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Warning)
                    .count()
            })
            .sum();
        info!(
            date = %plan.date,
            candidates = candidates.len(),
            warnings,
            "Plan normalized"
        );

        NormalizedPlan {
            date: plan.date,
            candidates,
        }
    }

    /// Normalize one candidate given as untrusted JSON
    ///
    /// A value that does not decode as a candidate still yields a candidate:
    /// empty lists, zero macros, one serving, and a warning.
    pub fn normalize_value(
        &self,
        value: &Value,
        snapshot: &InventorySnapshot,
        nutrition: &NutritionReference,
    ) -> NormalizedCandidate {
        match RawCandidate::from_value(value) {
            Ok(candidate) => self.normalize_candidate(&candidate, snapshot, nutrition),
            Err(error) => {
                let mut diagnostics = Diagnostics::new();
                diagnostics.field_warning(
                    Stage::InputValidation,
                    "candidate",
                    format!("candidate could not be decoded: {error}"),
                );
                NormalizedCandidate {
                    title: value
                        .get("title")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_owned(),
                    estimated_time_min: None,
                    servings: 1,
                    steps: Vec::new(),
                    ingredients_required: Vec::new(),
                    inventory_deltas: Vec::new(),
                    shopping_shortfall: Vec::new(),
                    macros_per_serving: Macros::default(),
                    diagnostics: diagnostics.into_vec(),
                }
            }
        }
    }

    /// Normalize one decoded candidate
    #[instrument(
        skip_all,
        fields(
            title = candidate.title.as_deref().unwrap_or_default(),
            ingredients = candidate.ingredients_required.len()
        )
    )]
    pub fn normalize_candidate(
        &self,
        candidate: &RawCandidate,
        snapshot: &InventorySnapshot,
        nutrition: &NutritionReference,
    ) -> NormalizedCandidate {
        let mut diagnostics = Diagnostics::new();

        let estimated_time_min = candidate.estimated_time_min.and_then(|minutes| {
            let converted = (0.0..=f64::from(u32::MAX))
                .contains(&minutes)
                .then(|| minutes.round() as u32);
            if converted.is_none() {
                diagnostics.field_warning(
                    Stage::InputValidation,
                    "estimated_time_min",
                    format!("estimated time {minutes} is out of range; dropped"),
                );
            }
            converted
        });

        if candidate.ingredients_required.is_empty() {
            diagnostics.field_warning(
                Stage::InputValidation,
                "ingredients_required",
                "candidate lists no ingredients",
            );
        }

        let resolved =
            self.resolve_ingredients(&candidate.ingredients_required, snapshot, &mut diagnostics);
        let reconciliation = reconcile(&resolved, snapshot, &mut diagnostics);
        let servings = effective_servings(candidate.servings, &mut diagnostics);
        let macros = recompute(&resolved, snapshot, nutrition, servings, &mut diagnostics);
        let (inventory_deltas, shopping_shortfall) =
            render_reconciliation(&resolved, &reconciliation, snapshot);

        NormalizedCandidate {
            title: candidate.title.as_deref().unwrap_or_default().trim().to_owned(),
            estimated_time_min,
            servings,
            steps: candidate.steps.clone(),
            ingredients_required: render_requirements(&resolved),
            inventory_deltas,
            shopping_shortfall,
            macros_per_serving: Macros {
                kcal: round_macro(macros.kcal),
                protein_g: round_macro(macros.protein_g),
                carb_g: round_macro(macros.carb_g),
                fat_g: round_macro(macros.fat_g),
            },
            diagnostics: diagnostics.into_vec(),
        }
    }

    /// Decode, validate, resolve, and canonicalize the mentions of one candidate
    ///
    /// Mentions that do not decode or fail validation are excluded with a
    /// warning; the rest of the candidate is unaffected.
    pub fn resolve_ingredients(
        &self,
        mentions: &[Value],
        snapshot: &InventorySnapshot,
        diagnostics: &mut Diagnostics,
    ) -> Vec<ResolvedIngredient> {
        let resolver = IngredientResolver::new(snapshot, &self.config);
        let mut resolved = Vec::with_capacity(mentions.len());

        for (index, value) in mentions.iter().enumerate() {
            let field = format!("ingredients_required[{index}]");
            let mention = match RawIngredientMention::from_value(value) {
                Ok(mention) => mention,
                Err(error) => {
                    let message =
                        format!("ingredient could not be decoded: {error}; ingredient excluded");
                    let name = value
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|name| !name.is_empty());
                    if let Some(name) = name {
                        diagnostics.warning(Stage::InputValidation, name, message);
                    } else {
                        diagnostics.field_warning(Stage::InputValidation, &field, message);
                    }
                    continue;
                }
            };

            let requested = match mention.requested_quantity() {
                Ok(requested) => requested,
                Err(error) => {
                    let message = format!("{error}; ingredient excluded");
                    if error == ValidationError::EmptyName {
                        diagnostics.field_warning(Stage::InputValidation, &field, message);
                    } else {
                        diagnostics.warning(Stage::InputValidation, mention.name.trim(), message);
                    }
                    continue;
                }
            };

            let name = mention.name.trim();
            let binding = resolver.resolve(&mention, diagnostics);

            let (family, hints) = match binding.item_id().and_then(|id| snapshot.get(id)) {
                Some(item) => (item.family, item.hints),
                None => (
                    Unit::parse(&requested.unit).map_or(self.config.default_family, |u| u.family()),
                    ConversionHints::default(),
                ),
            };

            let quantity = normalize_requested(name, &requested, family, &hints, diagnostics)
                .unwrap_or_else(|own_family| own_family);

            resolved.push(ResolvedIngredient {
                name: name.to_owned(),
                binding,
                quantity,
            });
        }

        resolved
    }
}

fn render_requirements(resolved: &[ResolvedIngredient]) -> Vec<IngredientRequirement> {
    resolved
        .iter()
        .map(|ingredient| {
            IngredientRequirement::new(
                ingredient.binding.item_id(),
                ingredient.name.clone(),
                ingredient.quantity.family,
                round_output(ingredient.quantity.value, ingredient.quantity.family),
            )
        })
        .collect()
}

/// Render the reconciliation of one candidate for output
///
/// A mention's rendered shortfall is its rendered requirement minus its
/// rendered delta, so `qty == use + need` holds on the emitted values.
/// Rounded deltas for an item never sum past its on-hand stock.
fn render_reconciliation(
    resolved: &[ResolvedIngredient],
    reconciliation: &Reconciliation,
    snapshot: &InventorySnapshot,
) -> (Vec<InventoryDeltaRecord>, Vec<ShortfallRecord>) {
    let mut budget: HashMap<u64, f64> = HashMap::new();
    let mut deltas = Vec::with_capacity(reconciliation.deltas.len());
    let mut shortfalls = Vec::with_capacity(reconciliation.shortfalls.len());

    for (index, ingredient) in resolved.iter().enumerate() {
        let family = ingredient.quantity.family;
        let requested = round_output(ingredient.quantity.value, family);

        let mut used = 0.0;
        if let Some(delta) = reconciliation.delta_for(index) {
            let available = budget.entry(delta.ingredient_id).or_insert_with(|| {
                snapshot
                    .get(delta.ingredient_id)
                    .map_or(0.0, |item| item.on_hand)
            });
            let quantity =
                round_output_within(delta.quantity, delta.family, available.min(requested));
            if quantity > 0.0 {
                *available -= quantity;
                used = quantity;
                deltas.push(InventoryDeltaRecord::new(
                    delta.ingredient_id,
                    delta.family,
                    quantity,
                ));
            }
        }

        let need = round_output((requested - used).max(0.0), family);
        if need <= 0.0 {
            continue;
        }
        // Without an unrounded shortfall the remainder comes from the rounded cap
        shortfalls.push(reconciliation.shortfall_for(index).map_or_else(
            || {
                ShortfallRecord::new(
                    ingredient.name.clone(),
                    ingredient.binding.item_id(),
                    family,
                    need,
                    ShortfallReason::InsufficientStock,
                )
            },
            |entry| {
                ShortfallRecord::new(
                    entry.name.clone(),
                    entry.ingredient_id,
                    entry.family,
                    need,
                    entry.reason,
                )
            },
        ));
    }

    (deltas, shortfalls)
}
