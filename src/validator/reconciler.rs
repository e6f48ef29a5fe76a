// ABOUTME: Inventory reconciler clamping requested quantities to on-hand stock
// ABOUTME: Produces ordered inventory deltas and shopping shortfalls for one candidate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Inventory reconciliation
//!
//! Every candidate is clamped against the original snapshot; sibling
//! candidates never see each other's consumption. Within a candidate a
//! running balance per item guarantees that the deltas for an item never
//! sum past its on-hand quantity.

use std::collections::HashMap;

use remy_core::models::{ShortfallReason, Stage, UnitFamily};

use super::diagnostics::Diagnostics;
use super::resolver::ResolvedIngredient;
use super::snapshot::InventorySnapshot;

/// Quantity to deduct from one inventory item, in its canonical unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryDelta {
    /// Position of the mention in the candidate's ingredient list
    pub ingredient: usize,
    /// Inventory id
    pub ingredient_id: u64,
    /// Family of the item
    pub family: UnitFamily,
    /// Positive amount to deduct
    pub quantity: f64,
}

/// Quantity that must be bought
#[derive(Debug, Clone, PartialEq)]
pub struct ShortfallEntry {
    /// Position of the mention in the candidate's ingredient list
    pub ingredient: usize,
    /// Mention name as written
    pub name: String,
    /// Inventory id when the mention resolved
    pub ingredient_id: Option<u64>,
    /// Family the quantity is expressed in
    pub family: UnitFamily,
    /// Positive amount still needed
    pub quantity: f64,
    /// Why inventory did not cover it
    pub reason: ShortfallReason,
}

/// Reconciler output for one candidate, both lists in ingredient order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Deductions to apply if the candidate is chosen
    pub deltas: Vec<InventoryDelta>,
    /// Unmet need
    pub shortfalls: Vec<ShortfallEntry>,
}

impl Reconciliation {
    /// Delta recorded for the mention at `ingredient`
    #[must_use]
    pub fn delta_for(&self, ingredient: usize) -> Option<&InventoryDelta> {
        self.deltas.iter().find(|delta| delta.ingredient == ingredient)
    }

    /// Shortfall recorded for the mention at `ingredient`
    #[must_use]
    pub fn shortfall_for(&self, ingredient: usize) -> Option<&ShortfallEntry> {
        self.shortfalls
            .iter()
            .find(|entry| entry.ingredient == ingredient)
    }

    /// Sum of this candidate's deltas for one item
    #[must_use]
    pub fn deducted(&self, ingredient_id: u64) -> f64 {
        self.deltas
            .iter()
            .filter(|delta| delta.ingredient_id == ingredient_id)
            .map(|delta| delta.quantity)
            .sum()
    }
}

/// Clamp the resolved ingredients of one candidate against `snapshot`
pub fn reconcile(
    ingredients: &[ResolvedIngredient],
    snapshot: &InventorySnapshot,
    diagnostics: &mut Diagnostics,
) -> Reconciliation {
    let mut remaining: HashMap<u64, f64> = HashMap::new();
    let mut result = Reconciliation::default();

    for (index, ingredient) in ingredients.iter().enumerate() {
        let requested = ingredient.quantity.value;

        let Some(item) = ingredient.tracked_item(snapshot) else {
            // Unmatched, or matched but in a family the item is not tracked in
            let reason = if ingredient.binding.is_matched() {
                ShortfallReason::InsufficientStock
            } else {
                ShortfallReason::NotInInventory
            };
            if requested > 0.0 {
                result.shortfalls.push(ShortfallEntry {
                    ingredient: index,
                    name: ingredient.name.clone(),
                    ingredient_id: ingredient.binding.item_id(),
                    family: ingredient.quantity.family,
                    quantity: requested,
                    reason,
                });
            }
            continue;
        };

        let balance = remaining.entry(item.id()).or_insert(item.on_hand);
        let deductable = requested.min(*balance).max(0.0);
        *balance -= deductable;

        if deductable > 0.0 {
            result.deltas.push(InventoryDelta {
                ingredient: index,
                ingredient_id: item.id(),
                family: item.family,
                quantity: deductable,
            });
        }

        let shortfall = requested - deductable;
        if shortfall > 0.0 {
            diagnostics.warning(
                Stage::InventoryReconciler,
                &ingredient.name,
                format!(
                    "requested {requested:.1} {unit} of item {id} but only {deductable:.1} {unit} available; {shortfall:.1} {unit} added to shortfall",
                    unit = item.family.base_unit(),
                    id = item.id(),
                ),
            );
            result.shortfalls.push(ShortfallEntry {
                ingredient: index,
                name: ingredient.name.clone(),
                ingredient_id: Some(item.id()),
                family: item.family,
                quantity: shortfall,
                reason: ShortfallReason::InsufficientStock,
            });
        }
    }

    result
}
