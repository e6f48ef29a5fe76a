// ABOUTME: Ingredient resolver binding free-text mentions to inventory items
// ABOUTME: Id hints, exact and alias matching, thresholded fuzzy matching, deterministic tie-breaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingredient resolution
//!
//! Each mention gets exactly one [`Binding`]. Resolution order:
//!
//! 1. `ingredient_id` hint naming an existing item whose name or aliases
//!    agree with the mention at or above the threshold
//! 2. exact match on the normalized canonical name
//! 3. exact match on a normalized alias
//! 4. best fuzzy score over names and aliases, at or above the threshold
//!
//! Ties on score go to the preferred lot (see [`LotPreference`]), then to
//! the lowest id. The resolver never invents an inventory id.

use std::cmp::Ordering;

use remy_core::models::{RawIngredientMention, Stage};

use super::diagnostics::Diagnostics;
use super::similarity::{normalize_name, score_normalized};
use super::snapshot::{InventorySnapshot, StockedItem};
use super::units::CanonicalQuantity;
use crate::config::{LotPreference, ValidatorConfig};

/// Outcome of resolving one mention
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Bound by id hint or exact canonical name
    Matched {
        /// Inventory id
        item_id: u64,
    },
    /// Bound through an alias or a fuzzy match
    MatchedByAlias {
        /// Inventory id
        item_id: u64,
        /// Name or alias the mention matched on
        matched_on: String,
        /// Similarity score in `[threshold, 1]`
        score: f64,
    },
    /// No inventory item is close enough
    Unmatched,
}

impl Binding {
    /// Inventory id, if bound
    #[must_use]
    pub const fn item_id(&self) -> Option<u64> {
        match self {
            Self::Matched { item_id } | Self::MatchedByAlias { item_id, .. } => Some(*item_id),
            Self::Unmatched => None,
        }
    }

    /// Whether the mention bound to an inventory item
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        !matches!(self, Self::Unmatched)
    }
}

/// Mention joined to its binding, with the quantity in canonical units
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIngredient {
    /// Mention name as written, trimmed
    pub name: String,
    /// Inventory binding
    pub binding: Binding,
    /// Requested quantity in canonical units
    ///
    /// In the bound item's family when the units could be bridged,
    /// otherwise in the mention's own family.
    pub quantity: CanonicalQuantity,
}

impl ResolvedIngredient {
    /// Bound item whose family the quantity is expressed in
    ///
    /// `None` for unmatched mentions and for matched mentions whose unit
    /// could not be converted into the item's family.
    #[must_use]
    pub fn tracked_item<'s>(&self, snapshot: &'s InventorySnapshot) -> Option<&'s StockedItem> {
        self.binding
            .item_id()
            .and_then(|id| snapshot.get(id))
            .filter(|item| item.family == self.quantity.family)
    }
}

/// Matches mentions against one inventory snapshot
#[derive(Debug, Clone, Copy)]
pub struct IngredientResolver<'a> {
    snapshot: &'a InventorySnapshot,
    threshold: f64,
    preference: LotPreference,
}

impl<'a> IngredientResolver<'a> {
    /// Create a resolver over `snapshot`
    #[must_use]
    pub const fn new(snapshot: &'a InventorySnapshot, config: &ValidatorConfig) -> Self {
        Self {
            snapshot,
            threshold: config.fuzzy_threshold,
            preference: config.lot_preference,
        }
    }

    /// Resolve one mention, recording non-exact decisions in `diagnostics`
    pub fn resolve(&self, mention: &RawIngredientMention, diagnostics: &mut Diagnostics) -> Binding {
        let name = mention.name.trim();
        let key = normalize_name(name);

        if let Some(id) = mention.ingredient_id {
            if let Some(binding) = self.resolve_hint(id, name, &key, diagnostics) {
                return binding;
            }
        }

        if let Some(item) = self.best_of(
            self.snapshot
                .items()
                .iter()
                .filter(|item| item.normalized_name == key),
        ) {
            return Binding::Matched { item_id: item.id() };
        }

        let alias_hit = self.best_of(
            self.snapshot
                .items()
                .iter()
                .filter(|item| item.normalized_aliases.contains(&key)),
        );
        if let Some(item) = alias_hit {
            let matched_on = item
                .normalized_aliases
                .iter()
                .position(|alias| *alias == key)
                .and_then(|index| item.item.aliases.get(index))
                .cloned()
                .unwrap_or_else(|| item.item.name.clone());
            diagnostics.info(
                Stage::IngredientResolver,
                name,
                format!(
                    "matched inventory item {} '{}' by alias '{matched_on}'",
                    item.id(),
                    item.item.name
                ),
            );
            return Binding::MatchedByAlias {
                item_id: item.id(),
                matched_on,
                score: 1.0,
            };
        }

        match self.best_fuzzy(&key) {
            Some((item, matched_on, score)) => {
                diagnostics.info(
                    Stage::IngredientResolver,
                    name,
                    format!(
                        "fuzzy matched inventory item {} '{}' via '{matched_on}' (score {score:.2})",
                        item.id(),
                        item.item.name
                    ),
                );
                Binding::MatchedByAlias {
                    item_id: item.id(),
                    matched_on,
                    score,
                }
            }
            None => {
                diagnostics.warning(
                    Stage::IngredientResolver,
                    name,
                    "no inventory match; routed to shopping shortfall",
                );
                Binding::Unmatched
            }
        }
    }

    /// Check an id hint against the mention name
    ///
    /// `None` sends the mention on to name resolution.
    fn resolve_hint(
        &self,
        id: u64,
        name: &str,
        key: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Binding> {
        let Some(item) = self.snapshot.get(id) else {
            diagnostics.info(
                Stage::IngredientResolver,
                name,
                format!("ingredient id {id} is not in inventory; resolving by name"),
            );
            return None;
        };

        if item.normalized_name == key {
            return Some(Binding::Matched { item_id: id });
        }

        let (matched_on, score) = item_score(item, key);
        if score < self.threshold {
            diagnostics.info(
                Stage::IngredientResolver,
                name,
                format!(
                    "ingredient id {id} is '{}', which does not match (score {score:.2}); resolving by name",
                    item.item.name
                ),
            );
            return None;
        }

        diagnostics.info(
            Stage::IngredientResolver,
            name,
            format!(
                "ingredient id {id} '{}' accepted via '{matched_on}' (score {score:.2})",
                item.item.name
            ),
        );
        Some(Binding::MatchedByAlias {
            item_id: id,
            matched_on: matched_on.to_owned(),
            score,
        })
    }

    /// Highest-scoring item at or above the threshold, with what it matched on
    fn best_fuzzy(&self, key: &str) -> Option<(&'a StockedItem, String, f64)> {
        let snapshot: &'a InventorySnapshot = self.snapshot;
        let mut best: Option<(&'a StockedItem, String, f64)> = None;

        for item in snapshot.items() {
            let (matched_on, score) = item_score(item, key);
            if score < self.threshold {
                continue;
            }

            let better = match &best {
                None => true,
                Some((current, _, current_score)) => match score.total_cmp(current_score) {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    Ordering::Equal => self.prefer(item, current) == Ordering::Less,
                },
            };
            if better {
                best = Some((item, matched_on.to_owned(), score));
            }
        }

        best
    }

    /// Preferred lot among equally good candidates
    fn best_of<'s>(&self, items: impl Iterator<Item = &'s StockedItem>) -> Option<&'s StockedItem> {
        items.min_by(|a, b| self.prefer(a, b))
    }

    /// `Less` when `a` should be bound before `b`
    fn prefer(&self, a: &StockedItem, b: &StockedItem) -> Ordering {
        let larger_first = || b.on_hand.total_cmp(&a.on_hand);
        let by_id = || a.id().cmp(&b.id());

        match self.preference {
            LotPreference::LargestQuantity => larger_first().then_with(by_id),
            LotPreference::NearestExpiry => {
                let expiry = match (a.item.best_before, b.item.best_before) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                expiry.then_with(larger_first).then_with(by_id)
            }
        }
    }
}

/// Best score of `key` against an item's name and aliases, with the text it matched
fn item_score<'s>(item: &'s StockedItem, key: &str) -> (&'s str, f64) {
    let mut best = (
        item.item.name.as_str(),
        score_normalized(key, &item.normalized_name),
    );
    for (alias, normalized) in item.item.aliases.iter().zip(&item.normalized_aliases) {
        let score = score_normalized(key, normalized);
        if score > best.1 {
            best = (alias.as_str(), score);
        }
    }
    best
}
