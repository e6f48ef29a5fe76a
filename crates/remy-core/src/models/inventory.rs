// ABOUTME: Household inventory item as supplied by the storage layer
// ABOUTME: Read-only input to the validator; deltas are computed against it, never applied
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Item currently available in the household inventory
///
/// The quantity may be in any unit of the conversion table; the validator
/// canonicalizes it when building a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Stable identifier assigned by the inventory store
    pub id: u64,
    /// Canonical name
    pub name: String,
    /// On-hand quantity in `unit`
    #[serde(rename = "qty", alias = "quantity")]
    pub quantity: f64,
    /// Unit the quantity is recorded in
    #[serde(default)]
    pub unit: String,
    /// Best-before date, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_before: Option<NaiveDate>,
    /// Alternate names this item is known by
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Grams per milliliter, for crossing volume and mass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_g_per_ml: Option<f64>,
    /// Grams per whole item, for crossing count and mass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grams_per_piece: Option<f64>,
}

impl InventoryItem {
    /// Create an item with no aliases or conversion hints
    pub fn new(id: u64, name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            unit: unit.into(),
            best_before: None,
            aliases: Vec::new(),
            density_g_per_ml: None,
            grams_per_piece: None,
        }
    }

    /// Set the best-before date
    #[must_use]
    pub const fn with_best_before(mut self, best_before: NaiveDate) -> Self {
        self.best_before = Some(best_before);
        self
    }

    /// Add alternate names
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Set the density hint (grams per milliliter)
    #[must_use]
    pub const fn with_density(mut self, grams_per_ml: f64) -> Self {
        self.density_g_per_ml = Some(grams_per_ml);
        self
    }

    /// Set the piece weight hint (grams per item)
    #[must_use]
    pub const fn with_piece_weight(mut self, grams_per_piece: f64) -> Self {
        self.grams_per_piece = Some(grams_per_piece);
        self
    }
}
