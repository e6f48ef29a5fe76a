// ABOUTME: Read-only inventory snapshot with on-hand quantities canonicalized per unit family
// ABOUTME: Builds lookup indexes and normalized names once, shared across candidates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use remy_core::errors::{AppError, AppResult};
use remy_core::models::{InventoryItem, UnitFamily};
use tracing::{debug, warn};

use super::density::builtin_hints;
use super::similarity::normalize_name;
use super::units::{parse_unit, ConversionHints};
use crate::config::ValidatorConfig;

/// Inventory item with its on-hand quantity in canonical units
#[derive(Debug, Clone, PartialEq)]
pub struct StockedItem {
    /// Item as supplied
    pub item: InventoryItem,
    /// Family the item is tracked in
    pub family: UnitFamily,
    /// On-hand quantity in the family's canonical unit, never negative
    pub on_hand: f64,
    /// Comparison key of the canonical name
    pub normalized_name: String,
    /// Comparison keys of the aliases, parallel to `item.aliases`
    pub normalized_aliases: Vec<String>,
    /// Effective conversion hints
    pub hints: ConversionHints,
}

impl StockedItem {
    /// Inventory id
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.item.id
    }
}

/// Immutable view of the household inventory for one normalization call
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    items: Vec<StockedItem>,
    by_id: HashMap<u64, usize>,
}

impl InventorySnapshot {
    /// Build a snapshot from inventory items
    ///
    /// Quantities are converted into the base unit of their family. An item
    /// whose unit is unknown is tracked in the configured default family as
    /// if its quantity were already canonical. Negative or non-finite
    /// quantities count as nothing on hand. When an id repeats, the first
    /// item wins.
    #[must_use]
    pub fn build(items: Vec<InventoryItem>, config: &ValidatorConfig) -> Self {
        let mut snapshot = Self {
            items: Vec::with_capacity(items.len()),
            by_id: HashMap::with_capacity(items.len()),
        };

        for item in items {
            if snapshot.by_id.contains_key(&item.id) {
                warn!(item_id = item.id, name = %item.name, "Duplicate inventory id ignored");
                continue;
            }

            let quantity = if item.quantity.is_finite() && item.quantity >= 0.0 {
                item.quantity
            } else {
                warn!(
                    item_id = item.id,
                    quantity = item.quantity,
                    "Invalid on-hand quantity treated as zero"
                );
                0.0
            };

            let (family, on_hand) = match parse_unit(&item.unit) {
                Ok(unit) => (unit.family(), quantity * unit.factor_to_base()),
                Err(error) => {
                    warn!(
                        item_id = item.id,
                        %error,
                        family = %config.default_family,
                        "Inventory unit not recognized; quantity taken as canonical"
                    );
                    (config.default_family, quantity)
                }
            };

            let own_hints = ConversionHints {
                density_g_per_ml: item.density_g_per_ml,
                grams_per_piece: item.grams_per_piece,
            }
            .sanitized();
            let hints = if config.builtin_densities {
                builtin_hints(&item.name).map_or(own_hints, |builtin| own_hints.or(builtin))
            } else {
                own_hints
            };

            let stocked = StockedItem {
                family,
                on_hand,
                normalized_name: normalize_name(&item.name),
                normalized_aliases: item.aliases.iter().map(|a| normalize_name(a)).collect(),
                hints,
                item,
            };
            snapshot.by_id.insert(stocked.id(), snapshot.items.len());
            snapshot.items.push(stocked);
        }

        debug!(items = snapshot.items.len(), "Inventory snapshot built");
        snapshot
    }

    /// Build a snapshot with the default configuration
    #[must_use]
    pub fn from_items(items: Vec<InventoryItem>) -> Self {
        Self::build(items, &ValidatorConfig::default())
    }

    /// Decode a JSON array of inventory items
    ///
    /// # Errors
    ///
    /// Returns `AppError` with `SerializationError` if the JSON is not an
    /// array of inventory items.
    pub fn from_json_str(json: &str, config: &ValidatorConfig) -> AppResult<Self> {
        let items: Vec<InventoryItem> = serde_json::from_str(json)?;
        Ok(Self::build(items, config))
    }

    /// Load a JSON array of inventory items from a file
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the file cannot be read or decoded.
    pub fn from_json_file(path: impl AsRef<Path>, config: &ValidatorConfig) -> AppResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| AppError::from(e).with_resource(path.display().to_string()))?;
        Self::from_json_str(&json, config)
            .map_err(|e| e.with_resource(path.display().to_string()))
    }

    /// Look up an item by id
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&StockedItem> {
        self.by_id.get(&id).map(|&index| &self.items[index])
    }

    /// Items in supply order
    #[must_use]
    pub fn items(&self) -> &[StockedItem] {
        &self.items
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the inventory is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_canonicalizes_units() {
        let snapshot = InventorySnapshot::from_items(vec![
            InventoryItem::new(1, "Ground Beef", 2.0, "lb"),
            InventoryItem::new(2, "Vegetable Broth", 1.0, "l"),
            InventoryItem::new(3, "Lemon", 3.0, ""),
        ]);

        let beef = snapshot.get(1).unwrap();
        assert_eq!(beef.family, UnitFamily::Mass);
        assert!((beef.on_hand - 907.184).abs() < 1e-9);

        let broth = snapshot.get(2).unwrap();
        assert_eq!(broth.family, UnitFamily::Volume);
        assert!((broth.on_hand - 1000.0).abs() < 1e-9);

        assert_eq!(snapshot.get(3).unwrap().family, UnitFamily::Count);
    }

    #[test]
    fn test_unknown_unit_and_negative_quantity() {
        let snapshot = InventorySnapshot::from_items(vec![
            InventoryItem::new(1, "Saffron", 5.0, "pinch"),
            InventoryItem::new(2, "Rice", -10.0, "g"),
        ]);
        let saffron = snapshot.get(1).unwrap();
        assert_eq!(saffron.family, UnitFamily::Mass);
        assert!((saffron.on_hand - 5.0).abs() < f64::EPSILON);
        assert!(snapshot.get(2).unwrap().on_hand.abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let snapshot = InventorySnapshot::from_items(vec![
            InventoryItem::new(7, "Rice", 500.0, "g"),
            InventoryItem::new(7, "Pasta", 300.0, "g"),
        ]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(7).unwrap().item.name, "Rice");
    }

    #[test]
    fn test_builtin_hints_only_when_enabled() {
        let items = vec![InventoryItem::new(1, "Broccoli", 400.0, "g")];
        let plain = InventorySnapshot::from_items(items.clone());
        assert_eq!(plain.get(1).unwrap().hints, ConversionHints::default());

        let config = ValidatorConfig::default().with_builtin_densities(true);
        let enriched = InventorySnapshot::build(items, &config);
        assert_eq!(enriched.get(1).unwrap().hints.density_g_per_ml, Some(0.36));
    }
}
