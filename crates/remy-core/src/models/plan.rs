// ABOUTME: Candidate plan models on both sides of the diff and validator
// ABOUTME: Untrusted Raw* input emitted by the planner and the normalized output contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::diagnostics::Diagnostic;
use super::nutrition::Macros;
use super::units::UnitFamily;
use crate::errors::ValidationError;

// ============================================================================
// Untrusted input
// ============================================================================

/// Plan envelope as emitted by the plan generator
///
/// Candidates stay as raw JSON so one undecodable candidate cannot take the
/// whole plan down with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlan {
    /// Date the plan is for
    pub date: NaiveDate,
    /// Candidate meals, decoded one at a time
    #[serde(default)]
    pub candidates: Vec<Value>,
}

/// One candidate meal as emitted by the planner. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    /// Meal title
    #[serde(default)]
    pub title: Option<String>,
    /// Estimated preparation time in minutes
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub estimated_time_min: Option<f64>,
    /// Declared servings
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub servings: Option<f64>,
    /// Cooking steps, passed through untouched
    #[serde(default)]
    pub steps: Vec<String>,
    /// Free-text ingredient mentions, decoded one at a time so a malformed
    /// mention only costs itself
    #[serde(default)]
    pub ingredients_required: Vec<Value>,
}

impl RawCandidate {
    /// Decode a candidate from untrusted JSON
    ///
    /// # Errors
    ///
    /// Returns the serde error when the value is structurally incompatible
    /// (not an object, or a field of the wrong JSON type).
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

/// Accept a JSON number or a numeric string; `null` reads as absent
fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientNumber;

    impl<'de> Visitor<'de> for LenientNumber {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a numeric string")
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value as f64))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value as f64))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(LenientNumber)
}

/// Free-text ingredient mention as emitted by the planner
///
/// The quantity is either `qty` + `unit`, or one of the canonical
/// `qty_g` / `qty_ml` / `qty_count` fields that normalized output carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawIngredientMention {
    /// Inventory id the planner believes this is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<u64>,
    /// Free-text name
    #[serde(default)]
    pub name: String,
    /// Requested quantity in `unit`
    #[serde(
        default,
        alias = "quantity",
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty: Option<f64>,
    /// Requested unit (free text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Requested grams
    #[serde(
        default,
        alias = "quantity_g",
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty_g: Option<f64>,
    /// Requested milliliters
    #[serde(
        default,
        alias = "quantity_ml",
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty_ml: Option<f64>,
    /// Requested count
    #[serde(
        default,
        alias = "quantity_count",
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty_count: Option<f64>,
}

/// Quantity and unit extracted from a validated mention
#[derive(Debug, Clone, PartialEq)]
pub struct RequestedQuantity {
    /// Amount in `unit`
    pub amount: f64,
    /// Unit as written; empty for a bare count
    pub unit: String,
}

impl RawIngredientMention {
    /// Create a mention with a free-text unit
    pub fn new(name: impl Into<String>, qty: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qty: Some(qty),
            unit: Some(unit.into()),
            ..Self::default()
        }
    }

    /// Decode one mention from untrusted JSON
    ///
    /// Quantities may be numbers or numeric strings.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the value is not an object or a field
    /// holds an incompatible value such as `"qty": "a pinch"`.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Attach an inventory id hint
    #[must_use]
    pub const fn with_id(mut self, ingredient_id: u64) -> Self {
        self.ingredient_id = Some(ingredient_id);
        self
    }

    /// Validate the mention and extract its requested quantity
    ///
    /// `qty` wins over the canonical fields when several are present.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an empty name or a missing, non-finite,
    /// or non-positive quantity.
    pub fn requested_quantity(&self) -> Result<RequestedQuantity, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let (amount, unit) = if let Some(qty) = self.qty {
            (qty, self.unit.clone().unwrap_or_default())
        } else if let Some(grams) = self.qty_g {
            (grams, UnitFamily::Mass.suffix().to_owned())
        } else if let Some(ml) = self.qty_ml {
            (ml, UnitFamily::Volume.suffix().to_owned())
        } else if let Some(count) = self.qty_count {
            (count, UnitFamily::Count.suffix().to_owned())
        } else {
            return Err(ValidationError::MissingQuantity {
                name: name.to_owned(),
            });
        };

        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteQuantity {
                name: name.to_owned(),
            });
        }
        if amount <= 0.0 {
            return Err(ValidationError::NonPositiveQuantity {
                name: name.to_owned(),
                quantity: amount,
            });
        }

        Ok(RequestedQuantity { amount, unit })
    }
}

// ============================================================================
// Normalized output
// ============================================================================

/// Reason an ingredient lands on the shopping shortfall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallReason {
    /// No inventory item matched the mention
    NotInInventory,
    /// Matched, but on-hand stock does not cover the request
    InsufficientStock,
}

/// Canonical quantity split into the per-family optional fields of the wire format
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FamilyFields {
    /// Grams
    pub g: Option<f64>,
    /// Milliliters
    pub ml: Option<f64>,
    /// Count
    pub count: Option<f64>,
}

impl FamilyFields {
    /// Place `value` in the field for `family`
    #[must_use]
    pub const fn of(family: UnitFamily, value: f64) -> Self {
        match family {
            UnitFamily::Mass => Self {
                g: Some(value),
                ml: None,
                count: None,
            },
            UnitFamily::Volume => Self {
                g: None,
                ml: Some(value),
                count: None,
            },
            UnitFamily::Count => Self {
                g: None,
                ml: None,
                count: Some(value),
            },
        }
    }
}

/// Ingredient quantity required to cook a candidate, in canonical units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRequirement {
    /// Inventory id when the mention resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<u64>,
    /// Mention name as written by the planner
    pub name: String,
    /// Grams required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_g: Option<f64>,
    /// Milliliters required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_ml: Option<f64>,
    /// Items required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_count: Option<f64>,
}

impl IngredientRequirement {
    /// Build a requirement from a canonical quantity
    pub fn new(
        ingredient_id: Option<u64>,
        name: impl Into<String>,
        family: UnitFamily,
        quantity: f64,
    ) -> Self {
        let fields = FamilyFields::of(family, quantity);
        Self {
            ingredient_id,
            name: name.into(),
            qty_g: fields.g,
            qty_ml: fields.ml,
            qty_count: fields.count,
        }
    }

    /// Required quantity, whichever family it is in
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.qty_g.or(self.qty_ml).or(self.qty_count).unwrap_or(0.0)
    }
}

/// Inventory adjustment to apply if the candidate is chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryDeltaRecord {
    /// Inventory id to deduct from
    pub ingredient_id: u64,
    /// Grams to deduct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_g: Option<f64>,
    /// Milliliters to deduct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_ml: Option<f64>,
    /// Items to deduct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_count: Option<f64>,
}

impl InventoryDeltaRecord {
    /// Build a delta record from a canonical quantity
    #[must_use]
    pub const fn new(ingredient_id: u64, family: UnitFamily, quantity: f64) -> Self {
        let fields = FamilyFields::of(family, quantity);
        Self {
            ingredient_id,
            use_g: fields.g,
            use_ml: fields.ml,
            use_count: fields.count,
        }
    }

    /// Deducted quantity, whichever family it is in
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.use_g.or(self.use_ml).or(self.use_count).unwrap_or(0.0)
    }
}

/// Ingredient shortfall requiring a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortfallRecord {
    /// Mention name as written by the planner
    pub name: String,
    /// Inventory id when the mention resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<u64>,
    /// Grams still needed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_g: Option<f64>,
    /// Milliliters still needed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_ml: Option<f64>,
    /// Items still needed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_count: Option<f64>,
    /// Why inventory could not cover it
    pub reason: ShortfallReason,
}

impl ShortfallRecord {
    /// Build a shortfall record from a canonical quantity
    pub fn new(
        name: impl Into<String>,
        ingredient_id: Option<u64>,
        family: UnitFamily,
        quantity: f64,
        reason: ShortfallReason,
    ) -> Self {
        let fields = FamilyFields::of(family, quantity);
        Self {
            name: name.into(),
            ingredient_id,
            need_g: fields.g,
            need_ml: fields.ml,
            need_count: fields.count,
            reason,
        }
    }

    /// Needed quantity, whichever family it is in
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.need_g
            .or(self.need_ml)
            .or(self.need_count)
            .unwrap_or(0.0)
    }
}

/// Candidate after reconciliation against the inventory snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCandidate {
    /// Meal title
    pub title: String,
    /// Estimated preparation time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_min: Option<u32>,
    /// Servings the macros were divided by
    pub servings: u32,
    /// Cooking steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Validated ingredient requirements in canonical units
    pub ingredients_required: Vec<IngredientRequirement>,
    /// Deductions to apply if chosen
    pub inventory_deltas: Vec<InventoryDeltaRecord>,
    /// What must be bought
    pub shopping_shortfall: Vec<ShortfallRecord>,
    /// Recomputed macros per serving
    pub macros_per_serving: Macros,
    /// Policy decisions taken while normalizing
    pub diagnostics: Vec<Diagnostic>,
}

/// Complete normalized plan for a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlan {
    /// Date the plan is for
    pub date: NaiveDate,
    /// One normalized candidate per submitted candidate, in submission order
    pub candidates: Vec<NormalizedCandidate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_quantity_prefers_free_text() {
        let mention = RawIngredientMention {
            qty_g: Some(50.0),
            ..RawIngredientMention::new("rice", 1.0, "cup")
        };
        let requested = mention.requested_quantity().unwrap();
        assert!((requested.amount - 1.0).abs() < f64::EPSILON);
        assert_eq!(requested.unit, "cup");
    }

    #[test]
    fn test_requested_quantity_canonical_fields() {
        let mention = RawIngredientMention {
            name: "Lemon".into(),
            qty_count: Some(2.0),
            ..RawIngredientMention::default()
        };
        let requested = mention.requested_quantity().unwrap();
        assert_eq!(requested.unit, "count");
    }

    #[test]
    fn test_requested_quantity_rejects_malformed() {
        assert_eq!(
            RawIngredientMention::new("  ", 1.0, "g").requested_quantity(),
            Err(ValidationError::EmptyName)
        );
        assert!(matches!(
            RawIngredientMention::new("salt", 0.0, "g").requested_quantity(),
            Err(ValidationError::NonPositiveQuantity { .. })
        ));
        assert!(matches!(
            RawIngredientMention::new("salt", f64::NAN, "g").requested_quantity(),
            Err(ValidationError::NonFiniteQuantity { .. })
        ));
    }

    #[test]
    fn test_mention_accepts_numeric_strings() {
        let mention = RawIngredientMention::from_value(&serde_json::json!({
            "name": "rice",
            "qty": " 200 ",
            "unit": "g",
            "qty_ml": null
        }))
        .unwrap();
        assert_eq!(mention.qty, Some(200.0));
        assert!(mention.qty_ml.is_none());

        let error =
            RawIngredientMention::from_value(&serde_json::json!({"name": "salt", "qty": "a pinch"}))
                .unwrap_err();
        assert!(error.to_string().contains("a pinch"));
    }

    #[test]
    fn test_candidate_keeps_mentions_raw_and_reads_fractional_servings() {
        let candidate = RawCandidate::from_value(&serde_json::json!({
            "title": "Rice Bowl",
            "servings": 2.5,
            "estimated_time_min": "25",
            "ingredients_required": [
                {"name": "rice", "qty": 200, "unit": "g"},
                {"name": "salt", "qty": "a pinch", "unit": "g"}
            ]
        }))
        .unwrap();
        assert_eq!(candidate.servings, Some(2.5));
        assert_eq!(candidate.estimated_time_min, Some(25.0));
        assert_eq!(candidate.ingredients_required.len(), 2);
    }

    #[test]
    fn test_shortfall_serializes_unit_suffix() {
        let record = ShortfallRecord::new(
            "Lemon",
            None,
            UnitFamily::Count,
            2.0,
            ShortfallReason::NotInInventory,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["need_count"], 2.0);
        assert_eq!(json["reason"], "not_in_inventory");
        assert!(json.get("ingredient_id").is_none());
        assert!(json.get("need_g").is_none());
    }
}
