// ABOUTME: Measurement units and unit families for ingredient quantities
// ABOUTME: Maps free-text unit spellings onto the fixed mass/volume/count conversion table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::conversion::{
    GRAMS_PER_KG, GRAMS_PER_LB, GRAMS_PER_OZ, ML_PER_CUP, ML_PER_L, ML_PER_TBSP, ML_PER_TSP,
};

/// Unit family an ingredient is tracked in
///
/// Each family has one canonical unit: grams, milliliters, or a plain count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitFamily {
    /// Weighed ingredients, canonical unit grams
    #[default]
    Mass,
    /// Liquids, canonical unit milliliters
    Volume,
    /// Discrete items, canonical unit is the item itself
    Count,
}

impl UnitFamily {
    /// Canonical unit for this family
    #[must_use]
    pub const fn base_unit(&self) -> Unit {
        match self {
            Self::Mass => Unit::Grams,
            Self::Volume => Unit::Milliliters,
            Self::Count => Unit::Count,
        }
    }

    /// Suffix used in output field names (`qty_g`, `use_ml`, `need_count`)
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Mass => "g",
            Self::Volume => "ml",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mass => "mass",
            Self::Volume => "volume",
            Self::Count => "count",
        };
        f.write_str(name)
    }
}

impl FromStr for UnitFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mass" | "weight" => Ok(Self::Mass),
            "volume" | "liquid" => Ok(Self::Volume),
            "count" | "pieces" => Ok(Self::Count),
            other => Err(format!("unknown unit family '{other}'")),
        }
    }
}

/// Measurement unit from the fixed conversion table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Grams (mass base)
    Grams,
    /// Kilograms (1000 g)
    Kilograms,
    /// Pounds (453.592 g)
    Pounds,
    /// Ounces (28.3495 g)
    Ounces,
    /// Milliliters (volume base)
    Milliliters,
    /// Liters (1000 ml)
    Liters,
    /// US cups (236.588 ml)
    Cups,
    /// Tablespoons (14.787 ml)
    Tablespoons,
    /// Teaspoons (4.929 ml)
    Teaspoons,
    /// Whole items (count base)
    Count,
}

impl Unit {
    /// Family this unit measures
    #[must_use]
    pub const fn family(&self) -> UnitFamily {
        match self {
            Self::Grams | Self::Kilograms | Self::Pounds | Self::Ounces => UnitFamily::Mass,
            Self::Milliliters | Self::Liters | Self::Cups | Self::Tablespoons | Self::Teaspoons => {
                UnitFamily::Volume
            }
            Self::Count => UnitFamily::Count,
        }
    }

    /// Multiplier from this unit into its family's canonical unit
    #[must_use]
    pub const fn factor_to_base(&self) -> f64 {
        match self {
            Self::Grams | Self::Milliliters | Self::Count => 1.0,
            Self::Kilograms => GRAMS_PER_KG,
            Self::Pounds => GRAMS_PER_LB,
            Self::Ounces => GRAMS_PER_OZ,
            Self::Liters => ML_PER_L,
            Self::Cups => ML_PER_CUP,
            Self::Tablespoons => ML_PER_TBSP,
            Self::Teaspoons => ML_PER_TSP,
        }
    }

    /// Get the abbreviation for display
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Kilograms => "kg",
            Self::Pounds => "lb",
            Self::Ounces => "oz",
            Self::Milliliters => "ml",
            Self::Liters => "l",
            Self::Cups => "cup",
            Self::Tablespoons => "tbsp",
            Self::Teaspoons => "tsp",
            Self::Count => "count",
        }
    }

    /// Parse a free-text unit spelling
    ///
    /// Case-insensitive; accepts abbreviations, plurals, and the bare-count
    /// spellings planners emit (empty string, "each", "whole", "pc").
    /// Returns `None` for anything outside the conversion table.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().trim_end_matches('.').to_lowercase();
        let unit = match normalized.as_str() {
            "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Self::Grams,
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Self::Kilograms,
            "lb" | "lbs" | "pound" | "pounds" => Self::Pounds,
            "oz" | "ounce" | "ounces" => Self::Ounces,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Self::Milliliters
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Self::Liters,
            "cup" | "cups" | "c" => Self::Cups,
            "tbsp" | "tbs" | "tablespoon" | "tablespoons" => Self::Tablespoons,
            "tsp" | "teaspoon" | "teaspoons" => Self::Teaspoons,
            "" | "count" | "ct" | "pc" | "pcs" | "piece" | "pieces" | "each" | "ea" | "whole"
            | "unit" | "units" | "item" | "items" | "x" => Self::Count,
            _ => return None,
        };
        Some(unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
