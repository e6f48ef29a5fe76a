// ABOUTME: Application constants for unit conversion, name matching, and output rounding
// ABOUTME: Fixed conversion table factors and the qualifier words stripped from ingredient names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Conversion factors into the canonical unit of each family.
///
/// The table is fixed; changing a factor changes every stored delta, so
/// downstream consumers treat these as part of the compatibility surface.
pub mod conversion {
    /// Grams per kilogram
    pub const GRAMS_PER_KG: f64 = 1000.0;
    /// Grams per pound
    pub const GRAMS_PER_LB: f64 = 453.592;
    /// Grams per ounce
    pub const GRAMS_PER_OZ: f64 = 28.3495;

    /// Milliliters per liter
    pub const ML_PER_L: f64 = 1000.0;
    /// Milliliters per US cup
    pub const ML_PER_CUP: f64 = 236.588;
    /// Milliliters per tablespoon
    pub const ML_PER_TBSP: f64 = 14.787;
    /// Milliliters per teaspoon
    pub const ML_PER_TSP: f64 = 4.929;

    /// Density assumed when crossing volume and mass without a hint (1 ml ≈ 1 g)
    pub const FALLBACK_GRAMS_PER_ML: f64 = 1.0;
}

/// Ingredient name matching
pub mod matching {
    /// Minimum similarity score for a fuzzy binding
    pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.75;

    /// Shortest token that may match another token by edit distance
    pub const MIN_FUZZY_TOKEN_LEN: usize = 5;

    /// Normalized edit-distance similarity two distinct tokens need to count
    /// as the same word
    pub const MIN_TOKEN_SIMILARITY: f64 = 0.85;

    /// Preparation and size qualifiers removed before comparing names
    pub const NAME_QUALIFIERS: &[&str] = &[
        "boneless",
        "skinless",
        "skin-on",
        "bone-in",
        "chopped",
        "diced",
        "minced",
        "sliced",
        "cubed",
        "halved",
        "quartered",
        "grated",
        "shredded",
        "peeled",
        "trimmed",
        "crushed",
        "rinsed",
        "drained",
        "fresh",
        "freshly",
        "frozen",
        "thawed",
        "raw",
        "ripe",
        "organic",
        "large",
        "medium",
        "small",
        "finely",
        "roughly",
        "thinly",
        "florets",
        "optional",
    ];

    /// Filler words that carry no identity
    pub const FILLER_WORDS: &[&str] = &["a", "an", "and", "of", "the", "to", "taste"];
}

/// Output boundary rounding
pub mod rounding {
    /// Decimal places for mass and volume quantities on output
    pub const MEASURE_DECIMALS: i32 = 0;
    /// Decimal places for count quantities on output
    pub const COUNT_DECIMALS: i32 = 1;
    /// Decimal places for per-serving macros on output
    pub const MACRO_DECIMALS: i32 = 1;
}

/// Nutrition reference units
pub mod nutrition {
    /// Reference macros are expressed per this many canonical units
    pub const REFERENCE_UNITS: f64 = 100.0;
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// Planner service name
    pub const REMY_PLANNER: &str = "remy-planner";
}
