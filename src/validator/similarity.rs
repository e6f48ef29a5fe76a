// ABOUTME: Ingredient name normalization and pure string similarity scoring
// ABOUTME: Strips qualifiers and plurals, then scores with token overlap and edit distance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Name similarity
//!
//! `normalize_name` turns free text such as `"Chicken Thighs, boneless"`
//! into a comparison key (`"chicken thigh"`). `similarity` scores two names
//! in `[0, 1]`; it is symmetric and `1.0` exactly when the keys are equal.

use std::collections::BTreeSet;

use remy_core::constants::matching::{
    FILLER_WORDS, MIN_FUZZY_TOKEN_LEN, MIN_TOKEN_SIMILARITY, NAME_QUALIFIERS,
};

/// Normalize an ingredient name into a comparison key
///
/// Lowercases, turns punctuation into spaces, drops preparation qualifiers
/// and filler words, folds simple plurals, and collapses whitespace. A name
/// made only of qualifiers keeps its words rather than collapsing to empty.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let lowered: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    let kept: Vec<String> = tokens
        .iter()
        .filter(|token| !NAME_QUALIFIERS.contains(token) && !FILLER_WORDS.contains(token))
        .map(|token| singularize(token))
        .collect();

    if kept.is_empty() {
        tokens
            .iter()
            .map(|token| singularize(token))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        kept.join(" ")
    }
}

/// Fold common English plural endings
fn singularize(token: &str) -> String {
    if token.len() <= 3 || !token.is_ascii() {
        return token.to_owned();
    }
    if let Some(stem) = token.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["oes", "ches", "shes", "xes", "sses"] {
        if token.ends_with(suffix) {
            return token[..token.len() - 2].to_owned();
        }
    }
    if token.ends_with('s') && !token.ends_with("ss") {
        return token[..token.len() - 1].to_owned();
    }
    token.to_owned()
}

/// Similarity of two single tokens
///
/// Short words never match by edit distance: one letter separates "beef"
/// from "beet" and "rice" from "ice".
fn token_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.chars().count() < MIN_FUZZY_TOKEN_LEN || b.chars().count() < MIN_FUZZY_TOKEN_LEN {
        return 0.0;
    }
    let score = strsim::normalized_levenshtein(a, b);
    if score >= MIN_TOKEN_SIMILARITY {
        score
    } else {
        0.0
    }
}

/// Sørensen–Dice coefficient over the token sets of two normalized names
///
/// Each token contributes its best match on the other side, so a typo in a
/// long word ("jasmin") still counts as a partial shared token.
#[must_use]
pub fn token_dice(a: &str, b: &str) -> f64 {
    let left: BTreeSet<&str> = a.split_whitespace().collect();
    let right: BTreeSet<&str> = b.split_whitespace().collect();
    let total = left.len() + right.len();
    if total == 0 {
        return 0.0;
    }

    let best = |token: &str, other: &BTreeSet<&str>| {
        other
            .iter()
            .map(|candidate| token_similarity(token, candidate))
            .fold(0.0, f64::max)
    };
    let matched: f64 = left.iter().map(|&token| best(token, &right)).sum::<f64>()
        + right.iter().map(|&token| best(token, &left)).sum::<f64>();

    #[allow(clippy::cast_precision_loss)]
    let score = matched / total as f64;
    score
}

/// Score two already-normalized names
///
/// Token overlap with per-token typo tolerance. Distinct keys stay below 1.
#[must_use]
pub fn score_normalized(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    token_dice(a, b).clamp(0.0, 1.0 - f64::EPSILON)
}

/// Score two free-text names in `[0, 1]`
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    score_normalized(&normalize_name(a), &normalize_name(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("berries"), "berry");
        assert_eq!(singularize("tomatoes"), "tomato");
        assert_eq!(singularize("peaches"), "peach");
        assert_eq!(singularize("glasses"), "glass");
        assert_eq!(singularize("thighs"), "thigh");
        assert_eq!(singularize("swiss"), "swiss");
        assert_eq!(singularize("oats"), "oat");
        assert_eq!(singularize("gas"), "gas");
    }

    #[test]
    fn test_qualifier_only_name_is_kept() {
        assert_eq!(normalize_name("Fresh"), "fresh");
    }

    #[test]
    fn test_token_dice() {
        assert!((token_dice("lemon pepper", "lemon") - 2.0 / 3.0).abs() < 1e-12);
        assert!(token_dice("", "").abs() < f64::EPSILON);
    }

    #[test]
    fn test_short_tokens_need_exact_match() {
        assert!(token_similarity("beef", "beet").abs() < f64::EPSILON);
        assert!(token_similarity("rice", "ice").abs() < f64::EPSILON);
        assert!(token_similarity("tomato", "potato").abs() < f64::EPSILON);
        assert!(token_similarity("jasmin", "jasmine") > 0.85);
    }

    #[test]
    fn test_reordered_tokens_stay_below_one() {
        let score = score_normalized("rice jasmine", "jasmine rice");
        assert!(score < 1.0);
        assert!(score > 0.99);
    }
}
