// ABOUTME: Unit tests for the unit normalizer conversion table and family crossing
// ABOUTME: Validates canonical conversion, hints, fallbacks, round trips, and output rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use remy_planner::errors::UnitError;
use remy_planner::models::{RequestedQuantity, Severity, Stage, Unit, UnitFamily};
use remy_planner::validator::units::{
    normalize_requested, parse_unit, round_macro, round_output, round_output_within,
};
use remy_planner::validator::{from_canonical, to_canonical, ConversionHints, Diagnostics};

const TOLERANCE: f64 = 1e-9;

fn canonical(amount: f64, unit: &str, target: UnitFamily) -> f64 {
    to_canonical(amount, parse_unit(unit).unwrap(), target, &ConversionHints::default())
        .unwrap()
        .quantity
}

// ============================================================================
// Conversion table
// ============================================================================

#[test]
fn test_mass_table() {
    assert!((canonical(1.0, "kg", UnitFamily::Mass) - 1000.0).abs() < TOLERANCE);
    assert!((canonical(1.0, "lb", UnitFamily::Mass) - 453.592).abs() < TOLERANCE);
    assert!((canonical(2.0, "oz", UnitFamily::Mass) - 56.699).abs() < TOLERANCE);
    assert!((canonical(250.0, "grams", UnitFamily::Mass) - 250.0).abs() < TOLERANCE);
}

#[test]
fn test_volume_table() {
    assert!((canonical(1.5, "L", UnitFamily::Volume) - 1500.0).abs() < TOLERANCE);
    assert!((canonical(1.0, "cup", UnitFamily::Volume) - 236.588).abs() < TOLERANCE);
    assert!((canonical(2.0, "tbsp", UnitFamily::Volume) - 29.574).abs() < TOLERANCE);
    assert!((canonical(3.0, "tsp", UnitFamily::Volume) - 14.787).abs() < TOLERANCE);
}

#[test]
fn test_bare_count_spellings() {
    for spelling in ["", "each", "whole", "pcs", "count"] {
        assert_eq!(parse_unit(spelling).unwrap(), Unit::Count, "{spelling:?}");
    }
}

#[test]
fn test_unknown_unit_is_an_error() {
    assert_eq!(
        parse_unit(" pinch "),
        Err(UnitError::UnknownUnit("pinch".to_owned()))
    );
}

#[test]
fn test_negative_amount_rejected() {
    let result = to_canonical(-1.0, Unit::Grams, UnitFamily::Mass, &ConversionHints::default());
    assert!(matches!(result, Err(UnitError::InvalidAmount(_))));
}

// ============================================================================
// Family crossing
// ============================================================================

#[test]
fn test_volume_to_mass_with_density() {
    let conversion = to_canonical(
        1.0,
        Unit::Cups,
        UnitFamily::Mass,
        &ConversionHints::density(0.5),
    )
    .unwrap();
    assert!((conversion.quantity - 118.294).abs() < TOLERANCE);
    assert!(!conversion.assumed_density);
}

#[test]
fn test_volume_to_mass_without_density_flags_assumption() {
    let conversion =
        to_canonical(1.0, Unit::Cups, UnitFamily::Mass, &ConversionHints::default()).unwrap();
    assert!((conversion.quantity - 236.588).abs() < TOLERANCE);
    assert!(conversion.assumed_density);
}

#[test]
fn test_count_to_mass_needs_piece_weight() {
    assert!(matches!(
        to_canonical(3.0, Unit::Count, UnitFamily::Mass, &ConversionHints::default()),
        Err(UnitError::FamilyMismatch {
            from: UnitFamily::Count,
            to: UnitFamily::Mass
        })
    ));

    let conversion = to_canonical(
        3.0,
        Unit::Count,
        UnitFamily::Mass,
        &ConversionHints::piece_weight(120.0),
    )
    .unwrap();
    assert!((conversion.quantity - 360.0).abs() < TOLERANCE);
}

#[test]
fn test_from_canonical_inverts_to_canonical() {
    let hints = ConversionHints::density(0.92).or(ConversionHints::piece_weight(40.0));
    let cases = [
        (2.0, Unit::Pounds, UnitFamily::Mass),
        (3.0, Unit::Tablespoons, UnitFamily::Volume),
        (0.75, Unit::Cups, UnitFamily::Mass),
        (5.0, Unit::Count, UnitFamily::Volume),
        (120.0, Unit::Grams, UnitFamily::Count),
    ];

    for (amount, unit, family) in cases {
        let forward = to_canonical(amount, unit, family, &hints).unwrap();
        let back = from_canonical(forward.quantity, family, unit, &hints).unwrap();
        assert!(
            (back.quantity - amount).abs() < 1e-6,
            "{amount} {unit} via {family} came back as {}",
            back.quantity
        );
    }
}

// ============================================================================
// Diagnostics from normalize_requested
// ============================================================================

#[test]
fn test_normalize_requested_unknown_unit_warns() {
    let mut diagnostics = Diagnostics::new();
    let requested = RequestedQuantity {
        amount: 2.0,
        unit: "sprigs".to_owned(),
    };
    let quantity = normalize_requested(
        "thyme",
        &requested,
        UnitFamily::Count,
        &ConversionHints::default(),
        &mut diagnostics,
    )
    .unwrap();

    assert_eq!(quantity.family, UnitFamily::Count);
    assert!((quantity.value - 2.0).abs() < TOLERANCE);
    assert_eq!(diagnostics.count(Severity::Warning), 1);
    assert_eq!(diagnostics.entries()[0].stage, Stage::UnitNormalizer);
    assert_eq!(diagnostics.entries()[0].ingredient.as_deref(), Some("thyme"));
}

#[test]
fn test_normalize_requested_mismatch_keeps_own_family() {
    let mut diagnostics = Diagnostics::new();
    let requested = RequestedQuantity {
        amount: 2.0,
        unit: "cups".to_owned(),
    };
    let own = normalize_requested(
        "eggs",
        &requested,
        UnitFamily::Count,
        &ConversionHints::piece_weight(50.0),
        &mut diagnostics,
    )
    .unwrap_err();

    assert_eq!(own.family, UnitFamily::Volume);
    assert!((own.value - 473.176).abs() < TOLERANCE);
    assert_eq!(diagnostics.count(Severity::Warning), 1);
}

#[test]
fn test_exact_conversion_is_silent() {
    let mut diagnostics = Diagnostics::new();
    let requested = RequestedQuantity {
        amount: 1.0,
        unit: "kg".to_owned(),
    };
    normalize_requested(
        "rice",
        &requested,
        UnitFamily::Mass,
        &ConversionHints::default(),
        &mut diagnostics,
    )
    .unwrap();
    assert!(diagnostics.is_empty());
}

// ============================================================================
// Output rounding
// ============================================================================

#[test]
fn test_output_rounding_per_family() {
    assert!((round_output(236.588, UnitFamily::Mass) - 237.0).abs() < f64::EPSILON);
    assert!((round_output(14.787, UnitFamily::Volume) - 15.0).abs() < f64::EPSILON);
    assert!((round_output(0.333, UnitFamily::Count) - 0.3).abs() < 1e-12);
    assert!((round_macro(72.649) - 72.6).abs() < 1e-12);
}

#[test]
fn test_rounding_never_exceeds_budget() {
    let budget = 907.5;
    let rounded = round_output_within(907.5, UnitFamily::Mass, budget);
    assert!(rounded <= budget);
    assert!((rounded - 907.0).abs() < f64::EPSILON);
}
