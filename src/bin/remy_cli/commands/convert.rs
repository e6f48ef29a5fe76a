// ABOUTME: convert subcommand converting one quantity into its canonical unit
// ABOUTME: Prints the canonical amount and any approximation taken
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use remy_planner::errors::AppError;
use remy_planner::models::{RequestedQuantity, UnitFamily};
use remy_planner::validator::units::{normalize_requested, parse_unit, round_output};
use remy_planner::validator::{ConversionHints, Diagnostics};

/// Convert `quantity unit` into `family` (or the unit's own family) and print it
pub fn run(
    quantity: f64,
    unit: &str,
    family: Option<UnitFamily>,
    density: Option<f64>,
    piece_weight: Option<f64>,
) -> Result<()> {
    let parsed = parse_unit(unit).map_err(|e| AppError::invalid_input(e.to_string()))?;
    if !(quantity.is_finite() && quantity > 0.0) {
        return Err(AppError::out_of_range(format!("quantity {quantity} must be positive")).into());
    }

    let target = family.unwrap_or_else(|| parsed.family());
    let hints = ConversionHints {
        density_g_per_ml: density,
        grams_per_piece: piece_weight,
    }
    .sanitized();
    let requested = RequestedQuantity {
        amount: quantity,
        unit: unit.to_owned(),
    };

    let mut diagnostics = Diagnostics::new();
    let canonical = normalize_requested(unit, &requested, target, &hints, &mut diagnostics)
        .map_err(|_| {
            AppError::invalid_input(format!(
                "cannot convert {} to {target} without a conversion hint",
                parsed.family()
            ))
        })?;

    println!(
        "{quantity} {parsed} = {} {}",
        round_output(canonical.value, canonical.family),
        canonical.family.base_unit()
    );
    for diagnostic in diagnostics.entries() {
        println!("{:?}: {}", diagnostic.severity, diagnostic.message);
    }
    Ok(())
}
