// ABOUTME: Unit normalizer converting free-text quantities into canonical g/ml/count
// ABOUTME: Fixed conversion table, density and piece-weight family crossing, output rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unit normalization
//!
//! Every quantity is carried as `f64` in its family's canonical unit.
//! Rounding happens only when a normalized candidate is rendered.

use remy_core::constants::conversion::FALLBACK_GRAMS_PER_ML;
use remy_core::constants::rounding::{COUNT_DECIMALS, MACRO_DECIMALS, MEASURE_DECIMALS};
use remy_core::errors::UnitError;
use remy_core::models::{RequestedQuantity, Stage, Unit, UnitFamily};

use super::diagnostics::Diagnostics;

/// Per-ingredient hints for crossing unit families
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConversionHints {
    /// Grams per milliliter
    pub density_g_per_ml: Option<f64>,
    /// Grams per whole item
    pub grams_per_piece: Option<f64>,
}

impl ConversionHints {
    /// Hints with a density only
    #[must_use]
    pub const fn density(grams_per_ml: f64) -> Self {
        Self {
            density_g_per_ml: Some(grams_per_ml),
            grams_per_piece: None,
        }
    }

    /// Hints with a piece weight only
    #[must_use]
    pub const fn piece_weight(grams_per_piece: f64) -> Self {
        Self {
            density_g_per_ml: None,
            grams_per_piece: Some(grams_per_piece),
        }
    }

    /// Fill any missing hint from `other`
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            density_g_per_ml: self.density_g_per_ml.or(other.density_g_per_ml),
            grams_per_piece: self.grams_per_piece.or(other.grams_per_piece),
        }
    }

    /// Drop hints that are not finite and positive
    #[must_use]
    pub fn sanitized(self) -> Self {
        let keep = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);
        Self {
            density_g_per_ml: keep(self.density_g_per_ml),
            grams_per_piece: keep(self.grams_per_piece),
        }
    }
}

/// Quantity in a family's canonical unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalQuantity {
    /// Unit family
    pub family: UnitFamily,
    /// Amount in grams, milliliters, or items
    pub value: f64,
}

impl CanonicalQuantity {
    /// Create a canonical quantity
    #[must_use]
    pub const fn new(family: UnitFamily, value: f64) -> Self {
        Self { family, value }
    }
}

/// Result of a conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    /// Converted amount
    pub quantity: f64,
    /// Volume and mass were crossed with the 1 ml ≈ 1 g fallback
    pub assumed_density: bool,
}

/// Parse a unit spelling against the conversion table
///
/// # Errors
///
/// Returns `UnitError::UnknownUnit` for spellings outside the table.
pub fn parse_unit(raw: &str) -> Result<Unit, UnitError> {
    Unit::parse(raw).ok_or_else(|| UnitError::UnknownUnit(raw.trim().to_owned()))
}

/// Convert `amount` of `unit` into the canonical unit of `target`
///
/// # Errors
///
/// Returns `UnitError::InvalidAmount` for negative or non-finite amounts and
/// `UnitError::FamilyMismatch` when the families differ and the hints cannot
/// bridge them.
pub fn to_canonical(
    amount: f64,
    unit: Unit,
    target: UnitFamily,
    hints: &ConversionHints,
) -> Result<Conversion, UnitError> {
    check_amount(amount)?;
    let base = amount * unit.factor_to_base();
    cross_family(base, unit.family(), target, hints)
}

/// Convert a canonical quantity of `family` into `unit`
///
/// Inverse of [`to_canonical`].
///
/// # Errors
///
/// Same conditions as [`to_canonical`].
pub fn from_canonical(
    quantity: f64,
    family: UnitFamily,
    unit: Unit,
    hints: &ConversionHints,
) -> Result<Conversion, UnitError> {
    check_amount(quantity)?;
    let crossed = cross_family(quantity, family, unit.family(), hints)?;
    Ok(Conversion {
        quantity: crossed.quantity / unit.factor_to_base(),
        assumed_density: crossed.assumed_density,
    })
}

fn check_amount(amount: f64) -> Result<(), UnitError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(UnitError::InvalidAmount(amount))
    }
}

/// Move a base-unit value from one family's base into another's
fn cross_family(
    value: f64,
    from: UnitFamily,
    to: UnitFamily,
    hints: &ConversionHints,
) -> Result<Conversion, UnitError> {
    let mismatch = UnitError::FamilyMismatch { from, to };
    let exact = |quantity: f64| Conversion {
        quantity,
        assumed_density: false,
    };

    match (from, to) {
        (a, b) if a == b => Ok(exact(value)),
        (UnitFamily::Volume, UnitFamily::Mass) => Ok(match hints.density_g_per_ml {
            Some(density) => exact(value * density),
            None => Conversion {
                quantity: value * FALLBACK_GRAMS_PER_ML,
                assumed_density: true,
            },
        }),
        (UnitFamily::Mass, UnitFamily::Volume) => Ok(match hints.density_g_per_ml {
            Some(density) => exact(value / density),
            None => Conversion {
                quantity: value / FALLBACK_GRAMS_PER_ML,
                assumed_density: true,
            },
        }),
        (UnitFamily::Count, UnitFamily::Mass) => hints
            .grams_per_piece
            .map(|per_piece| exact(value * per_piece))
            .ok_or(mismatch),
        (UnitFamily::Mass, UnitFamily::Count) => hints
            .grams_per_piece
            .map(|per_piece| exact(value / per_piece))
            .ok_or(mismatch),
        (UnitFamily::Count, UnitFamily::Volume) => {
            match (hints.grams_per_piece, hints.density_g_per_ml) {
                (Some(per_piece), Some(density)) => Ok(exact(value * per_piece / density)),
                _ => Err(mismatch),
            }
        }
        (UnitFamily::Volume, UnitFamily::Count) => {
            match (hints.grams_per_piece, hints.density_g_per_ml) {
                (Some(per_piece), Some(density)) => Ok(exact(value * density / per_piece)),
                _ => Err(mismatch),
            }
        }
        _ => Err(mismatch),
    }
}

/// Canonicalize a validated mention quantity into `target`, recording every
/// approximation as a diagnostic
///
/// Unknown units are read as the target family's base unit. When the
/// families cannot be bridged, the quantity stays in the mention's own
/// family and `Err` carries it so the caller can route it to the shortfall.
///
/// # Errors
///
/// Returns the quantity in the mention's own family when the unit's family
/// cannot be converted into `target`.
pub fn normalize_requested(
    ingredient: &str,
    requested: &RequestedQuantity,
    target: UnitFamily,
    hints: &ConversionHints,
    diagnostics: &mut Diagnostics,
) -> Result<CanonicalQuantity, CanonicalQuantity> {
    let unit = match parse_unit(&requested.unit) {
        Ok(unit) => unit,
        Err(error) => {
            diagnostics.warning(
                Stage::UnitNormalizer,
                ingredient,
                format!("{error}; read as {} {}", requested.amount, target.base_unit()),
            );
            return Ok(CanonicalQuantity::new(target, requested.amount));
        }
    };

    match to_canonical(requested.amount, unit, target, hints) {
        Ok(conversion) => {
            if conversion.assumed_density {
                diagnostics.warning(
                    Stage::UnitNormalizer,
                    ingredient,
                    format!(
                        "no density for {} {unit}; assumed 1 ml = 1 g ({:.1} {})",
                        requested.amount,
                        conversion.quantity,
                        target.base_unit()
                    ),
                );
            }
            Ok(CanonicalQuantity::new(target, conversion.quantity))
        }
        Err(error) => {
            let own = CanonicalQuantity::new(
                unit.family(),
                requested.amount * unit.factor_to_base(),
            );
            diagnostics.warning(
                Stage::UnitNormalizer,
                ingredient,
                format!(
                    "{error}; {:.1} {} routed to shortfall",
                    own.value,
                    own.family.base_unit()
                ),
            );
            Err(own)
        }
    }
}

// ============================================================================
// Output boundary rounding
// ============================================================================

/// Decimal places used when rendering a quantity of `family`
#[must_use]
pub const fn output_decimals(family: UnitFamily) -> i32 {
    match family {
        UnitFamily::Mass | UnitFamily::Volume => MEASURE_DECIMALS,
        UnitFamily::Count => COUNT_DECIMALS,
    }
}

/// Round half away from zero to `decimals` places
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

/// Round down to `decimals` places
#[must_use]
pub fn floor_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    // Nudge so that values already on the grid survive the multiply
    (value * scale + 1e-9).floor() / scale
}

/// Round a canonical quantity for output
#[must_use]
pub fn round_output(value: f64, family: UnitFamily) -> f64 {
    round_to(value, output_decimals(family))
}

/// Round a canonical quantity for output without exceeding `budget`
#[must_use]
pub fn round_output_within(value: f64, family: UnitFamily, budget: f64) -> f64 {
    let rounded = round_output(value, family);
    if rounded <= budget {
        rounded
    } else {
        floor_to(value.min(budget).max(0.0), output_decimals(family))
    }
}

/// Round a macro value for output
#[must_use]
pub fn round_macro(value: f64) -> f64 {
    round_to(value, MACRO_DECIMALS)
}
