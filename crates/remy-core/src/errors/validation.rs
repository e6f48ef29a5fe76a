// ABOUTME: Ingredient-scoped error types raised while normalizing a single mention
// ABOUTME: ValidationError rejects malformed mentions, UnitError covers conversion failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use crate::models::UnitFamily;

/// A malformed ingredient mention.
///
/// Scoped to one ingredient: the mention is excluded from the candidate and
/// the error text is recorded as a diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Mention name is empty or whitespace
    #[error("ingredient name is empty")]
    EmptyName,

    /// Mention carries none of `qty`, `qty_g`, `qty_ml`, `qty_count`
    #[error("ingredient '{name}' has no quantity")]
    MissingQuantity {
        /// Mention name
        name: String,
    },

    /// Quantity is zero or negative
    #[error("ingredient '{name}' has non-positive quantity {quantity}")]
    NonPositiveQuantity {
        /// Mention name
        name: String,
        /// Offending quantity
        quantity: f64,
    },

    /// Quantity is NaN or infinite
    #[error("ingredient '{name}' has a non-finite quantity")]
    NonFiniteQuantity {
        /// Mention name
        name: String,
    },
}

/// Unit conversion failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// Unit string is not in the conversion table
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    /// No hint available to cross between unit families
    #[error("cannot convert {from} to {to} without a conversion hint")]
    FamilyMismatch {
        /// Family of the requested unit
        from: UnitFamily,
        /// Family the ingredient is tracked in
        to: UnitFamily,
    },

    /// Negative or non-finite amount
    #[error("invalid amount {0} (must be finite and non-negative)")]
    InvalidAmount(f64),
}
