// ABOUTME: Structured diagnostic records describing non-fatal normalization decisions
// ABOUTME: Stage, Severity, and Diagnostic as rendered verbatim by UI and log consumers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage that took a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Structural checks on the candidate and its mentions
    InputValidation,
    /// Mention to inventory binding
    IngredientResolver,
    /// Unit conversion
    UnitNormalizer,
    /// Clamping and shortfall derivation
    InventoryReconciler,
    /// Per-serving macro recomputation
    MacroRecomputation,
}

impl Stage {
    /// Wire name of the stage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InputValidation => "input_validation",
            Self::IngredientResolver => "ingredient_resolver",
            Self::UnitNormalizer => "unit_normalizer",
            Self::InventoryReconciler => "inventory_reconciler",
            Self::MacroRecomputation => "macro_recomputation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Audit trail for a non-exact but accepted decision
    Info,
    /// Approximation, clamp, or exclusion the caller should look at
    Warning,
}

/// One policy decision taken during normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stage that emitted it
    pub stage: Stage,
    /// Severity
    pub severity: Severity,
    /// Ingredient mention the decision concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
    /// Candidate field the decision concerns, when not an ingredient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable explanation
    pub message: String,
}
