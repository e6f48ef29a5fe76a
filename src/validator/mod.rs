// ABOUTME: Diff and validator module reconciling planner output with the household inventory
// ABOUTME: Resolver, unit normalizer, reconciler, macro recomputation, and diagnostics stages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Built-in density reference
pub mod density;
/// Per-candidate diagnostics accumulator
pub mod diagnostics;
/// Plan and nutrition file loaders
pub mod loaders;
/// Macro recomputation
pub mod macros;
/// End-to-end candidate and plan normalization
pub mod pipeline;
/// Clamping and shortfall derivation
pub mod reconciler;
/// Mention to inventory binding
pub mod resolver;
/// Name normalization and similarity scoring
pub mod similarity;
/// Canonicalized inventory view
pub mod snapshot;
/// Unit conversion and output rounding
pub mod units;

pub use diagnostics::Diagnostics;
pub use loaders::{load_nutrition, load_plan, plan_from_json_str};
pub use pipeline::DiffValidator;
pub use reconciler::{reconcile, InventoryDelta, Reconciliation, ShortfallEntry};
pub use resolver::{Binding, IngredientResolver, ResolvedIngredient};
pub use similarity::{normalize_name, similarity};
pub use snapshot::{InventorySnapshot, StockedItem};
pub use units::{from_canonical, to_canonical, CanonicalQuantity, Conversion, ConversionHints};
