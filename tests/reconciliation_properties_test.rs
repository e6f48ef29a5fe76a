// ABOUTME: Seeded property tests for reconciliation invariants over generated plans and inventories
// ABOUTME: Checks clamping, per-ingredient accounting, determinism across thread pools, and idempotence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashMap;

use common::{candidate_json, household_nutrition, init_test_logging, plan_of};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use remy_planner::config::ValidatorConfig;
use remy_planner::models::{
    InventoryItem, NormalizedCandidate, RawIngredientMention, RawPlan, ShortfallReason,
    UnitFamily,
};
use remy_planner::validator::{
    reconcile, Binding, CanonicalQuantity, Diagnostics, DiffValidator, InventorySnapshot,
    ResolvedIngredient,
};

const SEEDS: [u64; 6] = [7, 42, 1337, 2024, 31_337, 90_210];

const PANTRY: [(&str, &str); 8] = [
    ("Chicken Thigh", "g"),
    ("Broccoli", "g"),
    ("Rice", "kg"),
    ("Vegetable Broth", "ml"),
    ("Lemon", "count"),
    ("Olive Oil", "ml"),
    ("Eggs", "count"),
    ("Cheddar", "oz"),
];

const MENTION_UNITS: [&str; 9] = ["g", "kg", "lb", "oz", "ml", "l", "cup", "tbsp", ""];

fn random_inventory(rng: &mut ChaCha8Rng) -> Vec<InventoryItem> {
    let mut items = Vec::new();
    for (id, (name, unit)) in (1_u64..).zip(PANTRY) {
        if !rng.gen_bool(0.8) {
            continue;
        }
        let quantity = match unit {
            "kg" => rng.gen_range(0.0..3.0),
            "count" => f64::from(rng.gen_range(0_u32..6)),
            "oz" => rng.gen_range(0.0..16.0),
            _ => rng.gen_range(0.0..1500.0),
        };
        items.push(InventoryItem::new(id, name, quantity, unit));
    }
    items
}

fn random_mentions(rng: &mut ChaCha8Rng) -> Vec<RawIngredientMention> {
    let count = rng.gen_range(1..8);
    (0..count)
        .map(|_| {
            let name = if rng.gen_bool(0.85) {
                PANTRY.choose(rng).unwrap().0
            } else {
                "saffron threads"
            };
            let unit = *MENTION_UNITS.choose(rng).unwrap();
            let amount = match unit {
                "" => f64::from(rng.gen_range(1_u32..5)),
                "kg" | "l" | "lb" => rng.gen_range(0.1..2.0),
                "cup" | "tbsp" | "oz" => rng.gen_range(0.5..4.0),
                _ => rng.gen_range(5.0..900.0),
            };
            RawIngredientMention::new(name, amount, unit)
        })
        .collect()
}

fn random_plan(rng: &mut ChaCha8Rng) -> RawPlan {
    let candidates = (0..rng.gen_range(1..6))
        .map(|index| {
            let servings = rng.gen_range(-1..6);
            candidate_json(&format!("Candidate {index}"), servings, &random_mentions(rng))
        })
        .collect();
    plan_of(candidates)
}

fn sequential() -> DiffValidator {
    DiffValidator::new(ValidatorConfig::default().with_parallel_candidates(false))
}

// ============================================================================
// Clamping
// ============================================================================

#[test]
fn test_rendered_deltas_never_exceed_on_hand() {
    init_test_logging();
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let snapshot = InventorySnapshot::from_items(random_inventory(&mut rng));
        let plan = random_plan(&mut rng);
        let normalized = sequential().normalize_plan(&plan, &snapshot, &household_nutrition());

        assert_eq!(normalized.candidates.len(), plan.candidates.len());
        for candidate in &normalized.candidates {
            let mut used: HashMap<u64, f64> = HashMap::new();
            for delta in &candidate.inventory_deltas {
                assert!(delta.quantity() > 0.0, "seed {seed}: zero delta emitted");
                *used.entry(delta.ingredient_id).or_default() += delta.quantity();
            }
            for (id, total) in used {
                let on_hand = snapshot.get(id).unwrap().on_hand;
                assert!(
                    total <= on_hand + 1e-9,
                    "seed {seed}: item {id} deducted {total} of {on_hand}"
                );
            }
            for shortfall in &candidate.shopping_shortfall {
                assert!(shortfall.quantity() > 0.0, "seed {seed}: zero shortfall emitted");
            }
        }
    }
}

#[test]
fn test_delta_plus_shortfall_accounts_for_request() {
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let snapshot = InventorySnapshot::from_items(vec![
            InventoryItem::new(1, "Rice", rng.gen_range(0.0..800.0), "g"),
            InventoryItem::new(2, "Broth", rng.gen_range(0.0..800.0), "ml"),
        ]);

        let ingredients: Vec<ResolvedIngredient> = (0..rng.gen_range(1..10))
            .map(|_| {
                let (item_id, family) = if rng.gen_bool(0.5) {
                    (1, UnitFamily::Mass)
                } else {
                    (2, UnitFamily::Volume)
                };
                ResolvedIngredient {
                    name: format!("item {item_id}"),
                    binding: Binding::Matched { item_id },
                    quantity: CanonicalQuantity::new(family, rng.gen_range(1.0..400.0)),
                }
            })
            .collect();

        let mut diagnostics = Diagnostics::new();
        let result = reconcile(&ingredients, &snapshot, &mut diagnostics);

        for id in [1, 2] {
            let requested: f64 = ingredients
                .iter()
                .filter(|i| i.binding.item_id() == Some(id))
                .map(|i| i.quantity.value)
                .sum();
            let short: f64 = result
                .shortfalls
                .iter()
                .filter(|s| s.ingredient_id == Some(id))
                .map(|s| s.quantity)
                .sum();
            let deducted = result.deducted(id);
            let on_hand = snapshot.get(id).unwrap().on_hand;

            assert!(deducted <= on_hand + 1e-9, "seed {seed}: item {id} overdrawn");
            assert!(
                (deducted + short - requested).abs() < 1e-6,
                "seed {seed}: item {id} {deducted} + {short} != {requested}"
            );
        }
    }
}

/// Identity key for summing one candidate's records: the item id, or the
/// mention name for unmatched mentions
fn accounting_key(ingredient_id: Option<u64>, name: &str) -> String {
    ingredient_id.map_or_else(|| format!("name:{name}"), |id| format!("id:{id}"))
}

#[test]
fn test_rendered_output_keeps_accounting_identity() {
    init_test_logging();
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let snapshot = InventorySnapshot::from_items(random_inventory(&mut rng));
        let plan = random_plan(&mut rng);
        let normalized = sequential().normalize_plan(&plan, &snapshot, &household_nutrition());

        for candidate in &normalized.candidates {
            let mut balance: HashMap<String, f64> = HashMap::new();
            for requirement in &candidate.ingredients_required {
                *balance
                    .entry(accounting_key(requirement.ingredient_id, &requirement.name))
                    .or_default() += requirement.quantity();
            }
            for delta in &candidate.inventory_deltas {
                *balance
                    .entry(accounting_key(Some(delta.ingredient_id), ""))
                    .or_default() -= delta.quantity();
            }
            for shortfall in &candidate.shopping_shortfall {
                *balance
                    .entry(accounting_key(shortfall.ingredient_id, &shortfall.name))
                    .or_default() -= shortfall.quantity();
            }

            for (key, remainder) in balance {
                assert!(
                    remainder.abs() < 1e-6,
                    "seed {seed}: {key} qty != use + need (off by {remainder})"
                );
            }
        }
    }
}

#[test]
fn test_rounded_cap_moves_remainder_to_shortfall() {
    let snapshot = InventorySnapshot::from_items(vec![InventoryItem::new(1, "Rice", 100.7, "g")]);
    let plan = plan_of(vec![candidate_json(
        "Rice Bowl",
        2,
        &[
            RawIngredientMention::new("rice", 200.0, "g"),
            RawIngredientMention::new("rice", 0.7, "g"),
        ],
    )]);
    let normalized = sequential().normalize_plan(&plan, &snapshot, &household_nutrition());
    let candidate = &normalized.candidates[0];

    assert_eq!(candidate.ingredients_required[0].qty_g, Some(200.0));
    assert_eq!(candidate.inventory_deltas.len(), 1);
    assert_eq!(candidate.inventory_deltas[0].use_g, Some(100.0));
    assert_eq!(candidate.shopping_shortfall[0].need_g, Some(100.0));
    assert_eq!(candidate.ingredients_required[1].qty_g, Some(1.0));
    assert_eq!(candidate.shopping_shortfall[1].need_g, Some(1.0));
    assert_eq!(candidate.shopping_shortfall.len(), 2);
}

#[test]
fn test_rounded_cap_without_reconciler_shortfall() {
    let snapshot = InventorySnapshot::from_items(vec![InventoryItem::new(1, "Rice", 100.7, "g")]);
    let plan = plan_of(vec![candidate_json(
        "Rice Bowl",
        2,
        &[RawIngredientMention::new("rice", 100.7, "g")],
    )]);
    let normalized = sequential().normalize_plan(&plan, &snapshot, &household_nutrition());
    let candidate = &normalized.candidates[0];

    assert_eq!(candidate.ingredients_required[0].qty_g, Some(101.0));
    assert_eq!(candidate.inventory_deltas[0].use_g, Some(100.0));
    let shortfall = &candidate.shopping_shortfall[0];
    assert_eq!(shortfall.need_g, Some(1.0));
    assert_eq!(shortfall.ingredient_id, Some(1));
    assert_eq!(shortfall.reason, ShortfallReason::InsufficientStock);
}

// ============================================================================
// Determinism and idempotence
// ============================================================================

#[test]
fn test_output_identical_across_thread_pools() {
    init_test_logging();
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let snapshot = InventorySnapshot::from_items(random_inventory(&mut rng));
        let plan = random_plan(&mut rng);
        let nutrition = household_nutrition();

        let parallel = DiffValidator::default().normalize_plan(&plan, &snapshot, &nutrition);
        let serial = sequential().normalize_plan(&plan, &snapshot, &nutrition);
        let again = sequential().normalize_plan(&plan, &snapshot, &nutrition);

        let expected = serde_json::to_string(&serial).unwrap();
        assert_eq!(serde_json::to_string(&parallel).unwrap(), expected, "seed {seed}");
        assert_eq!(serde_json::to_string(&again).unwrap(), expected, "seed {seed}");
    }
}

fn requirements_as_mentions(candidate: &NormalizedCandidate) -> Vec<RawIngredientMention> {
    candidate
        .ingredients_required
        .iter()
        .map(|requirement| RawIngredientMention {
            ingredient_id: requirement.ingredient_id,
            name: requirement.name.clone(),
            qty_g: requirement.qty_g,
            qty_ml: requirement.qty_ml,
            qty_count: requirement.qty_count,
            ..RawIngredientMention::default()
        })
        .collect()
}

#[test]
fn test_renormalizing_output_is_stable() {
    init_test_logging();
    let snapshot = InventorySnapshot::from_items(vec![
        InventoryItem::new(1, "Chicken Thigh", 500.0, "g"),
        InventoryItem::new(2, "Vegetable Broth", 250.0, "ml"),
        InventoryItem::new(3, "Lemon", 1.0, "count"),
    ]);
    let first = sequential().normalize_plan(
        &plan_of(vec![candidate_json(
            "Lemon Chicken Soup",
            3,
            &[
                RawIngredientMention::new("chicken thigh", 600.0, "g").with_id(1),
                RawIngredientMention::new("vegetable broth", 1.0, "l").with_id(2),
                RawIngredientMention::new("lemon", 2.0, "each").with_id(3),
                RawIngredientMention::new("parsley", 10.0, "g"),
            ],
        )]),
        &snapshot,
        &household_nutrition(),
    );
    let first = &first.candidates[0];

    let second = sequential().normalize_plan(
        &plan_of(vec![candidate_json(
            &first.title,
            i64::from(first.servings),
            &requirements_as_mentions(first),
        )]),
        &snapshot,
        &household_nutrition(),
    );
    let second = &second.candidates[0];

    assert_eq!(second.ingredients_required, first.ingredients_required);
    assert_eq!(second.inventory_deltas, first.inventory_deltas);
    assert_eq!(second.shopping_shortfall, first.shopping_shortfall);
    assert_eq!(second.macros_per_serving, first.macros_per_serving);
}
