// ABOUTME: Remy CLI - command-line front end for the diff and validator
// ABOUTME: Normalizes plan files against an inventory file and converts single quantities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Normalize a plan against the inventory, with macros
//! remy-cli normalize --plan plan.json --inventory inventory.json --nutrition nutrition.json
//!
//! # Same, single-line JSON output
//! remy-cli normalize --plan plan.json --inventory inventory.json --compact
//!
//! # Convert a quantity into its canonical unit
//! remy-cli convert 1.5 cups --family mass --density 0.36
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use remy_planner::errors::AppError;
use remy_planner::logging::LoggingConfig;
use remy_planner::models::UnitFamily;

#[derive(Parser)]
#[command(
    name = "remy-cli",
    about = "Remy diff and validator CLI",
    long_about = "Reconciles candidate meal plans with the household inventory: resolves ingredients, normalizes units, clamps deltas, and recomputes macros."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Normalize a candidate plan against an inventory snapshot
    Normalize {
        /// Plan JSON file (`{"date": ..., "candidates": [...]}`)
        #[arg(long)]
        plan: PathBuf,

        /// Inventory JSON file (array of items)
        #[arg(long)]
        inventory: PathBuf,

        /// Nutrition reference JSON file (object keyed by inventory id)
        #[arg(long)]
        nutrition: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Convert a quantity into the canonical unit of a family
    Convert {
        /// Amount in `unit`
        quantity: f64,

        /// Unit spelling (g, kg, lb, oz, ml, l, cup, tbsp, tsp, count)
        unit: String,

        /// Target family (defaults to the unit's own family)
        #[arg(long)]
        family: Option<UnitFamily>,

        /// Density hint in grams per milliliter
        #[arg(long)]
        density: Option<f64>,

        /// Piece weight hint in grams per item
        #[arg(long)]
        piece_weight: Option<f64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let result = match cli.command {
        Command::Normalize {
            plan,
            inventory,
            nutrition,
            compact,
        } => commands::normalize::run(&plan, &inventory, nutrition.as_deref(), compact),
        Command::Convert {
            quantity,
            unit,
            family,
            density,
            piece_weight,
        } => commands::convert::run(quantity, &unit, family, density, piece_weight),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            let status = error
                .downcast_ref::<AppError>()
                .map_or(1, |app| app.code.exit_status());
            ExitCode::from(u8::try_from(status).unwrap_or(1))
        }
    }
}
