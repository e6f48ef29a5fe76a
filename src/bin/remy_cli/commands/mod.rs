// ABOUTME: Re-exports command modules for remy-cli
// ABOUTME: Provides the normalize and convert subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod convert;
pub mod normalize;
