// ABOUTME: Append-only diagnostics accumulator scoped to one candidate normalization pass
// ABOUTME: Records every policy decision and mirrors it as a structured tracing event
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use remy_core::models::{Diagnostic, Severity, Stage};
use tracing::{debug, warn};

/// Ordered diagnostics for one candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        let ingredient = diagnostic.ingredient.as_deref().unwrap_or_default();
        let field = diagnostic.field.as_deref().unwrap_or_default();
        match diagnostic.severity {
            Severity::Info => debug!(
                stage = %diagnostic.stage,
                ingredient,
                field,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => warn!(
                stage = %diagnostic.stage,
                ingredient,
                field,
                "{}",
                diagnostic.message
            ),
        }
        self.entries.push(diagnostic);
    }

    /// Record an info diagnostic about an ingredient
    pub fn info(&mut self, stage: Stage, ingredient: &str, message: impl Into<String>) {
        self.record(stage, Severity::Info, Some(ingredient), None, message.into());
    }

    /// Record a warning about an ingredient
    pub fn warning(&mut self, stage: Stage, ingredient: &str, message: impl Into<String>) {
        self.record(stage, Severity::Warning, Some(ingredient), None, message.into());
    }

    /// Record an info diagnostic about a candidate field
    pub fn field_info(&mut self, stage: Stage, field: &str, message: impl Into<String>) {
        self.record(stage, Severity::Info, None, Some(field), message.into());
    }

    /// Record a warning about a candidate field
    pub fn field_warning(&mut self, stage: Stage, field: &str, message: impl Into<String>) {
        self.record(stage, Severity::Warning, None, Some(field), message.into());
    }

    fn record(
        &mut self,
        stage: Stage,
        severity: Severity,
        ingredient: Option<&str>,
        field: Option<&str>,
        message: String,
    ) {
        self.push(Diagnostic {
            stage,
            severity,
            ingredient: ingredient.map(str::to_owned),
            field: field.map(str::to_owned),
            message,
        });
    }

    /// Diagnostics in emission order
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of diagnostics
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of diagnostics with the given severity
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }

    /// Consume into the ordered list
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
