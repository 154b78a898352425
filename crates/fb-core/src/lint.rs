//! Lint diagnostics for form documents.
//!
//! Reports structural issues without modifying the document. Mostly useful
//! after an import, since editing operations keep these invariants.

use crate::id::{FieldId, StepId};
use crate::layout::GRID_COLUMNS;
use crate::model::FormState;
use serde::Serialize;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// The renderer will misbehave or ignore part of the document.
    Warning,
    Info,
}

/// What a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum LintTarget {
    Field(FieldId),
    Step(StepId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintDiagnostic {
    pub target: LintTarget,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "dangling-step-ref").
    pub rule: &'static str,
}

// ─── Public API ──────────────────────────────────────────────────────────

#[must_use]
pub fn lint_form(state: &FormState) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_column_range(state, &mut diags);
    lint_raw_entries(state, &mut diags);
    lint_steps(state, &mut diags);
    diags
}

// ─── Rules ───────────────────────────────────────────────────────────────

fn lint_column_range(state: &FormState, diags: &mut Vec<LintDiagnostic>) {
    for (id, entry) in state.schema.iter() {
        let span = u32::from(entry.column_span());
        if span == 0 || span > GRID_COLUMNS {
            diags.push(LintDiagnostic {
                target: LintTarget::Field(id),
                message: format!("`{id}` is {span} columns wide; widths must be 1 to {GRID_COLUMNS}."),
                severity: LintSeverity::Warning,
                rule: "column-range",
            });
        }
    }
}

fn lint_raw_entries(state: &FormState, diags: &mut Vec<LintDiagnostic>) {
    for (id, entry) in state.schema.iter().filter(|(_, e)| e.is_raw()) {
        let message = match entry.type_name() {
            "" => format!("`{id}` has no `type`; it is exported unchanged."),
            ty => format!("`{id}` is not a well-formed `{ty}` entry; it is exported unchanged."),
        };
        diags.push(LintDiagnostic {
            target: LintTarget::Field(id),
            message,
            severity: LintSeverity::Info,
            rule: "raw-entry",
        });
    }
}

fn lint_steps(state: &FormState, diags: &mut Vec<LintDiagnostic>) {
    let Some(steps) = &state.steps else {
        return;
    };

    for (step_id, step) in steps {
        if step.elements.is_empty() {
            diags.push(LintDiagnostic {
                target: LintTarget::Step(*step_id),
                message: format!("Step `{step_id}` has no fields."),
                severity: LintSeverity::Info,
                rule: "empty-step",
            });
        }

        let mut seen = HashSet::new();
        for &element in &step.elements {
            if !state.schema.contains(element) {
                diags.push(LintDiagnostic {
                    target: LintTarget::Step(*step_id),
                    message: format!("Step `{step_id}` lists `{element}`, which is not in the schema."),
                    severity: LintSeverity::Warning,
                    rule: "dangling-step-ref",
                });
            }
            if !seen.insert(element) {
                diags.push(LintDiagnostic {
                    target: LintTarget::Step(*step_id),
                    message: format!("Step `{step_id}` lists `{element}` more than once."),
                    severity: LintSeverity::Warning,
                    rule: "duplicate-step-element",
                });
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::coerce;
    use serde_json::json;

    fn rules(state: &FormState) -> Vec<&'static str> {
        lint_form(state).into_iter().map(|d| d.rule).collect()
    }

    #[test]
    fn clean_document_has_no_diagnostics() {
        let state = coerce(&json!({
            "schema": { "bio": { "type": "textarea", "columns": { "container": 6 } } },
            "steps": { "page0": { "label": "Step 1", "elements": ["bio"] } }
        }))
        .unwrap();
        assert!(lint_form(&state).is_empty());
    }

    #[test]
    fn dangling_and_duplicate_refs() {
        let state = coerce(&json!({
            "schema": { "bio": { "type": "textarea" } },
            "steps": { "page0": { "label": "Step 1", "elements": ["bio", "ghost", "bio"] } }
        }))
        .unwrap();
        let diags = lint_form(&state);
        assert!(diags.iter().any(|d| d.rule == "dangling-step-ref"
            && d.target == LintTarget::Step(StepId::intern("page0"))));
        assert!(diags.iter().any(|d| d.rule == "duplicate-step-element"));
    }

    #[test]
    fn column_width_out_of_range() {
        let state = coerce(&json!({
            "schema": {
                "wide": { "type": "textarea", "columns": { "container": 13 } },
                "thin": { "type": "textarea", "columns": { "container": 0 } }
            }
        }))
        .unwrap();
        assert_eq!(rules(&state), vec!["column-range", "column-range"]);
    }

    #[test]
    fn raw_entries_and_empty_steps_are_info() {
        let state = coerce(&json!({
            "schema": { "x": { "type": "spaceship" } },
            "steps": { "page0": { "label": "Step 1", "elements": [] } }
        }))
        .unwrap();
        let diags = lint_form(&state);
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.severity == LintSeverity::Info));
        assert_eq!(rules(&state), vec!["raw-entry", "empty-step"]);
    }
}
