use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::wire::{FieldValue, Values, VarKind, Variable};

/// ========================================
/// Variable schema validation
/// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingRequired,
    InvalidType,
    InvalidOption,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    fn new(kind: IssueKind, message: String) -> Self {
        Self { kind, message }
    }
}

/// Outcome of validating supplied values against the variable schema.
/// One issue per variable, keyed by variable name; every variable is
/// checked, nothing is fail-fast, so the caller can surface all problems
/// at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: BTreeMap<String, Issue>,
}

fn is_blank(value: Option<&FieldValue>) -> bool {
    match value {
        None => true,
        Some(FieldValue::Text(s)) => s.is_empty(),
        Some(FieldValue::Number(_)) => false,
    }
}

fn check_value(var: &Variable, value: &FieldValue) -> Option<Issue> {
    match var.kind {
        VarKind::Text | VarKind::Textarea => None,
        VarKind::Number => {
            let finite = match value {
                FieldValue::Number(n) => n.is_finite(),
                FieldValue::Text(s) => s.trim().parse::<f64>().map(|n| n.is_finite()).unwrap_or(false),
            };
            if finite {
                None
            } else {
                Some(Issue::new(
                    IssueKind::InvalidType,
                    format!("'{}' is not a finite number", value.render()),
                ))
            }
        }
        VarKind::Select => {
            let rendered = value.render();
            if var.options.iter().any(|o| o == &rendered) {
                None
            } else {
                Some(Issue::new(
                    IssueKind::InvalidOption,
                    format!("'{}' is not one of the allowed options", rendered),
                ))
            }
        }
    }
}

/// Validate `values` against `variables`. Each variable is checked
/// independently; a blank entry (absent, or an empty string) only ever
/// yields `MissingRequired`, and only when the variable is required.
pub fn validate(variables: &[Variable], values: &Values) -> ValidationResult {
    let mut errors = BTreeMap::new();

    for var in variables {
        let entry = values.get(&var.name);

        if is_blank(entry) {
            if var.required {
                errors.insert(
                    var.name.clone(),
                    Issue::new(IssueKind::MissingRequired, "value is required".into()),
                );
            }
            continue;
        }

        if let Some(issue) = entry.and_then(|v| check_value(var, v)) {
            errors.insert(var.name.clone(), issue);
        }
    }

    ValidationResult { valid: errors.is_empty(), errors }
}

/// Lint the variable definitions themselves. Returns human-readable
/// warnings; a schema that trips these can still be evaluated, its author
/// just gets told about it up front.
pub fn check_definitions(variables: &[Variable]) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for var in variables {
        let name_ok = !var.name.is_empty()
            && var.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !name_ok {
            warnings.push(format!(
                "variable name '{}' is invalid (use letters, digits and underscores)",
                var.name
            ));
        }
        if seen.iter().any(|n| *n == var.name) {
            warnings.push(format!("duplicate variable name '{}'", var.name));
        }
        seen.push(&var.name);

        if var.kind == VarKind::Select && var.options.is_empty() {
            warnings.push(format!("select variable '{}' has no options", var.name));
        }
        if let Some(default) = &var.default_value {
            if var.kind == VarKind::Select && !var.options.iter().any(|o| o == default) {
                warnings.push(format!(
                    "default for '{}' is not among its options",
                    var.name
                ));
            }
        }
    }

    warnings
}
