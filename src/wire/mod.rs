use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

use crate::errors::PromptCheckError;
use crate::resolve::Resolution;
use crate::schema::ValidationResult;
use crate::score::QualityScore;

/// ========================================
/// Bundle / report data model
/// ========================================

/// Upper bound for bundle files; anything larger is rejected rather than
/// silently truncated.
const MAX_BUNDLE_BYTES: usize = 1_048_576;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    #[default]
    Text,
    Textarea,
    Select,
    Number,
}

/// A named, typed slot that a `{name}` placeholder references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: VarKind,
    #[serde(default)]
    pub required: bool,
    /// Only meaningful for `select`; must be non-empty there.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Variable {
    pub fn text(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: VarKind::Text,
            required,
            options: Vec::new(),
            default_value: None,
        }
    }

    pub fn select(name: &str, options: &[&str], required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: VarKind::Select,
            required,
            options: options.iter().map(|s| s.to_string()).collect(),
            default_value: None,
        }
    }

    pub fn number(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: VarKind::Number,
            required,
            options: Vec::new(),
            default_value: None,
        }
    }
}

/// A value supplied for a variable. Numbers arrive as JSON numbers or as
/// strings typed into a form field; the validator coerces per variable kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Literal rendering used by the resolver.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }

}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

pub type Values = BTreeMap<String, FieldValue>;

/// A template plus its variable schema and any supplied values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptBundle {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub template: String,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub values: Values,
}

impl Default for PromptBundle {
    fn default() -> Self {
        Self {
            schema_version: "v1".into(),
            title: None,
            template: String::new(),
            variables: Vec::new(),
            values: Values::new(),
        }
    }
}

impl PromptBundle {
    pub fn from_path(path: &Path) -> Result<Self, PromptCheckError> {
        let data = fs_err::read(path)
            .map_err(|e| PromptCheckError::Bundle(format!("{}: {}", path.display(), e)))?;
        if data.len() > MAX_BUNDLE_BYTES {
            return Err(PromptCheckError::Bundle(format!(
                "{}: bundle exceeds {} bytes",
                path.display(),
                MAX_BUNDLE_BYTES
            )));
        }
        serde_json::from_slice(&data)
            .map_err(|e| PromptCheckError::Bundle(format!("{}: {}", path.display(), e)))
    }
}

/// Everything one evaluation run produced; saved as `report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub schema_version: String,
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub validation: ValidationResult,
    pub resolution: Resolution,
    pub score: QualityScore,
}
