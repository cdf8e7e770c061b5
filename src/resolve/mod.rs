use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::wire::{FieldValue, Values, Variable};

/// Placeholder tokens look like `{tone}`. Names share the variable-name
/// charset; anything else inside braces is literal text, not a token.
fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("valid token regex"))
}

/// Result of substituting a template's placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// The rendered text. Tokens without a value render as `[name]` so the
    /// reader can see what is still missing.
    pub text: String,
    /// Token names that received a value, in order of first appearance.
    pub substituted: Vec<String>,
    /// Token names left unfilled, in order of first appearance.
    pub missing: Vec<String>,
}

impl Resolution {
    pub fn complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Substitute every `{name}` token in `template` with its value.
///
/// Single pass: substituted values are never rescanned for tokens, so a
/// value containing brace syntax cannot trigger another round of
/// substitution. Pure; never fails. Unknown tokens are not an error; they
/// fall back to the `[name]` marker like any other missing value.
pub fn resolve(template: &str, values: &Values) -> Resolution {
    let mut substituted: Vec<String> = Vec::new();
    let mut missing: Vec<String> = Vec::new();

    let text = token_re()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match values.get(name) {
                Some(v) => {
                    if !substituted.iter().any(|n| n == name) {
                        substituted.push(name.to_string());
                    }
                    v.render()
                }
                None => {
                    if !missing.iter().any(|n| n == name) {
                        missing.push(name.to_string());
                    }
                    format!("[{}]", name)
                }
            }
        })
        .into_owned();

    Resolution { text, substituted, missing }
}

/// Like [`resolve`], but lets declared `default_value`s stand in for values
/// the caller never supplied. Used by the authoring preview; the raw
/// contract of [`resolve`] is unchanged.
pub fn resolve_with_defaults(
    template: &str,
    values: &Values,
    variables: &[Variable],
) -> Resolution {
    let mut merged = values.clone();
    for var in variables {
        if let Some(default) = &var.default_value {
            merged
                .entry(var.name.clone())
                .or_insert_with(|| FieldValue::Text(default.clone()));
        }
    }
    resolve(template, &merged)
}
