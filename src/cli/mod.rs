use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::errors::PromptCheckError;
use crate::wire::{FieldValue, Values};

#[derive(ValueEnum, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "promptcheck", version, about = "Validate, resolve and score prompt templates")]
pub struct Args {
    /// Path to a bundle JSON file (template + variables + values).
    #[arg(long)]
    pub bundle: Option<String>,

    /// Inline template text, as an alternative to --bundle.
    #[arg(long)]
    pub template: Option<String>,

    /// Supply a value for a placeholder, repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Run the interactive authoring wizard.
    #[arg(long, default_value_t = false)]
    pub wizard: bool,

    #[arg(long, value_enum, default_value_t = OutputKind::Text)]
    pub format: OutputKind,

    /// Project root; overrides the config file's `root` when passed.
    #[arg(long)]
    pub root: Option<String>,

    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Skip writing run artifacts.
    #[arg(long, default_value_t = false)]
    pub no_save: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

/// Parse repeated `--set name=value` flags into a values map. Later flags
/// win over earlier ones for the same name.
pub fn parse_value_flags(raw: &[String]) -> Result<Values, PromptCheckError> {
    let mut values = Values::new();
    for entry in raw {
        let (name, value) = entry.split_once('=').ok_or_else(|| {
            PromptCheckError::Schema(format!("--set needs NAME=VALUE, got '{}'", entry))
        })?;
        if name.is_empty() {
            return Err(PromptCheckError::Schema(format!(
                "--set needs a non-empty name in '{}'",
                entry
            )));
        }
        values.insert(name.to_string(), FieldValue::Text(value.to_string()));
    }
    Ok(values)
}
