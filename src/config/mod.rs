use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::score::ScoreWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: String,
    pub root: String,
    /// Where evaluation runs land, relative to `root`.
    pub out_dir: String,
    pub save_reports: bool,
    pub auto_approve: bool,
    pub weights: ScoreWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: "2026-05-01".into(),
            root: ".".into(),
            out_dir: ".promptcheck/runs".into(),
            save_reports: true,
            auto_approve: false,
            weights: ScoreWeights::default(),
        }
    }
}

impl Config {
    /// Defaults, optionally overlaid by a TOML file. Missing keys in the
    /// file keep their default values.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(p) => {
                let text = fs_err::read_to_string(p)
                    .with_context(|| format!("reading config {}", p.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("parsing config {}", p.display()))
            }
        }
    }

    /// Apply a command-line root override; an absent flag keeps whatever
    /// the config file (or default) set.
    pub fn with_root_override(mut self, root: Option<&str>) -> Self {
        if let Some(root) = root {
            self.root = root.to_string();
        }
        self
    }
}
