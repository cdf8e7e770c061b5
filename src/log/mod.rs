use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::PromptCheckError;
use crate::wire::{EvaluationReport, PromptBundle};

pub struct SavedPaths {
    pub dir: PathBuf,
    pub bundle: PathBuf,
    pub report: PathBuf,
}

fn run_dir(cfg: &Config, id: Uuid) -> PathBuf {
    Path::new(&cfg.root).join(&cfg.out_dir).join(id.to_string())
}

/// Write `value` as pretty JSON via a temp file in the target directory, so
/// a crash mid-write never leaves a half-formed artifact behind.
fn write_json_atomic<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf, PromptCheckError> {
    let json = to_string_pretty(value)
        .map_err(|e| PromptCheckError::Report(format!("serializing {}: {}", name, e)))?;
    let tmp = NamedTempFile::new_in(dir)
        .map_err(|e| PromptCheckError::Report(format!("temp file in {}: {}", dir.display(), e)))?;
    fs::write(tmp.path(), json)
        .map_err(|e| PromptCheckError::Report(format!("writing {}: {}", name, e)))?;
    let path = dir.join(name);
    tmp.persist(&path)
        .map_err(|e| PromptCheckError::Report(format!("persisting {}: {}", path.display(), e)))?;
    Ok(path)
}

/// Save one evaluation run: the input bundle alongside its report.
pub fn save_run(
    bundle: &PromptBundle,
    report: &EvaluationReport,
    cfg: &Config,
) -> Result<SavedPaths, PromptCheckError> {
    let dir = run_dir(cfg, report.id);
    fs::create_dir_all(&dir)
        .map_err(|e| PromptCheckError::Report(format!("creating {}: {}", dir.display(), e)))?;

    let bundle_path = write_json_atomic(&dir, "bundle.json", bundle)?;
    let report_path = write_json_atomic(&dir, "report.json", report)?;

    Ok(SavedPaths { dir, bundle: bundle_path, report: report_path })
}

/// Save just an authored bundle (wizard commit).
pub fn save_bundle(bundle: &PromptBundle, cfg: &Config, id: Uuid) -> Result<PathBuf, PromptCheckError> {
    let dir = run_dir(cfg, id);
    fs::create_dir_all(&dir)
        .map_err(|e| PromptCheckError::Report(format!("creating {}: {}", dir.display(), e)))?;
    write_json_atomic(&dir, "bundle.json", bundle)
}

pub fn print_planned_paths(cfg: &Config, id: Uuid) {
    let dir = run_dir(cfg, id);
    println!("debug: planned artifacts directory: {}", dir.display());
    println!("debug: planned bundle path: {}", dir.join("bundle.json").display());
    println!("debug: planned report path: {}", dir.join("report.json").display());
    std::io::stdout().flush().ok();
}

pub fn print_saved_paths(saved: &SavedPaths) {
    println!("debug: artifacts directory: {}", saved.dir.display());
    println!("debug: bundle saved at: {}", saved.bundle.display());
    println!("debug: report saved at: {}", saved.report.display());
    std::io::stdout().flush().ok();
}
