use crate::error::SmResult;
use crate::trial::TrialLog;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn load_trial_file<P: AsRef<Path>>(path: P) -> SmResult<TrialLog> {
    debug!("loading trial log: {}", path.as_ref().display());
    let content = fs::read_to_string(&path)?;
    Ok(serde_yaml_ng::from_str(&content)?)
}

/// Load every registered trial file, in session order.
pub fn load_all_trials(paths: &[PathBuf]) -> SmResult<Vec<TrialLog>> {
    paths.iter().map(load_trial_file).collect()
}

#[derive(Debug, Deserialize)]
pub struct TrialManifest {
    pub trials: Vec<PathBuf>,
}

/// A JSON manifest listing the trial files of a study. Relative entries
/// resolve against the manifest's own directory.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> SmResult<Vec<PathBuf>> {
    let content = fs::read_to_string(&path)?;
    let manifest: TrialManifest = serde_json::from_str(&content)?;
    let base = path.as_ref().parent().unwrap_or_else(|| Path::new("."));
    Ok(manifest
        .trials
        .into_iter()
        .map(|p| if p.is_absolute() { p } else { base.join(p) })
        .collect())
}
