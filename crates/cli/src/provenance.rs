//! Provenance sidecars for transformed point clouds.
//!
//! `apply` writes `points.csv` and, next to it, `points.provenance.json`
//! recording which matrix moved which input, from which code revision.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced a point-cloud artifact.
#[derive(Serialize)]
pub struct PointCloudRun {
    /// Row-major 4x4 coefficients that were applied.
    pub matrix: [f64; 16],
    pub input: String,
    pub rows: usize,
    pub tag: Option<String>,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    version: &'static str,
    callsite: String,
    run: &'a PointCloudRun,
    output: String,
}

/// Write the sidecar for `artifact` and return its path.
#[track_caller]
pub fn write_sidecar(artifact: &Path, run: &PointCloudRun) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    let caller = Location::caller();
    let doc = Sidecar {
        code_rev: code_rev(),
        version: xform::VERSION,
        callsite: format!("{}:{}", caller.file(), caller.line()),
        run,
        output: artifact.display().to_string(),
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `dir/points.csv` becomes `dir/points.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "points".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Build-time `GIT_COMMIT`, then runtime `GIT_COMMIT`, then `git rev-parse`.
pub fn code_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
