//! Output Path Builder.
//!
//! Layout: `{base}/applications/{company}/{role}/{YYYYMMDD}/{YYYYMMDD_HHMMSS}`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::errors::ForgeError;

pub const APPLICATIONS_DIR: &str = "applications";

/// Lowercases and replaces spaces and path separators with underscores. Leading
/// dots are dropped so a segment can never climb out of its parent.
pub fn normalize_segment(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace([' ', '/', '\\'], "_")
        .trim_start_matches('.')
        .to_string()
}

/// Pure path computation for a given instant.
pub fn output_dir_at(base_dir: &Path, company: &str, role: &str, now: DateTime<Local>) -> PathBuf {
    base_dir
        .join(APPLICATIONS_DIR)
        .join(normalize_segment(company))
        .join(normalize_segment(role))
        .join(now.format("%Y%m%d").to_string())
        .join(now.format("%Y%m%d_%H%M%S").to_string())
}

/// Computes the output directory for now and creates it with all parents.
/// Existing directories are fine; any other filesystem error propagates.
pub async fn build_output_dir(
    base_dir: &Path,
    company: &str,
    role: &str,
) -> Result<PathBuf, ForgeError> {
    let path = output_dir_at(base_dir, company, role, Local::now());
    tokio::fs::create_dir_all(&path).await?;
    info!("Output directory: {}", path.display());
    Ok(path)
}
