// ABOUTME: Writes generated reports and exports into an output directory
// ABOUTME: Creates the directory when missing and replaces existing files

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::error::ReportResult;

/// Writes `content` to `dir/filename` and returns the full path
pub async fn write_report_file(dir: &Path, filename: &str, content: &str) -> ReportResult<PathBuf> {
    fs::create_dir_all(dir).await?;
    let path = dir.join(filename);
    fs::write(&path, content).await?;
    info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(path)
}
