//! Atomic file writes using a temp-and-rename strategy.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::core::DepstampError;

/// Atomically writes `content` to `path`, replacing any existing file.
///
/// The content is written to a sibling `<name>.tmp` file, flushed and synced,
/// then renamed over the target. Readers see either the old file or the new
/// one. The parent directory must already exist (see
/// [`ensure_parent_dir`](super::ensure_parent_dir)).
///
/// # Errors
///
/// Returns [`DepstampError::OutputWriteFailed`] with the underlying I/O error
/// as its cause. The temp file is removed on failure.
pub async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = write_and_rename(&temp_path, path, content).await;
    if result.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }

    result.with_context(|| DepstampError::OutputWriteFailed {
        path: path.display().to_string(),
    })
}

async fn write_and_rename(temp_path: &Path, path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(content).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
