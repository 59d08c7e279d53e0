//! Directory creation for output paths.
//!
//! The ensure walk is iterative: it climbs from the target directory towards
//! the root collecting every missing ancestor, then creates them root-to-leaf.
//! Path depth never turns into call-stack depth.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::DepstampError;

/// Ensures a directory exists, creating it and every missing ancestor.
///
/// Returns the directories that were created, ordered root-to-leaf. An empty
/// vector means everything already existed. Calling it again on the same path
/// is a no-op.
///
/// # Errors
///
/// - [`DepstampError::NotADirectory`] if the path or one of its ancestors is
///   a regular file
/// - [`DepstampError::DirectoryCreateFailed`] if a directory cannot be created
///
/// # Examples
///
/// ```rust,no_run
/// use depstamp::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let created = ensure_dir(Path::new("site/about/versions")).await?;
/// for dir in created {
///     println!("created {}", dir.display());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn ensure_dir(path: &Path) -> Result<Vec<PathBuf>> {
    let mut missing = Vec::new();
    let mut current = Some(path);

    while let Some(candidate) = current {
        // `Path::new("out.html").parent()` is `Some("")`: the working directory.
        if candidate.as_os_str().is_empty() {
            break;
        }

        match fs::metadata(candidate).await {
            Ok(metadata) if metadata.is_dir() => break,
            Ok(_) => {
                return Err(DepstampError::NotADirectory {
                    path: candidate.display().to_string(),
                }
                .into());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                missing.push(candidate.to_path_buf());
                current = candidate.parent();
            }
            Err(e) => {
                return Err(e).with_context(|| DepstampError::DirectoryCreateFailed {
                    path: candidate.display().to_string(),
                });
            }
        }
    }

    missing.reverse();

    for dir in &missing {
        match fs::create_dir(dir).await {
            Ok(()) => tracing::debug!("Created directory {}", dir.display()),
            // Lost a race with another writer; the directory is there either way.
            Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => {}
            Err(e) => {
                return Err(e).with_context(|| DepstampError::DirectoryCreateFailed {
                    path: dir.display().to_string(),
                });
            }
        }
    }

    Ok(missing)
}

/// Ensures the parent directory of a file path exists.
///
/// A bare file name (no parent component) needs nothing and returns an empty
/// vector.
pub async fn ensure_parent_dir(path: &Path) -> Result<Vec<PathBuf>> {
    match path.parent() {
        Some(parent) => ensure_dir(parent).await,
        None => Ok(Vec::new()),
    }
}

/// Whether `path` exists.
///
/// A path running through a regular file (`notes.txt/out.html`) cannot exist
/// and reports `false`. Any other I/O error, such as a permission failure on
/// an ancestor, is returned so callers never mistake it for absence.
pub async fn path_exists(path: &Path) -> std::io::Result<bool> {
    match fs::try_exists(path).await {
        Ok(exists) => Ok(exists),
        Err(e) if e.kind() == ErrorKind::NotADirectory => Ok(false),
        Err(e) => Err(e),
    }
}
