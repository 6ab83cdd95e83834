//! Recursive directory copying into the module folder

use crate::error::{AssembleError, AssembleResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use walkdir::WalkDir;

/// Copy the tree under `from` into `to`, preserving relative paths
///
/// Symbolic links are followed. Missing directories are created and existing
/// files are replaced. Returns the destination of every copied file.
pub async fn copy_tree(from: &Path, to: &Path) -> AssembleResult<Vec<PathBuf>> {
    ensure_directory(from)?;
    ensure_directory(to)?;

    let mut copied_files = Vec::new();
    let nested_dest = nested_destination(from, to);

    let entries = WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| nested_dest.as_deref() != Some(e.path()));

    for entry in entries {
        let entry = entry.map_err(|e| AssembleError::copy_tree(from, e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| {
                AssembleError::copy_tree(from, std::io::Error::new(std::io::ErrorKind::Other, e))
            })?;
        let target_path = to.join(relative);

        if entry.file_type().is_dir() {
            if !fs::try_exists(&target_path).await.unwrap_or(false) {
                fs::create_dir(&target_path)
                    .await
                    .map_err(|e| AssembleError::copy_tree(from, e))?;
            }
            continue;
        }

        fs::copy(entry.path(), &target_path)
            .await
            .map_err(|e| AssembleError::copy_tree(from, e))?;
        info!(
            "Copied file [{}] -> [{}]",
            entry.file_name().to_string_lossy(),
            target_path.display()
        );

        copied_files.push(target_path);
    }

    Ok(copied_files)
}

/// Where `to` appears inside the walk of `from`, if it lies under it
///
/// The destination must not be walked, otherwise the copy descends into its
/// own output.
fn nested_destination(from: &Path, to: &Path) -> Option<PathBuf> {
    let from_canonical = std::fs::canonicalize(from).ok()?;
    let to_canonical = std::fs::canonicalize(to).ok()?;
    let relative = to_canonical.strip_prefix(&from_canonical).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(from.join(relative))
}

fn ensure_directory(path: &Path) -> AssembleResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(AssembleError::NotADirectory {
            path: path.to_path_buf(),
        })
    }
}
