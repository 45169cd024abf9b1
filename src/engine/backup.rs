//! Move-aside backup of entries displaced by symlink installation.
//!
//! Each installed directory level keeps its own flat holding area; a
//! recursive descent creates a nested one inside the sub-target rather than
//! sharing the parent's.  Entries are moved, never copied, so at most one
//! copy of the original content exists at any time.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::fsutil;

/// Name of the per-directory backup holding area.
pub const BACKUP_DIR: &str = ".backup";

/// Path of the backup directory for a target directory level.
#[must_use]
pub fn backup_dir(target: &Path) -> PathBuf {
    target.join(BACKUP_DIR)
}

/// Whether a backup of `name` exists for this target level.
#[must_use]
pub fn has_backup(target: &Path, name: &str) -> bool {
    backup_dir(target).join(name).symlink_metadata().is_ok()
}

/// Move `target/<name>` into the backup directory, creating it on first use.
///
/// A prior backup of the same name is overwritten: last write wins, with no
/// collision detection.
///
/// # Errors
///
/// Returns an error if the backup directory cannot be created or the entry
/// cannot be moved.
pub fn move_aside(target: &Path, name: &str) -> Result<PathBuf> {
    let dir = backup_dir(target);
    fsutil::ensure_dir(&dir)?;

    let dest = dir.join(name);
    clear_path(&dest)?;

    let src = target.join(name);
    std::fs::rename(&src, &dest)
        .with_context(|| format!("moving {} to {}", src.display(), dest.display()))?;
    Ok(dest)
}

/// Rename a backed-up entry back into the target directory.
///
/// Returns `Ok(false)` when no backup of `name` exists.  Anything still
/// occupying the target name (e.g. a symlink that was not source-owned) is
/// cleared first so the original content takes its place.
///
/// # Errors
///
/// Returns an error if the entry cannot be renamed into place.
pub fn restore(target: &Path, name: &str) -> Result<bool> {
    let saved = backup_dir(target).join(name);
    if saved.symlink_metadata().is_err() {
        return Ok(false);
    }

    let dest = target.join(name);
    if std::fs::rename(&saved, &dest).is_err() {
        clear_path(&dest)?;
        std::fs::rename(&saved, &dest)
            .with_context(|| format!("restoring {} to {}", saved.display(), dest.display()))?;
    }
    Ok(true)
}

/// Remove whatever occupies `path`, whether file, symlink, or directory.
fn clear_path(path: &Path) -> Result<()> {
    if let Ok(meta) = path.symlink_metadata() {
        if meta.is_dir() {
            std::fs::remove_dir_all(path)
                .with_context(|| format!("removing directory {}", path.display()))?;
        } else {
            std::fs::remove_file(path).with_context(|| format!("removing {}", path.display()))?;
        }
    }
    Ok(())
}
