//! Filesystem helpers shared across the install engine.

use anyhow::{Context as _, Result};
use std::path::{Component, Path, PathBuf};

/// Ensure `path` exists as a directory, creating it and any ancestors.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).with_context(|| format!("creating directory: {}", path.display()))
}

/// Compute the base path used as the link value prefix for symlinks created
/// in `target` that point into `source`.
///
/// When the two directories live under different filesystem roots (their
/// first path components differ), links carry the absolute source path.
/// Otherwise the source is expressed relative to `target`, so the links stay
/// valid when the common mount point is itself relocated.
///
/// Both paths must be absolute.
#[must_use]
pub fn symlink_base(source: &Path, target: &Path) -> PathBuf {
    if first_component(source) == first_component(target) {
        relative_from(source, target)
    } else {
        source.to_path_buf()
    }
}

/// First path component below the root (the filesystem-root discriminator).
fn first_component(path: &Path) -> Option<Component<'_>> {
    path.components().find(|c| !matches!(c, Component::RootDir))
}

/// Express the absolute path `to` relative to the absolute directory `from`.
#[must_use]
pub fn relative_from(to: &Path, from: &Path) -> PathBuf {
    let mut to_parts = to.components().peekable();
    let mut from_parts = from.components().peekable();

    // Drop the shared prefix.
    while let (Some(a), Some(b)) = (to_parts.peek(), from_parts.peek()) {
        if a == b {
            to_parts.next();
            from_parts.next();
        } else {
            break;
        }
    }

    let mut rel = PathBuf::new();
    for _ in from_parts {
        rel.push("..");
    }
    for part in to_parts {
        rel.push(part.as_os_str());
    }
    rel
}

/// Resolve the directory component of a symlink's value to an absolute real
/// path.
///
/// Relative link values are interpreted against `containing`, the directory
/// that holds the link.  Returns `None` when `link` is not a symlink or its
/// value's parent directory no longer resolves.
#[must_use]
pub fn link_parent_realpath(link: &Path, containing: &Path) -> Option<PathBuf> {
    let value = std::fs::read_link(link).ok()?;
    let resolved = if value.is_absolute() {
        value
    } else {
        containing.join(value)
    };
    let parent = resolved.parent()?;
    dunce::canonicalize(parent).ok()
}

/// Create a symlink at `link` whose value is `value`.
///
/// # Errors
///
/// Returns an error if the link cannot be created.
pub fn create_symlink(value: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(value, link).with_context(|| {
            format!("creating symlink {} -> {}", link.display(), value.display())
        })?;
    }

    #[cfg(windows)]
    {
        // Windows distinguishes file and directory symlinks; resolve the
        // value against the link's parent to decide which one to create.
        let resolved = if value.is_absolute() {
            value.to_path_buf()
        } else {
            link.parent()
                .unwrap_or_else(|| Path::new("."))
                .join(value)
        };
        let result = if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(value, link)
        } else {
            std::os::windows::fs::symlink_file(value, link)
        };
        result.with_context(|| {
            format!("creating symlink {} -> {}", link.display(), value.display())
        })?;
    }

    Ok(())
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks must be removed with `remove_dir` rather
/// than `remove_file`; `symlink_metadata().is_dir()` returns `false` for
/// symlinks there, so the raw `FILE_ATTRIBUTE_DIRECTORY` bit is checked
/// instead.
///
/// # Errors
///
/// Returns an error if the path cannot be inspected or removed.
pub fn remove_symlink(path: &Path) -> Result<()> {
    let meta = std::fs::symlink_metadata(path)
        .with_context(|| format!("reading metadata: {}", path.display()))?;
    if is_dir_like(&meta) {
        std::fs::remove_dir(path)
            .with_context(|| format!("removing directory link: {}", path.display()))?;
    } else {
        std::fs::remove_file(path).with_context(|| format!("removing file: {}", path.display()))?;
    }
    Ok(())
}

/// Check whether metadata represents a directory-like entry.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
