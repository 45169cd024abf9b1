//! Directory-level uninstall pass.
//!
//! Mirrors the installer: remove source-owned symlinks, rename backed-up
//! originals back into place, and recurse into expanded subdirectories.
//! Backup directories themselves are never deleted.

use std::path::Path;

use anyhow::Result;

use super::{Context, Report, backup, install};
use crate::config::directives::{CONTROL_FILE, Directives};
use crate::fsutil;

/// Uninstall one directory level and everything below it.
///
/// Uses the same directive parse as the installer, so both directions agree
/// on which names recurse.
pub(crate) fn uninstall_directory(
    ctx: &Context,
    source: &Path,
    target: &Path,
    report: &mut Report,
) -> Result<()> {
    let directives = Directives::load(&source.join(CONTROL_FILE))?;
    for warning in &directives.warnings {
        ctx.log.debug(warning);
    }

    let source_real = dunce::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());

    for name in install::sorted_entry_names(target)? {
        if name == backup::BACKUP_DIR {
            continue;
        }
        let path = target.join(&name);
        let Ok(meta) = path.symlink_metadata() else {
            continue;
        };
        if !meta.file_type().is_symlink() {
            continue;
        }

        let owned = fsutil::link_parent_realpath(&path, target)
            .is_some_and(|parent| parent == source_real);
        if owned {
            if ctx.options.dry_run {
                ctx.log
                    .dry_run(&format!("would remove link {}", path.display()));
                report.removed += 1;
            } else {
                match fsutil::remove_symlink(&path) {
                    Ok(()) => {
                        ctx.log.debug(&format!("removed {}", path.display()));
                        report.removed += 1;
                    }
                    Err(e) => {
                        ctx.fault(report, e)?;
                        continue;
                    }
                }
            }
        }

        // Restore a displaced original regardless of whether the symlink was
        // source-owned.
        if backup::has_backup(target, &name) {
            if ctx.options.dry_run {
                ctx.log
                    .dry_run(&format!("would restore {name} from backup"));
                report.restored += 1;
            } else {
                match backup::restore(target, &name) {
                    Ok(true) => {
                        ctx.log.debug(&format!("restored {}", path.display()));
                        report.restored += 1;
                    }
                    Ok(false) => {}
                    Err(e) => ctx.fault(report, e)?,
                }
            }
        }
    }

    for name in &directives.recurse {
        let child_source = source.join(name);
        let child_target = target.join(name);
        if !child_source.is_dir() {
            ctx.log
                .debug(&format!("recurse '{name}' is not a directory, skipping"));
            continue;
        }
        // Only descend into real directories; a still-symlinked child was
        // handled (or left alone) by the loop above.
        let is_real_dir = child_target
            .symlink_metadata()
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if is_real_dir {
            uninstall_directory(ctx, &child_source, &child_target, report)?;
        }
    }
    Ok(())
}
