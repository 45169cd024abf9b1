//! Dangling symlink collection.
//!
//! Runs immediately after the install pass over the same directory and
//! reclaims links left over from a prior install: entries deleted upstream
//! or reclassified as skip.  Only links owned by this installation (link
//! value resolving into the source directory) are ever touched.

use std::path::Path;

use anyhow::Result;

use super::{Context, Report, install};
use crate::config::directives::{Directives, is_implicitly_excluded};
use crate::fsutil;

/// Remove owned symlinks in `target` that are broken or newly excluded.
pub(crate) fn prune_dangling(
    ctx: &Context,
    source: &Path,
    target: &Path,
    directives: &Directives,
    extra_skip: &[String],
    report: &mut Report,
) -> Result<()> {
    // During a dry-run descent the target directory may not exist yet.
    if !target.is_dir() {
        return Ok(());
    }

    let source_real = dunce::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());

    for name in install::sorted_entry_names(target)? {
        let path = target.join(&name);
        let Ok(meta) = path.symlink_metadata() else {
            continue;
        };
        if !meta.file_type().is_symlink() {
            continue;
        }
        let owned = fsutil::link_parent_realpath(&path, target)
            .is_some_and(|parent| parent == source_real);
        if !owned {
            continue;
        }

        let broken = std::fs::metadata(&path).is_err();
        let excluded = directives.is_skipped(&name)
            || extra_skip.iter().any(|s| s == &name)
            || is_implicitly_excluded(&name);
        if !broken && !excluded {
            continue;
        }

        if ctx.options.dry_run {
            ctx.log
                .dry_run(&format!("would remove stale link {}", path.display()));
            report.pruned += 1;
            continue;
        }
        match fsutil::remove_symlink(&path) {
            Ok(()) => {
                ctx.log.debug(&format!("pruned {}", path.display()));
                report.pruned += 1;
            }
            Err(e) => ctx.fault(report, e)?,
        }
    }
    Ok(())
}
