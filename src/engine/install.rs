//! Directory-level install pass.
//!
//! For one directory: parse directives, create symlinks for eligible entries
//! (moving conflicts aside), prune stale owned links, expand recursed
//! subdirectories, run hooks, and enforce file modes.

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{Context, Report, backup, chmod, cleanup, hooks};
use crate::config::directives::{CONTROL_FILE, Directives, is_implicitly_excluded};
use crate::fsutil;

/// Install one directory level and everything below it.
///
/// `source` and `target` must be absolute.  `extra_skip` applies to this
/// level only; recursive descents start with an empty extra-skip set.
pub(crate) fn install_directory(
    ctx: &Context,
    source: &Path,
    target: &Path,
    extra_skip: &[String],
    report: &mut Report,
) -> Result<()> {
    // Parse first: a malformed control file must abort before any entry of
    // this directory is touched.
    let directives = Directives::load(&source.join(CONTROL_FILE))?;
    for warning in &directives.warnings {
        ctx.log.warn(warning);
        report.warnings += 1;
    }

    let base = fsutil::symlink_base(source, target);

    for name in sorted_entry_names(source)? {
        if is_implicitly_excluded(&name) {
            continue;
        }
        if directives.recurse.iter().any(|r| r == &name) {
            continue; // expanded below
        }
        if directives.is_skipped(&name) || extra_skip.iter().any(|s| s == &name) {
            ctx.log.debug(&format!("skipping {name}"));
            report.skipped += 1;
            continue;
        }
        link_entry(ctx, target, &base, &name, report)?;
    }

    cleanup::prune_dangling(ctx, source, target, &directives, extra_skip, report)?;
    recurse_directories(ctx, source, target, &directives, report)?;
    hooks::run_hooks(ctx, source, target, &directives.exec, report)?;
    chmod::apply_modes(ctx, target, &directives.chmod, report)?;
    Ok(())
}

/// Names of all entries in `dir`, sorted for deterministic traversal.
pub(crate) fn sorted_entry_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Create (or leave in place) the symlink for one eligible entry.
fn link_entry(
    ctx: &Context,
    target: &Path,
    base: &Path,
    name: &str,
    report: &mut Report,
) -> Result<()> {
    let link_path = target.join(name);
    let value = base.join(name);

    match link_path.symlink_metadata() {
        Ok(meta) if meta.file_type().is_symlink() => {
            // Idempotence: an existing symlink is left untouched.  Stale ones
            // are reclaimed by the dangling collector, not here.
            ctx.log.debug(&format!("already linked: {}", link_path.display()));
            report.already_linked += 1;
            return Ok(());
        }
        Ok(_) => {
            // A real file or directory occupies the name; move it aside.
            if ctx.options.dry_run {
                ctx.log.dry_run(&format!(
                    "would move {} to {}",
                    link_path.display(),
                    backup::backup_dir(target).join(name).display()
                ));
                report.backed_up += 1;
            } else {
                match backup::move_aside(target, name) {
                    Ok(dest) => {
                        ctx.log
                            .debug(&format!("backed up {} to {}", link_path.display(), dest.display()));
                        report.backed_up += 1;
                    }
                    Err(e) => {
                        // The original stays in place; do not link over it.
                        ctx.fault(report, e)?;
                        return Ok(());
                    }
                }
            }
        }
        Err(_) => {}
    }

    if ctx.options.dry_run {
        ctx.log.dry_run(&format!(
            "would link {} -> {}",
            link_path.display(),
            value.display()
        ));
        report.linked += 1;
        return Ok(());
    }

    match fsutil::create_symlink(&value, &link_path) {
        Ok(()) => {
            ctx.log.debug(&format!(
                "linked {} -> {}",
                link_path.display(),
                value.display()
            ));
            report.linked += 1;
        }
        Err(e) => ctx.fault(report, e)?,
    }
    Ok(())
}

/// Expand each recursed name into a real directory of per-entry symlinks.
fn recurse_directories(
    ctx: &Context,
    source: &Path,
    target: &Path,
    directives: &Directives,
    report: &mut Report,
) -> Result<()> {
    for name in &directives.recurse {
        let child_source = source.join(name);
        if !child_source.is_dir() {
            ctx.log.warn(&format!(
                "recurse directive '{name}' does not name a directory in {}, skipping",
                source.display()
            ));
            report.warnings += 1;
            continue;
        }

        let child_target = target.join(name);
        let is_link = child_target
            .symlink_metadata()
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        if is_link {
            // Transition from a whole-directory symlink to an expanded
            // subtree of per-entry links.
            if ctx.options.dry_run {
                ctx.log.dry_run(&format!(
                    "would expand directory symlink {} into per-entry links",
                    child_target.display()
                ));
                // Descending through the still-present symlink would report
                // source paths as conflicts; the per-entry links are implied.
                continue;
            }
            if let Err(e) = fsutil::remove_symlink(&child_target) {
                ctx.fault(report, e)?;
                continue;
            }
        }

        if ctx.options.dry_run {
            if !child_target.is_dir() {
                ctx.log
                    .dry_run(&format!("would create directory {}", child_target.display()));
            }
            install_directory(ctx, &child_source, &child_target, &[], report)?;
            continue;
        }

        if !child_target.is_dir() {
            if let Err(e) = fsutil::ensure_dir(&child_target) {
                ctx.fault(report, e)?;
                continue;
            }
        }
        install_directory(ctx, &child_source, &child_target, &[], report)?;
    }
    Ok(())
}
