//! The symlink-farm install engine.
//!
//! Overlays a source tree onto a target directory by creating symlinks,
//! preserving displaced entries in a per-directory backup area, and reverses
//! the overlay cleanly.  All operations take an explicit [`Context`]; the
//! engine keeps no global state and never changes the process working
//! directory.

pub mod backup;
mod chmod;
mod cleanup;
mod hooks;
mod install;
mod uninstall;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::config::Options;
use crate::logging::Logger;
use crate::platform::Platform;

/// Shared state for one engine run.
#[derive(Debug)]
pub struct Context {
    /// Run options (dry-run, strict).
    pub options: Options,
    /// Detected platform information.
    pub platform: Platform,
    /// Logger for user-facing output.
    pub log: Arc<Logger>,
}

impl Context {
    /// Create a new context.
    #[must_use]
    pub const fn new(options: Options, platform: Platform, log: Arc<Logger>) -> Self {
        Self {
            options,
            platform,
            log,
        }
    }

    /// Record a recoverable per-entry fault.
    ///
    /// Under `--strict` the fault is returned as a run-level error;
    /// otherwise it is logged, counted, and the run continues with the
    /// remaining entries.
    pub(crate) fn fault(&self, report: &mut Report, err: anyhow::Error) -> Result<()> {
        if self.options.strict {
            return Err(err);
        }
        self.log.error(&format!("{err:#}"));
        report.errors += 1;
        Ok(())
    }
}

/// Counters describing what a run did (or, under dry-run, would do).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Symlinks created.
    pub linked: u32,
    /// Entries whose target was already a symlink and was left untouched.
    pub already_linked: u32,
    /// Pre-existing entries moved into the backup directory.
    pub backed_up: u32,
    /// Stale owned symlinks removed by the dangling collector.
    pub pruned: u32,
    /// Entries excluded by skip directives.
    pub skipped: u32,
    /// Hook files executed.
    pub hooks_run: u32,
    /// File modes applied.
    pub modes_applied: u32,
    /// Owned symlinks removed during uninstall.
    pub removed: u32,
    /// Backup entries renamed back into place during uninstall.
    pub restored: u32,
    /// Non-fatal warnings emitted.
    pub warnings: u32,
    /// Recoverable per-entry faults.
    pub errors: u32,
}

impl Report {
    /// One-line summary of an install run.
    #[must_use]
    pub fn install_summary(&self) -> String {
        format!(
            "{} linked, {} already linked, {} backed up, {} pruned, {} skipped, \
             {} hooks run, {} modes applied, {} warnings, {} errors",
            self.linked,
            self.already_linked,
            self.backed_up,
            self.pruned,
            self.skipped,
            self.hooks_run,
            self.modes_applied,
            self.warnings,
            self.errors
        )
    }

    /// One-line summary of an uninstall run.
    #[must_use]
    pub fn uninstall_summary(&self) -> String {
        format!(
            "{} removed, {} restored, {} warnings, {} errors",
            self.removed, self.restored, self.warnings, self.errors
        )
    }
}

/// Install the source tree into the target directory.
///
/// Walks one directory level at a time: parse directives, create symlinks
/// (backing up conflicts), prune stale owned links, expand recursed
/// subdirectories, run hooks, and enforce file modes.  `extra_skip` names
/// are excluded at the top level only.
///
/// # Errors
///
/// Returns an error if either directory cannot be resolved, a control file
/// is malformed, or (under `--strict`) any filesystem operation fails.
pub fn install(
    ctx: &Context,
    source: &Path,
    target: &Path,
    extra_skip: &[String],
) -> Result<Report> {
    let (source, target) = resolve_trees(source, target)?;
    let mut report = Report::default();
    install::install_directory(ctx, &source, &target, extra_skip, &mut report)?;
    Ok(report)
}

/// Remove the overlay: delete source-owned symlinks from the target tree and
/// restore any backed-up originals.
///
/// # Errors
///
/// Returns an error if either directory cannot be resolved, a control file
/// is malformed, or (under `--strict`) any filesystem operation fails.
pub fn uninstall(ctx: &Context, source: &Path, target: &Path) -> Result<Report> {
    let (source, target) = resolve_trees(source, target)?;
    let mut report = Report::default();
    uninstall::uninstall_directory(ctx, &source, &target, &mut report)?;
    Ok(report)
}

/// Canonicalize and validate the source and target directories.
fn resolve_trees(source: &Path, target: &Path) -> Result<(std::path::PathBuf, std::path::PathBuf)> {
    let source = dunce::canonicalize(source)
        .with_context(|| format!("resolving source directory {}", source.display()))?;
    let target = dunce::canonicalize(target)
        .with_context(|| format!("resolving target directory {}", target.display()))?;
    anyhow::ensure!(
        source.is_dir(),
        "source {} is not a directory",
        source.display()
    );
    anyhow::ensure!(
        target.is_dir(),
        "target {} is not a directory",
        target.display()
    );
    Ok((source, target))
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::test_helpers::{make_context, make_context_with};
    use super::*;

    #[test]
    fn fault_is_recoverable_by_default() {
        let ctx = make_context();
        let mut report = Report::default();
        ctx.fault(&mut report, anyhow::anyhow!("boom")).unwrap();
        assert_eq!(report.errors, 1);
    }

    #[test]
    fn fault_is_fatal_under_strict() {
        let ctx = make_context_with(Options {
            dry_run: false,
            strict: true,
        });
        let mut report = Report::default();
        let result = ctx.fault(&mut report, anyhow::anyhow!("boom"));
        assert!(result.is_err());
        assert_eq!(report.errors, 0);
    }

    #[test]
    fn install_summary_lists_all_counters() {
        let report = Report {
            linked: 2,
            skipped: 1,
            ..Report::default()
        };
        assert_eq!(
            report.install_summary(),
            "2 linked, 0 already linked, 0 backed up, 0 pruned, 1 skipped, \
             0 hooks run, 0 modes applied, 0 warnings, 0 errors"
        );
    }

    #[test]
    fn uninstall_summary_lists_uninstall_counters() {
        let report = Report {
            removed: 3,
            restored: 1,
            ..Report::default()
        };
        assert_eq!(report.uninstall_summary(), "3 removed, 1 restored, 0 warnings, 0 errors");
    }

    #[test]
    fn install_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = make_context();
        let result = install(&ctx, &dir.path().join("absent"), dir.path(), &[]);
        assert!(result.is_err());
    }

    #[test]
    fn uninstall_rejects_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = make_context();
        let result = uninstall(&ctx, dir.path(), &dir.path().join("absent"));
        assert!(result.is_err());
    }
}
