//! Hook execution.
//!
//! Hooks are fire-and-forget: after a subtree is installed, each exec-listed
//! file is run with the target directory as working directory and its exit
//! status is not inspected.  A hook that cannot be made executable is
//! silently skipped; a hook that fails to spawn is surfaced as a warning.

use std::path::Path;

use anyhow::Result;

use super::{Context, Report};

/// Run the exec-listed hooks for one installed directory, in file order.
pub(crate) fn run_hooks(
    ctx: &Context,
    source: &Path,
    target: &Path,
    exec_list: &[String],
    report: &mut Report,
) -> Result<()> {
    if exec_list.is_empty() {
        return Ok(());
    }
    if !ctx.platform.supports_hooks() {
        ctx.log
            .debug("hook execution is not supported on this platform");
        return Ok(());
    }
    for name in exec_list {
        run_hook(ctx, source, target, name, report);
    }
    Ok(())
}

#[cfg(unix)]
fn run_hook(ctx: &Context, source: &Path, target: &Path, name: &str, report: &mut Report) {
    use std::os::unix::fs::PermissionsExt;

    let hook = source.join(name);
    let meta = match std::fs::metadata(&hook) {
        Ok(m) => m,
        Err(_) => {
            ctx.log
                .warn(&format!("hook '{name}' not found in {}", source.display()));
            report.warnings += 1;
            return;
        }
    };
    if !meta.is_file() {
        ctx.log.warn(&format!("hook '{name}' is not a regular file"));
        report.warnings += 1;
        return;
    }

    let mode = meta.permissions().mode();
    if mode & 0o111 == 0 {
        // Grant owner execute; only the file's owner can do this, so a
        // failure means the hook is not ours to run.
        if ctx.options.dry_run {
            ctx.log.dry_run(&format!(
                "would grant execute permission on {}",
                hook.display()
            ));
        } else if std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(mode | 0o100))
            .is_err()
        {
            ctx.log
                .debug(&format!("cannot make hook '{name}' executable, skipping"));
            return;
        }
    }

    if ctx.options.dry_run {
        ctx.log.dry_run(&format!(
            "would run hook {} in {}",
            hook.display(),
            target.display()
        ));
        report.hooks_run += 1;
        return;
    }

    match crate::exec::run_inherited(target, &hook) {
        Ok(status) => {
            // Exit status is deliberately not acted upon.
            ctx.log
                .debug(&format!("ran hook {} ({status})", hook.display()));
            report.hooks_run += 1;
        }
        Err(e) => {
            ctx.log.warn(&format!("hook '{name}' failed to start: {e:#}"));
            report.warnings += 1;
        }
    }
}

#[cfg(not(unix))]
fn run_hook(_ctx: &Context, _source: &Path, _target: &Path, _name: &str, _report: &mut Report) {}
