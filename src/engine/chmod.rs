//! File-mode enforcement for chmod directives.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use super::{Context, Report};

/// Apply each chmod-map entry to `target/<name>`.
///
/// Modes are applied unconditionally; the current mode is not inspected
/// first.
pub(crate) fn apply_modes(
    ctx: &Context,
    target: &Path,
    modes: &BTreeMap<String, u32>,
    report: &mut Report,
) -> Result<()> {
    if modes.is_empty() {
        return Ok(());
    }
    if !ctx.platform.supports_modes() {
        ctx.log
            .debug("file modes are not supported on this platform");
        return Ok(());
    }
    for (name, mode) in modes {
        apply_mode(ctx, target, name, *mode, report)?;
    }
    Ok(())
}

#[cfg(unix)]
fn apply_mode(
    ctx: &Context,
    target: &Path,
    name: &str,
    mode: u32,
    report: &mut Report,
) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    use anyhow::Context as _;

    let path = target.join(name);
    if ctx.options.dry_run {
        ctx.log
            .dry_run(&format!("would chmod {mode:04o} {}", path.display()));
        report.modes_applied += 1;
        return Ok(());
    }
    match std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("setting mode {mode:04o} on {}", path.display()))
    {
        Ok(()) => {
            ctx.log.debug(&format!("chmod {mode:04o} {}", path.display()));
            report.modes_applied += 1;
            Ok(())
        }
        Err(e) => ctx.fault(report, e),
    }
}

#[cfg(not(unix))]
fn apply_mode(
    _ctx: &Context,
    _target: &Path,
    _name: &str,
    _mode: u32,
    _report: &mut Report,
) -> Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::engine::test_helpers::{make_context, make_context_with};
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn applies_exact_mode_bits() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("secrets.conf"), "token").unwrap();
        let modes = BTreeMap::from([("secrets.conf".to_string(), 0o600)]);
        let ctx = make_context();
        let mut report = Report::default();

        apply_modes(&ctx, dir.path(), &modes, &mut report).unwrap();

        assert_eq!(report.modes_applied, 1);
        let mode = std::fs::metadata(dir.path().join("secrets.conf"))
            .unwrap()
            .permissions()
            .mode()
            & 0o7777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn missing_target_is_a_recoverable_fault() {
        let dir = tempfile::tempdir().unwrap();
        let modes = BTreeMap::from([("absent".to_string(), 0o600)]);
        let ctx = make_context();
        let mut report = Report::default();

        apply_modes(&ctx, dir.path(), &modes, &mut report).unwrap();

        assert_eq!(report.modes_applied, 0);
        assert_eq!(report.errors, 1);
    }

    #[test]
    fn dry_run_leaves_modes_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("secrets.conf");
        std::fs::write(&file, "token").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o644)).unwrap();
        let modes = BTreeMap::from([("secrets.conf".to_string(), 0o600)]);
        let ctx = make_context_with(Options {
            dry_run: true,
            strict: false,
        });
        let mut report = Report::default();

        apply_modes(&ctx, dir.path(), &modes, &mut report).unwrap();

        assert_eq!(report.modes_applied, 1);
        let mode = std::fs::metadata(&file).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode, 0o644);
    }
}
