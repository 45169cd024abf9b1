//! Top-level subcommand orchestration.

pub mod install;
pub mod uninstall;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{CONTROL_FILE, Options};
use crate::engine::Context;
use crate::logging::Logger;
use crate::platform::Platform;

/// Resolve the source tree from CLI arguments or the environment.
///
/// Order: `--source`, `$DFM_ROOT`, then the current directory when it holds
/// a control file.
///
/// # Errors
///
/// Returns an error if no source directory can be determined.
pub fn resolve_source(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref source) = global.source {
        return Ok(source.clone());
    }
    if let Ok(root) = std::env::var("DFM_ROOT") {
        return Ok(PathBuf::from(root));
    }
    let cwd = std::env::current_dir()?;
    if cwd.join(CONTROL_FILE).exists() {
        return Ok(cwd);
    }
    anyhow::bail!(
        "cannot determine source directory: use --source, set DFM_ROOT, \
         or run from a directory containing {CONTROL_FILE}"
    );
}

/// Resolve the target directory: `--target` or the home directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn resolve_target(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref target) = global.target {
        return Ok(target.clone());
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine the home directory"))
}

/// Build the engine context and resolve both trees.
pub(crate) fn setup(global: &GlobalOpts, log: &Arc<Logger>) -> Result<(Context, PathBuf, PathBuf)> {
    let source = resolve_source(global)?;
    let target = resolve_target(global)?;
    let options = Options {
        dry_run: global.dry_run,
        strict: global.strict,
    };
    let ctx = Context::new(options, Platform::detect(), Arc::clone(log));
    Ok((ctx, source, target))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn opts_with_source(source: Option<PathBuf>) -> GlobalOpts {
        GlobalOpts {
            dry_run: false,
            strict: false,
            source,
            target: None,
        }
    }

    #[test]
    fn resolve_source_prefers_explicit_flag() {
        let global = opts_with_source(Some(PathBuf::from("/explicit/dotfiles")));
        assert_eq!(
            resolve_source(&global).unwrap(),
            PathBuf::from("/explicit/dotfiles")
        );
    }

    #[test]
    fn resolve_target_prefers_explicit_flag() {
        let global = GlobalOpts {
            dry_run: false,
            strict: false,
            source: None,
            target: Some(PathBuf::from("/somewhere")),
        };
        assert_eq!(resolve_target(&global).unwrap(), PathBuf::from("/somewhere"));
    }

    #[test]
    fn resolve_target_falls_back_to_home() {
        let global = opts_with_source(None);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolve_target(&global).unwrap(), home);
        }
    }
}
