//! Uninstall command implementation.

use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::engine;
use crate::logging::Logger;

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if source/target resolution fails, a control file is
/// malformed, or the run finished with recoverable faults.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let (ctx, source, target) = super::setup(global, log)?;

    log.stage("Removing dotfiles");
    log.info(&format!("source: {}", source.display()));
    log.info(&format!("target: {}", target.display()));

    let report = engine::uninstall(&ctx, &source, &target)?;

    log.info(&report.uninstall_summary());
    if let Some(path) = log.log_path() {
        log.debug(&format!("log: {}", path.display()));
    }

    if report.errors > 0 {
        anyhow::bail!("{} entries could not be removed", report.errors);
    }
    Ok(())
}
