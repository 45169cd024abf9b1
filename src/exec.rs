//! Child-process execution for hook files.

use anyhow::{Context as _, Result};
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Run `program` as a child process with `dir` as its working directory.
///
/// stdout, stderr, and the environment are inherited from the current
/// process; nothing is captured.  The exit status is returned without
/// interpretation so the caller can decide whether it matters.
///
/// # Errors
///
/// Returns an error only if the child process cannot be spawned.
pub fn run_inherited(dir: &Path, program: &Path) -> Result<ExitStatus> {
    Command::new(program)
        .current_dir(dir)
        .status()
        .with_context(|| format!("spawning {}", program.display()))
}
