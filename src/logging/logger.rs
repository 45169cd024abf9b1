//! User-facing logger facade over the tracing pipeline.

use std::path::PathBuf;

use super::utils::log_file_path;

/// Structured logger with dry-run awareness.
///
/// Methods emit [`tracing`] events; the subscriber installed by
/// [`init_subscriber`](super::init_subscriber) renders them on the console
/// and appends them to a persistent log file at
/// `$XDG_CACHE_HOME/dfm/<command>.log` (default `~/.cache/dfm/<command>.log`)
/// regardless of the console verbosity.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for the given command.
    ///
    /// Stores the log file path for display in the run summary; the file
    /// itself is created and written by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "dfm::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log an intended action suppressed by dry-run mode.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "dfm::dry_run", "{msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_methods_do_not_panic_without_subscriber() {
        let log = Logger::new("test");
        log.error("e");
        log.warn("w");
        log.stage("s");
        log.info("i");
        log.debug("d");
        log.dry_run("would do something");
    }

    #[test]
    fn log_path_points_into_dfm_cache_dir() {
        let log = Logger::new("test");
        if let Some(path) = log.log_path() {
            assert!(path.to_string_lossy().contains("dfm"));
            assert!(path.to_string_lossy().ends_with("test.log"));
        }
    }
}
