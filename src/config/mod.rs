//! Run configuration and control-file parsing.

pub mod directives;

pub use directives::{CONTROL_FILE, Directives, is_implicitly_excluded};

/// Options governing a single install or uninstall run.
///
/// Passed explicitly to every engine operation; there is no global mutable
/// option state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Suppress every mutating filesystem call; intended actions are still
    /// computed and reported.
    pub dry_run: bool,
    /// Promote the first per-entry filesystem fault to a run-level error
    /// instead of logging it and continuing.
    pub strict: bool,
}
