//! Domain-specific error types for the install engine.
//!
//! Control-file faults are typed with [`thiserror`] so the command boundary
//! can distinguish a configuration error (fatal, abort before mutating the
//! affected directory) from an ordinary filesystem fault (recoverable,
//! logged and counted).  Everything else flows through [`anyhow::Error`]
//! with `.context()` attached at the call site.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing a `.dfminstall` control file.
///
/// All variants are fatal: a malformed control file aborts the entire run
/// before any entry of the affected directory is touched.
#[derive(Error, Debug)]
pub enum DirectiveError {
    /// A `chmod` directive was given without its mode argument.
    #[error("{}:{line}: chmod directive for '{name}' is missing its mode argument", .file.display())]
    MissingMode {
        /// Control file the directive was read from.
        file: PathBuf,
        /// 1-based line number of the directive.
        line: usize,
        /// Entry name the directive applies to.
        name: String,
    },

    /// A `chmod` directive carried a mode that is not four octal digits.
    #[error("{}:{line}: invalid mode '{mode}' for '{name}': must be exactly four octal digits", .file.display())]
    InvalidMode {
        /// Control file the directive was read from.
        file: PathBuf,
        /// 1-based line number of the directive.
        line: usize,
        /// Entry name the directive applies to.
        name: String,
        /// The rejected mode string.
        mode: String,
    },

    /// The control file exists but could not be read.
    #[error("reading control file {}: {source}", .file.display())]
    Io {
        /// Path of the unreadable control file.
        file: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
