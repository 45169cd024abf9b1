//! `.dfminstall` control-file parsing.
//!
//! Each directory of the source tree may carry a control file naming entries
//! that should be skipped, expanded recursively, executed as hooks, or given
//! explicit file modes.  One parse serves both the installer and the
//! uninstaller, so the two directions can never drift apart on how a line is
//! read.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::DirectiveError;

/// Name of the per-directory control file.
pub const CONTROL_FILE: &str = ".dfminstall";

/// Parsed directives for one source directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use dfm_cli::config::Directives;
///
/// let directives = Directives::parse(
///     "fileB skip\ndirC recurse\nsetup.sh exec\nsecrets.conf chmod 0600\n",
///     Path::new(".dfminstall"),
/// )
/// .unwrap();
/// assert!(directives.is_skipped("fileB"));
/// assert!(directives.is_skipped("dirC")); // recursed names are never linked
/// assert_eq!(directives.recurse, ["dirC"]);
/// assert_eq!(directives.exec, ["setup.sh"]);
/// assert_eq!(directives.chmod.get("secrets.conf"), Some(&0o600));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Directives {
    /// Names that must not be symlinked at this level.
    pub skip: BTreeSet<String>,
    /// Names to expand into real directories, in file order.
    pub recurse: Vec<String>,
    /// Hook files to execute after the directory is installed, in file order.
    pub exec: Vec<String>,
    /// Explicit file modes to enforce, keyed by entry name.
    pub chmod: BTreeMap<String, u32>,
    /// Non-fatal parse diagnostics (deprecated syntax, unknown directives).
    pub warnings: Vec<String>,
}

impl Directives {
    /// Read and parse the control file at `path`.
    ///
    /// A missing file is not an error: it yields an empty directive set, the
    /// common case for directories with nothing to customise.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectiveError`] if the file exists but cannot be read,
    /// or if a `chmod` directive carries a missing or malformed mode.
    pub fn load(path: &Path) -> Result<Self, DirectiveError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(DirectiveError::Io {
                file: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Parse control-file content.  `file` is used only for diagnostics.
    ///
    /// Format: one directive per non-empty line, whitespace-delimited:
    /// `<name> [<kind> [<arg>]]` with `<kind>` one of `skip`, `recurse`,
    /// `exec`, `chmod`.  A bare name is a deprecated alias for `recurse`.
    /// Lines starting with `#` are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectiveError`] for a `chmod` directive whose mode is
    /// absent or is not exactly four octal digits.
    pub fn parse(content: &str, file: &Path) -> Result<Self, DirectiveError> {
        let mut directives = Self::default();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let lineno = idx + 1;

            let mut fields = line.split_whitespace();
            let Some(name) = fields.next() else {
                continue;
            };
            let name = name.to_string();

            match fields.next() {
                None => {
                    directives.warnings.push(format!(
                        "{}:{lineno}: bare name '{name}' is deprecated, use '{name} recurse'",
                        file.display()
                    ));
                    directives.skip.insert(name.clone());
                    directives.recurse.push(name);
                }
                Some("skip") => {
                    directives.skip.insert(name);
                }
                Some("recurse") => {
                    directives.skip.insert(name.clone());
                    directives.recurse.push(name);
                }
                Some("exec") => {
                    // Not skip-listed: a hook file may also be symlinked.
                    directives.exec.push(name);
                }
                Some("chmod") => {
                    let Some(mode) = fields.next() else {
                        return Err(DirectiveError::MissingMode {
                            file: file.to_path_buf(),
                            line: lineno,
                            name,
                        });
                    };
                    if mode.len() != 4 || !mode.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
                        return Err(DirectiveError::InvalidMode {
                            file: file.to_path_buf(),
                            line: lineno,
                            name,
                            mode: mode.to_string(),
                        });
                    }
                    let parsed = u32::from_str_radix(mode, 8).map_err(|_| {
                        DirectiveError::InvalidMode {
                            file: file.to_path_buf(),
                            line: lineno,
                            name: name.clone(),
                            mode: mode.to_string(),
                        }
                    })?;
                    directives.chmod.insert(name, parsed);
                }
                Some(other) => {
                    directives.warnings.push(format!(
                        "{}:{lineno}: unknown directive '{other}' for '{name}', line ignored",
                        file.display()
                    ));
                }
            }
        }

        Ok(directives)
    }

    /// Whether `name` is in the skip set (including recursed names).
    #[must_use]
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.contains(name)
    }
}

/// Whether `name` is excluded from installation at every directory level,
/// regardless of directives.
///
/// Covers the tree's own bookkeeping (`.dfminstall`, the backup holding
/// area), version-control metadata, and editor backup/swap files.
#[must_use]
pub fn is_implicitly_excluded(name: &str) -> bool {
    name == CONTROL_FILE
        || name == crate::engine::backup::BACKUP_DIR
        || matches!(name, "." | ".." | ".git" | ".gitignore")
        || name.ends_with('~')
        || name.ends_with(".swp")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Directives {
        Directives::parse(content, Path::new(".dfminstall")).unwrap()
    }

    #[test]
    fn empty_content_yields_empty_set() {
        let d = parse("");
        assert_eq!(d, Directives::default());
    }

    #[test]
    fn blank_lines_and_comments_are_ignored() {
        let d = parse("\n# a comment\n\nfileB skip\n");
        assert!(d.is_skipped("fileB"));
        assert_eq!(d.skip.len(), 1);
    }

    #[test]
    fn skip_directive_populates_skip_set() {
        let d = parse("fileB skip\n");
        assert!(d.is_skipped("fileB"));
        assert!(d.recurse.is_empty());
    }

    #[test]
    fn recurse_directive_also_skips_the_name() {
        let d = parse("dirC recurse\n");
        assert_eq!(d.recurse, ["dirC"]);
        assert!(d.is_skipped("dirC"));
    }

    #[test]
    fn bare_name_recurses_with_deprecation_warning() {
        let d = parse("dirC\n");
        assert_eq!(d.recurse, ["dirC"]);
        assert!(d.is_skipped("dirC"));
        assert_eq!(d.warnings.len(), 1);
        assert!(d.warnings[0].contains("deprecated"));
    }

    #[test]
    fn exec_directive_does_not_skip_the_name() {
        let d = parse("setup.sh exec\n");
        assert_eq!(d.exec, ["setup.sh"]);
        assert!(!d.is_skipped("setup.sh"));
    }

    #[test]
    fn exec_order_follows_file_order() {
        let d = parse("b.sh exec\na.sh exec\n");
        assert_eq!(d.exec, ["b.sh", "a.sh"]);
    }

    #[test]
    fn chmod_directive_parses_octal_mode() {
        let d = parse("secrets.conf chmod 0600\n");
        assert_eq!(d.chmod.get("secrets.conf"), Some(&0o600));
        assert!(!d.is_skipped("secrets.conf"));
    }

    #[test]
    fn chmod_missing_mode_is_fatal() {
        let err = Directives::parse("x chmod\n", Path::new(".dfminstall")).unwrap_err();
        assert!(matches!(err, DirectiveError::MissingMode { line: 1, .. }));
    }

    #[test]
    fn chmod_short_mode_is_fatal() {
        let err = Directives::parse("x chmod 600\n", Path::new(".dfminstall")).unwrap_err();
        assert!(matches!(err, DirectiveError::InvalidMode { .. }));
    }

    #[test]
    fn chmod_non_octal_mode_is_fatal() {
        let err = Directives::parse("x chmod 0689\n", Path::new(".dfminstall")).unwrap_err();
        assert!(matches!(err, DirectiveError::InvalidMode { .. }));
    }

    #[test]
    fn unknown_directive_warns_and_is_ignored() {
        let d = parse("fileA frobnicate\n");
        assert!(!d.is_skipped("fileA"));
        assert!(d.recurse.is_empty());
        assert_eq!(d.warnings.len(), 1);
        assert!(d.warnings[0].contains("frobnicate"));
    }

    /// The historical parser unconditionally skip-listed the literal name
    /// `skip`; that artifact is intentionally not carried forward.  A file
    /// actually named `skip` is installed like any other entry.
    #[test]
    fn literal_skip_name_is_not_implicitly_skipped() {
        let d = parse("fileB skip\n");
        assert!(!d.is_skipped("skip"));
    }

    #[test]
    fn load_missing_file_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let d = Directives::load(&dir.path().join(CONTROL_FILE)).unwrap();
        assert_eq!(d, Directives::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONTROL_FILE);
        std::fs::write(&path, "fileB skip\n").unwrap();
        let d = Directives::load(&path).unwrap();
        assert!(d.is_skipped("fileB"));
    }

    #[test]
    fn implicit_exclusions_cover_bookkeeping_names() {
        for name in [".", "..", ".git", ".gitignore", ".dfminstall", ".backup"] {
            assert!(is_implicitly_excluded(name), "{name} should be excluded");
        }
    }

    #[test]
    fn implicit_exclusions_cover_editor_droppings() {
        assert!(is_implicitly_excluded("vimrc~"));
        assert!(is_implicitly_excluded(".vimrc.swp"));
        assert!(!is_implicitly_excluded("vimrc"));
    }
}
