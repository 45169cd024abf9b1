// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed source/home pair and small builder
// methods so each integration test can set up an isolated overlay scenario
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dfm_cli::config::Options;
use dfm_cli::engine::{self, Context, Report};
use dfm_cli::logging::Logger;
use dfm_cli::platform::Platform;

/// An isolated source tree and home directory backed by one
/// [`tempfile::TempDir`], deleted automatically on drop.
pub struct Fixture {
    root: tempfile::TempDir,
}

impl Fixture {
    /// Create a fixture with empty `source/` and `home/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("source")).expect("create source dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        Self { root }
    }

    /// Path of the source tree.
    pub fn source(&self) -> PathBuf {
        self.root.path().join("source")
    }

    /// Path of the home (target) directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Write a file under the source tree, creating parent directories.
    pub fn write_source(&self, rel: &str, content: &str) {
        write_with_parents(&self.source().join(rel), content);
    }

    /// Write a file under the home directory, creating parent directories.
    pub fn write_home(&self, rel: &str, content: &str) {
        write_with_parents(&self.home().join(rel), content);
    }

    /// Write the top-level control file.
    pub fn write_directives(&self, content: &str) {
        self.write_source(".dfminstall", content);
    }

    /// Write a control file in a source subdirectory.
    pub fn write_directives_in(&self, rel_dir: &str, content: &str) {
        self.write_source(&format!("{rel_dir}/.dfminstall"), content);
    }

    /// Context with default options.
    pub fn context(&self) -> Context {
        make_context(Options::default())
    }

    /// Context with dry-run enabled.
    pub fn dry_run_context(&self) -> Context {
        make_context(Options {
            dry_run: true,
            strict: false,
        })
    }

    /// Install source into home with default options.
    pub fn install(&self) -> anyhow::Result<Report> {
        engine::install(&self.context(), &self.source(), &self.home(), &[])
    }

    /// Install with an explicit context.
    pub fn install_with(&self, ctx: &Context) -> anyhow::Result<Report> {
        engine::install(ctx, &self.source(), &self.home(), &[])
    }

    /// Uninstall with default options.
    pub fn uninstall(&self) -> anyhow::Result<Report> {
        engine::uninstall(&self.context(), &self.source(), &self.home())
    }

    /// Uninstall with an explicit context.
    pub fn uninstall_with(&self, ctx: &Context) -> anyhow::Result<Report> {
        engine::uninstall(ctx, &self.source(), &self.home())
    }

    /// Assert that `home/<rel>` is a symlink resolving to `source/<rel>`.
    pub fn assert_linked(&self, rel: &str) {
        let link = self.home().join(rel);
        let meta = link
            .symlink_metadata()
            .unwrap_or_else(|_| panic!("{rel} does not exist in home"));
        assert!(meta.file_type().is_symlink(), "{rel} is not a symlink");
        assert_eq!(
            dunce::canonicalize(&link).expect("resolve link"),
            dunce::canonicalize(self.source().join(rel)).expect("resolve source"),
            "{rel} does not resolve to its source entry"
        );
    }

    /// Deterministic snapshot of the home tree: one line per entry with its
    /// kind and, for files and symlinks, its content or link value.
    pub fn snapshot_home(&self) -> Vec<String> {
        let mut lines = Vec::new();
        walk(&self.home(), "", &mut lines);
        lines
    }
}

fn write_with_parents(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, content).expect("write file");
}

fn walk(dir: &Path, prefix: &str, out: &mut Vec<String>) {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("read entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    for name in names {
        let path = dir.join(&name);
        let rel = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        let meta = path.symlink_metadata().expect("entry metadata");
        if meta.file_type().is_symlink() {
            let value = std::fs::read_link(&path).expect("read link");
            out.push(format!("{rel} link {}", value.display()));
        } else if meta.is_dir() {
            out.push(format!("{rel} dir"));
            walk(&path, &rel, out);
        } else {
            let content = std::fs::read(&path).expect("read file");
            out.push(format!("{rel} file {}", String::from_utf8_lossy(&content)));
        }
    }
}

/// Build a context with the given options and a test logger.
pub fn make_context(options: Options) -> Context {
    Context::new(options, Platform::detect(), Arc::new(Logger::new("test")))
}
