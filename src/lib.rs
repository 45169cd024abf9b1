//! Symlink-farm dotfiles installer.
//!
//! Overlays a version-controlled source tree onto a target directory
//! (typically the home directory) by creating symlinks, preserving any
//! pre-existing entries through a move-aside backup, and reverses the
//! overlay cleanly.  Per-directory `.dfminstall` control files select
//! entries to skip, expand recursively, execute as hooks, or chmod.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — run options and control-file parsing
//! - **[`engine`]** — the install/uninstall core: symlink creation with
//!   backup, dangling-link collection, recursion, hooks, and permissions
//! - **[`commands`]** — top-level subcommand orchestration
//! - **[`logging`]** — console and file output

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod exec;
pub mod fsutil;
pub mod logging;
pub mod platform;
