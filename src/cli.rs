//! Command-line interface definition.

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the symlink-farm installer.
#[derive(Parser, Debug)]
#[command(name = "dfm", about = "Symlink-farm dotfiles installer", version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Options shared across subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Treat the first filesystem fault as fatal
    #[arg(long, global = true)]
    pub strict: bool,

    /// Source tree to install from (default: $DFM_ROOT or the current directory)
    #[arg(long, global = true)]
    pub source: Option<std::path::PathBuf>,

    /// Target directory to install into (default: the home directory)
    #[arg(long, global = true)]
    pub target: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Overlay the source tree onto the target directory
    Install(InstallOpts),
    /// Remove installed symlinks and restore backups
    Uninstall,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

impl Command {
    /// Short command name, used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Uninstall => "uninstall",
            Self::Completions { .. } => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Additional top-level entry names to skip
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,
}
