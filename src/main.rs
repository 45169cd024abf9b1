//! Binary entry point for `dfm`.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser as _;

use dfm_cli::cli::{Cli, Command};
use dfm_cli::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, args.quiet, args.command.name());
    let log = Arc::new(logging::Logger::new(args.command.name()));

    match args.command {
        Command::Install(ref opts) => commands::install::run(&args.global, opts, &log),
        Command::Uninstall => commands::uninstall::run(&args.global, &log),
        Command::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "dfm", &mut std::io::stdout());
            Ok(())
        }
        Command::Version => {
            let version = option_env!("DFM_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("dfm {version}");
            Ok(())
        }
    }
}
