//! `rtk` binary: parse arguments, install logging, run one action.
use anyhow::Result;
use clap::Parser;

use rtk_cli::cli::Cli;
use rtk_cli::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let command = args.command.name();

    logging::init_subscriber(args.verbose, args.global.dry_run, command);
    let log = logging::Logger::new(command);

    commands::run(&args, &log)
}
