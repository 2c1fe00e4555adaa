//! Command-line surface: global flags and one subcommand per action.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI entry point for the config assembler.
#[derive(Parser, Debug)]
#[command(
    name = "rtk",
    about = "Assemble config files from named sets of fragments",
    version
)]
pub struct Cli {
    /// Action to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options every action accepts.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Registry file to use instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Preview output files without writing them
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show one config, or all of them
    #[command(visible_alias = "l")]
    List {
        /// Config to show
        name: Option<String>,
    },
    /// Rebuild every config's output file
    #[command(visible_aliases = ["reconf", "r"])]
    Reconfigure,
    /// Register a new config
    Init {
        /// Name of the new config
        name: String,
        /// File the assembled output is written to
        outfile: PathBuf,
    },
    /// Add an input file or glob to a set
    #[command(visible_alias = "a")]
    Add(InputOpts),
    /// Show the sets of a config, or switch its active set
    #[command(visible_alias = "s")]
    Set {
        /// Config to change
        name: String,
        /// Set to activate; created on the next `add` if it does not exist
        set: Option<String>,
    },
    /// Remove an input file or glob from a set
    #[command(visible_aliases = ["del", "d"])]
    Delete(InputOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used for the log file name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Reconfigure => "reconfigure",
            Self::Init { .. } => "init",
            Self::Add(_) => "add",
            Self::Set { .. } => "set",
            Self::Delete(_) => "delete",
            Self::Version => "version",
        }
    }
}

/// Options for the `add` and `delete` subcommands.
#[derive(Args, Debug, Clone)]
pub struct InputOpts {
    /// Config to change
    pub name: String,
    /// Input file or glob pattern
    pub infile: PathBuf,
    /// Set to change instead of the active one
    #[arg(long)]
    pub set: Option<String>,
}
