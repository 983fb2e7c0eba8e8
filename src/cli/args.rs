//! cli::args
//!
//! Process-level argument definitions using clap derive.
//!
//! vtix is a REPL, so there are no subcommands here; everything after
//! startup happens at the interactive prompt. These flags configure the
//! environment the session runs in.

use clap::Parser;
use std::path::PathBuf;

/// vtix - interactive CLI for vTiger HelpDesk tickets and time entries
#[derive(Parser, Debug)]
#[command(name = "vtix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Home directory to use; defaults to $HOME
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Alternate vTiger host (prefix with http:// to avoid https)
    #[arg(long)]
    pub host: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable communication with the vTiger server
    #[arg(short = 'z', long = "no-transmit")]
    pub no_transmit: bool,

    /// Disable local state storage
    #[arg(short = 'x', long = "no-storage")]
    pub no_storage: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
