#![deny(missing_docs)]

//! # Swagger2 CLI
//!
//! Command Line Interface for the Swagger 2.0 endpoint extractor.
//!
//! Supported Commands:
//! - `extract`: Swagger document -> resolved endpoint descriptors (JSON).
//! - `check`: Lists endpoints with unresolved references; fails if there are any.

use clap::{Parser, Subcommand};

use crate::error::CliResult;
use crate::logging::{init_logging, LogFormat};

mod check;
mod error;
mod extract;
mod logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger 2.0 endpoint extractor")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format.
    #[clap(long, value_enum, default_value_t = LogFormat::Human, global = true)]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract resolved endpoint descriptors from a Swagger 2.0 document.
    Extract(extract::ExtractArgs),
    /// Report endpoints whose schemas reference missing definitions.
    Check(check::CheckArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose);

    match &cli.command {
        Commands::Extract(args) => extract::execute(args)?,
        Commands::Check(args) => check::execute(args)?,
    }

    Ok(())
}
