// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # tnetcodec CLI
//!
//! Command-line tool for TNet wire data.
//!
//! ## Usage
//!
//! ```sh
//! # JSON to wire
//! echo '{"id": 7}' | tnetcodec encode
//!
//! # Wire to JSON, one document per unit
//! tnetcodec decode units.tnet
//!
//! # Show the unit tree
//! tnetcodec inspect units.tnet
//!
//! # Check a file
//! tnetcodec validate units.tnet
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use cmd::{DecodeCmd, EncodeCmd, InspectCmd, ValidateCmd};
use common::{GlobalOptions, Result};

/// tnetcodec - TNet tagged-string toolkit
///
/// Converts between JSON and the TNet wire format and checks wire data.
#[derive(Parser, Clone)]
#[command(name = "tnetcodec")]
#[command(about = "Encode, decode and inspect TNet tagged-string data", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Maximum container nesting depth
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<usize>,

    /// Decode boolean bodies other than 'true' as false instead of failing
    #[arg(long, global = true)]
    lenient_booleans: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Encode a JSON document as one wire unit
    Encode(EncodeCmd),

    /// Decode every unit to one JSON document per line
    Decode(DecodeCmd),

    /// Show the unit tree with offsets and sizes
    Inspect(InspectCmd),

    /// Check that the input is well-formed
    Validate(ValidateCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    let options = GlobalOptions {
        config: cli.config,
        max_depth: cli.max_depth,
        lenient_booleans: cli.lenient_booleans,
    };
    let config = options.codec_config()?;

    match cli.command {
        Commands::Encode(cmd) => cmd.run(&config),
        Commands::Decode(cmd) => cmd.run(&config),
        Commands::Inspect(cmd) => cmd.run(&config),
        Commands::Validate(cmd) => cmd.run(&config),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
