//! @dose
//! purpose: This is the CLI entry point for tokenpress. It parses command-line arguments using
//!     clap, sets up logging, loads tokenpress.toml from the project root and dispatches to the
//!     appropriate command handler.
//!
//! when-editing:
//!     - !All command handlers are imported from the tokenpress crate
//!     - !The root directory defaults to current working directory if not specified
//!     - Error messages are printed to stderr and exit with code 1
//!
//! invariants:
//!     - One and only one subcommand is always executed per invocation
//!     - The process exits with 0 on success, 1 on any error
//!
//! do-not:
//!     - Never add business logic here - delegate to command modules
//!     - Never panic - always use proper error handling
//!
//! gotchas:
//!     - The --root flag can be placed before or after the subcommand due to global flag
//!     - Verbose mode only raises the log level; RUST_LOG still wins

use anyhow::Context;
use clap::Parser;
use std::env;
use tokenpress::cli::{Cli, Commands};
use tokenpress::commands::{
    run_convert, run_export, run_extract, run_host, run_login, run_publish, run_watch,
};
use tokenpress::config::Config;
use tokenpress::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Determine root directory
    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let config = Config::load(&root);

    match cli.command {
        Commands::Extract(args) => run_extract(&args, &root, &config),
        Commands::Convert(args) => run_convert(&args, &root, &config),
        Commands::Export(args) => run_export(&args, &root, &config),
        Commands::Login(args) => run_login(&args, &root, &config),
        Commands::Publish(args) => run_publish(&args, &root, &config),
        Commands::Watch(args) => run_watch(&args, &root, &config),
        Commands::Host(args) => run_host(&args, &root, &config),
    }
}
