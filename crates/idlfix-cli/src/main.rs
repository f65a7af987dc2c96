//! idlfix CLI
//!
//! Batch validator and fixer for directories of WebIDL files

mod commands;
mod output;

use clap::Parser;
use colored::Colorize;
use idlfix_core::init_tracing;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idlfix")]
#[command(about = "Validate WebIDL files and apply autofixes in place")]
#[command(disable_version_flag = true)]
#[command(
    long_about = "idlfix parses every WebIDL file of the given directories (not recursively),\n\
runs the built-in validation rules and rewrites each file that received at least one fix.\n\
Formatting, comments and preprocessor lines outside the fixed tokens are kept byte for byte.\n\
\n\
Configuration is read from .idlfixrc.toml, .idlfixrc.json, idlfix.yaml or idlfix.yml,\n\
searched from the current directory upwards. Set RUST_LOG=info to log every applied fix.\n\
\n\
Examples:\n  \
idlfix dom/webidl                     # Fix one directory\n  \
idlfix dom/webidl dom/chrome-webidl   # Fix several directories in order"
)]
struct Cli {
    /// Directories containing WebIDL files
    #[arg(required = true, value_name = "DIRECTORY")]
    directories: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match commands::fix_command(&cli.directories) {
        Ok(summary) => output::print_summary(&summary),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            std::process::exit(1);
        }
    }
}
