//! Binary crate for the `dengue` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Logging setup
//! - Drawing the forecast panel, either as plain text or as a terminal UI

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod logging;
mod print;
mod tui;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
