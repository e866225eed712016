#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;

use std::process;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "vectorio_cli::startup";
pub const TRACING_TARGET_COMMAND: &str = "vectorio_cli::command";

fn main() {
    let Err(error) = run() else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %error,
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    Cli::log_build_info();

    let output = match cli.command {
        Command::Sample { distro_dir } => command::sample(&distro_dir)?,
        Command::Check { path } => command::check(&path)?,
        Command::Resolve { milvus } => command::resolve(milvus)?,
    };

    println!("{output}");
    Ok(())
}
