//! # zipdir Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! The `zipdir` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on verbosity flags (`-v`, `-vv`, ...) or `RUST_LOG`
//! - Loading configuration and routing to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Compress a directory into ./photos.zip
//! zipdir compress ./photos
//!
//! # Restore it, with debug logging
//! zipdir -vv uncompress ./photos.zip
//!
//! # Use an explicit configuration file
//! zipdir --config ~/zipdir-store.toml compress ./photos
//! ```
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use zipdir::commands;
use zipdir::core::config;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "zipdir",
    about = "Compress directories into ZIP archives beside them, and restore them",
    long_about = "Compress directories into ZIP archives placed next to them and restore them again.\n\
                  Existing files and directories are never overwritten: a numbered name is used instead.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use on top of the user and project configuration.
    #[arg(long, global = true, env = "ZIPDIR_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

/// All available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compress directories into archives.
    #[command(alias = "c")]
    Compress(commands::compress::CompressArgs),
    /// Restore directories from archives.
    #[command(alias = "x")]
    Uncompress(commands::uncompress::UncompressArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = config::load_config(cli.config.as_deref()).and_then(|cfg| {
        match cli.command {
            Commands::Compress(args) => commands::compress::handle_compress(args, &cfg),
            Commands::Uncompress(args) => commands::uncompress::handle_uncompress(args, &cfg),
        }
    });

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
