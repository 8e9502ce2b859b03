//! # zipdir Compress Command
//!
//! File: cli/src/commands/compress.rs
//!
//! ## Overview
//!
//! `zipdir compress <DIR>...` archives each directory into `<DIR>.zip` (or the first
//! free numbered variant) and prints the resulting archive path, one per line.
//! Processing stops at the first failure; archives already written are kept.
//!
//! ```bash
//! zipdir compress ./photos ./notes
//! # /home/me/photos.zip
//! # /home/me/notes.zip
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `zipdir compress`.
#[derive(Parser, Debug)]
pub struct CompressArgs {
    /// Directories to compress.
    #[arg(required = true, value_name = "DIR")]
    pub directories: Vec<PathBuf>,
}

/// Compresses every directory in `args` with the archiver described by `config`.
pub fn handle_compress(args: CompressArgs, config: &Config) -> Result<()> {
    let archiver = config.archiver();
    for directory in &args.directories {
        let archive = archiver.compress_directory(directory)?;
        info!("Compressed {} into {}", directory.display(), archive.display());
        println!("{}", archive.display());
    }
    Ok(())
}
