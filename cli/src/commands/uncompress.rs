//! # zipdir Uncompress Command
//!
//! File: cli/src/commands/uncompress.rs
//!
//! ## Overview
//!
//! `zipdir uncompress <ARCHIVE>...` restores each archive into a directory named
//! like the archive without its extension (or the first free numbered variant)
//! and prints the restored directory, one per line.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `zipdir uncompress`.
#[derive(Parser, Debug)]
pub struct UncompressArgs {
    /// Archives to extract.
    #[arg(required = true, value_name = "ARCHIVE")]
    pub archives: Vec<PathBuf>,
}

/// Extracts every archive in `args` with the archiver described by `config`.
pub fn handle_uncompress(args: UncompressArgs, config: &Config) -> Result<()> {
    let archiver = config.archiver();
    for archive in &args.archives {
        let directory = archiver.uncompress_directory(archive)?;
        info!("Extracted {} into {}", archive.display(), directory.display());
        println!("{}", directory.display());
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::UncompressionError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_requires_an_archive() {
        assert!(UncompressArgs::try_parse_from(["uncompress"]).is_err());
    }

    #[test]
    fn test_handle_uncompress_rejects_wrong_extension() {
        let base = tempdir().unwrap();
        let archive = base.path().join("notes.tar");
        fs::write(&archive, "x").unwrap();

        let err = handle_uncompress(
            UncompressArgs {
                archives: vec![archive],
            },
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UncompressionError>(),
            Some(UncompressionError::MissingExtension { .. })
        ));
        assert!(!base.path().join("notes").exists());
    }
}
