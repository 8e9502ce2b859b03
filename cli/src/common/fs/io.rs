//! # zipdir Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used across zipdir:
//!
//! - **`read_file_to_string`**: `fs::read_to_string` with the path added as context.
//! - **`remove_path`**: removes a file, a symlink, or a whole directory tree.
//! - **`PartialOutput`**: a drop guard over a freshly probed destination. Unless
//!   `commit()` is called, dropping it removes whatever was written at the
//!   destination, so a failed compress/uncompress never leaves a half-result behind.
//!
//! ## Usage
//!
//! ```ignore
//! let output = PartialOutput::new(&destination);
//! write_everything(&destination)?; // early return drops `output` and cleans up
//! output.commit();
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be opened or read, with context
/// naming the file.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Removes `path` whether it is a file, a symlink or a directory tree.
/// A path that does not exist is not an error.
pub fn remove_path(path: &Path) -> Result<()> {
    let metadata = match path.symlink_metadata() {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).with_context(|| format!("Failed to inspect {:?}", path)),
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path).with_context(|| format!("Failed to remove directory {:?}", path))
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))
    }
}

/// Removes a destination on drop unless the operation writing it committed.
#[derive(Debug)]
pub struct PartialOutput {
    path: PathBuf,
    committed: bool,
}

impl PartialOutput {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    /// Keeps the destination and hands back its path.
    pub fn commit(mut self) -> PathBuf {
        self.committed = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        debug!("Cleaning up partial output {:?}", self.path);
        if let Err(e) = remove_path(&self.path) {
            warn!("Could not remove partial output {:?}: {:#}", self.path, e);
        }
    }
}
