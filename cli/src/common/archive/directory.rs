//! # zipdir Directory Archiver (`common::archive::directory`)
//!
//! File: cli/src/common/archive/directory.rs
//!
//! ## Overview
//!
//! `DirectoryArchiver` turns a directory into an archive placed next to it, and an
//! archive back into a directory placed next to it:
//!
//! - `compress_directory("/data/photos")` → `/data/photos.zip`
//! - `uncompress_directory("/data/photos.zip")` → `/data/photos`
//!
//! If the natural destination already exists, the first free numbered variant is
//! used instead (`photos_1.zip`, `photos_1`), so nothing on disk is ever overwritten.
//!
//! ## Architecture
//!
//! 1. Preconditions are checked before anything is written.
//! 2. The destination is derived and probed (`common::fs::probe`).
//! 3. A `PartialOutput` guard is armed over the destination.
//! 4. The backend does the transfer. Compression walks the tree breadth-first with an
//!    explicit queue: every directory below the root becomes a directory entry, every
//!    file an entry named by its path relative to the root, joined with `/`.
//! 5. On success the guard is committed; on any error it removes the partial output
//!    before the error reaches the caller.
//!
use crate::common::archive::backend::{
    ArchiveBackend, ArchiveReader, ArchiveWriter, ZipBackend,
};
use crate::common::fs::io::PartialOutput;
use crate::common::fs::probe::{self, DEFAULT_MAX_ATTEMPTS};
use crate::core::error::{CompressionError, UncompressionError};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extension used for archives unless configured otherwise.
pub const DEFAULT_EXTENSION: &str = "zip";

/// Settings shared by both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiverSettings {
    /// Archive extension, without the leading dot.
    pub extension: String,
    /// Numbered destination candidates tried before giving up.
    pub max_probe_attempts: u32,
}

impl Default for ArchiverSettings {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            max_probe_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Compresses directories into archives and restores them.
#[derive(Debug, Clone)]
pub struct DirectoryArchiver<B = ZipBackend> {
    backend: B,
    settings: ArchiverSettings,
}

impl DirectoryArchiver<ZipBackend> {
    /// An archiver writing `.zip` files with default options.
    pub fn zip() -> Self {
        Self::new(ZipBackend::default(), ArchiverSettings::default())
    }
}

impl<B: ArchiveBackend> DirectoryArchiver<B> {
    pub fn new(backend: B, settings: ArchiverSettings) -> Self {
        Self { backend, settings }
    }

    pub fn settings(&self) -> &ArchiverSettings {
        &self.settings
    }

    /// Compresses `directory` into `<directory>.<extension>` (or the first free
    /// numbered variant) and returns the archive's path.
    ///
    /// # Errors
    ///
    /// - `SourceNotFound`, `NotADirectory`, `Unnamed`: nothing was written.
    /// - `Destination`: no free archive path could be found.
    /// - `Open`, `Entry`: the backend failed; the partial archive was removed.
    /// - `UnencodableName`: an entry name is not valid UTF-8; the partial archive
    ///   was removed.
    /// - `Unexpected`: anything else (e.g. an unreadable subdirectory); the partial
    ///   archive was removed.
    pub fn compress_directory(&self, directory: &Path) -> Result<PathBuf, CompressionError> {
        if !directory.exists() {
            return Err(CompressionError::SourceNotFound {
                path: directory.to_path_buf(),
            });
        }
        if !directory.is_dir() {
            return Err(CompressionError::NotADirectory {
                path: directory.to_path_buf(),
            });
        }
        let root = probe::absolute_path(directory).map_err(CompressionError::unexpected)?;
        if root.file_name().is_none() {
            return Err(CompressionError::Unnamed { path: root });
        }

        let candidate = probe::archive_path_for(&root, &self.settings.extension);
        let destination =
            probe::find_available_path(&candidate, self.settings.max_probe_attempts)?;
        info!("Compressing {:?} into {:?}", root, destination);

        let output = PartialOutput::new(&destination);
        let mut writer =
            self.backend
                .create(&destination)
                .map_err(|source| CompressionError::Open {
                    path: destination.clone(),
                    source,
                })?;
        self.write_tree(&root, &destination, &mut writer)?;
        writer.finish().map_err(CompressionError::unexpected)?;

        Ok(output.commit())
    }

    fn write_tree(
        &self,
        root: &Path,
        archive: &Path,
        writer: &mut B::Writer,
    ) -> Result<(), CompressionError> {
        let add_error = |entry: &str, source| CompressionError::Entry {
            archive: archive.to_path_buf(),
            entry: entry.to_string(),
            source,
        };

        // (absolute path, path relative to root; empty for the root itself)
        let mut pending: VecDeque<(PathBuf, String)> = VecDeque::new();
        pending.push_back((root.to_path_buf(), String::new()));

        while let Some((dir, relative)) = pending.pop_front() {
            if !relative.is_empty() {
                debug!("Adding directory entry '{}'", relative);
                writer
                    .add_directory(&relative)
                    .map_err(|e| add_error(&relative, e))?;
            }

            let children = WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name();
            for child in children {
                let child = child.map_err(CompressionError::unexpected)?;
                let Some(name) = child.file_name().to_str() else {
                    return Err(CompressionError::UnencodableName {
                        path: child.path().to_path_buf(),
                    });
                };
                let entry = if relative.is_empty() {
                    name.to_string()
                } else {
                    format!("{}/{}", relative, name)
                };

                let file_type = child.file_type();
                if file_type.is_dir() {
                    pending.push_back((child.into_path(), entry));
                } else if file_type.is_file() || (file_type.is_symlink() && child.path().is_file())
                {
                    debug!("Adding file entry '{}'", entry);
                    writer
                        .add_file(child.path(), &entry)
                        .map_err(|e| add_error(&entry, e))?;
                } else {
                    warn!("Skipping {:?}: not a regular file or directory", child.path());
                }
            }
        }
        Ok(())
    }

    /// Restores `archive` into a directory named like the archive without its
    /// extension (or the first free numbered variant) and returns that path.
    ///
    /// # Errors
    ///
    /// - `SourceNotFound`, `MissingExtension`: nothing was written.
    /// - `Destination`: no free directory path could be found.
    /// - `Open`, `Extract`: the backend failed; the partial directory was removed.
    /// - `Unexpected`: anything else; the partial directory was removed.
    pub fn uncompress_directory(&self, archive: &Path) -> Result<PathBuf, UncompressionError> {
        if !archive.exists() {
            return Err(UncompressionError::SourceNotFound {
                path: archive.to_path_buf(),
            });
        }
        let extension = &self.settings.extension;
        let archive = probe::absolute_path(archive).map_err(UncompressionError::unexpected)?;
        let Some(candidate) = probe::original_path_for(&archive, extension) else {
            return Err(UncompressionError::MissingExtension {
                path: archive,
                extension: extension.clone(),
            });
        };

        let destination =
            probe::find_available_path(&candidate, self.settings.max_probe_attempts)?;
        info!("Extracting {:?} into {:?}", archive, destination);

        let output = PartialOutput::new(&destination);
        let mut reader = self
            .backend
            .open(&archive)
            .map_err(|source| UncompressionError::Open {
                path: archive.clone(),
                source,
            })?;
        reader
            .extract_all(&destination)
            .map_err(|source| UncompressionError::Extract {
                archive: archive.clone(),
                destination: destination.clone(),
                source,
            })?;
        drop(reader);

        Ok(output.commit())
    }
}
