//! # zipdir Archive Backends (`common::archive::backend`)
//!
//! File: cli/src/common/archive/backend.rs
//!
//! ## Overview
//!
//! The archive library is an external collaborator. This module puts it behind
//! three small traits so the directory archiver can be exercised with fakes:
//!
//! - **`ArchiveBackend`**: opens archives, either for writing (create, truncating
//!   anything at the path) or for reading.
//! - **`ArchiveWriter`**: `add_directory`, `add_file`, and a consuming `finish` that
//!   commits the archive. A writer dropped without `finish` is simply closed.
//! - **`ArchiveReader`**: `extract_all` into a destination directory.
//!
//! Every operation reports its status through `Result<_, ArchiveError>`.
//!
//! ## Architecture
//!
//! `ZipBackend` is the production backend and delegates everything to the `zip`
//! crate. Entry compression (`stored` or `deflated`, optional level) comes from
//! `ZipOptions`, which the configuration layer fills in.
//!
use serde::Deserialize;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Status of a failed backend operation.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("ZIP error: {0}")]
    Zip(#[from] ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ArchiveError {
    /// The OS error number behind this failure, if any.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Io(e) | Self::Zip(ZipError::Io(e)) => e.raw_os_error(),
            _ => None,
        }
    }
}

/// Opens archives for writing or reading.
pub trait ArchiveBackend {
    type Writer: ArchiveWriter;
    type Reader: ArchiveReader;

    /// Creates an archive at `path`, overwriting anything already there.
    fn create(&self, path: &Path) -> Result<Self::Writer, ArchiveError>;

    /// Opens an existing archive for reading.
    fn open(&self, path: &Path) -> Result<Self::Reader, ArchiveError>;
}

/// An archive being written.
pub trait ArchiveWriter {
    /// Registers an (empty) directory entry named `name`.
    fn add_directory(&mut self, name: &str) -> Result<(), ArchiveError>;

    /// Adds the contents of the file at `source` as the entry `name`.
    fn add_file(&mut self, source: &Path, name: &str) -> Result<(), ArchiveError>;

    /// Writes the archive trailer and closes it.
    fn finish(self) -> Result<(), ArchiveError>;
}

/// An archive opened for reading.
pub trait ArchiveReader {
    /// Extracts every entry below `destination`, creating it if needed.
    fn extract_all(&mut self, destination: &Path) -> Result<(), ArchiveError>;
}

/// How file entries are compressed.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryCompression {
    Stored,
    #[default]
    Deflated,
}

/// Entry options handed to every file written by `ZipBackend`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZipOptions {
    pub method: EntryCompression,
    /// Deflate level (0-9); `None` uses the library default.
    pub level: Option<i64>,
}

/// Backend writing and reading standard ZIP files through the `zip` crate.
#[derive(Debug, Default, Clone)]
pub struct ZipBackend {
    options: ZipOptions,
}

impl ZipBackend {
    pub fn new(options: ZipOptions) -> Self {
        Self { options }
    }

    fn file_options(&self) -> SimpleFileOptions {
        match self.options.method {
            EntryCompression::Stored => {
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
            }
            EntryCompression::Deflated => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(self.options.level),
        }
    }
}

impl ArchiveBackend for ZipBackend {
    type Writer = ZipDirectoryWriter;
    type Reader = ZipDirectoryReader;

    fn create(&self, path: &Path) -> Result<Self::Writer, ArchiveError> {
        let file = File::create(path)?;
        Ok(ZipDirectoryWriter {
            zip: ZipWriter::new(file),
            options: self.file_options(),
        })
    }

    fn open(&self, path: &Path) -> Result<Self::Reader, ArchiveError> {
        let file = File::open(path)?;
        Ok(ZipDirectoryReader {
            archive: ZipArchive::new(file)?,
        })
    }
}

pub struct ZipDirectoryWriter {
    zip: ZipWriter<File>,
    options: SimpleFileOptions,
}

impl ArchiveWriter for ZipDirectoryWriter {
    fn add_directory(&mut self, name: &str) -> Result<(), ArchiveError> {
        self.zip.add_directory(name, self.options)?;
        Ok(())
    }

    fn add_file(&mut self, source: &Path, name: &str) -> Result<(), ArchiveError> {
        let mut input = File::open(source)?;
        let metadata = input.metadata()?;

        let mut options = self
            .options
            .large_file(metadata.len() >= u64::from(u32::MAX));
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options = options.unix_permissions(metadata.permissions().mode() & 0o7777);
        }

        self.zip.start_file(name, options)?;
        let written = io::copy(&mut input, &mut self.zip)?;
        debug!("Archived {} bytes from {:?} as '{}'", written, source, name);
        Ok(())
    }

    fn finish(self) -> Result<(), ArchiveError> {
        self.zip.finish()?;
        Ok(())
    }
}

pub struct ZipDirectoryReader {
    archive: ZipArchive<File>,
}

impl ArchiveReader for ZipDirectoryReader {
    fn extract_all(&mut self, destination: &Path) -> Result<(), ArchiveError> {
        // An archive of an empty directory has no entries; the destination
        // itself still has to appear.
        fs::create_dir_all(destination)?;
        self.archive.extract(destination)?;
        Ok(())
    }
}
