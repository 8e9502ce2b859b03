//! # zipdir Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Everything that touches archives lives here:
//!
//! - **`backend`**: the `ArchiveBackend` / `ArchiveWriter` / `ArchiveReader` traits and
//!   `ZipBackend`, the implementation backed by the `zip` crate.
//! - **`directory`**: `DirectoryArchiver`, which compresses a directory into an archive
//!   beside it and restores it again, cleaning up after itself on failure.
//!
//! ## Usage
//!
//! ```ignore
//! use zipdir::common::archive::DirectoryArchiver;
//!
//! let archiver = DirectoryArchiver::zip();
//! let zip_path = archiver.compress_directory(Path::new("./photos"))?; // ./photos.zip
//! let restored = archiver.uncompress_directory(&zip_path)?;          // ./photos_1 if ./photos still exists
//! ```
//!

pub mod backend;
pub mod directory;

pub use backend::{ArchiveBackend, ArchiveError, EntryCompression, ZipBackend, ZipOptions};
pub use directory::{ArchiverSettings, DirectoryArchiver, DEFAULT_EXTENSION};
