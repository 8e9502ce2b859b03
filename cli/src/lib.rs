//! # zipdir
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! Compresses a directory into a ZIP archive placed beside it and restores it again,
//! without ever overwriting an existing file or directory. The archive format itself
//! is handled by the `zip` crate; this crate contributes destination naming, the
//! breadth-first tree walk, and cleanup of partial output on failure.
//!
//! ## Layout
//!
//! - `common::archive`: `DirectoryArchiver` and the archive backend traits.
//! - `common::fs`: destination probing and filesystem helpers.
//! - `core`: configuration and error types.
//! - `commands`: the `compress` / `uncompress` handlers behind the `zipdir` binary.
//!
//! ```ignore
//! use zipdir::common::archive::DirectoryArchiver;
//!
//! let archiver = DirectoryArchiver::zip();
//! let archive = archiver.compress_directory(Path::new("./photos"))?;
//! ```
//!
pub mod commands;
pub mod common;
pub mod core;

pub use crate::common::archive::{ArchiverSettings, DirectoryArchiver};
pub use crate::core::error::{CompressionError, UncompressionError};
