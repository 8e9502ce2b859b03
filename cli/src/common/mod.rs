//! # zipdir Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers:
//!
//! - **`archive`**: archive backends and the directory archiver.
//! - **`fs`**: filesystem helpers, the destination probe, and the cleanup guard.
//!
//! Command-specific logic stays in `commands::`, infrastructure (errors, config) in `core::`.
//!

/// Archive backends and the directory archiver.
pub mod archive;
/// Filesystem helpers (I/O, destination probing, cleanup guard).
pub mod fs;
