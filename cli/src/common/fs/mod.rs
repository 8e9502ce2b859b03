//! # zipdir Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used by the archiving core. Functionality is split into:
//!
//! - **`io`**: reading files with context, removing paths, and the `PartialOutput`
//!   cleanup guard.
//! - **`probe`**: destination path arithmetic (`.zip` appended or stripped) and the
//!   availability probe that avoids overwriting anything already on disk.
//!
//! Callers import the submodule they need, e.g. `crate::common::fs::probe::find_available_path`.
//!

/// Basic file I/O and the cleanup guard for partially written output.
pub mod io;
/// Destination path derivation and the availability probe.
pub mod probe;
