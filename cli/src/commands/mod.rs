//! # zipdir Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level commands of the zipdir CLI. Each module defines its own
//! `clap` arguments struct and a handler that receives the loaded configuration:
//!
//! - `compress`: directories → archives
//! - `uncompress`: archives → directories
//!

/// `zipdir compress <DIR>...`
pub mod compress;
/// `zipdir uncompress <ARCHIVE>...`
pub mod uncompress;
