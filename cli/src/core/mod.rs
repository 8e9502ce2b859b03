//! # zipdir Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by the rest of the crate:
//! - `config`: configuration loading, merging, and validation
//! - `error`: the two domain error types, the application error, and the `Result` alias
//!
//! ## Usage
//!
//! ```ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{CompressionError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
