//! # zipdir Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout zipdir. The archiving
//! core exposes exactly two public domain errors, one per direction, so that
//! callers never have to inspect the archive library's or the filesystem's
//! own error types:
//!
//! - `CompressionError`: anything that went wrong turning a directory into an archive.
//! - `UncompressionError`: anything that went wrong restoring a directory from an archive.
//!
//! Both carry a human-readable message (their `Display`), an optional numeric
//! code (`code()`), and the underlying cause (`std::error::Error::source`).
//!
//! ## Architecture
//!
//! - Domain errors are `thiserror` enums. Precondition variants are produced
//!   before anything on disk is touched; `Open`, `Entry` and `Extract` wrap the
//!   backend's `ArchiveError`; `Unexpected` wraps everything else.
//! - `ZipdirError`: application-level errors (currently configuration problems).
//! - `Result<T>`: an alias for `anyhow::Result<T>`, used by the application
//!   layer (config loading, command handlers) where context matters more than
//!   the concrete type.
//!
//! ## Examples
//!
//! ```ignore
//! match archiver.uncompress_directory(path) {
//!     Ok(dir) => println!("{}", dir.display()),
//!     Err(UncompressionError::MissingExtension { extension, .. }) => {
//!         eprintln!("not a .{} file", extension);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use crate::common::archive::backend::ArchiveError;
use crate::common::fs::probe::ProbeError;
use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type for zipdir.
#[derive(Error, Debug)]
pub enum ZipdirError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while compressing a directory into an archive.
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("The given directory does not exist: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("The given path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Cannot derive an archive name from '{}'", path.display())]
    Unnamed { path: PathBuf },

    #[error("Failed to find an available archive path: {source}")]
    Destination {
        #[from]
        source: ProbeError,
    },

    #[error("Failed to create a ZIP archive at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("Cannot archive '{}': its name is not valid UTF-8", path.display())]
    UnencodableName { path: PathBuf },

    #[error("Failed to add '{entry}' to archive {}: {source}", archive.display())]
    Entry {
        archive: PathBuf,
        entry: String,
        #[source]
        source: ArchiveError,
    },

    #[error("Unexpected compression error: {source}")]
    Unexpected {
        code: Option<i32>,
        #[source]
        source: anyhow::Error,
    },
}

impl CompressionError {
    /// Wraps any error not covered by a dedicated variant, keeping its OS
    /// error code when one can be found in the chain.
    pub fn unexpected(source: impl Into<anyhow::Error>) -> Self {
        let source = source.into();
        Self::Unexpected {
            code: os_error_code(&source),
            source,
        }
    }

    /// The numeric code of the underlying failure, when there is one.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Open { source, .. } | Self::Entry { source, .. } => source.code(),
            Self::Destination { source } => source.code(),
            Self::Unexpected { code, .. } => *code,
            _ => None,
        }
    }
}

/// Errors raised while restoring a directory from an archive.
#[derive(Error, Debug)]
pub enum UncompressionError {
    #[error("The given archive does not exist: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Directory archive '{}' does not have the extension: {extension}", path.display())]
    MissingExtension { path: PathBuf, extension: String },

    #[error("Failed to find an available directory path: {source}")]
    Destination {
        #[from]
        source: ProbeError,
    },

    #[error("Failed to open ZIP archive {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error(
        "Failed to extract ZIP archive into folder. Archive: {} ; Destination: {} ; {source}",
        archive.display(),
        destination.display()
    )]
    Extract {
        archive: PathBuf,
        destination: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("Unexpected uncompression error: {source}")]
    Unexpected {
        code: Option<i32>,
        #[source]
        source: anyhow::Error,
    },
}

impl UncompressionError {
    /// Wraps any error not covered by a dedicated variant, keeping its OS
    /// error code when one can be found in the chain.
    pub fn unexpected(source: impl Into<anyhow::Error>) -> Self {
        let source = source.into();
        Self::Unexpected {
            code: os_error_code(&source),
            source,
        }
    }

    /// The numeric code of the underlying failure, when there is one.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Open { source, .. } | Self::Extract { source, .. } => source.code(),
            Self::Destination { source } => source.code(),
            Self::Unexpected { code, .. } => *code,
            _ => None,
        }
    }
}

/// First raw OS error code found in an error chain.
fn os_error_code(error: &anyhow::Error) -> Option<i32> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<std::io::Error>())
        .and_then(std::io::Error::raw_os_error)
}

/// Type alias for Result using anyhow::Error for the application layer.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let config_err = ZipdirError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let missing = CompressionError::SourceNotFound {
            path: PathBuf::from("/tmp/nope"),
        };
        assert_eq!(
            missing.to_string(),
            "The given directory does not exist: /tmp/nope"
        );

        let wrong_ext = UncompressionError::MissingExtension {
            path: PathBuf::from("/tmp/data.tar"),
            extension: "zip".into(),
        };
        assert_eq!(
            wrong_ext.to_string(),
            "Directory archive '/tmp/data.tar' does not have the extension: zip"
        );
    }

    #[test]
    fn test_unexpected_keeps_os_code_and_cause() {
        let io_err = io::Error::from_raw_os_error(13);
        let err = CompressionError::unexpected(io_err);
        assert_eq!(err.code(), Some(13));
        assert!(err.to_string().starts_with("Unexpected compression error"));
        assert!(std::error::Error::source(&err).is_some());

        let err = UncompressionError::unexpected(anyhow::anyhow!("no code here"));
        assert_eq!(err.code(), None);
        assert!(err.to_string().contains("no code here"));
    }

    #[test]
    fn test_open_code_comes_from_backend() {
        let err = UncompressionError::Open {
            path: PathBuf::from("a.zip"),
            source: ArchiveError::Io(io::Error::from_raw_os_error(2)),
        };
        assert_eq!(err.code(), Some(2));

        let err = CompressionError::Open {
            path: PathBuf::from("a.zip"),
            source: ArchiveError::Io(io::Error::other("fake")),
        };
        assert_eq!(err.code(), None);
    }
}
