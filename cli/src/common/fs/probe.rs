//! # zipdir Destination Path Probing (`common::fs::probe`)
//!
//! File: cli/src/common/fs/probe.rs
//!
//! ## Overview
//!
//! Path arithmetic shared by both archive directions:
//!
//! - **`archive_path_for`**: `/data/photos` + `zip` → `/data/photos.zip`.
//! - **`original_path_for`**: `/data/photos.zip` → `/data/photos`.
//! - **`absolute_path`**: anchors a caller's path at the current directory. Symlinks
//!   are left alone, so destinations sit next to the path that was given.
//! - **`find_available_path`**: returns the candidate itself if nothing exists there,
//!   otherwise the first free `<stem>_<n><.ext>` sibling (`photos_1.zip`, `photos_2.zip`, ...).
//!
//! The probe never creates anything; it only checks existence. Two callers probing
//! the same candidate at the same time can both be handed the same path.
//!
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default number of numbered candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Failure to find a free destination path.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("no free path found for '{}' after {attempts} attempts", candidate.display())]
    Exhausted { candidate: PathBuf, attempts: u32 },

    #[error("failed to check whether '{}' exists: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProbeError {
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Io { source, .. } => source.raw_os_error(),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Appends `.<extension>` to the final component of `source`.
pub fn archive_path_for(source: &Path, extension: &str) -> PathBuf {
    let mut path = OsString::from(source.as_os_str());
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Removes `.<extension>` from the file name of `path`. `None` unless the name
/// ends with `.<extension>` (case-sensitive) after a non-empty stem.
pub fn original_path_for(path: &Path, extension: &str) -> Option<PathBuf> {
    let stem = strip_extension(path, extension)?;
    Some(path.with_file_name(stem))
}

fn strip_extension(path: &Path, extension: &str) -> Option<OsString> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(extension)?.strip_suffix('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(OsString::from(stem))
}

/// Makes `path` absolute against the current directory without resolving
/// symlinks. `.` components and trailing separators are dropped. A trailing
/// `..` names no entry of its own and is resolved through the filesystem.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if matches!(joined.components().next_back(), Some(Component::ParentDir)) {
        return joined.canonicalize();
    }
    Ok(joined.components().collect())
}

/// Returns `candidate` if nothing exists there, otherwise the first numbered
/// variant that is free. Gives up after `max_attempts` numbered variants.
pub fn find_available_path(candidate: &Path, max_attempts: u32) -> Result<PathBuf, ProbeError> {
    if !is_taken(candidate)? {
        return Ok(candidate.to_path_buf());
    }

    let stem = candidate
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    let extension = candidate.extension();

    for n in 1..=max_attempts {
        let mut name = stem.clone();
        name.push(format!("_{n}"));
        if let Some(ext) = extension {
            name.push(".");
            name.push(ext);
        }
        let next = candidate.with_file_name(name);
        if !is_taken(&next)? {
            debug!("'{}' is taken, using '{}'", candidate.display(), next.display());
            return Ok(next);
        }
    }

    Err(ProbeError::Exhausted {
        candidate: candidate.to_path_buf(),
        attempts: max_attempts,
    })
}

// `symlink_metadata` so a dangling symlink still counts as taken.
fn is_taken(path: &Path) -> Result<bool, ProbeError> {
    match path.symlink_metadata() {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ProbeError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
