//! # zipdir Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates zipdir's configuration: which archive
//! extension to use, how entries are compressed, and how far the destination probe
//! searches before giving up.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` or `ZIPDIR_CONFIG` (`~` is expanded)
//! 2. Project-specific `.zipdir.toml` in the current directory or its ancestors
//!    (the search stops at the first directory containing `.git`)
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/zipdir/config.toml`)
//! 4. Default values defined in the code
//!
//! A higher-precedence file overrides exactly the keys it sets, including keys
//! set back to their default value. The merged result is validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [archive]
//! extension = "zip"
//! method = "deflated"   # or "stored"
//! level = 9
//!
//! [probe]
//! max_attempts = 500
//! ```
//!
use crate::common::archive::{
    ArchiverSettings, DirectoryArchiver, EntryCompression, ZipBackend, ZipOptions,
    DEFAULT_EXTENSION,
};
use crate::common::fs::io::read_file_to_string;
use crate::common::fs::probe::DEFAULT_MAX_ATTEMPTS;
use crate::core::error::{Result, ZipdirError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The resolved configuration zipdir runs with.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub probe: ProbeConfig,
}

/// How archives are named and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Archive extension without the leading dot.
    pub extension: String,
    /// Compression applied to file entries.
    pub method: EntryCompression,
    /// Deflate level (0-9). Only valid with `method = "deflated"`.
    pub level: Option<i64>,
}

/// Limits of the destination probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Numbered candidates (`name_1`, `name_2`, ...) tried before failing.
    pub max_attempts: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            method: EntryCompression::default(),
            level: None,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A single configuration file as written on disk. Keys left out stay `None`
/// so that layering can tell "not set" apart from "set to the default".
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    archive: ArchiveLayer,
    #[serde(default)]
    probe: ProbeLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ArchiveLayer {
    extension: Option<String>,
    method: Option<EntryCompression>,
    level: Option<i64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ProbeLayer {
    max_attempts: Option<u32>,
}

impl ConfigFile {
    fn resolve(self) -> Config {
        let defaults = Config::default();
        Config {
            archive: ArchiveConfig {
                extension: self.archive.extension.unwrap_or(defaults.archive.extension),
                method: self.archive.method.unwrap_or(defaults.archive.method),
                level: self.archive.level,
            },
            probe: ProbeConfig {
                max_attempts: self.probe.max_attempts.unwrap_or(defaults.probe.max_attempts),
            },
        }
    }
}

impl Config {
    pub fn archiver_settings(&self) -> ArchiverSettings {
        ArchiverSettings {
            extension: self.archive.extension.clone(),
            max_probe_attempts: self.probe.max_attempts,
        }
    }

    pub fn zip_options(&self) -> ZipOptions {
        ZipOptions {
            method: self.archive.method,
            level: self.archive.level,
        }
    }

    /// The ZIP-backed archiver described by this configuration.
    pub fn archiver(&self) -> DirectoryArchiver<ZipBackend> {
        DirectoryArchiver::new(ZipBackend::new(self.zip_options()), self.archiver_settings())
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".zipdir.toml";

/// Loads the merged and validated configuration.
///
/// `explicit` is a config file named on the command line (or via `ZIPDIR_CONFIG`);
/// unlike the discovered files it must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let project_config = load_project_config(&current_dir)?;
    let explicit_config = match explicit {
        Some(path) => {
            let path = expand_config_path(path);
            info!("Loading configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => None,
    };

    let merged = merge_configs(user_config.unwrap_or_default(), project_config);
    let merged = merge_configs(merged, explicit_config).resolve();
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "zipdir", "zipdir") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<ConfigFile>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.zipdir.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn expand_config_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Layers `overlay` over `base` key by key. Setting `method` in a layer drops a
/// `level` inherited from the layers below it.
fn merge_configs(base: ConfigFile, overlay: Option<ConfigFile>) -> ConfigFile {
    let overlay = match overlay {
        Some(o) => o,
        None => return base,
    };
    let level = match (overlay.archive.method, overlay.archive.level) {
        (_, Some(level)) => Some(level),
        (Some(_), None) => None,
        (None, None) => base.archive.level,
    };
    ConfigFile {
        archive: ArchiveLayer {
            extension: overlay.archive.extension.or(base.archive.extension),
            method: overlay.archive.method.or(base.archive.method),
            level,
        },
        probe: ProbeLayer {
            max_attempts: overlay.probe.max_attempts.or(base.probe.max_attempts),
        },
    }
}

fn validate_config(config: &Config) -> Result<()> {
    let extension = &config.archive.extension;
    if extension.is_empty() {
        return Err(anyhow!(ZipdirError::Config(
            "Archive extension cannot be empty.".to_string()
        )));
    }
    if extension.starts_with('.') {
        return Err(anyhow!(ZipdirError::Config(format!(
            "Archive extension '{}' must be given without the leading dot.",
            extension
        ))));
    }
    if extension.contains(['/', '\\']) {
        return Err(anyhow!(ZipdirError::Config(format!(
            "Archive extension '{}' cannot contain path separators.",
            extension
        ))));
    }
    if let Some(level) = config.archive.level {
        if config.archive.method != EntryCompression::Deflated {
            return Err(anyhow!(ZipdirError::Config(
                "A compression level is only valid with method = \"deflated\".".to_string()
            )));
        }
        if !(0..=9).contains(&level) {
            return Err(anyhow!(ZipdirError::Config(format!(
                "Invalid compression level {}. Expected 0-9.",
                level
            ))));
        }
    }
    if config.probe.max_attempts == 0 {
        return Err(anyhow!(ZipdirError::Config(
            "probe.max_attempts must be at least 1.".to_string()
        )));
    }
    Ok(())
}
