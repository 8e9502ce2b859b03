//! # zipdir Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests: a `Command` for the compiled binary
//! that cannot pick up the developer's own configuration, and a snapshot of a
//! directory tree for comparing restored output with the original.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// # Get zipdir Command (`zipdir_cmd`)
///
/// Creates an `assert_cmd::Command` for the `zipdir` binary, running in `workdir`
/// with HOME / XDG_CONFIG_HOME pointed there so no user or project config leaks in.
///
/// ## Panics
/// Panics if the `zipdir` binary cannot be found via `Command::cargo_bin`.
pub fn zipdir_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zipdir").expect("Failed to find zipdir binary for testing");
    cmd.current_dir(workdir)
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"))
        .env_remove("ZIPDIR_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// A directory entry as seen from the tree root: `None` for directories,
/// file content otherwise.
pub type TreeSnapshot = BTreeMap<String, Option<Vec<u8>>>;

/// Relative path (with `/` separators) → content for everything below `root`.
pub fn snapshot(root: &Path) -> TreeSnapshot {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| entry.expect("Failed to walk tree"))
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .expect("Entry outside of root")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let content = if entry.file_type().is_dir() {
                None
            } else {
                Some(fs::read(entry.path()).expect("Failed to read file"))
            };
            (relative, content)
        })
        .collect()
}

/// Builds a small tree with nested, empty, and binary content.
pub fn build_sample_tree(root: &Path) {
    fs::create_dir_all(root.join("def/ghi/jkl")).unwrap();
    fs::create_dir_all(root.join("empty/nested-empty")).unwrap();
    fs::write(root.join("readme.txt"), "top level file\n").unwrap();
    fs::write(root.join("def/ghi/jkl/file.txt"), "deeply nested".repeat(500)).unwrap();
    let binary: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
    fs::write(root.join("def/blob.bin"), binary).unwrap();
    fs::write(root.join("def/ghi/empty-file"), b"").unwrap();
}
