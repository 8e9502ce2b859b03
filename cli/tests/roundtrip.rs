//! # zipdir Archive Round-Trip Integration Tests
//!
//! File: cli/tests/roundtrip.rs
//!
//! ## Overview
//!
//! Exercises `DirectoryArchiver` through the library API with the real ZIP backend:
//! restoring a deleted tree, keeping empty directories, never overwriting existing
//! paths, and the entry layout inside the produced archive.
//!

mod common;
use common::{build_sample_tree, snapshot};
use std::fs::{self, File};
use tempfile::tempdir;
use zipdir::common::archive::{
    ArchiverSettings, DirectoryArchiver, EntryCompression, ZipBackend, ZipOptions,
};
use zipdir::{CompressionError, UncompressionError};

#[test]
fn test_round_trip_restores_deleted_tree() {
    let base = tempdir().unwrap();
    let root = base.path().join("abc");
    build_sample_tree(&root);
    let before = snapshot(&root);
    let archiver = DirectoryArchiver::zip();

    let archive = archiver.compress_directory(&root).unwrap();
    assert_eq!(archive, base.path().join("abc.zip"));

    fs::remove_dir_all(&root).unwrap();
    assert!(!root.exists());

    let restored = archiver.uncompress_directory(&archive).unwrap();
    assert_eq!(restored, root);
    assert_eq!(snapshot(&root), before);
    assert!(root.join("empty/nested-empty").is_dir());
}

#[test]
fn test_empty_root_directory_round_trip() {
    let base = tempdir().unwrap();
    let root = base.path().join("nothing");
    fs::create_dir(&root).unwrap();
    let archiver = DirectoryArchiver::zip();

    let archive = archiver.compress_directory(&root).unwrap();
    fs::remove_dir(&root).unwrap();
    archiver.uncompress_directory(&archive).unwrap();

    assert!(root.is_dir());
    assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
}

#[test]
fn test_entry_names_are_relative_to_root() {
    let base = tempdir().unwrap();
    let root = base.path().join("abc");
    build_sample_tree(&root);

    let archive = DirectoryArchiver::zip().compress_directory(&root).unwrap();
    let zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
    let mut names: Vec<&str> = zip.file_names().collect();
    names.sort_unstable();

    assert_eq!(
        names,
        vec![
            "def/",
            "def/blob.bin",
            "def/ghi/",
            "def/ghi/empty-file",
            "def/ghi/jkl/",
            "def/ghi/jkl/file.txt",
            "empty/",
            "empty/nested-empty/",
            "readme.txt",
        ]
    );
}

#[test]
fn test_existing_archive_is_never_overwritten() {
    let base = tempdir().unwrap();
    let root = base.path().join("abc");
    build_sample_tree(&root);
    fs::write(base.path().join("abc.zip"), "unrelated").unwrap();
    let archiver = DirectoryArchiver::zip();

    let first = archiver.compress_directory(&root).unwrap();
    let second = archiver.compress_directory(&root).unwrap();

    assert!(first.ends_with("abc_1.zip"));
    assert!(second.ends_with("abc_2.zip"));
    assert_eq!(
        fs::read_to_string(base.path().join("abc.zip")).unwrap(),
        "unrelated"
    );
}

#[test]
fn test_stored_archive_round_trip() {
    let base = tempdir().unwrap();
    let root = base.path().join("abc");
    build_sample_tree(&root);
    let before = snapshot(&root);
    let archiver = DirectoryArchiver::new(
        ZipBackend::new(ZipOptions {
            method: EntryCompression::Stored,
            level: None,
        }),
        ArchiverSettings {
            extension: "bundle".into(),
            ..Default::default()
        },
    );

    let archive = archiver.compress_directory(&root).unwrap();
    assert!(archive.ends_with("abc.bundle"));

    let restored = archiver.uncompress_directory(&archive).unwrap();
    assert!(restored.ends_with("abc_1"));
    assert_eq!(snapshot(&restored), before);
}

#[test]
fn test_preconditions_fail_without_side_effects() {
    let base = tempdir().unwrap();
    let archiver = DirectoryArchiver::zip();

    let err = archiver
        .compress_directory(&base.path().join("missing"))
        .unwrap_err();
    assert!(matches!(err, CompressionError::SourceNotFound { .. }));

    let err = archiver
        .uncompress_directory(&base.path().join("missing.zip"))
        .unwrap_err();
    assert!(matches!(err, UncompressionError::SourceNotFound { .. }));

    fs::write(base.path().join("abc.rar"), "x").unwrap();
    let err = archiver
        .uncompress_directory(&base.path().join("abc.rar"))
        .unwrap_err();
    assert!(matches!(err, UncompressionError::MissingExtension { .. }));

    let remaining: Vec<_> = fs::read_dir(base.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(remaining, vec!["abc.rar"]);
}

#[test]
fn test_corrupt_archive_reports_open_failure() {
    let base = tempdir().unwrap();
    let archive = base.path().join("abc.zip");
    fs::write(&archive, "PK but not really").unwrap();

    let err = DirectoryArchiver::zip()
        .uncompress_directory(&archive)
        .unwrap_err();
    assert!(matches!(err, UncompressionError::Open { .. }));
    assert!(!base.path().join("abc").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_paths_keep_their_own_names() {
    use std::os::unix::fs::symlink;

    let base = tempdir().unwrap();
    let store = base.path().join("store");
    let photos = store.join("photos");
    build_sample_tree(&photos);
    let before = snapshot(&photos);
    let home = base.path().join("home");
    fs::create_dir(&home).unwrap();
    symlink(&photos, home.join("link")).unwrap();
    let archiver = DirectoryArchiver::zip();

    let archive = archiver.compress_directory(&home.join("link")).unwrap();
    assert_eq!(archive, home.join("link.zip"));
    assert!(!store.join("photos.zip").exists());

    fs::rename(&archive, base.path().join("blob.bin")).unwrap();
    symlink(base.path().join("blob.bin"), base.path().join("backup.zip")).unwrap();
    let restored = archiver
        .uncompress_directory(&base.path().join("backup.zip"))
        .unwrap();
    assert_eq!(restored, base.path().join("backup"));
    assert_eq!(snapshot(&restored), before);
}
