//! Integration tests for the directory-backed store.
//!
//! These tests reopen the store against the same directory to confirm that
//! entries outlive the handle that wrote them.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use local_storage::{LocalStorage, StorageError};
use rstest::rstest;

#[test]
fn entries_survive_reopening_the_directory() {
    let temp = tempfile::tempdir().expect("temp dir");

    {
        let storage = LocalStorage::open(temp.path()).expect("open storage");
        storage.set("users", r#"[{"id":1,"login":"admin"}]"#).expect("write users");
        storage.set("currentUser", r#"{"id":1}"#).expect("write session");
    }

    let reopened = LocalStorage::open(temp.path()).expect("reopen storage");
    assert_eq!(
        reopened.get("users").expect("read users").as_deref(),
        Some(r#"[{"id":1,"login":"admin"}]"#)
    );
    assert_eq!(
        reopened.get("currentUser").expect("read session").as_deref(),
        Some(r#"{"id":1}"#)
    );
}

#[test]
fn open_creates_missing_nested_directories() {
    let temp = tempfile::tempdir().expect("temp dir");
    let nested = temp.path().join("profile").join("storage");

    let storage = LocalStorage::open(&nested).expect("open nested storage");
    storage.set("applications", "[]").expect("write");

    assert!(nested.join("applications.json").is_file());
}

#[test]
fn entries_are_written_as_json_files() {
    let temp = tempfile::tempdir().expect("temp dir");
    let storage = LocalStorage::open(temp.path()).expect("open storage");

    storage.set("applications", "[]").expect("write");

    let contents =
        std::fs::read_to_string(temp.path().join("applications.json")).expect("read file");
    assert_eq!(contents, "[]");
}

#[rstest]
#[case::empty("")]
#[case::separator("a/b")]
#[case::dot_segment("..")]
fn invalid_keys_never_touch_the_filesystem(#[case] key: &str) {
    let temp = tempfile::tempdir().expect("temp dir");
    let storage = LocalStorage::open(temp.path()).expect("open storage");

    let result = storage.set(key, "value");

    assert!(matches!(result, Err(StorageError::InvalidKey { .. })));
    let entries = std::fs::read_dir(temp.path()).expect("list dir").count();
    assert_eq!(entries, 0);
}
