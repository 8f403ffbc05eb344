//! Atomic entry writes.
//!
//! Entries are written to a hidden temporary file in the storage directory
//! and then renamed over the target, so the target is either the old value
//! or the new value, never a partial write.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8PathBuf;
use cap_std::fs::{Dir, OpenOptions};

use crate::error::StorageError;
use crate::key::EntryKey;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `contents` to the file backing `key` atomically.
///
/// # Errors
///
/// Returns [`StorageError::Write`] if the temporary file cannot be written
/// or renamed into place.
pub(crate) fn write_atomic(dir: &Dir, key: &EntryKey, contents: &str) -> Result<(), StorageError> {
    let file_name = key.file_name();
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{}.tmp.{}.{}.{}",
        file_name,
        std::process::id(),
        suffix,
        counter
    );

    write_to_temp_file(dir, &tmp_name, contents)?;
    rename_temp_to_target(dir, &tmp_name, &file_name)?;
    sync_directory(dir);

    Ok(())
}

fn write_to_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> Result<(), StorageError> {
    let write_error = |err: io::Error| StorageError::Write {
        path: Utf8PathBuf::from(tmp_name),
        message: err.to_string(),
    };

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options).map_err(write_error)?;

    if let Err(err) = file.write_all(contents.as_bytes()).and_then(|()| file.sync_all()) {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(write_error(err));
    }

    Ok(())
}

fn rename_temp_to_target(dir: &Dir, tmp_name: &str, target_name: &str) -> Result<(), StorageError> {
    if let Err(err) = rename_temp_to_target_impl(dir, tmp_name, target_name) {
        // Best-effort cleanup of the temp file; the rename error wins.
        drop(dir.remove_file(tmp_name));
        return Err(StorageError::Write {
            path: Utf8PathBuf::from(target_name),
            message: err.to_string(),
        });
    }
    Ok(())
}

#[cfg(windows)]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_directory(dir: &Dir) {
    // Best-effort directory sync; ignore failures.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Ignore sync failures.
    }
}
