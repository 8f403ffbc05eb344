//! Directory-backed entry store.

use std::io;
use std::path::Path;

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use crate::atomic_io::write_atomic;
use crate::error::StorageError;
use crate::key::EntryKey;

/// Key-value entries stored as one file per key inside a directory.
///
/// The store holds a capability handle to its directory, so every entry
/// operation is confined to that directory regardless of the key supplied.
#[derive(Debug)]
pub struct LocalStorage {
    dir: Dir,
}

impl LocalStorage {
    /// Opens the storage directory at `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] when the directory cannot be created or
    /// opened.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();
        let open_error = |err: io::Error| StorageError::Open {
            path: Utf8PathBuf::from(root.to_string_lossy().into_owned()),
            message: err.to_string(),
        };

        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        debug!(path = %root.display(), "local storage opened");
        Ok(Self { dir })
    }

    /// Reads the entry stored under `key`.
    ///
    /// Returns `Ok(None)` when no entry exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for unusable keys and
    /// [`StorageError::Read`] when the entry exists but cannot be read.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = parse_key(key)?;
        match self.dir.read_to_string(key.file_name()) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read {
                path: key.file_path(),
                message: err.to_string(),
            }),
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for unusable keys and
    /// [`StorageError::Write`] when the entry cannot be written.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let key = parse_key(key)?;
        write_atomic(&self.dir, &key, value)?;
        debug!(key = %key, bytes = value.len(), "local storage entry written");
        Ok(())
    }

    /// Removes the entry stored under `key`. Removing a missing entry is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for unusable keys and
    /// [`StorageError::Remove`] when an existing entry cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let key = parse_key(key)?;
        match self.dir.remove_file(key.file_name()) {
            Ok(()) => {
                debug!(key = %key, "local storage entry removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Remove {
                path: key.file_path(),
                message: err.to_string(),
            }),
        }
    }

    /// Reports whether an entry exists under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for unusable keys.
    pub fn contains(&self, key: &str) -> Result<bool, StorageError> {
        let key = parse_key(key)?;
        Ok(self.dir.exists(key.file_name()))
    }
}

fn parse_key(key: &str) -> Result<EntryKey, StorageError> {
    EntryKey::new(key).map_err(|reason| StorageError::InvalidKey {
        key: key.to_owned(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    //! Unit coverage for entry reads, writes, and removals.

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;
    use crate::key::KeyError;

    struct Sandbox {
        _temp: TempDir,
        storage: LocalStorage,
    }

    #[fixture]
    fn sandbox() -> Sandbox {
        let temp = tempfile::tempdir().expect("temp dir");
        let storage = LocalStorage::open(temp.path()).expect("open storage");
        Sandbox {
            _temp: temp,
            storage,
        }
    }

    #[rstest]
    fn missing_entry_reads_as_none(sandbox: Sandbox) {
        assert_eq!(sandbox.storage.get("users").expect("read"), None);
        assert!(!sandbox.storage.contains("users").expect("contains"));
    }

    #[rstest]
    fn set_then_get_returns_value(sandbox: Sandbox) {
        sandbox.storage.set("users", r#"[{"id":1}]"#).expect("write");
        assert_eq!(
            sandbox.storage.get("users").expect("read").as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert!(sandbox.storage.contains("users").expect("contains"));
    }

    #[rstest]
    fn set_replaces_previous_value(sandbox: Sandbox) {
        sandbox.storage.set("applications", "[]").expect("first write");
        sandbox
            .storage
            .set("applications", r#"[{"id":1}]"#)
            .expect("second write");
        assert_eq!(
            sandbox.storage.get("applications").expect("read").as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[rstest]
    fn remove_deletes_entry(sandbox: Sandbox) {
        sandbox.storage.set("currentUser", "{}").expect("write");
        sandbox.storage.remove("currentUser").expect("remove");
        assert_eq!(sandbox.storage.get("currentUser").expect("read"), None);
    }

    #[rstest]
    fn removing_missing_entry_is_not_an_error(sandbox: Sandbox) {
        sandbox.storage.remove("currentUser").expect("remove missing");
    }

    #[rstest]
    fn unicode_values_survive_storage(sandbox: Sandbox) {
        let value = r#"{"fullName":"Иванов Иван"}"#;
        sandbox.storage.set("currentUser", value).expect("write");
        assert_eq!(
            sandbox.storage.get("currentUser").expect("read").as_deref(),
            Some(value)
        );
    }

    #[rstest]
    #[case::get("get")]
    #[case::set("set")]
    #[case::remove("remove")]
    fn path_like_keys_are_rejected(sandbox: Sandbox, #[case] operation: &str) {
        let key = "../escape";
        let result = match operation {
            "get" => sandbox.storage.get(key).map(|_| ()),
            "set" => sandbox.storage.set(key, "x"),
            _ => sandbox.storage.remove(key),
        };
        assert_eq!(
            result,
            Err(StorageError::InvalidKey {
                key: key.to_owned(),
                reason: KeyError::InvalidCharacters,
            })
        );
    }

    #[rstest]
    fn no_temporary_files_remain_after_write(sandbox: Sandbox) {
        sandbox.storage.set("users", "[]").expect("write");
        let names: Vec<String> = sandbox
            .storage
            .dir
            .entries()
            .expect("list entries")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["users.json".to_owned()]);
    }
}
