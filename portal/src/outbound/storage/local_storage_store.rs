//! [`KeyValueStore`] backed by the `local-storage` directory store.

use std::path::Path;

use local_storage::{LocalStorage, StorageError};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Portal entries kept as JSON files in a local directory.
#[derive(Debug)]
pub struct LocalStorageStore {
    storage: LocalStorage,
}

impl LocalStorageStore {
    /// Open (creating if needed) the store directory at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        LocalStorage::open(root).map(Self::new)
    }

    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }
}

fn describe(error: &StorageError) -> String {
    match error {
        StorageError::InvalidKey { reason, .. } => format!("invalid key: {reason}"),
        other => other.to_string(),
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        self.storage
            .get(key)
            .map_err(|err| KeyValueStoreError::read(key, describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.storage
            .set(key, value)
            .map_err(|err| KeyValueStoreError::write(key, describe(&err)))
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.storage
            .remove(key)
            .map_err(|err| KeyValueStoreError::remove(key, describe(&err)))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Sandbox {
        _dir: TempDir,
        store: LocalStorageStore,
    }

    #[fixture]
    fn sandbox() -> Sandbox {
        let dir = TempDir::new().expect("temp dir");
        let store = LocalStorageStore::open(dir.path().join("data")).expect("open store");
        Sandbox { _dir: dir, store }
    }

    #[rstest]
    fn entries_round_trip(sandbox: Sandbox) {
        sandbox.store.set("users", "[]").expect("set");
        assert_eq!(sandbox.store.get("users").expect("get"), Some("[]".to_owned()));
        sandbox.store.remove("users").expect("remove");
        assert_eq!(sandbox.store.get("users").expect("get"), None);
    }

    #[rstest]
    fn missing_entries_are_not_errors(sandbox: Sandbox) {
        assert_eq!(sandbox.store.get("currentUser").expect("get"), None);
        sandbox.store.remove("currentUser").expect("remove missing");
    }

    #[rstest]
    fn invalid_keys_map_to_port_errors(sandbox: Sandbox) {
        let err = sandbox.store.set("../escape", "x").expect_err("invalid key");
        assert!(matches!(
            err,
            KeyValueStoreError::Write { ref key, ref message }
                if key == "../escape" && message.starts_with("invalid key")
        ));
    }
}
