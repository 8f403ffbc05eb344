//! Port abstraction for the local key-value store holding portal entries.
//!
//! Values are opaque strings; encoding is the caller's concern. A missing
//! entry is not an error: `get` returns `None` and `remove` succeeds.

use super::define_port_error;

define_port_error! {
    /// Failures raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// Entry could not be read.
        Read { key: String, message: String } => "failed to read entry {key}: {message}",
        /// Entry could not be written.
        Write { key: String, message: String } => "failed to write entry {key}: {message}",
        /// Entry could not be removed.
        Remove { key: String, message: String } => "failed to remove entry {key}: {message}",
    }
}

/// Synchronous string-keyed storage.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Fetch the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Delete the entry under `key`.
    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}
