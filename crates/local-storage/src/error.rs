//! Error types for the local-storage crate.
//!
//! Failures carry the offending path and the rendered I/O message so the
//! enum stays `Clone` and comparable in tests.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::key::KeyError;

/// Errors raised while reading or mutating stored entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The storage directory could not be created or opened.
    #[error("failed to open storage directory '{path}': {message}")]
    Open {
        /// Directory that was requested.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The entry key is not usable as a file name.
    #[error("invalid entry key '{key}': {reason}")]
    InvalidKey {
        /// Key supplied by the caller.
        key: String,
        /// Why the key was rejected.
        reason: KeyError,
    },

    /// An entry exists but could not be read.
    #[error("failed to read entry at '{path}': {message}")]
    Read {
        /// Entry file path relative to the storage directory.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// An entry could not be written.
    #[error("failed to write entry at '{path}': {message}")]
    Write {
        /// Entry (or temporary) file path relative to the storage directory.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// An entry exists but could not be removed.
    #[error("failed to remove entry at '{path}': {message}")]
    Remove {
        /// Entry file path relative to the storage directory.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
