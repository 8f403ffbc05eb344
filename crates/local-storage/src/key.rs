//! Entry key validation.
//!
//! Keys become file names, so they are restricted to a conservative
//! character set that can never escape the storage directory.
//!
//! # Validation Rules
//!
//! - Must not be empty
//! - At most [`ENTRY_KEY_MAX`] characters
//! - Allowed characters: ASCII letters, digits, `_` and `-`

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Maximum allowed length for an entry key.
pub const ENTRY_KEY_MAX: usize = 64;

const ENTRY_EXTENSION: &str = "json";

/// Reasons an entry key is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Key is the empty string.
    #[error("key must not be empty")]
    Empty,
    /// Key exceeds [`ENTRY_KEY_MAX`] characters.
    #[error("key must be at most {max} characters")]
    TooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Key contains a character outside the permitted set.
    #[error("key may only contain ASCII letters, digits, '_' or '-'")]
    InvalidCharacters,
}

/// A validated entry key.
///
/// # Examples
///
/// ```
/// use local_storage::EntryKey;
///
/// let key = EntryKey::new("currentUser").expect("valid key");
/// assert_eq!(key.file_name(), "currentUser.json");
/// assert!(EntryKey::new("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey(String);

impl EntryKey {
    /// Validates `key` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the key is empty, too long, or contains a
    /// character outside the permitted set.
    pub fn new(key: impl Into<String>) -> Result<Self, KeyError> {
        let key = key.into();
        if key.is_empty() {
            return Err(KeyError::Empty);
        }
        if key.chars().count() > ENTRY_KEY_MAX {
            return Err(KeyError::TooLong { max: ENTRY_KEY_MAX });
        }
        if !key.chars().all(is_valid_key_char) {
            return Err(KeyError::InvalidCharacters);
        }
        Ok(Self(key))
    }

    /// Borrow the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// File name backing this entry inside the storage directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{ENTRY_EXTENSION}", self.0)
    }

    /// Relative path backing this entry, used in error reports.
    #[must_use]
    pub fn file_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.file_name())
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for EntryKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

const fn is_valid_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
