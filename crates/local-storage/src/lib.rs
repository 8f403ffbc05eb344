//! Directory-backed key-value entries modelled on browser local storage.
//!
//! Each entry lives in its own `<key>.json` file inside a single directory.
//! Values are opaque strings; callers decide on the encoding. Writes go
//! through a temporary file and a rename so a reader never observes a
//! half-written entry.
//!
//! The crate is deliberately independent of any application types so it can
//! back any small, single-process state store.
//!
//! # Example
//!
//! ```
//! use local_storage::LocalStorage;
//!
//! let temp = tempfile::tempdir().expect("temp dir");
//! let storage = LocalStorage::open(temp.path()).expect("open storage");
//!
//! storage.set("users", "[]").expect("write entry");
//! assert_eq!(storage.get("users").expect("read entry").as_deref(), Some("[]"));
//!
//! storage.remove("users").expect("remove entry");
//! assert!(storage.get("users").expect("read entry").is_none());
//! ```

mod atomic_io;
mod error;
mod key;
mod store;

pub use error::StorageError;
pub use key::{ENTRY_KEY_MAX, EntryKey, KeyError};
pub use store::LocalStorage;
