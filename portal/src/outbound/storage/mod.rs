//! Key-value store adapters.

mod local_storage_store;
mod memory_store;

pub use local_storage_store::LocalStorageStore;
pub use memory_store::InMemoryKeyValueStore;
