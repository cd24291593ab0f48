//! Persisted key-value storage.

mod file_store;

pub use file_store::FileKeyValueStore;
