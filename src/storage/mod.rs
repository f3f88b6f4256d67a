//! Durable key/value storage used for the nonce counter and cookie snapshots.
//!
//! The client only needs two operations, so any backend that can read and
//! atomically replace a small byte blob per key will do.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::io;
use std::sync::Arc;

use crate::error::YobitError;

/// A durable key/value store.
///
/// Implementations must make `put` durable before returning: once it
/// succeeds, a subsequent `get` (even from a new process) sees the value.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, YobitError>;

    /// Replace the value stored under `key`.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), YobitError>;
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, YobitError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), YobitError> {
        (**self).put(key, value)
    }
}

/// Reject keys that could escape a storage directory.
pub(crate) fn validate_key(key: &str) -> Result<(), YobitError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(YobitError::storage(
            key,
            io::Error::new(io::ErrorKind::InvalidInput, "invalid storage key"),
        ))
    }
}
