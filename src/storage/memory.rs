//! In-process storage, useful for tests and short-lived clients.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{Storage, validate_key};
use crate::error::YobitError;

/// A [`Storage`] that keeps values in memory.
///
/// Values do not survive the process, so a nonce counter backed by this
/// store starts again from 1 on every run.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, YobitError> {
        validate_key(key)?;
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), YobitError> {
        validate_key(key)?;
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
