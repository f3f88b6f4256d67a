//! Nonce generation for YoBit trade API authentication.
//!
//! YoBit rejects any authenticated request whose nonce is not greater than
//! the last one it accepted for the key. Unlike a clock-based nonce, the
//! counter here starts at 1 and must therefore survive restarts, so it lives
//! in durable [`Storage`].

use std::sync::{Arc, Mutex};

use crate::auth::Credentials;
use crate::error::YobitError;
use crate::storage::Storage;

/// Storage key used when no credential-specific key is requested.
pub const DEFAULT_NONCE_KEY: &str = "nonce";

/// Trait for providing nonces for authenticated requests.
///
/// Each returned value must be greater than any previously returned value.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    fn next_nonce(&self) -> Result<u64, YobitError>;
}

/// A strictly increasing counter persisted in [`Storage`].
///
/// The stored value is the next nonce to hand out, as decimal text. Each
/// call to [`next`](Self::next) reads it, writes back `value + 1` and only
/// then returns `value`, so a crash after issuance leaves a gap but never a
/// repeat.
///
/// Create one instance per credential and share it (for example behind an
/// `Arc`) between everything that signs requests for that credential.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use yobit_api_client::auth::PersistentNonce;
/// use yobit_api_client::storage::MemoryStorage;
///
/// let nonce = PersistentNonce::new(Arc::new(MemoryStorage::new()));
/// assert_eq!(nonce.next().unwrap(), 1);
/// assert_eq!(nonce.next().unwrap(), 2);
/// ```
pub struct PersistentNonce {
    storage: Arc<dyn Storage>,
    key: String,
    lock: Mutex<()>,
}

impl PersistentNonce {
    /// Create a counter stored under [`DEFAULT_NONCE_KEY`].
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_key(storage, DEFAULT_NONCE_KEY)
    }

    /// Create a counter stored under a custom key.
    pub fn with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    /// Create a counter dedicated to one API key.
    ///
    /// Different API keys get independent counters in the same storage.
    pub fn for_credentials(storage: Arc<dyn Storage>, credentials: &Credentials) -> Self {
        Self::with_key(storage, credential_key(&credentials.api_key))
    }

    /// The storage key holding this counter.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Issue the next nonce, advancing the persisted counter.
    pub fn next(&self) -> Result<u64, YobitError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let value = self.read()?;
        let following = value
            .checked_add(1)
            .ok_or_else(|| YobitError::NonceExhausted {
                key: self.key.clone(),
            })?;
        self.storage
            .put(&self.key, following.to_string().as_bytes())?;

        tracing::trace!(key = %self.key, nonce = value, "issued nonce");
        Ok(value)
    }

    /// The nonce the next call to [`next`](Self::next) would return.
    pub fn peek(&self) -> Result<u64, YobitError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.read()
    }

    fn read(&self) -> Result<u64, YobitError> {
        let Some(bytes) = self.storage.get(&self.key)? else {
            return Ok(1);
        };
        let corrupt = || YobitError::CorruptNonce {
            key: self.key.clone(),
            value: String::from_utf8_lossy(&bytes).into_owned(),
        };
        let text = std::str::from_utf8(&bytes).map_err(|_| corrupt())?;
        match text.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err(corrupt()),
            Ok(value) => Ok(value),
        }
    }
}

impl NonceProvider for PersistentNonce {
    fn next_nonce(&self) -> Result<u64, YobitError> {
        self.next()
    }
}

impl std::fmt::Debug for PersistentNonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentNonce")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Storage key for an API key's counter.
fn credential_key(api_key: &str) -> String {
    let sanitized: String = api_key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{DEFAULT_NONCE_KEY}.{sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use std::collections::HashSet;
    use std::thread;

    fn memory() -> Arc<dyn Storage> {
        Arc::new(MemoryStorage::new())
    }

    #[test]
    fn test_absent_storage_starts_at_one() {
        let nonce = PersistentNonce::new(memory());
        assert_eq!(nonce.next().unwrap(), 1);
        assert_eq!(nonce.next().unwrap(), 2);
    }

    #[test]
    fn test_nonce_strictly_increasing() {
        let nonce = PersistentNonce::new(memory());

        let mut last = 0u64;
        for _ in 0..1000 {
            let next = nonce.next().unwrap();
            assert!(next > last, "Nonce must be strictly increasing");
            last = next;
        }
    }

    #[test]
    fn test_persists_next_value_before_returning() {
        let storage = memory();
        let nonce = PersistentNonce::new(storage.clone());
        assert_eq!(nonce.next().unwrap(), 1);
        assert_eq!(storage.get(DEFAULT_NONCE_KEY).unwrap().as_deref(), Some(&b"2"[..]));
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let nonce = Arc::new(PersistentNonce::new(memory()));
        let mut handles = vec![];

        for _ in 0..8 {
            let n = nonce.clone();
            handles.push(thread::spawn(move || {
                (0..250).map(|_| n.next().unwrap()).collect::<Vec<_>>()
            }));
        }

        let mut all_nonces = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(all_nonces.insert(value), "Nonce must be unique across threads");
            }
        }

        // Serialized issuance leaves no gaps within one process.
        let mut sorted: Vec<_> = all_nonces.into_iter().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=2000).collect::<Vec<u64>>());
    }

    #[test]
    fn test_survives_restart() {
        let tmp = tempfile::tempdir().unwrap();

        let last = {
            let storage = Arc::new(FileStorage::open(tmp.path()).unwrap());
            let nonce = PersistentNonce::new(storage);
            nonce.next().unwrap();
            nonce.next().unwrap()
        };

        let storage = Arc::new(FileStorage::open(tmp.path()).unwrap());
        let nonce = PersistentNonce::new(storage);
        assert!(nonce.next().unwrap() > last);
    }

    #[test]
    fn test_accepts_trailing_newline() {
        let storage = memory();
        storage.put(DEFAULT_NONCE_KEY, b"17\n").unwrap();
        let nonce = PersistentNonce::new(storage);
        assert_eq!(nonce.next().unwrap(), 17);
    }

    #[test]
    fn test_corrupt_value() {
        for raw in [&b"abc"[..], &b""[..], &b"0"[..], &b"-3"[..], &b"\xff\xfe"[..]] {
            let storage = memory();
            storage.put(DEFAULT_NONCE_KEY, raw).unwrap();
            let nonce = PersistentNonce::new(storage.clone());
            let err = nonce.next().unwrap_err();
            assert!(matches!(err, YobitError::CorruptNonce { .. }), "{raw:?}");
            // A failed call must not touch the stored value.
            assert_eq!(storage.get(DEFAULT_NONCE_KEY).unwrap().as_deref(), Some(raw));
        }
    }

    #[test]
    fn test_exhausted_counter() {
        let storage = memory();
        storage.put(DEFAULT_NONCE_KEY, u64::MAX.to_string().as_bytes()).unwrap();
        let nonce = PersistentNonce::new(storage);
        assert!(matches!(nonce.next(), Err(YobitError::NonceExhausted { .. })));
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct ReadOnly;

        impl Storage for ReadOnly {
            fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, YobitError> {
                Ok(Some(b"5".to_vec()))
            }

            fn put(&self, key: &str, _value: &[u8]) -> Result<(), YobitError> {
                Err(YobitError::storage(
                    key,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ))
            }
        }

        let nonce = PersistentNonce::new(Arc::new(ReadOnly));
        assert!(matches!(nonce.next(), Err(YobitError::Storage { .. })));
    }

    #[test]
    fn test_peek_does_not_advance() {
        let nonce = PersistentNonce::new(memory());
        assert_eq!(nonce.peek().unwrap(), 1);
        assert_eq!(nonce.peek().unwrap(), 1);
        assert_eq!(nonce.next().unwrap(), 1);
        assert_eq!(nonce.peek().unwrap(), 2);
    }

    #[test]
    fn test_per_credential_counters_are_independent() {
        let storage = memory();
        let alice = PersistentNonce::for_credentials(storage.clone(), &Credentials::new("AB12", "s"));
        let bob = PersistentNonce::for_credentials(storage, &Credentials::new("CD/34", "s"));
        assert_eq!(alice.key(), "nonce.AB12");
        assert_eq!(bob.key(), "nonce.CD_34");

        assert_eq!(alice.next().unwrap(), 1);
        assert_eq!(alice.next().unwrap(), 2);
        assert_eq!(bob.next().unwrap(), 1);
    }
}
