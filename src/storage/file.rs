//! Directory-backed storage: one file per key.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{Storage, validate_key};
use crate::error::YobitError;

/// A [`Storage`] that keeps each key in its own file under a directory.
///
/// Values are replaced atomically: the new contents are written to a
/// uniquely named temporary sibling, synced, then renamed over the old file. A crash in the
/// middle of a write leaves either the old or the new value, never a mix.
///
/// # Example
///
/// ```rust,no_run
/// use yobit_api_client::storage::{FileStorage, Storage};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = FileStorage::open("data")?;
/// storage.put("greeting", b"hello")?;
/// assert_eq!(storage.get("greeting")?.as_deref(), Some(&b"hello"[..]));
/// storage.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, YobitError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| YobitError::storage(dir.display().to_string(), e))?;
        tracing::debug!(dir = %dir.display(), "opened file storage");
        Ok(Self { dir })
    }

    /// Directory holding the stored values.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Release the store, flushing directory metadata where supported.
    pub fn close(self) -> Result<(), YobitError> {
        self.sync_dir()
            .map_err(|e| YobitError::storage(self.dir.display().to_string(), e))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    #[cfg(unix)]
    fn sync_dir(&self) -> io::Result<()> {
        File::open(&self.dir)?.sync_all()
    }

    #[cfg(not(unix))]
    fn sync_dir(&self) -> io::Result<()> {
        Ok(())
    }

    /// Each write gets its own temporary file, so concurrent writers of one
    /// key never share a partially written file. The last rename wins.
    fn write_atomic(&self, key: &str, value: &[u8]) -> io::Result<()> {
        let target = self.path_for(key);

        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{key}."))
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        tmp.write_all(value)?;
        tmp.as_file().sync_all()?;

        tmp.persist(&target).map_err(|e| e.error)?;
        self.sync_dir()
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, YobitError> {
        validate_key(key)?;
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(YobitError::storage(key, e)),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), YobitError> {
        validate_key(key)?;
        self.write_atomic(key, value)
            .map_err(|e| YobitError::storage(key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let storage = FileStorage::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(storage.dir(), dir.as_path());
    }

    #[test]
    fn test_values_survive_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(tmp.path()).unwrap();
        assert!(storage.get("nonce").unwrap().is_none());
        storage.put("nonce", b"42").unwrap();
        storage.close().unwrap();

        let reopened = FileStorage::open(tmp.path()).unwrap();
        assert_eq!(reopened.get("nonce").unwrap().as_deref(), Some(&b"42"[..]));
        assert_eq!(fs::read_to_string(tmp.path().join("nonce")).unwrap(), "42");
    }

    #[test]
    fn test_put_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(tmp.path()).unwrap();
        storage.put("cookies", b"{}").unwrap();
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["cookies".to_string()]);
    }

    #[test]
    fn test_concurrent_puts_of_one_key() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileStorage::open(tmp.path()).unwrap());
        let large = vec![b'a'; 200 * 1024];
        let small = vec![b'b'; 100 * 1024];

        let writers: Vec<_> = [large.clone(), small.clone()]
            .into_iter()
            .map(|payload| {
                let storage = Arc::clone(&storage);
                thread::spawn(move || {
                    for _ in 0..200 {
                        storage.put("cookies", &payload).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let stored = storage.get("cookies").unwrap().unwrap();
        assert!(stored == large || stored == small);
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["cookies".to_string()]);
    }

    #[test]
    fn test_rejects_path_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(tmp.path()).unwrap();
        let err = storage.put("../escape", b"x").unwrap_err();
        assert!(matches!(err, YobitError::Storage { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_value_is_storage_error() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(tmp.path()).unwrap();
        // A directory where a value file is expected cannot be read as bytes.
        fs::create_dir(tmp.path().join("nonce")).unwrap();
        let err = storage.get("nonce").unwrap_err();
        assert!(matches!(err, YobitError::Storage { ref key, .. } if key == "nonce"));
    }
}
