use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ChatStoreError;
use crate::paths::sanitize_key;

/// Synchronous key-value string store over one directory.
///
/// One file per sanitized key. No transactional guarantees beyond the host
/// filesystem's; a `set` is visible to every subsequent `get` in the same
/// process. Cross-process consistency is best-effort.
#[derive(Debug, Clone)]
pub struct KvStore {
    root: PathBuf,
}

impl KvStore {
    pub fn open(root: &Path) -> Result<Self, ChatStoreError> {
        fs::create_dir_all(root)
            .map_err(|source| ChatStoreError::io("creating store root", root, source))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_key(key))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, ChatStoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ChatStoreError::io("reading record", path, source)),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), ChatStoreError> {
        let path = self.path_for(key);
        fs::write(&path, value)
            .map_err(|source| ChatStoreError::io("writing record", path, source))
    }

    pub fn remove(&self, key: &str) -> Result<(), ChatStoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ChatStoreError::io("removing record", path, source)),
        }
    }

    pub fn clear(&self, keys: &[&str]) -> Result<(), ChatStoreError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
