use std::path::{Path, PathBuf};

use tracing::debug;

use crate::traits::KeyValueStore;
use crate::{StoreError, StoreResult};

/// One file per key under a namespace directory.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KeyValueStore for FsStore {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.path_for(key).is_file())
    }

    fn read_bytes(&self, key: &str) -> StoreResult<Vec<u8>> {
        let path = self.path_for(key);
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(key.to_string()),
            _ => StoreError::io("reading", path, e),
        })
    }

    fn write_bytes(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.path_for(key);
        debug!("writing {} bytes to {}", bytes.len(), path.display());
        std::fs::write(&path, bytes).map_err(|e| StoreError::io("writing", path, e))
    }

    fn ensure_namespace(&self) -> StoreResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| StoreError::io("creating namespace", &self.root, e))
    }
}
