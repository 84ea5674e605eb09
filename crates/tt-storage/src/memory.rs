use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::traits::KeyValueStore;
use crate::{StoreError, StoreResult};

/// In-memory store for tests. Not durable.
///
/// Reads and writes can be switched to fail to exercise the degraded paths.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Mutex::new(HashMap::from([(key.to_string(), bytes.into())])),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn keys(&self) -> Vec<String> {
        let map = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Leaves the lock poisoned, as after a panic in another thread holding it.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::thread::scope(|s| {
            s.spawn(|| {
                let _guard = self.inner.lock();
                panic!("writer died holding the lock");
            })
            .join()
        });
    }

    fn map(&self) -> StoreResult<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.inner.lock().map_err(|e| StoreError::backend("locking", e))
    }
}

impl KeyValueStore for InMemoryStore {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.map()?.contains_key(key))
    }

    fn read_bytes(&self, key: &str) -> StoreResult<Vec<u8>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::backend("read", "injected read failure"));
        }
        self.map()?
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn write_bytes(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::backend("write", "injected write failure"));
        }
        self.map()?.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn ensure_namespace(&self) -> StoreResult<()> {
        Ok(())
    }
}
