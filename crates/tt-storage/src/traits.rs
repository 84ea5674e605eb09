use crate::StoreResult;

/// Persisted mapping from flat string keys to opaque bytes.
///
/// Keys must already be safe for the backing namespace; see [`crate::sanitize_key`].
pub trait KeyValueStore: Send + Sync {
    fn exists(&self, key: &str) -> StoreResult<bool>;
    fn read_bytes(&self, key: &str) -> StoreResult<Vec<u8>>;
    /// Overwrites any previous value.
    fn write_bytes(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;
    /// Creates the backing namespace if needed. Idempotent.
    fn ensure_namespace(&self) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        (**self).exists(key)
    }

    fn read_bytes(&self, key: &str) -> StoreResult<Vec<u8>> {
        (**self).read_bytes(key)
    }

    fn write_bytes(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        (**self).write_bytes(key, bytes)
    }

    fn ensure_namespace(&self) -> StoreResult<()> {
        (**self).ensure_namespace()
    }
}
