use tracing::{debug, info, warn};
use tt_core::DaySchedule;

use crate::traits::KeyValueStore;
use crate::{StoreError, StoreResult};

pub const DEFAULT_SNAPSHOT_KEY: &str = "today";

/// Replaces path separators so the key is a single flat name in any backend.
pub fn sanitize_key(key: &str) -> String {
    key.replace(['/', '\\'], "-")
}

/// Last successfully fetched day, persisted as JSON under one key.
///
/// Reads never fail: anything unreadable is a cache miss. Writes are
/// best-effort and only logged on failure.
pub struct SnapshotCache<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_SNAPSHOT_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: sanitize_key(key),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn read(&self) -> Option<DaySchedule> {
        let bytes = match self.store.read_bytes(&self.key) {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound(_)) => {
                debug!("no snapshot under {:?}", self.key);
                return None;
            }
            Err(e) => {
                warn!("snapshot {:?} unreadable: {e}", self.key);
                return None;
            }
        };
        match serde_json::from_slice::<DaySchedule>(&bytes) {
            Ok(schedule) => Some(schedule),
            Err(e) => {
                warn!("snapshot {:?} is malformed, ignoring: {e}", self.key);
                None
            }
        }
    }

    pub fn write(&self, schedule: &DaySchedule) {
        if let Err(e) = self.try_write(schedule) {
            warn!("failed to cache snapshot {:?}: {e}", self.key);
        }
    }

    pub fn try_write(&self, schedule: &DaySchedule) -> StoreResult<()> {
        self.store.ensure_namespace()?;
        let bytes = serde_json::to_vec(schedule).map_err(|e| StoreError::backend("serializing snapshot", e))?;
        info!("caching {} lessons to {:?}", schedule.len(), self.key);
        self.store.write_bytes(&self.key, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FsStore, InMemoryStore};
    use tempfile::tempdir;
    use tt_core::{ChangeInfo, Lesson};

    fn day() -> DaySchedule {
        let mut sub = Lesson::new("Chemia", "08:55 - 09:40".parse().unwrap());
        sub.change = ChangeInfo::Substituted { subject: Some("Biologia".into()) };
        sub.room = Some("12".into());
        DaySchedule::new(vec![Lesson::new("Matematyka", "08:00 - 08:45".parse().unwrap()), sub])
    }

    #[test]
    fn sanitizes_separators() {
        assert_eq!(sanitize_key("2024/05/06"), "2024-05-06");
        assert_eq!(sanitize_key("a\\b"), "a-b");
        assert_eq!(sanitize_key("today"), "today");
    }

    #[test]
    fn read_of_empty_store_is_absent() {
        let cache = SnapshotCache::new(InMemoryStore::new());
        assert!(cache.read().is_none());
    }

    #[test]
    fn write_then_read_returns_same_day() {
        let cache = SnapshotCache::new(InMemoryStore::new());
        cache.write(&day());
        assert_eq!(cache.read(), Some(day()));
    }

    #[test]
    fn last_write_wins() {
        let cache = SnapshotCache::new(InMemoryStore::new());
        cache.write(&day());
        let later = DaySchedule::new(vec![Lesson::new("WF", "10:00 - 10:45".parse().unwrap())]);
        cache.write(&later);
        assert_eq!(cache.read(), Some(later));
        assert_eq!(cache.store().keys(), vec!["today".to_string()]);
    }

    #[test]
    fn malformed_snapshot_is_a_miss() {
        let cache = SnapshotCache::new(InMemoryStore::with_entry("today", "{not json"));
        assert!(cache.read().is_none());
        let wrong_shape = SnapshotCache::new(InMemoryStore::with_entry("today", r#"[{"name":"X","time":"late"}]"#));
        assert!(wrong_shape.read().is_none());
    }

    #[test]
    fn unreadable_store_is_a_miss() {
        let store = InMemoryStore::with_entry("today", serde_json::to_vec(&day()).unwrap());
        store.set_fail_reads(true);
        assert!(SnapshotCache::new(store).read().is_none());
    }

    #[test]
    fn poisoned_store_is_a_miss_and_write_is_swallowed() {
        let store = InMemoryStore::with_entry("today", serde_json::to_vec(&day()).unwrap());
        store.poison();
        let cache = SnapshotCache::new(store);
        assert!(cache.read().is_none());
        cache.write(&day());
        assert!(matches!(
            cache.try_write(&day()),
            Err(StoreError::Backend { operation: "locking", .. })
        ));
    }

    #[test]
    fn failed_write_is_swallowed_but_reported_by_try_write() {
        let store = InMemoryStore::new();
        store.set_fail_writes(true);
        let cache = SnapshotCache::new(store);
        cache.write(&day());
        assert!(cache.try_write(&day()).is_err());
        assert!(cache.read().is_none());
    }

    #[test]
    fn key_with_separator_is_stored_flat() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::with_key(FsStore::new(dir.path().join("cache")), "class/3b");
        assert_eq!(cache.key(), "class-3b");
        cache.write(&day());
        assert!(dir.path().join("cache").join("class-3b").is_file());
        assert_eq!(cache.read(), Some(day()));
    }

    #[test]
    fn first_write_creates_namespace() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("timetableCache");
        let cache = SnapshotCache::new(FsStore::new(root.clone()));
        assert!(cache.read().is_none());
        cache.write(&day());
        assert!(root.join("today").is_file());
    }
}
