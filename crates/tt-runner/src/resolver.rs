use tracing::{info, warn};
use tt_core::DaySchedule;
use tt_source::ScheduleSource;
use tt_storage::{KeyValueStore, SnapshotCache};

/// Where the resolved schedule came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Fetched,
    Snapshot,
    Unavailable,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolveMode {
    #[default]
    Online,
    /// Serve the snapshot without touching the network.
    CacheOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub schedule: Option<DaySchedule>,
    pub origin: Origin,
}

impl Resolution {
    fn from_fallback(fallback: Option<DaySchedule>) -> Self {
        let origin = if fallback.is_some() {
            Origin::Snapshot
        } else {
            Origin::Unavailable
        };
        Self {
            schedule: fallback,
            origin,
        }
    }
}

/// One best-effort fetch per call, falling back to the last snapshot.
///
/// Nothing fails past this point: every source or cache error ends up as a
/// snapshot fallback or as [`Origin::Unavailable`].
pub struct ScheduleResolver<S, K> {
    source: S,
    cache: SnapshotCache<K>,
}

impl<S: ScheduleSource, K: KeyValueStore> ScheduleResolver<S, K> {
    pub fn new(source: S, cache: SnapshotCache<K>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &SnapshotCache<K> {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn resolve(&self, day_index: usize, offset: u32, mode: ResolveMode) -> Resolution {
        // read first: the snapshot is needed whatever the fetch does
        let fallback = self.cache.read();

        if mode == ResolveMode::CacheOnly {
            info!("offline mode, serving snapshot");
            return Resolution::from_fallback(fallback);
        }

        match self.source.fetch_today(day_index, offset).await {
            Ok(Some(fresh)) if !fresh.is_empty() => {
                self.cache.write(&fresh);
                info!("resolved {} lessons from source", fresh.len());
                Resolution {
                    schedule: Some(fresh),
                    origin: Origin::Fetched,
                }
            }
            Ok(_) => {
                info!("source has no lessons for day {day_index}, keeping snapshot");
                Resolution::from_fallback(fallback)
            }
            Err(e) => {
                warn!("fetch failed, falling back to snapshot: {e}");
                Resolution::from_fallback(fallback)
            }
        }
    }
}
