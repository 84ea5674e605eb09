use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use tt_core::{select, ClockTime, DaySchedule, DisplayMode, Selection};
use tt_source::{HttpScheduleSource, ScheduleSource};
use tt_storage::{FsStore, KeyValueStore, SnapshotCache};
use tt_storage_sqlite::SqliteStore;

use crate::{render, CacheBackend, Config, Origin, ResolveMode, ScheduleResolver};

/// Inputs of one display refresh.
#[derive(Clone, Copy, Debug)]
pub struct ShowRequest {
    pub now: ClockTime,
    pub day_index: usize,
    pub mode: DisplayMode,
    pub resolve: ResolveMode,
}

#[derive(Clone, Debug)]
pub struct Shown {
    pub origin: Origin,
    pub selection: Selection,
    pub text: String,
}

pub struct Runner<S = HttpScheduleSource> {
    pub cfg: Config,
    resolver: ScheduleResolver<S, Box<dyn KeyValueStore>>,
}

impl Runner<HttpScheduleSource> {
    /// Loads the config (writing the default one when missing) and wires the HTTP source.
    pub fn open(config_path: &Path) -> Result<Self> {
        let cfg = if config_path.exists() {
            Config::load_from(config_path)?
        } else {
            let cfg = Config::default();
            cfg.save_to(config_path)?;
            info!("wrote default config to {}", config_path.display());
            cfg
        };
        let source =
            HttpScheduleSource::new(cfg.source.base_url.clone(), cfg.timeout()).context("build http client")?;
        Self::with_source(cfg, source)
    }

    /// Writes the default config unless one exists. Returns whether a file was created.
    pub fn init(config_path: &Path) -> Result<bool> {
        if config_path.exists() {
            return Ok(false);
        }
        Config::default().save_to(config_path)?;
        Ok(true)
    }
}

impl<S: ScheduleSource> Runner<S> {
    pub fn with_source(cfg: Config, source: S) -> Result<Self> {
        let store = open_store(&cfg)?;
        let cache = SnapshotCache::with_key(store, &cfg.cache.key);
        Ok(Self {
            cfg,
            resolver: ScheduleResolver::new(source, cache),
        })
    }

    pub fn cached(&self) -> Option<DaySchedule> {
        self.resolver.cache().read()
    }

    pub async fn show(&self, req: ShowRequest) -> Shown {
        let resolution = self
            .resolver
            .resolve(req.day_index, self.cfg.source.offset, req.resolve)
            .await;
        info!("schedule origin: {:?}", resolution.origin);

        let selection = select(
            resolution.schedule.as_ref(),
            req.now,
            req.mode.capacity(),
            &self.cfg.groups(),
            &self.cfg.excluded(),
        );
        let text = render(&selection, resolution.origin, req.mode, &self.cfg.render_options());
        Shown {
            origin: resolution.origin,
            selection,
            text,
        }
    }
}

pub fn open_store(cfg: &Config) -> Result<Box<dyn KeyValueStore>> {
    match cfg.cache.backend {
        CacheBackend::Fs => Ok(Box::new(FsStore::new(cfg.cache_dir()))),
        CacheBackend::Sqlite => {
            let path: PathBuf = cfg.sqlite_path();
            let store = SqliteStore::open(&path, &cfg.cache_namespace())?;
            Ok(Box::new(store))
        }
    }
}
