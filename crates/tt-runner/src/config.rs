use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tt_core::{DisplayMode, GroupFilter};
use tt_source::DEFAULT_BASE_URL;
use tt_storage::DEFAULT_SNAPSHOT_KEY;

use crate::RenderOptions;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub student: StudentConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    /// Student-group offset understood by the API.
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentConfig {
    /// Distribution tags (PE group, language, ...) the student attends.
    pub groups: Vec<String>,
    /// Lesson names never shown.
    pub excluded: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    #[default]
    Fs,
    Sqlite,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub dir: String,
    pub key: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Join the room code onto the time line instead of a separate column.
    pub room_pipe: bool,
    pub pipe_text: String,
    pub reversed_order: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            offset: 0,
            timeout_seconds: None,
        }
    }
}

impl Default for StudentConfig {
    fn default() -> Self {
        Self {
            groups: vec![],
            excluded: vec!["Religia".to_string()],
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Fs,
            dir: "~/.cache/tt/timetableCache".to_string(),
            key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Small,
            room_pipe: false,
            pipe_text: " | ".to_string(),
            reversed_order: false,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde("~/.config/tt/tt.toml").to_string())
    }

    pub fn cache_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.cache.dir).to_string())
    }

    /// SQLite file used when the sqlite backend is selected; the namespace is the directory name.
    pub fn sqlite_path(&self) -> PathBuf {
        let dir = self.cache_dir();
        dir.parent().map(Path::to_path_buf).unwrap_or_default().join("tt.db")
    }

    pub fn cache_namespace(&self) -> String {
        self.cache_dir()
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("timetableCache")
            .to_string()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    pub fn groups(&self) -> GroupFilter {
        self.student.groups.iter().cloned().collect()
    }

    pub fn excluded(&self) -> BTreeSet<String> {
        self.student.excluded.iter().cloned().collect()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            room_pipe: self.display.room_pipe,
            pipe_text: self.display.pipe_text.clone(),
            reversed_order: self.display.reversed_order,
        }
    }
}
