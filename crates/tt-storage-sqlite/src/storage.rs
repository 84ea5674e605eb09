use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tt_storage::{KeyValueStore, StoreError, StoreResult};

/// Key-value store backed by a single SQLite table. Keys are scoped by namespace.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    namespace: String,
}

impl SqliteStore {
    pub fn open(db_path: &Path, namespace: &str) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(db_path).with_context(|| format!("open sqlite db {}", db_path.display()))?;
        Self::init(conn, namespace)
    }

    pub fn open_in_memory(namespace: &str) -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
        Self::init(conn, namespace)
    }

    fn init(conn: Connection, namespace: &str) -> Result<Self> {
        let init_sql = include_str!("../migrations/0001_init.sql");
        conn.execute_batch(init_sql).context("apply kv schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
            namespace: namespace.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| StoreError::backend("locking", e))
    }
}

impl KeyValueStore for SqliteStore {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        let conn = self.conn()?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM kv_entries WHERE namespace = ?1 AND key = ?2",
                params![self.namespace, key],
                |r| r.get(0),
            )
            .optional()
            .map_err(|e| StoreError::backend("checking key", e))?;
        Ok(found.is_some())
    }

    fn read_bytes(&self, key: &str) -> StoreResult<Vec<u8>> {
        let conn = self.conn()?;
        let value: Option<Vec<u8>> = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE namespace = ?1 AND key = ?2",
                params![self.namespace, key],
                |r| r.get(0),
            )
            .optional()
            .map_err(|e| StoreError::backend("reading key", e))?;
        value.ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn write_bytes(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_entries(namespace, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![self.namespace, key, bytes, now_unix()],
        )
        .map_err(|e| StoreError::backend("writing key", e))?;
        Ok(())
    }

    fn ensure_namespace(&self) -> StoreResult<()> {
        // namespaces are a column; the table exists once the store is open
        Ok(())
    }
}

fn now_unix() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
