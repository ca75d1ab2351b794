use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::schema;
use crate::error::{TouchError, TouchResult};

/// Durable string-keyed storage. Each key holds one JSON document which is
/// always replaced whole.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> TouchResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> TouchResult<()>;

    fn remove(&self, key: &str) -> TouchResult<()>;
}

/// SQLite-backed store. The connection sits behind a mutex so writes through
/// a shared handle are applied one at a time.
pub struct SqliteKv {
    conn: Mutex<Connection>,
}

impl SqliteKv {
    /// Open (or create) the database file, creating parent directories as needed.
    pub fn open(path: &Path) -> TouchResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> TouchResult<Self> {
        Ok(Self::from_connection(schema::test_connection()?))
    }

    /// Wrap a connection that already has the schema applied.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> TouchResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TouchError::Other("storage connection lock poisoned".into()))
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> TouchResult<Option<String>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT value FROM kv_entries WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> TouchResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> TouchResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Volatile store for tests. Reads and writes can be made to fail on demand.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn entries(&self) -> TouchResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| TouchError::Other("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> TouchResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(TouchError::Other("simulated read failure".into()));
        }
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TouchResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TouchError::Other("simulated write failure".into()));
        }
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> TouchResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TouchError::Other("simulated write failure".into()));
        }
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Read and decode the JSON document under `key`. A missing or empty value is `None`.
/// Any failure is reported as `StorageRead`.
pub fn load_json<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> TouchResult<Option<T>> {
    let raw = kv.get(key).map_err(|e| read_error(key, &e))?;
    match raw {
        Some(json) if !json.trim().is_empty() => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| read_error(key, &e)),
        _ => Ok(None),
    }
}

/// Encode `value` as JSON and replace the document under `key`.
/// Any failure is reported as `StorageWrite`.
pub fn save_json<T: Serialize + ?Sized>(kv: &dyn KeyValueStore, key: &str, value: &T) -> TouchResult<()> {
    let json = serde_json::to_string(value).map_err(|e| write_error(key, &e))?;
    kv.set(key, &json).map_err(|e| write_error(key, &e))
}

fn read_error(key: &str, e: &dyn std::fmt::Display) -> TouchError {
    TouchError::StorageRead {
        key: key.to_string(),
        reason: e.to_string(),
    }
}

fn write_error(key: &str, e: &dyn std::fmt::Display) -> TouchError {
    TouchError::StorageWrite {
        key: key.to_string(),
        reason: e.to_string(),
    }
}
