use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;

use crate::error::{Result, RoutineError};
use crate::interfaces::providers::KeyValueStore;

#[derive(QueryableByName)]
struct ValueRow {
    #[diesel(sql_type = Text)]
    value: String,
}

/// Key-value storage in a single SQLite table, one connection per operation.
pub struct SqliteKeyValueStore {
    db_path: String,
}

impl SqliteKeyValueStore {
    pub fn new(db_path: &str) -> Result<Self> {
        ensure_parent_dir(db_path)?;
        let store = Self {
            db_path: db_path.to_string(),
        };
        let mut conn = store.open_conn()?;
        ensure_table(&mut conn)?;
        Ok(store)
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    fn open_conn(&self) -> Result<SqliteConnection> {
        SqliteConnection::establish(&self.db_path).map_err(|e| RoutineError::Storage(e.to_string()))
    }
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| RoutineError::Storage(e.to_string()))?;
        }
    }
    Ok(())
}

fn ensure_table(conn: &mut SqliteConnection) -> Result<()> {
    diesel::sql_query(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
    )
    .execute(conn)
    .map_err(|e| RoutineError::Storage(e.to_string()))?;
    Ok(())
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.open_conn()?;
        ensure_table(&mut conn)?;

        let row: Option<ValueRow> = diesel::sql_query("SELECT value FROM kv_store WHERE key = ?1")
            .bind::<Text, _>(key)
            .get_result(&mut conn)
            .optional()
            .map_err(|e| RoutineError::Storage(e.to_string()))?;
        Ok(row.map(|row| row.value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.open_conn()?;
        ensure_table(&mut conn)?;

        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| RoutineError::Runtime(e.to_string()))?
            .as_secs() as i64;

        diesel::sql_query(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind::<Text, _>(key)
        .bind::<Text, _>(value)
        .bind::<BigInt, _>(ts)
        .execute(&mut conn)
        .map_err(|e| RoutineError::Storage(e.to_string()))?;

        Ok(())
    }
}
