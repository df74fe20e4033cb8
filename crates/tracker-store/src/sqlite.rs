// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::{DEFAULT_QUOTA_BYTES, Storage, StorageError, validate_storage_path};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS local_storage (
      key TEXT PRIMARY KEY,
      value TEXT NOT NULL,
      updated_at TEXT NOT NULL
    );
";

/// Local storage persisted in a SQLite file, for hosts outside a browser.
pub struct SqliteStorage {
    conn: Connection,
    quota_bytes: usize,
}

impl SqliteStorage {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_storage_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open storage at {}", path.display()))?;
        Self::bootstrap(conn)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory storage")?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            ",
        )
        .context("configure sqlite pragmas")?;
        conn.execute_batch(SCHEMA)
            .context("create local storage schema")?;
        Ok(Self {
            conn,
            quota_bytes: DEFAULT_QUOTA_BYTES,
        })
    }

    pub fn set_quota_bytes(&mut self, quota_bytes: usize) -> Result<()> {
        if quota_bytes == 0 {
            anyhow::bail!("storage quota must be positive");
        }
        self.quota_bytes = quota_bytes;
        Ok(())
    }

    pub fn quota_bytes(&self) -> usize {
        self.quota_bytes
    }

    pub fn used_bytes(&self) -> Result<usize, StorageError> {
        self.used_bytes_excluding("")
    }

    fn used_bytes_excluding(&self, key: &str) -> Result<usize, StorageError> {
        let used: i64 = self.conn.query_row(
            "
            SELECT COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0)
            FROM local_storage
            WHERE key <> ?
            ",
            params![key],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(used).unwrap_or(0))
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let needed = self.used_bytes_excluding(key)? + key.len() + value.len();
        if needed > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
                needed,
                limit: self.quota_bytes,
            });
        }

        let now = OffsetDateTime::now_utc().format(&Rfc3339)?;
        self.conn.execute(
            "
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
              value = excluded.value,
              updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?", params![key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM local_storage ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}
