use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

use super::{validate_key, ObjectStore};
use crate::error::{StorageError, StorageResult};

/// Objects stored as blobs in a single SQLite table keyed by (bucket, key).
pub struct SqliteStore {
    bucket: String,
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path, bucket: &str) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn, bucket)
    }

    pub fn with_connection(conn: Connection, bucket: &str) -> StorageResult<Self> {
        init_schema(&conn)?;
        Ok(SqliteStore {
            bucket: bucket.to_string(),
            conn,
        })
    }

    #[cfg(test)]
    fn list_keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM objects WHERE bucket = ?1 ORDER BY key")?;
        let keys = stmt
            .query_map(params![self.bucket], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

fn init_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS objects (
            bucket       TEXT NOT NULL,
            key          TEXT NOT NULL,
            content_type TEXT NOT NULL,
            body         BLOB NOT NULL,
            created_at   TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (bucket, key)
        );
        ",
    )?;
    Ok(())
}

impl ObjectStore for SqliteStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.conn.execute(
            "INSERT INTO objects (bucket, key, content_type, body) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(bucket, key) DO UPDATE SET
                content_type = excluded.content_type,
                body = excluded.body,
                created_at = datetime('now')",
            params![self.bucket, key, content_type, body],
        )?;
        debug!(bucket = %self.bucket, key, bytes = body.len(), "stored object");
        Ok(())
    }

    fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.conn
            .query_row(
                "SELECT body FROM objects WHERE bucket = ?1 AND key = ?2",
                params![self.bucket, key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", self.bucket, key)))
    }
}
