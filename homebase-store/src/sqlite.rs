//! SQLite-backed document store.
//!
//! Every collection shares one `documents` table: a row holds the
//! collection name, the record id and the document fields serialized as a
//! JSON object. Rows are read back in insertion order and filters are
//! evaluated in process, so query semantics match [`MemoryStore`](crate::MemoryStore)
//! exactly.

use std::path::Path;

use async_trait::async_trait;
use homebase_core::RecordId;
use parking_lot::Mutex;
use rusqlite::{params, Connection};

use crate::{DocumentStore, Fields, Filter, Projection, StoreError, StoredDocument, ID_FIELD};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS documents (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    id TEXT NOT NULL UNIQUE,
    body TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);";

/// Persistent [`DocumentStore`] over a single SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the file cannot be opened or the
    /// table cannot be created.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        // WAL keeps readers unblocked while a write is in flight
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Self::init(conn)
    }

    /// Open a private in-memory database. Nothing survives the store.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if SQLite cannot be initialised.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Every document in `collection`, oldest first.
    fn scan(conn: &Connection, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let mut stmt =
            conn.prepare("SELECT id, body FROM documents WHERE collection = ?1 ORDER BY seq")?;
        let rows = stmt.query_map(params![collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let docs = rows
            .map(|row| {
                let (id, body) = row?;
                decode(collection, &id, &body)
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        Ok(docs)
    }
}

fn decode(collection: &str, id: &str, body: &str) -> Result<StoredDocument, StoreError> {
    let invalid = |reason: String| StoreError::InvalidDocument {
        collection: collection.to_owned(),
        reason,
    };
    let id: RecordId = id.parse::<RecordId>().map_err(|e| invalid(e.to_string()))?;
    let fields: Fields =
        serde_json::from_str(body).map_err(|e| invalid(format!("document {id}: {e}")))?;
    Ok(StoredDocument::new(id, fields))
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let conn = self.conn.lock();
        Ok(Self::scan(&conn, collection)?.into_iter().find(|d| filter.matches(d)))
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: Option<&Projection>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let conn = self.conn.lock();
        Ok(Self::scan(&conn, collection)?
            .into_iter()
            .filter(|d| filter.matches(d))
            .map(|d| match projection {
                Some(p) => p.apply(&d),
                None => d,
            })
            .collect())
    }

    async fn insert_one(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<StoredDocument, StoreError> {
        if fields.contains_key(ID_FIELD) {
            return Err(StoreError::InvalidDocument {
                collection: collection.to_owned(),
                reason: format!("field '{ID_FIELD}' is assigned by the store"),
            });
        }
        let body = serde_json::to_string(&fields).map_err(|e| StoreError::InvalidDocument {
            collection: collection.to_owned(),
            reason: e.to_string(),
        })?;
        let doc = StoredDocument::new(RecordId::new(), fields);
        self.conn.lock().execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
            params![collection, doc.id.to_string(), body],
        )?;
        tracing::debug!(collection, id = %doc.id, "document inserted");
        Ok(doc)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let conn = self.conn.lock();
        let Some(target) = Self::scan(&conn, collection)?.into_iter().find(|d| filter.matches(d))
        else {
            return Ok(0);
        };
        let removed = conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, target.id.to_string()],
        )?;
        tracing::debug!(collection, id = %target.id, "document deleted");
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.conn
            .lock()
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map(|_| ())
            .map_err(|e| StoreError::Unavailable { reason: e.to_string() })
    }
}
