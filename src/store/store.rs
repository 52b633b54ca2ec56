use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::{debug, warn};

use crate::document::{ContentHash, Document, DocumentId, Source};
use super::schema;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Document store is closed")]
    Closed,
    #[error("Invalid stored row for document {id}: {reason}")]
    InvalidRow { id: String, reason: String },
}

/// SQLite-backed table of documents plus their embedding hashes.
///
/// The store owns a single connection. Every operation takes the connection
/// lock for its whole duration, so a `replace_all` is never observed half
/// done by a concurrent `scan`.
pub struct DocumentStore {
    conn: Mutex<Option<Connection>>,
}

impl DocumentStore {
    /// Open (or create) the store at `path`, creating missing parent
    /// directories. Safe to call on an existing store.
    pub fn initialize(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "document store opened");
        Self::from_connection(conn)
    }

    /// Volatile store, used by tests and by callers that rebuild on every start.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(schema::CREATE_TABLES)?;
        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    pub fn is_open(&self) -> bool {
        self.conn.lock().is_some()
    }

    /// Delete every document and embedding hash.
    pub fn clear(&self) -> Result<(), StoreError> {
        let guard = self.conn.lock();
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        clear_rows(conn)
    }

    /// Insert `doc`, replacing any row with the same id.
    pub fn upsert(&self, doc: &Document) -> Result<(), StoreError> {
        let guard = self.conn.lock();
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        upsert_row(conn, doc)
    }

    /// Clear the store and insert `docs` as one transaction.
    ///
    /// Returns the document count after commit. On any error the transaction
    /// is rolled back and the previous contents remain.
    pub fn replace_all(&self, docs: &[Document]) -> Result<usize, StoreError> {
        let mut guard = self.conn.lock();
        let conn = guard.as_mut().ok_or(StoreError::Closed)?;

        let tx = conn.transaction()?;
        clear_rows(&tx)?;
        for doc in docs {
            upsert_row(&tx, doc)?;
        }
        let count = count_rows(&tx)?;
        tx.commit()?;

        Ok(count)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let guard = self.conn.lock();
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        count_rows(conn)
    }

    /// Up to `limit` documents whose content satisfies `predicate`, in
    /// storage order.
    pub fn scan<P>(&self, mut predicate: P, limit: usize) -> Result<Vec<Document>, StoreError>
    where
        P: FnMut(&str) -> bool,
    {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let guard = self.conn.lock();
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;

        let mut stmt = conn.prepare(schema::SCAN_DOCUMENTS)?;
        let mut rows = stmt.query([])?;

        let mut found = Vec::with_capacity(limit.min(64));
        while let Some(row) = rows.next()? {
            let content: String = row.get(1)?;
            if !predicate(&content) {
                continue;
            }
            found.push(document_from_row(row, content)?);
            if found.len() >= limit {
                break;
            }
        }

        Ok(found)
    }

    /// Up to `limit` documents in storage order, regardless of content.
    pub fn scan_all(&self, limit: usize) -> Result<Vec<Document>, StoreError> {
        self.scan(|_| true, limit)
    }

    pub fn embedding_hash(&self, id: &DocumentId) -> Result<Option<ContentHash>, StoreError> {
        let guard = self.conn.lock();
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;

        let hash = conn
            .query_row(schema::SELECT_EMBEDDING, params![id.as_str()], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;

        Ok(hash.map(ContentHash::from_stored))
    }

    /// Release the connection. A no-op when already closed.
    pub fn close(&self) {
        let Some(conn) = self.conn.lock().take() else {
            return;
        };

        if let Err((_, e)) = conn.close() {
            warn!(error = %e, "document store did not close cleanly");
        } else {
            debug!("document store closed");
        }
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("open", &self.is_open())
            .finish()
    }
}

fn clear_rows(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(schema::CLEAR_EMBEDDINGS, [])?;
    conn.execute(schema::CLEAR_DOCUMENTS, [])?;
    Ok(())
}

fn upsert_row(conn: &Connection, doc: &Document) -> Result<(), StoreError> {
    conn.execute(
        schema::UPSERT_DOCUMENT,
        params![
            doc.id.as_str(),
            doc.content,
            doc.source.as_str(),
            doc.category,
            doc.created_at.to_rfc3339(),
        ],
    )?;
    conn.execute(
        schema::UPSERT_EMBEDDING,
        params![doc.id.as_str(), doc.content_hash().as_str()],
    )?;
    Ok(())
}

fn count_rows(conn: &Connection) -> Result<usize, StoreError> {
    let count: i64 = conn.query_row(schema::COUNT_DOCUMENTS, [], |row| row.get(0))?;
    Ok(count as usize)
}

fn document_from_row(row: &Row<'_>, content: String) -> Result<Document, StoreError> {
    let id: String = row.get(0)?;
    let source: String = row.get(2)?;
    let category: Option<String> = row.get(3)?;
    let created_at: String = row.get(4)?;

    let source = source.parse::<Source>().map_err(|e| StoreError::InvalidRow {
        id: id.clone(),
        reason: e.to_string(),
    })?;

    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidRow {
            id: id.clone(),
            reason: format!("bad created_at: {e}"),
        })?;

    Ok(Document {
        id: DocumentId::from_stored(id),
        content,
        source,
        category: category.unwrap_or_default(),
        created_at,
    })
}
