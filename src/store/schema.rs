// Table layout of the document store.
// Both tables are created idempotently; opening an existing database never
// drops rows.

pub(crate) const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        id TEXT PRIMARY KEY,
        content TEXT NOT NULL,
        source TEXT NOT NULL,
        category TEXT,
        created_at TEXT NOT NULL
    );

    -- One content hash per document until real embeddings exist
    CREATE TABLE IF NOT EXISTS embeddings (
        doc_id TEXT PRIMARY KEY,
        embedding_hash TEXT NOT NULL,
        FOREIGN KEY (doc_id) REFERENCES documents(id)
    );
"#;

pub(crate) const CLEAR_EMBEDDINGS: &str = "DELETE FROM embeddings";
pub(crate) const CLEAR_DOCUMENTS: &str = "DELETE FROM documents";

pub(crate) const UPSERT_DOCUMENT: &str =
    "INSERT OR REPLACE INTO documents (id, content, source, category, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5)";

pub(crate) const UPSERT_EMBEDDING: &str =
    "INSERT OR REPLACE INTO embeddings (doc_id, embedding_hash) VALUES (?1, ?2)";

pub(crate) const COUNT_DOCUMENTS: &str = "SELECT COUNT(*) FROM documents";

// rowid order is insertion order; a replaced row moves to the end.
pub(crate) const SCAN_DOCUMENTS: &str =
    "SELECT id, content, source, category, created_at FROM documents ORDER BY rowid";

pub(crate) const SELECT_EMBEDDING: &str =
    "SELECT embedding_hash FROM embeddings WHERE doc_id = ?1";
