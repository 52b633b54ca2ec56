use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the content digest for a document id.
const ID_HEX_LEN: usize = 32;

/// Content-derived document identifier.
///
/// Two documents with byte-identical content always share an id, which is
/// what makes a full reload an idempotent upsert.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn from_content(content: &str) -> Self {
        let digest = Sha256::digest(content.as_bytes());
        let mut hex = hex::encode(digest);
        hex.truncate(ID_HEX_LEN);
        DocumentId(hex)
    }

    /// Wrap an id read back from storage. No validation is done.
    pub fn from_stored(raw: String) -> Self {
        DocumentId(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full content hash kept in the embeddings table.
///
/// Placeholder for a real embedding: it lets the schema carry one record per
/// document without any ranking depending on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn from_content(content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        ContentHash(format!("sha256:{hex}"))
    }

    pub fn from_stored(raw: String) -> Self {
        ContentHash(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
