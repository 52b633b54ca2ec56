use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::identifiers::{ContentHash, DocumentId};
use super::source::Source;

/// The atomic unit of retrievable knowledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub content: String,
    pub source: Source,
    pub category: String,
    pub created_at: DateTime<Utc>, // informational only
}

impl Document {
    /// Build a Document from already composed content.
    ///
    /// The id is derived from `content` alone: source, category and the
    /// timestamp never influence it.
    pub fn compose(
        source: Source,
        category: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let id = DocumentId::from_content(&content);

        Document {
            id,
            content,
            source,
            category: category.into(),
            created_at: Utc::now(),
        }
    }

    pub fn content_hash(&self) -> ContentHash {
        ContentHash::from_content(&self.content)
    }
}
