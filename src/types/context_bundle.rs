use serde::{Deserialize, Serialize};

use crate::document::{Document, Source};

/// A normalized free-text query.
/// Normalization rules:
/// - Lowercase
/// - Split on whitespace
/// - Term order is the split order; duplicates are kept
/// - No terms means no keyword filter
#[derive(Debug, Clone)]
pub struct Query {
    pub raw: String,
    pub terms: Vec<String>,
}

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let terms = raw
            .to_lowercase()
            .split_whitespace()
            .map(|s| s.to_string())
            .collect();

        Self { raw, terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// A document as handed to retrieval callers.
/// Fully self-contained and serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: String,
    pub content: String,
    pub source: Source,
    pub category: String,
}

impl From<Document> for RetrievedDocument {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id.as_str().to_string(),
            content: doc.content,
            source: doc.source,
            category: doc.category,
        }
    }
}

/// The assembled context string together with how it was built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledContext {
    pub text: String,

    pub budget: usize,
    pub words_used: usize,

    pub documents_considered: usize,
    pub documents_included: usize,
    pub documents_dropped: usize,
}
