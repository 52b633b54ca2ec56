use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::document::{Document, Source};
use crate::store::{DocumentStore, StoreError};
use super::schema::KnowledgeBase;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge base {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed knowledge base: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl KnowledgeBase {
    pub fn from_json(raw: &str) -> Result<Self, KnowledgeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read and parse the whole file before anything else happens.
    pub fn from_path(path: &Path) -> Result<Self, KnowledgeError> {
        let raw = fs::read_to_string(path).map_err(|source| KnowledgeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Flatten into one document per company summary, contact block,
    /// solution, feature, competency, partnership and FAQ entry.
    ///
    /// Output order is fixed by the input order, which in turn fixes the
    /// storage order retrieval sees.
    pub fn documents(&self) -> Vec<Document> {
        let mut docs = Vec::new();

        let company = &self.company;
        docs.push(Document::compose(
            Source::Company,
            "Company",
            format!("Company: {}. {}", company.name, company.description),
        ));

        let contact = &company.contact;
        docs.push(Document::compose(
            Source::Contact,
            "Contact",
            format!(
                "Contact: {}, Phone: {}, Email: {}",
                contact.address, contact.phone, contact.email
            ),
        ));

        for solution in &self.solutions {
            docs.push(Document::compose(
                Source::Solution,
                solution.name.clone(),
                format!("{}: {}", solution.name, solution.description),
            ));

            for feature in &solution.features {
                let label = format!("{} - {}", solution.name, feature.name);
                let content = format!("{label}: {}", feature.description);
                docs.push(Document::compose(Source::Feature, label, content));
            }
        }

        for competency in &self.competencies {
            docs.push(Document::compose(
                Source::Competency,
                competency.name.clone(),
                format!("{}: {}", competency.name, competency.description),
            ));
        }

        for partner in &self.partnerships {
            docs.push(Document::compose(
                Source::Partnership,
                partner.name.clone(),
                format!(
                    "Partner: {} ({}). {}",
                    partner.name, partner.status, partner.description
                ),
            ));
        }

        for entry in &self.faq {
            docs.push(Document::compose(
                Source::Faq,
                entry.question.clone(),
                format!("Question: {} Answer: {}", entry.question, entry.answer),
            ));
        }

        docs
    }
}

/// Rebuilds a [`DocumentStore`] from a knowledge-base file.
#[derive(Debug, Clone)]
pub struct KnowledgeLoader {
    path: PathBuf,
}

impl KnowledgeLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the knowledge base and replace the store contents with it.
    ///
    /// Parsing completes before the store is touched, and the rebuild itself
    /// is one transaction: a failure leaves the previous contents in place.
    /// Returns the number of stored documents.
    pub fn load(&self, store: &DocumentStore) -> Result<usize, KnowledgeError> {
        let kb = KnowledgeBase::from_path(&self.path)?;
        let count = load_knowledge_base(store, &kb)?;

        info!(path = %self.path.display(), documents = count, "knowledge base loaded");
        Ok(count)
    }
}

/// Replace the store contents with the documents of an already parsed
/// knowledge base.
pub fn load_knowledge_base(
    store: &DocumentStore,
    kb: &KnowledgeBase,
) -> Result<usize, KnowledgeError> {
    let docs = kb.documents();
    debug!(derived = docs.len(), "rebuilding document store");

    Ok(store.replace_all(&docs)?)
}
