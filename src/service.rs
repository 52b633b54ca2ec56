//! Composition root for the knowledge subsystem.
//!
//! [`KnowledgeService`] owns the document store for the life of the process
//! and tracks whether it is fit to answer queries. Startup failures can be
//! fatal ([`KnowledgeService::try_start`]) or leave the service running in an
//! explicit unavailable state ([`KnowledgeService::start`]); either way a
//! caller can always tell "not initialized" apart from "no matches".

use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::RagConfig;
use crate::knowledge::{KnowledgeError, KnowledgeLoader};
use crate::selection::{ContextAssembler, KeywordScorer, WordCounter};
use crate::store::{DocumentStore, StoreError};
use crate::types::context_bundle::{AssembledContext, Query, RetrievedDocument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Availability {
    Ready,
    Unavailable { reason: String },
}

impl Availability {
    pub fn is_ready(&self) -> bool {
        matches!(self, Availability::Ready)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Knowledge subsystem unavailable: {reason}")]
    Unavailable { reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub ready: bool,
    pub document_count: usize,
}

pub struct KnowledgeService {
    config: RagConfig,
    store: Option<DocumentStore>,
    loader: KnowledgeLoader,
    assembler: ContextAssembler<KeywordScorer, WordCounter>,
    availability: RwLock<Availability>,
}

impl KnowledgeService {
    /// Open the store and load the knowledge base, failing on any error.
    pub fn try_start(config: &RagConfig) -> Result<Self, ServiceError> {
        let store = DocumentStore::initialize(&config.storage.path)?;
        let loader = KnowledgeLoader::new(config.knowledge.path.clone());

        if let Err(e) = loader.load(&store) {
            store.close();
            return Err(e.into());
        }

        Ok(Self::build(config.clone(), Some(store), loader, Availability::Ready))
    }

    /// Like [`try_start`](Self::try_start) but never fails: errors are logged
    /// and the service comes up unavailable.
    ///
    /// If the store opened but the load failed, the store is kept so a later
    /// [`reload`](Self::reload) can recover.
    pub fn start(config: &RagConfig) -> Self {
        let loader = KnowledgeLoader::new(config.knowledge.path.clone());

        let store = match DocumentStore::initialize(&config.storage.path) {
            Ok(store) => store,
            Err(e) => {
                error!(
                    error = %e,
                    path = %config.storage.path.display(),
                    "failed to open document store"
                );
                let availability = Availability::Unavailable { reason: e.to_string() };
                return Self::build(config.clone(), None, loader, availability);
            }
        };

        let availability = match loader.load(&store) {
            Ok(_) => Availability::Ready,
            Err(e) => {
                error!(
                    error = %e,
                    path = %loader.path().display(),
                    "failed to load knowledge base"
                );
                Availability::Unavailable { reason: e.to_string() }
            }
        };

        if !availability.is_ready() {
            warn!("knowledge subsystem running degraded");
        }

        Self::build(config.clone(), Some(store), loader, availability)
    }

    /// Wrap an already populated store. The service is ready immediately.
    pub fn with_store(config: RagConfig, store: DocumentStore) -> Self {
        let loader = KnowledgeLoader::new(config.knowledge.path.clone());
        Self::build(config, Some(store), loader, Availability::Ready)
    }

    fn build(
        config: RagConfig,
        store: Option<DocumentStore>,
        loader: KnowledgeLoader,
        availability: Availability,
    ) -> Self {
        Self {
            config,
            store,
            loader,
            assembler: ContextAssembler::default(),
            availability: RwLock::new(availability),
        }
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    pub fn availability(&self) -> Availability {
        self.availability.read().clone()
    }

    pub fn health(&self) -> Health {
        let store = match self.ready_store() {
            Ok(store) => store,
            Err(_) => {
                return Health {
                    ready: false,
                    document_count: 0,
                }
            }
        };

        match store.count() {
            Ok(document_count) => Health {
                ready: true,
                document_count,
            },
            Err(e) => {
                warn!(error = %e, "health check could not count documents");
                Health {
                    ready: false,
                    document_count: 0,
                }
            }
        }
    }

    pub fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, ServiceError> {
        let store = self.ready_store()?;
        let query = Query::new(query);
        Ok(self.assembler.retriever().retrieve(store, &query, top_k)?)
    }

    pub fn assemble(
        &self,
        query: &str,
        max_tokens: usize,
    ) -> Result<AssembledContext, ServiceError> {
        let store = self.ready_store()?;
        let query = Query::new(query);
        Ok(self.assembler.assemble(store, &query, max_tokens)?)
    }

    pub fn get_context(&self, query: &str, max_tokens: usize) -> Result<String, ServiceError> {
        Ok(self.assemble(query, max_tokens)?.text)
    }

    /// Rebuild the store from the knowledge-base file.
    ///
    /// On failure the previous contents stay in place and availability is
    /// left as it was. On success the service becomes ready.
    pub fn reload(&self) -> Result<usize, ServiceError> {
        let store = match &self.store {
            Some(store) if store.is_open() => store,
            _ => {
                return Err(ServiceError::Unavailable {
                    reason: "document store is not open".to_string(),
                })
            }
        };

        let count = self.loader.load(store)?;
        *self.availability.write() = Availability::Ready;
        info!(documents = count, "knowledge base reloaded");
        Ok(count)
    }

    /// Close the store. Later queries report the service as unavailable.
    pub fn close(&self) {
        if let Some(store) = &self.store {
            store.close();
        }
        *self.availability.write() = Availability::Unavailable {
            reason: "closed".to_string(),
        };
    }

    fn ready_store(&self) -> Result<&DocumentStore, ServiceError> {
        if let Availability::Unavailable { reason } = &*self.availability.read() {
            return Err(ServiceError::Unavailable {
                reason: reason.clone(),
            });
        }

        match &self.store {
            Some(store) if store.is_open() => Ok(store),
            _ => Err(ServiceError::Unavailable {
                reason: "document store is not open".to_string(),
            }),
        }
    }
}
