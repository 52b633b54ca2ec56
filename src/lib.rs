//! Knowledge-base retrieval and bounded context assembly for support chatbots.
//!
//! `kb-context` flattens a structured company knowledge base into a SQLite
//! document store, retrieves documents by keyword presence and assembles a
//! word-budgeted context string for a downstream language model. Document
//! ids are content hashes, so reloading identical input is idempotent.

pub mod config;
pub mod document;
pub mod knowledge;
pub mod selection;
pub mod service;
pub mod store;
pub mod types;

pub use config::RagConfig;
pub use service::{Availability, Health, KnowledgeService, ServiceError};
