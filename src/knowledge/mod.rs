pub mod loader;
pub mod schema;

pub use loader::{load_knowledge_base, KnowledgeError, KnowledgeLoader};
pub use schema::{
    Company, Competency, Contact, FaqEntry, Feature, KnowledgeBase, Partnership, Solution,
};
