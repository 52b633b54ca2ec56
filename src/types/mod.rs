pub mod context_bundle;
pub mod identifiers;

pub use context_bundle::{AssembledContext, Query, RetrievedDocument};
pub use identifiers::{ContentHash, DocumentId};
