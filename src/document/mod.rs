pub mod document;
pub mod source;

pub use crate::types::identifiers::{ContentHash, DocumentId};
pub use document::Document;
pub use source::{Source, UnknownSource};
