use tracing::debug;

use crate::store::{DocumentStore, StoreError};
use crate::types::context_bundle::{Query, RetrievedDocument};
use super::ranking::{KeywordScorer, RelevanceScorer};

/// Finds documents for a query by keyword presence, falling back to the
/// first documents in storage order when nothing matches.
#[derive(Debug, Default, Clone)]
pub struct Retriever<S = KeywordScorer> {
    scorer: S,
}

impl<S> Retriever<S>
where
    S: RelevanceScorer,
{
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Up to `top_k` documents, in storage order.
    ///
    /// An empty query or a query with no hits yields the fallback set, so a
    /// non-empty store always returns something. Only an empty store returns
    /// an empty list.
    pub fn retrieve(
        &self,
        store: &DocumentStore,
        query: &Query,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, StoreError> {
        let matched = if query.is_empty() {
            Vec::new()
        } else {
            store.scan(|content| self.scorer.matches(query, content), top_k)?
        };

        if !matched.is_empty() {
            debug!(terms = query.terms.len(), matched = matched.len(), top_k, "keyword retrieval");
            return Ok(matched.into_iter().map(RetrievedDocument::from).collect());
        }

        let fallback = store.scan_all(top_k)?;
        debug!(
            query = %query.raw,
            terms = query.terms.len(),
            returned = fallback.len(),
            top_k,
            "no keyword match, using storage-order fallback"
        );

        Ok(fallback.into_iter().map(RetrievedDocument::from).collect())
    }
}
