pub mod budgeting;
pub mod ranking;
pub mod retrieval;

use crate::store::{DocumentStore, StoreError};
use crate::types::context_bundle::{AssembledContext, Query};
pub use budgeting::{apply_budget, format_snippet, BudgetResult};
pub use ranking::{KeywordScorer, RelevanceScorer, TokenCounter, WordCounter};
pub use retrieval::Retriever;

/// First line of every assembled context, present even when nothing fits.
pub const CONTEXT_HEADER: &str = "Relevant information:\n\n";

/// Documents requested from the retriever per context, independent of budget.
pub const CONTEXT_TOP_K: usize = 5;

pub struct ContextAssembler<S, T> {
	retriever: Retriever<S>,
	tokenizer: T,
}

impl Default for ContextAssembler<KeywordScorer, WordCounter> {
	fn default() -> Self {
		Self {
			retriever: Retriever::default(),
			tokenizer: WordCounter,
		}
	}
}

impl<S, T> ContextAssembler<S, T>
where
	S: RelevanceScorer,
	T: TokenCounter,
{
	pub fn new(retriever: Retriever<S>, tokenizer: T) -> Self {
		Self { retriever, tokenizer }
	}

	pub fn retriever(&self) -> &Retriever<S> {
		&self.retriever
	}

	pub fn assemble(
		&self,
		store: &DocumentStore,
		query: &Query,
		max_tokens: usize,
	) -> Result<AssembledContext, StoreError> {
		// 1. Retrieval Phase
		let docs = self.retriever.retrieve(store, query, CONTEXT_TOP_K)?;

		// 2. Budgeting Phase
		let BudgetResult {
			text,
			words_used,
			documents_included,
			documents_dropped,
		} = apply_budget(&docs, CONTEXT_HEADER, max_tokens, &self.tokenizer);

		debug_assert!(words_used <= max_tokens);

		Ok(AssembledContext {
			text,
			budget: max_tokens,
			words_used,
			documents_considered: docs.len(),
			documents_included,
			documents_dropped,
		})
	}

	/// Context string for the language-model prompt.
	pub fn get_context(
		&self,
		store: &DocumentStore,
		query: &Query,
		max_tokens: usize,
	) -> Result<String, StoreError> {
		Ok(self.assemble(store, query, max_tokens)?.text)
	}
}
