use crate::types::context_bundle::Query;

/// Decides how relevant a stored document is to a query.
///
/// Retrieval only asks whether the score is positive; it never sorts by it.
/// A vector-similarity scorer can be dropped in here without the assembler
/// noticing.
pub trait RelevanceScorer {
    fn score(&self, query: &Query, content: &str) -> f32;

    fn matches(&self, query: &Query, content: &str) -> bool {
        self.score(query, content) > 0.0
    }
}

/// v0: case-insensitive substring match on ANY query term.
///
/// Scores 1.0 on a hit and 0.0 otherwise. Stop words match as readily as
/// anything else, so long queries match broadly.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordScorer;

impl RelevanceScorer for KeywordScorer {
    fn score(&self, query: &Query, content: &str) -> f32 {
        if query.terms.is_empty() {
            return 0.0;
        }

        let content_lower = content.to_lowercase();
        let hit = query
            .terms
            .iter()
            .any(|term| content_lower.contains(term.as_str()));

        if hit {
            1.0
        } else {
            0.0
        }
    }
}

pub trait TokenCounter {
    fn count_tokens(&self, content: &str) -> usize;
}

/// v0: whitespace-delimited word count as a stand-in for model tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count_tokens(&self, content: &str) -> usize {
        content.split_whitespace().count()
    }
}
