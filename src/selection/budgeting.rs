use crate::types::context_bundle::RetrievedDocument;
use super::ranking::TokenCounter;

pub struct BudgetResult {
    pub text: String,
    pub words_used: usize,
    pub documents_included: usize,
    pub documents_dropped: usize,
}

/// `[category] content` followed by a blank line.
pub fn format_snippet(doc: &RetrievedDocument) -> String {
    format!("[{}] {}\n\n", doc.category, doc.content)
}

/// Append whole snippets to `header` until the next one would push the
/// running count past `budget`.
///
/// Stops at the first snippet that does not fit; later, shorter documents are
/// dropped too. The header itself is not counted.
pub fn apply_budget<T>(
    docs: &[RetrievedDocument],
    header: &str,
    budget: usize,
    counter: &T,
) -> BudgetResult
where
    T: TokenCounter,
{
    let mut text = String::from(header);
    let mut words_used = 0;
    let mut documents_included = 0;

    for doc in docs {
        let snippet = format_snippet(doc);
        let prospective = words_used + counter.count_tokens(&snippet);
        if prospective > budget {
            break;
        }

        text.push_str(&snippet);
        words_used = prospective;
        documents_included += 1;
    }

    BudgetResult {
        text,
        words_used,
        documents_included,
        documents_dropped: docs.len() - documents_included,
    }
}
