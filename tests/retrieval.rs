use kb_context::document::{Document, Source};
use kb_context::selection::{KeywordScorer, RelevanceScorer, Retriever};
use kb_context::store::DocumentStore;
use kb_context::types::Query;

fn store_with(contents: &[&str]) -> DocumentStore {
    let store = DocumentStore::in_memory().unwrap();
    let docs: Vec<Document> = contents
        .iter()
        .map(|c| Document::compose(Source::Solution, "test", *c))
        .collect();
    store.replace_all(&docs).unwrap();
    store
}

fn retrieve(store: &DocumentStore, query: &str, top_k: usize) -> Vec<String> {
    Retriever::<KeywordScorer>::default()
        .retrieve(store, &Query::new(query), top_k)
        .unwrap()
        .into_iter()
        .map(|d| d.content)
        .collect()
}

#[test]
fn query_normalization_keeps_split_order() {
    let query = Query::new("  Sensor\tDASHBOARD sensor ");

    assert_eq!(query.raw, "  Sensor\tDASHBOARD sensor ");
    assert_eq!(query.terms, vec!["sensor", "dashboard", "sensor"]);
    assert!(Query::new(" \n\t ").is_empty());
}

#[test]
fn invariant_any_term_matches() {
    let store = store_with(&["IoT sensor platform", "cloud dashboard", "billing"]);

    let hits = retrieve(&store, "sensor dashboard", 5);

    assert_eq!(hits, vec!["IoT sensor platform", "cloud dashboard"]);
}

#[test]
fn matching_is_case_insensitive_substring() {
    let store = store_with(&["Mixed Reality Service", "Predictive maintenance"]);

    assert_eq!(retrieve(&store, "REALITY", 5), vec!["Mixed Reality Service"]);
    // "main" is a substring of "maintenance"
    assert_eq!(retrieve(&store, "main", 5), vec!["Predictive maintenance"]);
}

#[test]
fn matches_come_back_in_storage_order_up_to_top_k() {
    let store = store_with(&["apple 1", "pear", "apple 2", "apple 3", "apple 4"]);

    let hits = retrieve(&store, "apple", 2);

    assert_eq!(hits, vec!["apple 1", "apple 2"]);
}

#[test]
fn invariant_fallback_when_nothing_matches() {
    let store = store_with(&["first", "second", "third", "fourth"]);

    let hits = retrieve(&store, "zzz_no_such_token", 3);

    assert_eq!(hits.len(), 3.min(store.count().unwrap()));
    assert_eq!(hits, vec!["first", "second", "third"]);
}

#[test]
fn fallback_is_capped_by_store_size() {
    let store = store_with(&["only one"]);

    assert_eq!(retrieve(&store, "zzz_no_such_token", 3), vec!["only one"]);
}

#[test]
fn empty_query_uses_fallback() {
    let store = store_with(&["first", "second"]);

    assert_eq!(retrieve(&store, "", 5), vec!["first", "second"]);
    assert_eq!(retrieve(&store, "   ", 1), vec!["first"]);
}

#[test]
fn invariant_empty_store_returns_nothing() {
    let store = DocumentStore::in_memory().unwrap();

    assert!(retrieve(&store, "anything at all", 5).is_empty());
    assert!(retrieve(&store, "", 5).is_empty());
}

#[test]
fn retrieved_documents_carry_metadata() {
    let store = DocumentStore::in_memory().unwrap();
    let doc = Document::compose(
        Source::Faq,
        "What is X?",
        "Question: What is X? Answer: X is a platform.",
    );
    store.upsert(&doc).unwrap();

    let hits = Retriever::<KeywordScorer>::default()
        .retrieve(&store, &Query::new("platform"), 5)
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, doc.id.as_str());
    assert_eq!(hits[0].source, Source::Faq);
    assert_eq!(hits[0].category, "What is X?");
}

/// Scorer that only accepts exact whole-word matches.
struct WholeWordScorer;

impl RelevanceScorer for WholeWordScorer {
    fn score(&self, query: &Query, content: &str) -> f32 {
        let lower = content.to_lowercase();
        let hit = lower
            .split_whitespace()
            .any(|word| query.terms.iter().any(|t| t == word));
        if hit {
            1.0
        } else {
            0.0
        }
    }
}

#[test]
fn scorer_is_pluggable() {
    let store = store_with(&["Predictive maintenance", "main gate"]);

    let hits: Vec<String> = Retriever::new(WholeWordScorer)
        .retrieve(&store, &Query::new("main"), 5)
        .unwrap()
        .into_iter()
        .map(|d| d.content)
        .collect();

    assert_eq!(hits, vec!["main gate"]);
}

#[test]
fn keyword_scorer_is_binary() {
    let query = Query::new("sensor");

    assert_eq!(KeywordScorer.score(&query, "Sensor Hub"), 1.0);
    assert_eq!(KeywordScorer.score(&query, "Dashboard"), 0.0);
    assert_eq!(KeywordScorer.score(&Query::new(""), "Sensor Hub"), 0.0);
}
