use kb_context::document::{ContentHash, Document, DocumentId, Source};

#[test]
fn invariant_same_content_same_id() {
    let doc1 = Document::compose(Source::Solution, "Sensors", "Sensors: IoT sensor platform");
    let doc2 = Document::compose(Source::Feature, "Other label", "Sensors: IoT sensor platform");

    // Source, category and timestamp never feed the id
    assert_eq!(doc1.id, doc2.id);
    assert_eq!(doc1.content_hash(), doc2.content_hash());
}

#[test]
fn invariant_different_content_different_id() {
    let a = DocumentId::from_content("cloud dashboard");
    let b = DocumentId::from_content("cloud dashboard ");

    assert_ne!(a, b);
}

#[test]
fn document_id_is_truncated_hex() {
    let id = DocumentId::from_content("hello world");

    assert_eq!(id.as_str().len(), 32);
    assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    // sha256("hello world") = b94d27b9934d3e08a52e52d7da7dabfa...
    assert_eq!(id.as_str(), "b94d27b9934d3e08a52e52d7da7dabfa");
}

#[test]
fn content_hash_is_prefixed_full_digest() {
    let hash = ContentHash::from_content("hello world");

    assert_eq!(
        hash.as_str(),
        "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
}

#[test]
fn source_string_round_trip() {
    for source in Source::ALL {
        let parsed: Source = source.as_str().parse().unwrap();
        assert_eq!(parsed, source);
    }

    assert!("unknown".parse::<Source>().is_err());
}

#[test]
fn source_serializes_lowercase() {
    let json = serde_json::to_string(&Source::Partnership).unwrap();
    assert_eq!(json, "\"partnership\"");

    let faq: Source = serde_json::from_str("\"faq\"").unwrap();
    assert_eq!(faq, Source::Faq);
}
