use std::collections::HashMap;
use std::path::PathBuf;

use kb_context::config::{ConfigError, RagConfig};
use tempfile::tempdir;

#[test]
fn defaults_match_documented_values() {
    let config = RagConfig::default();

    assert_eq!(config.storage.path, PathBuf::from("data/rag.db"));
    assert_eq!(config.knowledge.path, PathBuf::from("data/knowledge_base.json"));
    assert_eq!(config.retrieval.top_k, 5);
    assert_eq!(config.retrieval.max_tokens, 2000);
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = RagConfig::from_toml(
        r#"
        [knowledge]
        path = "/srv/kb.json"

        [retrieval]
        max_tokens = 500
        "#,
    )
    .unwrap();

    assert_eq!(config.knowledge.path, PathBuf::from("/srv/kb.json"));
    assert_eq!(config.retrieval.max_tokens, 500);
    assert_eq!(config.retrieval.top_k, 5);
    assert_eq!(config.storage.path, PathBuf::from("data/rag.db"));
}

#[test]
fn malformed_toml_is_an_error() {
    let result = RagConfig::from_toml("[retrieval]\nmax_tokens = \"lots\"");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_means_defaults() {
    let dir = tempdir().unwrap();
    let absent = dir.path().join("absent.toml");

    let config = RagConfig::load(Some(absent.as_path())).unwrap();

    // Only environment overrides may differ from the defaults.
    let mut expected = RagConfig::default();
    expected.apply_env(|key| std::env::var(key).ok()).unwrap();
    assert_eq!(config, expected);
}

#[test]
fn file_is_read_when_present() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rag.toml");
    std::fs::write(&path, "[storage]\npath = \"/var/lib/rag/rag.db\"\n").unwrap();

    let config = RagConfig::load(Some(path.as_path())).unwrap();

    if std::env::var("RAG_DB_PATH").is_err() {
        assert_eq!(config.storage.path, PathBuf::from("/var/lib/rag/rag.db"));
    }
}

#[test]
fn env_overrides_take_precedence() {
    let env: HashMap<&str, &str> = [
        ("RAG_DB_PATH", "/tmp/override.db"),
        ("KB_PATH", "/tmp/override.json"),
        ("RAG_MAX_TOKENS", " 750 "),
    ]
    .into_iter()
    .collect();

    let mut config = RagConfig::default();
    config
        .apply_env(|key| env.get(key).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.storage.path, PathBuf::from("/tmp/override.db"));
    assert_eq!(config.knowledge.path, PathBuf::from("/tmp/override.json"));
    assert_eq!(config.retrieval.max_tokens, 750);
}

#[test]
fn invalid_env_budget_is_rejected() {
    let mut config = RagConfig::default();

    let result = config.apply_env(|key| (key == "RAG_MAX_TOKENS").then(|| "many".to_string()));

    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnv { key: "RAG_MAX_TOKENS", .. })
    ));
}
