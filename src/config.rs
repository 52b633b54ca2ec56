use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/rag.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub path: PathBuf,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/knowledge_base.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default result count for direct searches.
    pub top_k: usize,
    /// Default word budget for assembled contexts.
    pub max_tokens: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_tokens: 2000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub storage: StorageConfig,
    pub knowledge: KnowledgeConfig,
    pub retrieval: RetrievalConfig,
}

impl RagConfig {
    /// Load from a TOML file, then apply environment overrides.
    ///
    /// A missing file (or no path at all) means defaults; an unreadable or
    /// malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(&raw)?
            }
            _ => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Override paths and budget from `RAG_DB_PATH`, `KB_PATH` and
    /// `RAG_MAX_TOKENS`. `lookup` is the environment accessor.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db) = lookup("RAG_DB_PATH") {
            self.storage.path = PathBuf::from(db);
        }
        if let Some(kb) = lookup("KB_PATH") {
            self.knowledge.path = PathBuf::from(kb);
        }
        if let Some(raw) = lookup("RAG_MAX_TOKENS") {
            self.retrieval.max_tokens = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "RAG_MAX_TOKENS",
                value: raw.clone(),
            })?;
        }
        Ok(())
    }
}
