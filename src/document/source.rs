use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Coarse knowledge-base section a document was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Company,
    Contact,
    Solution,
    Feature,
    Competency,
    Partnership,
    Faq,
}

#[derive(Debug, Error)]
#[error("Unknown document source: {0}")]
pub struct UnknownSource(pub String);

impl Source {
    pub const ALL: [Source; 7] = [
        Source::Company,
        Source::Contact,
        Source::Solution,
        Source::Feature,
        Source::Competency,
        Source::Partnership,
        Source::Faq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Company => "company",
            Source::Contact => "contact",
            Source::Solution => "solution",
            Source::Feature => "feature",
            Source::Competency => "competency",
            Source::Partnership => "partnership",
            Source::Faq => "faq",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}
