use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// One clinical practice guideline recommendation with its citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    text: String,
    source: String,
}

impl Recommendation {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Citation of the guideline the recommendation comes from
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Somewhere recommendations can be read from
pub trait CorpusSource: Send + Sync + Debug {
    /// Read every record, in file order
    fn load(&self) -> Result<Vec<Recommendation>, DomainError>;

    /// Human readable location, for logs
    fn location(&self) -> String;
}
