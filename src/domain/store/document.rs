//! Document entity stored with its embedding

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::corpus::Recommendation;

/// Metadata key holding the guideline citation
pub const SOURCE_META_KEY: &str = "source";

/// A unit of retrievable text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    content: String,
    #[serde(default)]
    meta: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    embedding: Option<Vec<f32>>,
    /// Similarity to the query, set on retrieval results only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<f32>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            meta: HashMap::new(),
            embedding: None,
            score: None,
        }
    }

    /// Wrap a recommendation, keeping its citation as `source` metadata
    pub fn from_recommendation(recommendation: &Recommendation) -> Self {
        Self::new(Uuid::new_v4().to_string(), recommendation.text()).with_meta(
            SOURCE_META_KEY,
            serde_json::Value::String(recommendation.source().to_string()),
        )
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// Drop the vector, e.g. before handing results to callers
    pub fn without_embedding(mut self) -> Self {
        self.embedding = None;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn meta(&self) -> &HashMap<String, serde_json::Value> {
        &self.meta
    }

    /// Citation string, if the document carries one
    pub fn source(&self) -> Option<&str> {
        self.meta.get(SOURCE_META_KEY).and_then(|v| v.as_str())
    }

    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }

    pub fn score(&self) -> Option<f32> {
        self.score
    }
}
