//! Request and response bodies for the query endpoint

use serde::{Deserialize, Serialize};

use crate::domain::{Document, PipelineResult, Usage};

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Retrieved recommendation as shown to API clients
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedDocument {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl From<&Document> for RetrievedDocument {
    fn from(doc: &Document) -> Self {
        Self {
            content: doc.content().to_string(),
            source: doc.source().map(str::to_string),
            score: doc.score(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub reply: String,
    pub model: String,
    pub documents: Vec<RetrievedDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl From<PipelineResult> for QueryResponse {
    fn from(result: PipelineResult) -> Self {
        Self {
            documents: result.documents.iter().map(RetrievedDocument::from).collect(),
            reply: result.reply,
            model: result.model,
            usage: result.usage,
        }
    }
}
