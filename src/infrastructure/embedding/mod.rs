//! Embedding provider implementations

mod cohere;

pub use cohere::{
    CohereEmbeddingProvider, DEFAULT_COHERE_BASE_URL, DEFAULT_COHERE_MODEL, MAX_TEXTS_PER_CALL,
};

// Re-export HTTP client for use by embedding providers
pub use super::llm::{HttpClient, HttpClientTrait};
