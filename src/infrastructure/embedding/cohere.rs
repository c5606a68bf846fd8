//! Cohere embedding provider implementation

use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::HttpClientTrait;
use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_embedding_request;

pub const DEFAULT_COHERE_BASE_URL: &str = "https://api.cohere.com";
pub const DEFAULT_COHERE_MODEL: &str = "embed-multilingual-v3.0";

/// Largest number of texts the embed endpoint accepts per call
pub const MAX_TEXTS_PER_CALL: usize = 96;

/// Known Cohere embedding models and their dimensions
const EMBEDDING_MODELS: &[(&str, usize)] = &[
    ("embed-multilingual-v3.0", 1024),
    ("embed-english-v3.0", 1024),
    ("embed-multilingual-light-v3.0", 384),
    ("embed-english-light-v3.0", 384),
];

/// Cohere embedding provider
#[derive(Debug)]
pub struct CohereEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    batch_size: usize,
}

impl<C: HttpClientTrait> CohereEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_COHERE_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            batch_size: MAX_TEXTS_PER_CALL,
        }
    }

    /// Texts sent per HTTP call; clamped to `1..=MAX_TEXTS_PER_CALL`
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_TEXTS_PER_CALL);
        self
    }

    fn embed_url(&self) -> String {
        format!("{}/v1/embed", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
            ("Accept", "application/json"),
        ]
    }

    fn build_request(&self, request: &EmbeddingRequest, texts: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "model": request.model(),
            "texts": texts,
            "input_type": request.input_type().as_str(),
        })
    }

    fn parse_response(
        &self,
        json: serde_json::Value,
        expected: usize,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let response: CohereEmbedResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("cohere", format!("Failed to parse embed response: {}", e))
        })?;

        if response.embeddings.len() != expected {
            return Err(DomainError::provider(
                "cohere",
                format!(
                    "Expected {} embeddings, received {}",
                    expected,
                    response.embeddings.len()
                ),
            ));
        }

        Ok(response.embeddings)
    }

    async fn embed_batches(&self, request: &EmbeddingRequest) -> Result<Vec<Embedding>, DomainError> {
        let texts = request.inputs();
        let mut embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size) {
            let body = self.build_request(request, batch);
            let json = self
                .client
                .post_json(&self.embed_url(), self.headers(), &body)
                .await?;

            for vector in self.parse_response(json, batch.len())? {
                embeddings.push(Embedding::new(embeddings.len(), vector));
            }
        }

        Ok(embeddings)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for CohereEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        if request.input().is_empty() {
            return Err(DomainError::validation("Embedding input cannot be empty"));
        }

        let start = Instant::now();
        let result = self.embed_batches(&request).await;

        record_embedding_request(
            self.provider_name(),
            request.model(),
            request.input().len(),
            start.elapsed(),
            result.is_ok(),
        );

        let embeddings = result?;

        debug!(
            model = %request.model(),
            input_type = %request.input_type(),
            count = embeddings.len(),
            "Embeddings received"
        );

        Ok(EmbeddingResponse::new(request.model().to_string(), embeddings))
    }

    fn provider_name(&self) -> &'static str {
        "cohere"
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_COHERE_MODEL
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        EMBEDDING_MODELS
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, dims)| *dims)
    }
}

// Cohere API types

#[derive(Debug, Deserialize)]
struct CohereEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}
