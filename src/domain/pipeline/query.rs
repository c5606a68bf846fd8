//! Embed query → retrieve → build prompt → chat model

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::embedding::{EmbeddingInputType, EmbeddingProvider, EmbeddingRequest};
use crate::domain::llm::{LlmProvider, LlmRequest, Usage};
use crate::domain::prompt::PromptBuilder;
use crate::domain::retrieval::EmbeddingRetriever;
use crate::domain::store::Document;
use crate::domain::DomainError;

/// Chat model settings used for every pipeline run
#[derive(Debug, Clone)]
pub struct ChatModelConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatModelConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// Text of the model's first reply, verbatim
    pub reply: String,
    pub documents: Vec<Document>,
    pub model: String,
    pub usage: Option<Usage>,
}

/// Answers a user query
#[async_trait]
pub trait QueryService: Send + Sync {
    async fn answer(&self, query: &str) -> Result<PipelineResult, DomainError>;
}

#[derive(Debug)]
pub struct QueryPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    embedding_model: String,
    query_input_type: EmbeddingInputType,
    retriever: EmbeddingRetriever,
    prompt_builder: PromptBuilder,
    llm: Arc<dyn LlmProvider>,
    chat: ChatModelConfig,
}

impl QueryPipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        retriever: EmbeddingRetriever,
        prompt_builder: PromptBuilder,
        llm: Arc<dyn LlmProvider>,
        chat: ChatModelConfig,
    ) -> Self {
        let embedding_model = embedder.default_model().to_string();

        Self {
            embedder,
            embedding_model,
            query_input_type: EmbeddingInputType::SearchDocument,
            retriever,
            prompt_builder,
            llm,
            chat,
        }
    }

    /// Model and input type used to embed the query
    pub fn with_query_embedding(
        mut self,
        model: impl Into<String>,
        input_type: EmbeddingInputType,
    ) -> Self {
        self.embedding_model = model.into();
        self.query_input_type = input_type;
        self
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest::single(&self.embedding_model, query)
            .with_input_type(self.query_input_type);

        let response = self.embedder.embed(request).await?;

        response
            .into_embeddings()
            .into_iter()
            .next()
            .map(|e| e.into_vector())
            .ok_or_else(|| {
                DomainError::provider(
                    self.embedder.provider_name(),
                    "No embedding returned for query",
                )
            })
    }

    pub async fn run(&self, query: &str) -> Result<PipelineResult, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("Query cannot be empty"));
        }

        let start = Instant::now();

        let query_embedding = self.embed_query(query).await?;
        let documents = self.retriever.retrieve(&query_embedding).await?;
        let messages = self.prompt_builder.build(query, &documents)?;

        debug!(
            documents = documents.len(),
            messages = messages.len(),
            "Prompt built"
        );

        let request = LlmRequest::builder()
            .messages(messages)
            .temperature(self.chat.temperature)
            .max_tokens(self.chat.max_tokens)
            .build();

        let response = self.llm.chat(&self.chat.model, request).await?;

        let reply = response
            .content()
            .ok_or_else(|| {
                DomainError::provider(self.llm.provider_name(), "No replies in response")
            })?
            .to_string();

        info!(
            documents = documents.len(),
            model = %response.model,
            duration_ms = start.elapsed().as_millis() as u64,
            "Query answered"
        );

        Ok(PipelineResult {
            reply,
            documents,
            model: response.model,
            usage: response.usage,
        })
    }
}

#[async_trait]
impl QueryService for QueryPipeline {
    async fn answer(&self, query: &str) -> Result<PipelineResult, DomainError> {
        self.run(query).await
    }
}
