//! Guideline RAG
//!
//! Retrieval-augmented summaries of clinical practice guideline recommendations:
//! - CSV corpus embedded with Cohere and cached on disk
//! - In-memory nearest-neighbour retrieval
//! - OpenAI chat completion over a fixed clinical prompt
//! - Single-page web form plus a JSON endpoint

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use domain::embedding::EmbeddingProvider;
use domain::prompt::PromptBuilder;
use domain::{
    ChatModelConfig, CredentialProvider, CredentialType, DocumentStore, DomainError,
    EmbeddingRetriever, LlmProvider, QueryPipeline,
};
use infrastructure::{
    corpus::CsvCorpus,
    credentials::{ConfigCredentialProvider, EnvCredentialProvider},
    embedding::CohereEmbeddingProvider,
    llm::{HttpClient, OpenAiProvider},
    services::IndexingService,
};

/// Configured keys first, then `COHERE_API_KEY` / `OPENAI_API_KEY`
pub fn create_credential_provider(config: &AppConfig) -> ConfigCredentialProvider {
    ConfigCredentialProvider::new(EnvCredentialProvider::default())
        .with_key(CredentialType::Cohere, config.cohere.api_key.as_deref())
        .with_key(CredentialType::OpenAi, config.openai.api_key.as_deref())
}

fn create_http_client(config: &AppConfig) -> Result<HttpClient, DomainError> {
    match config.http.timeout_secs {
        Some(secs) => HttpClient::with_timeout(Duration::from_secs(secs)),
        None => Ok(HttpClient::new()),
    }
}

pub async fn create_embedding_provider(
    config: &AppConfig,
    credentials: &dyn CredentialProvider,
) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    let credential = credentials
        .get_credential(CredentialType::Cohere)
        .await
        .context("Cohere API key is required")?;

    let provider = CohereEmbeddingProvider::with_base_url(
        create_http_client(config)?,
        credential.api_key(),
        &config.cohere.base_url,
    )
    .with_batch_size(config.cohere.batch_size);

    Ok(Arc::new(provider))
}

pub async fn create_llm_provider(
    config: &AppConfig,
    credentials: &dyn CredentialProvider,
) -> anyhow::Result<Arc<dyn LlmProvider>> {
    let credential = credentials
        .get_credential(CredentialType::OpenAi)
        .await
        .context("OpenAI API key is required")?;

    let provider = OpenAiProvider::with_base_url(
        create_http_client(config)?,
        credential.api_key(),
        &config.openai.base_url,
    );

    Ok(Arc::new(provider))
}

pub fn create_indexing_service(
    config: &AppConfig,
    embedder: Arc<dyn EmbeddingProvider>,
) -> IndexingService {
    let corpus = CsvCorpus::new(&config.corpus.path)
        .with_columns(&config.corpus.text_column, &config.corpus.source_column);

    IndexingService::new(Arc::new(corpus), embedder, &config.corpus.cache_path)
        .with_embedding(&config.cohere.model, config.cohere.document_input_type)
}

/// Resolve credentials, load or build the document store and assemble the query pipeline
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let credentials = create_credential_provider(config);
    let embedder = create_embedding_provider(config, &credentials).await?;
    let llm = create_llm_provider(config, &credentials).await?;

    let (store, origin) = create_indexing_service(config, embedder.clone())
        .load_or_build()
        .await
        .context("Failed to load or build the document store")?;
    let store: Arc<dyn DocumentStore> = Arc::new(store);

    info!(
        origin = ?origin,
        documents = store.count_documents().await?,
        "Document store ready"
    );

    let retriever = EmbeddingRetriever::new(store.clone())
        .with_top_k(config.retrieval.top_k)?
        .with_similarity(config.retrieval.similarity);

    info!(
        top_k = retriever.top_k(),
        similarity = %retriever.similarity(),
        "Retriever configured"
    );

    let chat = ChatModelConfig {
        model: config.openai.model.clone(),
        temperature: config.openai.temperature,
        max_tokens: config.openai.max_tokens,
    };

    let pipeline = QueryPipeline::new(embedder, retriever, PromptBuilder::default(), llm, chat)
        .with_query_embedding(&config.cohere.model, config.cohere.query_input_type);

    Ok(AppState::new(Arc::new(pipeline), store))
}
