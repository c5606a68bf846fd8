//! Load-or-build of the embedded document store

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::domain::corpus::CorpusSource;
use crate::domain::embedding::{EmbeddingInputType, EmbeddingProvider, EmbeddingRequest};
use crate::domain::store::{Document, DocumentStore};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_document_count;
use crate::infrastructure::store::{InMemoryDocumentStore, StoreSnapshot};

/// Where the returned store came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrigin {
    Cache,
    Built,
}

/// Builds the document store from the corpus, or restores it from the cache file
#[derive(Debug, Clone)]
pub struct IndexingService {
    corpus: Arc<dyn CorpusSource>,
    embedder: Arc<dyn EmbeddingProvider>,
    embedding_model: String,
    input_type: EmbeddingInputType,
    cache_path: PathBuf,
}

impl IndexingService {
    pub fn new(
        corpus: Arc<dyn CorpusSource>,
        embedder: Arc<dyn EmbeddingProvider>,
        cache_path: impl Into<PathBuf>,
    ) -> Self {
        let embedding_model = embedder.default_model().to_string();

        Self {
            corpus,
            embedder,
            embedding_model,
            input_type: EmbeddingInputType::SearchDocument,
            cache_path: cache_path.into(),
        }
    }

    pub fn with_embedding(
        mut self,
        model: impl Into<String>,
        input_type: EmbeddingInputType,
    ) -> Self {
        self.embedding_model = model.into();
        self.input_type = input_type;
        self
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Restore the store from the cache file if one exists, otherwise build and persist it.
    /// A present cache is trusted as-is; the corpus is not re-read.
    pub async fn load_or_build(&self) -> Result<(InMemoryDocumentStore, IndexOrigin), DomainError> {
        if StoreSnapshot::exists(&self.cache_path).await {
            let snapshot = StoreSnapshot::load(&self.cache_path).await?;

            info!(
                path = %self.cache_path.display(),
                embedding_model = %snapshot.embedding_model,
                created_at = %snapshot.created_at,
                documents = snapshot.documents.len(),
                "Loaded document store from cache"
            );

            let store = snapshot.into_store().await?;
            record_document_count(store.count_documents().await?);
            return Ok((store, IndexOrigin::Cache));
        }

        let store = self.build().await?;
        Ok((store, IndexOrigin::Built))
    }

    /// Delete any cache file, then build from the corpus
    pub async fn rebuild(&self) -> Result<InMemoryDocumentStore, DomainError> {
        if StoreSnapshot::exists(&self.cache_path).await {
            tokio::fs::remove_file(&self.cache_path).await.map_err(|e| {
                DomainError::storage(format!(
                    "Failed to remove {}: {}",
                    self.cache_path.display(),
                    e
                ))
            })?;
            info!(path = %self.cache_path.display(), "Removed cached document store");
        }

        self.build().await
    }

    async fn build(&self) -> Result<InMemoryDocumentStore, DomainError> {
        let start = Instant::now();

        let records = self.corpus.load()?;
        let documents: Vec<Document> = records.iter().map(Document::from_recommendation).collect();

        let documents = self.embed_documents(documents).await?;

        let store = InMemoryDocumentStore::new();
        let written = store.write_documents(documents).await?;

        StoreSnapshot::capture(&store, &self.embedding_model)
            .await?
            .save(&self.cache_path)
            .await?;

        record_document_count(written);

        info!(
            corpus = %self.corpus.location(),
            path = %self.cache_path.display(),
            documents = written,
            embedding_model = %self.embedding_model,
            dimensions = ?self.embedder.dimensions(&self.embedding_model),
            duration_ms = start.elapsed().as_millis() as u64,
            "Built document store"
        );

        Ok(store)
    }

    async fn embed_documents(&self, documents: Vec<Document>) -> Result<Vec<Document>, DomainError> {
        if documents.is_empty() {
            return Ok(documents);
        }

        let texts = documents.iter().map(|d| d.content().to_string()).collect();
        let request =
            EmbeddingRequest::batch(&self.embedding_model, texts).with_input_type(self.input_type);

        let response = self.embedder.embed(request).await?;

        if response.len() != documents.len() {
            return Err(DomainError::provider(
                self.embedder.provider_name(),
                format!(
                    "Received {} embeddings for {} documents",
                    response.len(),
                    documents.len()
                ),
            ));
        }

        let mut vectors: Vec<Option<Vec<f32>>> = vec![None; documents.len()];
        for embedding in response.into_embeddings() {
            let index = embedding.index();
            let slot = vectors.get_mut(index).ok_or_else(|| {
                DomainError::provider(
                    self.embedder.provider_name(),
                    format!("Embedding index {} out of range", index),
                )
            })?;
            *slot = Some(embedding.into_vector());
        }

        documents
            .into_iter()
            .zip(vectors)
            .map(|(document, vector)| {
                vector.map(|v| document.with_embedding(v)).ok_or_else(|| {
                    DomainError::provider(
                        self.embedder.provider_name(),
                        "Embedding response is missing an index",
                    )
                })
            })
            .collect()
    }
}
