use std::sync::Arc;

use tracing::debug;

use super::Similarity;
use crate::domain::store::{Document, DocumentStore};
use crate::domain::DomainError;

/// Number of documents returned when nothing else is configured
pub const DEFAULT_TOP_K: usize = 10;

/// Retrieves the documents closest to a query embedding
#[derive(Debug, Clone)]
pub struct EmbeddingRetriever {
    store: Arc<dyn DocumentStore>,
    top_k: usize,
    similarity: Similarity,
}

impl EmbeddingRetriever {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            top_k: DEFAULT_TOP_K,
            similarity: Similarity::default(),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Result<Self, DomainError> {
        if top_k == 0 {
            return Err(DomainError::validation("top_k must be greater than 0"));
        }
        self.top_k = top_k;
        Ok(self)
    }

    pub fn with_similarity(mut self, similarity: Similarity) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn similarity(&self) -> Similarity {
        self.similarity
    }

    pub async fn retrieve(&self, query_embedding: &[f32]) -> Result<Vec<Document>, DomainError> {
        let documents = self
            .store
            .embedding_retrieval(query_embedding, self.top_k, self.similarity)
            .await?;

        debug!(
            top_k = self.top_k,
            similarity = %self.similarity,
            returned = documents.len(),
            "Retrieved documents"
        );

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::InMemoryDocumentStore;

    async fn store_with(count: usize) -> Arc<dyn DocumentStore> {
        let store = InMemoryDocumentStore::new();
        let documents = (0..count)
            .map(|i| {
                Document::new(format!("doc-{i}"), format!("text {i}"))
                    .with_embedding(vec![i as f32, 1.0])
            })
            .collect();
        store.write_documents(documents).await.unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_defaults() {
        let retriever = EmbeddingRetriever::new(store_with(0).await);

        assert_eq!(retriever.top_k(), DEFAULT_TOP_K);
        assert_eq!(retriever.similarity(), Similarity::DotProduct);
    }

    #[tokio::test]
    async fn test_zero_top_k_rejected() {
        let result = EmbeddingRetriever::new(store_with(0).await).with_top_k(0);
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_default_top_k_caps_results() {
        let retriever = EmbeddingRetriever::new(store_with(15).await);

        let documents = retriever.retrieve(&[1.0, 0.0]).await.unwrap();

        assert_eq!(documents.len(), DEFAULT_TOP_K);
        assert_eq!(documents[0].id(), "doc-14");
    }

    #[tokio::test]
    async fn test_custom_top_k() {
        let retriever = EmbeddingRetriever::new(store_with(5).await)
            .with_top_k(2)
            .unwrap();

        let documents = retriever.retrieve(&[1.0, 0.0]).await.unwrap();

        assert_eq!(documents.len(), 2);
        assert!(documents[0].score() >= documents[1].score());
    }
}
