//! In-memory document store with brute-force embedding retrieval

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::retrieval::Similarity;
use crate::domain::store::{Document, DocumentStore};
use crate::domain::DomainError;

/// Document store held entirely in process memory
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn store_type(&self) -> &'static str {
        "in_memory"
    }

    async fn write_documents(&self, documents: Vec<Document>) -> Result<usize, DomainError> {
        let mut docs = self.documents.write().await;

        let mut seen: HashSet<&str> = docs.iter().map(|d| d.id()).collect();
        for doc in &documents {
            if !seen.insert(doc.id()) {
                return Err(DomainError::storage(format!(
                    "Document with id '{}' already exists",
                    doc.id()
                )));
            }
        }

        let count = documents.len();
        docs.extend(documents);

        Ok(count)
    }

    async fn embedding_retrieval(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        similarity: Similarity,
    ) -> Result<Vec<Document>, DomainError> {
        let docs = self.documents.read().await;

        let mut scored: Vec<(f32, &Document)> = docs
            .iter()
            .filter_map(|doc| {
                doc.embedding()
                    .map(|embedding| (similarity.score(query_embedding, embedding), doc))
            })
            .collect();

        // Stable sort: equal scores keep insertion order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(score, doc)| doc.clone().without_embedding().with_score(score))
            .collect())
    }

    async fn count_documents(&self) -> Result<usize, DomainError> {
        Ok(self.documents.read().await.len())
    }

    async fn documents(&self) -> Result<Vec<Document>, DomainError> {
        Ok(self.documents.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, embedding: Vec<f32>) -> Document {
        Document::new(id, format!("content of {id}")).with_embedding(embedding)
    }

    #[tokio::test]
    async fn test_write_and_count() {
        let store = InMemoryDocumentStore::new();

        let written = store
            .write_documents(vec![doc("a", vec![1.0, 0.0]), doc("b", vec![0.0, 1.0])])
            .await
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(store.count_documents().await.unwrap(), 2);
        assert_eq!(store.store_type(), "in_memory");
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected_without_partial_write() {
        let store = InMemoryDocumentStore::new();
        store.write_documents(vec![doc("a", vec![1.0])]).await.unwrap();

        let result = store
            .write_documents(vec![doc("b", vec![1.0]), doc("a", vec![2.0])])
            .await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
        assert_eq!(store.count_documents().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_within_batch_rejected() {
        let store = InMemoryDocumentStore::new();

        let result = store
            .write_documents(vec![doc("a", vec![1.0]), doc("a", vec![2.0])])
            .await;

        assert!(result.is_err());
        assert_eq!(store.count_documents().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_retrieval_orders_by_score() {
        let store = InMemoryDocumentStore::new();
        store
            .write_documents(vec![
                doc("low", vec![0.1, 0.0]),
                doc("high", vec![3.0, 0.0]),
                doc("mid", vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store
            .embedding_retrieval(&[1.0, 0.0], 10, Similarity::DotProduct)
            .await
            .unwrap();

        let ids: Vec<&str> = results.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        assert_eq!(results[0].score(), Some(3.0));
        assert!(results[0].embedding().is_none());
    }

    #[tokio::test]
    async fn test_retrieval_ties_keep_insertion_order() {
        let store = InMemoryDocumentStore::new();
        store
            .write_documents(vec![doc("first", vec![1.0]), doc("second", vec![1.0])])
            .await
            .unwrap();

        let results = store
            .embedding_retrieval(&[1.0], 2, Similarity::DotProduct)
            .await
            .unwrap();

        assert_eq!(results[0].id(), "first");
        assert_eq!(results[1].id(), "second");
    }

    #[tokio::test]
    async fn test_retrieval_skips_documents_without_embedding() {
        let store = InMemoryDocumentStore::new();
        store
            .write_documents(vec![Document::new("bare", "no vector"), doc("a", vec![1.0])])
            .await
            .unwrap();

        let results = store
            .embedding_retrieval(&[1.0], 10, Similarity::Cosine)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), "a");
    }

    #[tokio::test]
    async fn test_retrieval_on_empty_store() {
        let store = InMemoryDocumentStore::new();

        let results = store
            .embedding_retrieval(&[1.0, 0.0], 5, Similarity::DotProduct)
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_documents_in_insertion_order() {
        let store = InMemoryDocumentStore::new();
        store
            .write_documents(vec![doc("z", vec![1.0]), doc("a", vec![1.0])])
            .await
            .unwrap();

        let ids: Vec<String> = store
            .documents()
            .await
            .unwrap()
            .iter()
            .map(|d| d.id().to_string())
            .collect();

        assert_eq!(ids, vec!["z", "a"]);
    }
}
