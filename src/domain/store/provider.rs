//! Document store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::Document;
use crate::domain::retrieval::Similarity;
use crate::domain::DomainError;

/// Store of embedded documents that supports nearest-neighbour lookup
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Get the store type name
    fn store_type(&self) -> &'static str;

    /// Add documents; fails without writing anything if an id already exists
    async fn write_documents(&self, documents: Vec<Document>) -> Result<usize, DomainError>;

    /// Return up to `top_k` embedded documents ordered by descending score
    async fn embedding_retrieval(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        similarity: Similarity,
    ) -> Result<Vec<Document>, DomainError>;

    /// Get the total document count
    async fn count_documents(&self) -> Result<usize, DomainError>;

    /// Every stored document, in insertion order
    async fn documents(&self) -> Result<Vec<Document>, DomainError>;
}
