//! On-disk snapshot of the document store

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::InMemoryDocumentStore;
use crate::domain::store::{Document, DocumentStore};
use crate::domain::DomainError;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized documents plus the model that produced their embeddings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub embedding_model: String,
    pub created_at: DateTime<Utc>,
    pub documents: Vec<Document>,
}

impl StoreSnapshot {
    pub fn new(embedding_model: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            embedding_model: embedding_model.into(),
            created_at: Utc::now(),
            documents,
        }
    }

    /// Capture every document currently held by `store`
    pub async fn capture(
        store: &dyn DocumentStore,
        embedding_model: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(embedding_model, store.documents().await?))
    }

    pub async fn exists(path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    pub async fn load(path: &Path) -> Result<Self, DomainError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            DomainError::storage(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let snapshot: Self = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::storage(format!("Malformed snapshot {}: {}", path.display(), e))
        })?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(DomainError::storage(format!(
                "Unsupported snapshot version {} in {}",
                snapshot.version,
                path.display()
            )));
        }

        debug!(
            path = %path.display(),
            documents = snapshot.documents.len(),
            "Snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Write to a sibling temp file, then rename over `path`
    pub async fn save(&self, path: &Path) -> Result<(), DomainError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let bytes = serde_json::to_vec(self)
            .map_err(|e| DomainError::storage(format!("Failed to serialize snapshot: {}", e)))?;

        let tmp = temp_path(path);
        tokio::fs::write(&tmp, bytes).await.map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            DomainError::storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        debug!(
            path = %path.display(),
            documents = self.documents.len(),
            "Snapshot saved"
        );

        Ok(())
    }

    /// Rebuild an in-memory store from the snapshot
    pub async fn into_store(self) -> Result<InMemoryDocumentStore, DomainError> {
        let store = InMemoryDocumentStore::new();
        store.write_documents(self.documents).await?;
        Ok(store)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::corpus::Recommendation;

    fn sample_documents() -> Vec<Document> {
        vec![
            Document::from_recommendation(&Recommendation::new("Offer analgesia", "Guideline X"))
                .with_embedding(vec![0.1, 0.2, 0.3]),
            Document::from_recommendation(&Recommendation::new("Assess falls", "Guideline Y"))
                .with_embedding(vec![0.4, 0.5, 0.6]),
        ]
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("document_store.json");
        let documents = sample_documents();

        StoreSnapshot::new("embed-multilingual-v3.0", documents.clone())
            .save(&path)
            .await
            .unwrap();

        assert!(StoreSnapshot::exists(&path).await);
        assert!(!StoreSnapshot::exists(&temp_path(&path)).await);

        let loaded = StoreSnapshot::load(&path).await.unwrap();
        assert_eq!(loaded.embedding_model, "embed-multilingual-v3.0");
        assert_eq!(loaded.documents, documents);

        let store = loaded.into_store().await.unwrap();
        assert_eq!(store.count_documents().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("store.json");

        StoreSnapshot::new("m", Vec::new()).save(&path).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_capture_reads_store() {
        let store = InMemoryDocumentStore::new();
        store.write_documents(sample_documents()).await.unwrap();

        let snapshot = StoreSnapshot::capture(&store, "m").await.unwrap();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.documents.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = StoreSnapshot::load(&dir.path().join("missing.json")).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{not json").unwrap();

        let result = StoreSnapshot::load(&path).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");
        let mut snapshot = StoreSnapshot::new("m", Vec::new());
        snapshot.version = 99;
        std::fs::write(&path, serde_json::to_vec(&snapshot).unwrap()).unwrap();

        let result = StoreSnapshot::load(&path).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
