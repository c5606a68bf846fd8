//! Domain layer - Core business logic and entities

pub mod corpus;
pub mod credentials;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod retrieval;
pub mod store;

pub use corpus::{CorpusSource, Recommendation};
pub use credentials::{Credential, CredentialProvider, CredentialType};
pub use error::DomainError;
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
pub use pipeline::{ChatModelConfig, PipelineResult, QueryPipeline, QueryService};
pub use retrieval::{EmbeddingRetriever, Similarity};
pub use store::{Document, DocumentStore};
