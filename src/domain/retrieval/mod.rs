//! Nearest-neighbour retrieval over the document store

mod retriever;
mod similarity;

pub use retriever::{EmbeddingRetriever, DEFAULT_TOP_K};
pub use similarity::Similarity;
