//! Retrieval-augmented query pipeline

mod query;

pub use query::{ChatModelConfig, PipelineResult, QueryPipeline, QueryService};
