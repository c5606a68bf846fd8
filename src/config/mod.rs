//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, CohereConfig, CorpusConfig, HttpConfig, LogFormat, LoggingConfig, MetricsConfig,
    OpenAiConfig, RetrievalConfig, ServerConfig,
};
