use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::embedding::EmbeddingInputType;
use crate::domain::retrieval::{Similarity, DEFAULT_TOP_K};
use crate::infrastructure::embedding::MAX_TEXTS_PER_CALL;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub corpus: CorpusConfig,
    pub cohere: CohereConfig,
    pub openai: OpenAiConfig,
    pub retrieval: RetrievalConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Prometheus metrics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Metrics endpoint path
    pub path: String,
}

/// Recommendation CSV and the store snapshot built from it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub path: PathBuf,
    /// Delete this file to force re-embedding
    pub cache_path: PathBuf,
    pub text_column: String,
    pub source_column: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CohereConfig {
    /// Falls back to `COHERE_API_KEY` when unset
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub document_input_type: EmbeddingInputType,
    pub query_input_type: EmbeddingInputType,
    /// Texts per `/v1/embed` call, capped at the API limit
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Falls back to `OPENAI_API_KEY` when unset
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub similarity: Similarity,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout for outbound API calls; none when unset
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("recommendations.csv"),
            cache_path: PathBuf::from("document_store.json"),
            text_column: "Recommendation".to_string(),
            source_column: "Source".to_string(),
        }
    }
}

impl Default for CohereConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.cohere.com".to_string(),
            model: "embed-multilingual-v3.0".to_string(),
            document_input_type: EmbeddingInputType::SearchDocument,
            query_input_type: EmbeddingInputType::SearchDocument,
            batch_size: MAX_TEXTS_PER_CALL,
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4-turbo-2024-04-09".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            similarity: Similarity::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.corpus.text_column, "Recommendation");
        assert_eq!(config.corpus.source_column, "Source");
        assert_eq!(config.cohere.model, "embed-multilingual-v3.0");
        assert_eq!(config.cohere.query_input_type, EmbeddingInputType::SearchDocument);
        assert_eq!(config.cohere.batch_size, 96);
        assert_eq!(config.openai.model, "gpt-4-turbo-2024-04-09");
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(config.retrieval.similarity, Similarity::DotProduct);
        assert!(config.http.timeout_secs.is_none());
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_partial_sources_keep_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("openai.model", "gpt-4o")
            .unwrap()
            .set_override("retrieval.similarity", "cosine")
            .unwrap()
            .set_override("cohere.query_input_type", "search_query")
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.base_url, "https://api.openai.com");
        assert_eq!(config.retrieval.similarity, Similarity::Cosine);
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(config.cohere.query_input_type, EmbeddingInputType::SearchQuery);
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.server.port, 8080);
    }
}
