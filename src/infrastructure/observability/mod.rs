//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use metrics::{
    create_metrics_router, init_metrics, record_document_count, record_embedding_request,
    record_http_request, record_llm_request, record_query, LlmRequestMetricParams,
    PrometheusMetrics,
};
